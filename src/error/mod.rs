mod app;
mod aws;
mod config;
mod sink;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use aws::{AwsError, AwsService};
pub use config::ConfigError;
pub use sink::SinkError;
pub use validation::ValidationError;
