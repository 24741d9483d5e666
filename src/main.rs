mod application;
mod args;
mod aws;
mod catalog;
mod collector;
mod config;
mod entry;
mod error;
mod logger;
mod metrics;
mod sinks;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
