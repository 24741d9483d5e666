use std::path::PathBuf;

use tracing::debug;

use crate::application::collection_run::CollectionRunCommand;
use crate::args::OutputFormat;
use crate::aws::AwsSettings;
use crate::config::RunSettings;

pub(super) struct RunPlan {
    pub(super) aws: AwsSettings,
    pub(super) command: CollectionRunCommand,
    pub(super) output: Option<PathBuf>,
    pub(super) output_format: OutputFormat,
}

impl RunPlan {
    pub(super) fn from_settings(settings: RunSettings) -> Self {
        debug!(
            "Run plan: region {}, tables {:?}, {:?}",
            settings.aws.region, settings.tables, settings.collector
        );
        Self {
            aws: settings.aws,
            command: CollectionRunCommand::new(settings.collector, settings.tables),
            output: settings.output,
            output_format: settings.output_format,
        }
    }
}
