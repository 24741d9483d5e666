mod plan;

use std::sync::Arc;

use clap::Parser;

use crate::application::collection_run;
use crate::args::CollectArgs;
use crate::aws::build_clients;
use crate::config::{load_config, resolve_settings};
use crate::error::AppResult;
use crate::sinks::OutputReporter;
use plan::RunPlan;

pub(crate) fn run() -> AppResult<()> {
    let args = CollectArgs::parse();

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: CollectArgs) -> AppResult<()> {
    let config = load_config(args.config.as_deref())?;
    let settings = resolve_settings(args, config)?;
    let plan = RunPlan::from_settings(settings);

    let (cloudwatch, dynamodb) = build_clients(&plan.aws)?;
    let reporter = OutputReporter::new(plan.output_format, plan.output);
    collection_run::execute(plan.command, &dynamodb, Arc::new(cloudwatch), &reporter).await?;
    Ok(())
}
