mod config;
mod error;
mod filter;
mod handler;
mod publisher;
mod reader;
mod utils;

#[cfg(test)]
mod test_support;

use anyhow::{Result, anyhow};
use aws_config::BehaviorVersion;
use flexi_logger::Logger;
use lambda_runtime::{LambdaEvent, service_fn};

use config::{Config, EventType};
use handler::Dispatcher;
use utils::{KinesisStreamClient, S3Event, S3ObjectStore, SnsEvent};

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = if config::debug_logging_requested() {
        "debug"
    } else {
        "info"
    };
    let _logger = Logger::try_with_env_or_str(log_level)?
        .log_to_stdout()
        .use_utc()
        .format(flexi_logger::detailed_format)
        .start()?;

    let config = Config::from_env().inspect_err(|e| log::error!("Invalid config: {e}"))?;
    log::debug!("Running with config: {config:?}");
    if config.get_event_filters().is_empty() {
        log::info!("No event filters configured; every record will be published.");
    }
    for filter in config.get_event_filters().iter() {
        log::info!(
            "Excluding records with eventName {} or eventSource {}.",
            filter.get_event_name(),
            filter.get_event_source()
        );
    }

    let sdk_config = aws_config::defaults(BehaviorVersion::v2025_08_07())
        .load()
        .await;
    let stream_client = KinesisStreamClient::new(
        &sdk_config,
        config.get_kinesis_region(),
        config.get_kinesis_stream(),
    );
    let object_store = S3ObjectStore::new(sdk_config, config.get_s3_role_arn()).await;
    let dispatcher = Dispatcher::new(
        object_store,
        stream_client,
        config.get_event_filters().clone(),
        config.get_kinesis_batch_size(),
    );
    let dispatcher = &dispatcher;

    let result = match config.get_event_type() {
        EventType::S3 => {
            log::info!("Starting S3 handler.");
            lambda_runtime::run(service_fn(move |event: LambdaEvent<S3Event>| async move {
                dispatcher
                    .handle_s3_event(&event.payload)
                    .await
                    .map_err(invocation_error)
            }))
            .await
        }
        EventType::Sns => {
            log::info!("Starting SNS handler.");
            lambda_runtime::run(service_fn(move |event: LambdaEvent<SnsEvent>| async move {
                dispatcher
                    .handle_sns_event(&event.payload)
                    .await
                    .map_err(invocation_error)
            }))
            .await
        }
    };
    result.map_err(|e| anyhow!(e))
}

fn invocation_error(e: error::Error) -> lambda_runtime::Error {
    log::error!("Invocation failed ({:?} error): {e}", e.kind());
    e.into()
}
