use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_kinesis::{
    Client,
    config::{Builder, Region},
    primitives::Blob,
    operation::put_records::PutRecordsOutput,
    types::PutRecordsRequestEntry,
};

use crate::error::{Error, Result};
use crate::publisher::{StreamClient, StreamEntry};

/// Publishes batches to one Kinesis data stream.
pub struct KinesisStreamClient {
    client: Client,
    stream_name: String,
}

impl KinesisStreamClient {
    pub fn new(base_config: &SdkConfig, region_id: &str, stream_name: &str) -> Self {
        let config = Builder::from(base_config)
            .region(Region::new(region_id.to_owned()))
            .build();
        Self {
            client: Client::from_conf(config),
            stream_name: stream_name.to_owned(),
        }
    }

    fn publish_error(&self, source: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::Publish {
            stream: self.stream_name.clone(),
            source: Box::new(source),
        }
    }
}

#[async_trait]
impl StreamClient for KinesisStreamClient {
    fn get_stream_name(&self) -> &str {
        &self.stream_name
    }

    async fn put_records(&self, entries: Vec<StreamEntry>) -> Result<()> {
        let total = entries.len();
        let records = entries
            .into_iter()
            .map(|entry| {
                PutRecordsRequestEntry::builder()
                    .data(Blob::new(entry.data))
                    .partition_key(entry.partition_key)
                    .build()
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.publish_error(e))?;

        let output = self
            .client
            .put_records()
            .stream_name(&self.stream_name)
            .set_records(Some(records))
            .send()
            .await
            .map_err(|e| {
                log::error!("Error pushing records to kinesis: {e:?}");
                self.publish_error(e)
            })?;

        check_output(&self.stream_name, &output, total)
    }
}

/// Fails when any entry of the response was rejected, whether the response reports it through
/// `FailedRecordCount`, a per-entry error code, or both.
fn check_output(stream_name: &str, output: &PutRecordsOutput, total: usize) -> Result<()> {
    let reported = usize::try_from(output.failed_record_count().unwrap_or(0)).unwrap_or(0);
    let with_error_code = output
        .records()
        .iter()
        .filter(|result| result.error_code().is_some())
        .count();
    let failed = reported.max(with_error_code);
    if failed == 0 {
        return Ok(());
    }

    let first_error = output
        .records()
        .iter()
        .find_map(|result| {
            result
                .error_code()
                .map(|code| format!("{code}: {}", result.error_message().unwrap_or_default()))
        })
        .unwrap_or_else(|| "unknown".to_owned());
    log::error!("Kinesis rejected {failed} of {total} records in stream {stream_name}: {first_error}");
    Err(Error::PartialPublish {
        stream: stream_name.to_owned(),
        failed,
        total,
        first_error,
    })
}
