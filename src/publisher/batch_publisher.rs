use super::batch::Batch;
use super::{StreamClient, StreamEntry};
use crate::error::{Error, Result};
use crate::filter::FilterSet;
use crate::reader::Record;

/// Upper bound on entries in one `PutRecords` request.
pub const MAX_BATCH_SIZE: usize = 500;

/// Every entry goes to the same partition key, so all records land on one shard.
// TODO: derive the key from the record (e.g. a hash of eventID) once consumers no longer rely on
// single-shard ordering.
pub const DEFAULT_PARTITION_KEY: &str = "key";

type EncodeFn = fn(&Record) -> serde_json::Result<Vec<u8>>;

/// Counters for one [`BatchPublisher::publish`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub published: usize,
    pub filtered: usize,
    pub skipped: usize,
    pub batches: usize,
}

/// Filters records and publishes the rest to a stream in batches of at most `batch_size`.
pub struct BatchPublisher<'a, C: StreamClient> {
    client: &'a C,
    batch_size: usize,
    encode: EncodeFn,
}

fn encode_record(record: &Record) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(record)
}

impl<'a, C: StreamClient> BatchPublisher<'a, C> {
    pub fn new(client: &'a C, batch_size: usize) -> Self {
        debug_assert!((1..=MAX_BATCH_SIZE).contains(&batch_size));
        Self {
            client,
            batch_size,
            encode: encode_record,
        }
    }

    #[cfg(test)]
    fn with_encoder(mut self, encode: EncodeFn) -> Self {
        self.encode = encode;
        self
    }

    /// Publishes every record the filters don't match, in order.
    ///
    /// Records that fail to encode are logged and skipped. A rejected batch fails the whole call
    /// and nothing after it is sent; batches already sent stay sent.
    pub async fn publish(&self, records: &[Record], filters: &FilterSet) -> Result<PublishSummary> {
        let mut summary = PublishSummary::default();
        let mut batch = Batch::new(self.client, self.batch_size);

        for record in records {
            if filters.matches(record) {
                summary.filtered += 1;
                continue;
            }

            log::debug!("Writing record to stream: {record:?}");
            let data = match (self.encode)(record).map_err(Error::Encode) {
                Ok(data) => data,
                Err(e) => {
                    log::error!("Error marshalling record ({record:?}) to json: {e}");
                    summary.skipped += 1;
                    continue;
                }
            };

            batch
                .add_entry(StreamEntry::new(data, DEFAULT_PARTITION_KEY))
                .await?;
            summary.published += 1;
        }
        batch.flush().await?;

        summary.batches = batch.get_flushed_batches();
        Ok(summary)
    }
}
