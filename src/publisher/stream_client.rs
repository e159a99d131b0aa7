use async_trait::async_trait;

use crate::error::Result;

/// One entry of a `PutRecords` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEntry {
    pub data: Vec<u8>,
    pub partition_key: String,
}

impl StreamEntry {
    pub fn new(data: Vec<u8>, partition_key: impl Into<String>) -> Self {
        Self {
            data,
            partition_key: partition_key.into(),
        }
    }
}

/// Destination stream for published batches.
#[async_trait]
pub trait StreamClient: Send + Sync {
    fn get_stream_name(&self) -> &str;

    /// Sends one batch. A response that reports a failure for any entry is an error.
    async fn put_records(&self, entries: Vec<StreamEntry>) -> Result<()>;
}
