use super::ObjectStore;
use crate::error::Result;
use crate::filter::FilterSet;
use crate::publisher::{BatchPublisher, PublishSummary, StreamClient};
use crate::reader::read_object;
use crate::utils::{ObjectReference, S3Event};

/// Streams the log files named by storage events into the destination stream.
///
/// Built once at startup and shared by every invocation; nothing in it changes after
/// construction.
pub struct Dispatcher<S: ObjectStore, C: StreamClient> {
    object_store: S,
    stream_client: C,
    filters: FilterSet,
    batch_size: usize,
}

impl<S: ObjectStore, C: StreamClient> Dispatcher<S, C> {
    pub const fn new(object_store: S, stream_client: C, filters: FilterSet, batch_size: usize) -> Self {
        Self {
            object_store,
            stream_client,
            filters,
            batch_size,
        }
    }

    /// Streams every object in the event, in order. The first failure stops the remaining
    /// objects and is returned so the runtime retries the invocation.
    pub async fn handle_s3_event(&self, event: &S3Event) -> Result<()> {
        log::debug!("Handling S3 event: {event:?}");
        for object in event.object_references() {
            self.stream_object(&object).await?;
        }
        Ok(())
    }

    pub async fn stream_object(&self, object: &ObjectReference) -> Result<PublishSummary> {
        log::info!(
            "Streaming {object} to {}.",
            self.stream_client.get_stream_name()
        );

        let fetched = self.object_store.fetch(object).await?;
        let records = read_object(&fetched)?;
        let summary = BatchPublisher::new(&self.stream_client, self.batch_size)
            .publish(&records, &self.filters)
            .await
            .inspect_err(|e| log::error!("Failed to stream {object}: {e}"))?;

        log::info!(
            "Streamed {object}: {} records published in {} batches, {} filtered, {} skipped.",
            summary.published,
            summary.batches,
            summary.filtered,
            summary.skipped
        );
        Ok(summary)
    }

    #[cfg(test)]
    pub(crate) const fn get_object_store(&self) -> &S {
        &self.object_store
    }

    #[cfg(test)]
    pub(crate) const fn get_stream_client(&self) -> &C {
        &self.stream_client
    }
}
