use super::{Dispatcher, ObjectStore};
use crate::error::{Error, Result};
use crate::publisher::StreamClient;
use crate::utils::{S3Event, SnsEvent, SnsRecord};

/// Decodes the S3 event carried in an SNS record's message body.
pub fn unwrap_envelope(record: &SnsRecord) -> Result<S3Event> {
    serde_json::from_str(&record.sns.message).map_err(|e| {
        log::error!(
            "SNS message {} is not an S3 event: {e}",
            record.sns.message_id
        );
        Error::Decode(e)
    })
}

impl<S: ObjectStore, C: StreamClient> Dispatcher<S, C> {
    /// Unwraps each SNS record and streams the S3 event inside it. Stops at the first record that
    /// fails to unwrap or to stream.
    pub async fn handle_sns_event(&self, event: &SnsEvent) -> Result<()> {
        log::debug!("Handling SNS event: {event:?}");
        for record in &event.records {
            let s3_event = unwrap_envelope(record)?;
            self.handle_s3_event(&s3_event).await?;
        }
        Ok(())
    }
}
