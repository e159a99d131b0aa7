mod batch;
mod batch_publisher;
mod stream_client;

pub use batch_publisher::{BatchPublisher, MAX_BATCH_SIZE, PublishSummary};
pub use stream_client::{StreamClient, StreamEntry};
