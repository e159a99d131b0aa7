mod kinesis_client;
mod s3_client;
mod s3_event;
mod s3_object;
mod sns_message;

pub use kinesis_client::KinesisStreamClient;
pub use s3_client::S3ObjectStore;
pub use s3_event::S3Event;
pub use s3_object::{FetchedObject, ObjectReference};
pub use sns_message::{SnsEvent, SnsRecord};
