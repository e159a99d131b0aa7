use serde::Deserialize;

use super::ObjectReference;

/// S3 event notification, as delivered to the function directly or inside an SNS message.
///
/// Only the fields needed to locate the object are kept.
#[derive(Debug, Default, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3Record>,
}

#[derive(Debug, Deserialize)]
pub struct S3Record {
    #[serde(rename = "awsRegion", default)]
    pub aws_region: String,
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl S3Event {
    pub fn object_references(&self) -> impl Iterator<Item = ObjectReference> + '_ {
        self.records.iter().map(|record| {
            ObjectReference::new(
                record.aws_region.as_str(),
                record.s3.bucket.name.as_str(),
                record.s3.object.key.as_str(),
            )
        })
    }
}
