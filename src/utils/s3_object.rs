use std::fmt;

use crate::reader::ContentHint;

/// Identifies one log file: the region to read it from, its bucket and its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectReference {
    region: String,
    bucket: String,
    key: String,
}

impl ObjectReference {
    pub fn new(region: impl Into<String>, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn get_region(&self) -> &str {
        &self.region
    }

    pub fn get_bucket(&self) -> &str {
        &self.bucket
    }

    pub fn get_key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{} ({})", self.bucket, self.key, self.region)
    }
}

/// The body of a fetched object along with the content metadata the store reported.
#[derive(Debug, Clone, Default)]
pub struct FetchedObject {
    body: Vec<u8>,
    content_type: Option<String>,
    content_encoding: Option<String>,
}

impl FetchedObject {
    pub const fn new(
        body: Vec<u8>,
        content_type: Option<String>,
        content_encoding: Option<String>,
    ) -> Self {
        Self {
            body,
            content_type,
            content_encoding,
        }
    }

    pub fn get_body(&self) -> &[u8] {
        &self.body
    }

    pub fn content_hint(&self) -> ContentHint<'_> {
        ContentHint::new(self.content_type.as_deref(), self.content_encoding.as_deref())
    }
}
