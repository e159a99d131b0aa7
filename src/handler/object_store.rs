use async_trait::async_trait;

use crate::error::Result;
use crate::utils::{FetchedObject, ObjectReference};

/// Source of log files.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads the whole object. Missing objects and denied reads are both fetch errors, told
    /// apart by [`crate::error::FetchErrorKind`].
    async fn fetch(&self, object: &ObjectReference) -> Result<FetchedObject>;
}
