//! In-memory collaborators for pipeline tests.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::{Value, json};

use crate::error::{Error, FetchErrorKind, Result};
use crate::handler::ObjectStore;
use crate::publisher::{StreamClient, StreamEntry};
use crate::reader::Record;
use crate::utils::{FetchedObject, ObjectReference};

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("test record must be an object, got {other}"),
    }
}

/// `count` CloudTrail-like records numbered from zero.
pub fn numbered_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            record(json!({
                "eventID": i,
                "eventName": "GetObject",
                "eventSource": "s3.amazonaws.com"
            }))
        })
        .collect()
}

/// Serializes records into a gzipped `{"Records":[...]}` log file.
pub fn log_file(records: &[Record]) -> Vec<u8> {
    gzip(&serde_json::to_vec(&json!({ "Records": records })).unwrap())
}

#[derive(Default)]
pub struct FakeObjectStore {
    objects: HashMap<(String, String), std::result::Result<FetchedObject, FetchErrorKind>>,
    fetched: Mutex<Vec<ObjectReference>>,
}

impl FakeObjectStore {
    pub fn with_object(mut self, bucket: &str, key: &str, body: Vec<u8>) -> Self {
        self.objects.insert(
            (bucket.to_owned(), key.to_owned()),
            Ok(FetchedObject::new(body, None, None)),
        );
        self
    }

    pub fn with_failure(mut self, bucket: &str, key: &str, kind: FetchErrorKind) -> Self {
        self.objects
            .insert((bucket.to_owned(), key.to_owned()), Err(kind));
        self
    }

    pub fn fetched(&self) -> Vec<ObjectReference> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn fetch(&self, object: &ObjectReference) -> Result<FetchedObject> {
        self.fetched.lock().unwrap().push(object.clone());
        let lookup = (object.get_bucket().to_owned(), object.get_key().to_owned());
        let kind = match self.objects.get(&lookup) {
            Some(Ok(fetched)) => return Ok(fetched.clone()),
            Some(Err(kind)) => *kind,
            None => FetchErrorKind::NotFound,
        };
        Err(Error::Fetch {
            kind,
            bucket: lookup.0,
            key: lookup.1,
            source: "fake object store".into(),
        })
    }
}

/// Records every batch it receives. Can be told to fail a given call (zero based), either
/// outright or by rejecting one entry of the batch.
#[derive(Default)]
pub struct RecordingStreamClient {
    batches: Mutex<Vec<Vec<StreamEntry>>>,
    fail_call: Option<usize>,
    partial_failure: bool,
}

impl RecordingStreamClient {
    pub fn failing_on_call(call: usize) -> Self {
        Self {
            fail_call: Some(call),
            ..Self::default()
        }
    }

    pub fn partially_failing_on_call(call: usize) -> Self {
        Self {
            fail_call: Some(call),
            partial_failure: true,
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<Vec<StreamEntry>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }

    /// Every published payload, decoded back to JSON, in publish order.
    pub fn published(&self) -> Vec<Value> {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .map(|entry| serde_json::from_slice(&entry.data).unwrap())
            .collect()
    }
}

#[async_trait]
impl StreamClient for RecordingStreamClient {
    fn get_stream_name(&self) -> &str {
        "test-stream"
    }

    async fn put_records(&self, entries: Vec<StreamEntry>) -> Result<()> {
        let mut batches = self.batches.lock().unwrap();
        let call = batches.len();
        if self.fail_call == Some(call) {
            let total = entries.len();
            if self.partial_failure {
                // The rejected call still reaches the stream; keep it for assertions.
                batches.push(entries);
                return Err(Error::PartialPublish {
                    stream: "test-stream".into(),
                    failed: 1,
                    total,
                    first_error: "InternalFailure: injected".into(),
                });
            }
            return Err(Error::Publish {
                stream: "test-stream".into(),
                source: "injected failure".into(),
            });
        }
        batches.push(entries);
        Ok(())
    }
}
