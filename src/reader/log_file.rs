use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::ContentHint;
use super::decompress::maybe_decompress;
use crate::error::{Error, Result};
use crate::utils::FetchedObject;

/// One decoded log entry. Opaque apart from the fields the filters look at.
pub type Record = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct LogFile {
    #[serde(rename = "Records", default, deserialize_with = "null_as_empty")]
    records: Vec<Record>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes a log file body into its records, decompressing it first when needed.
///
/// A body that is `null`, lacks a `Records` key, or has `"Records": null` decodes to no records.
/// Any other shape that isn't an object holding an array of objects is a decode error.
pub fn read_log_file(body: &[u8], hint: &ContentHint<'_>) -> Result<Vec<Record>> {
    let blob = maybe_decompress(body, hint)?;
    let log_file: Option<LogFile> = serde_json::from_slice(&blob).map_err(|e| {
        log::error!("Error unmarshalling log file: {e}");
        Error::Decode(e)
    })?;
    Ok(log_file.map(|file| file.records).unwrap_or_default())
}

pub fn read_object(object: &FetchedObject) -> Result<Vec<Record>> {
    read_log_file(object.get_body(), &object.content_hint())
}
