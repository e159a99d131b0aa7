use serde_json::Value;

use crate::reader::Record;

const EVENT_NAME_FIELD: &str = "eventName";
const EVENT_SOURCE_FIELD: &str = "eventSource";
const EVENT_SOURCE_DOMAIN: &str = "amazonaws.com";

/// A single exclusion rule, built from a `source:eventName` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    event_name: String,
    event_source: String,
}

impl EventFilter {
    /// `source` is the short service code, e.g. `s3` for `s3.amazonaws.com`.
    pub fn new(source: &str, event_name: &str) -> Self {
        Self {
            event_name: event_name.to_owned(),
            event_source: format!("{source}.{EVENT_SOURCE_DOMAIN}"),
        }
    }

    pub fn get_event_name(&self) -> &str {
        &self.event_name
    }

    pub fn get_event_source(&self) -> &str {
        &self.event_source
    }

    /// Matches on either field. Missing or non-string fields never match.
    pub fn matches(&self, record: &Record) -> bool {
        field_equals(record, EVENT_NAME_FIELD, &self.event_name)
            || field_equals(record, EVENT_SOURCE_FIELD, &self.event_source)
    }
}

fn field_equals(record: &Record, field: &str, expected: &str) -> bool {
    record.get(field).and_then(Value::as_str) == Some(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use serde_json::json;

    #[test]
    fn test_derives_event_source() {
        let filter = EventFilter::new("s3", "PutObject");
        assert_eq!(filter.get_event_name(), "PutObject");
        assert_eq!(filter.get_event_source(), "s3.amazonaws.com");
    }

    #[test]
    fn test_matches_on_source_with_different_name() {
        let filter = EventFilter::new("s3", "PutObject");
        let r = record(json!({"eventName": "GetObject", "eventSource": "s3.amazonaws.com"}));
        assert!(filter.matches(&r));
    }

    #[test]
    fn test_matches_on_name_with_different_source() {
        let filter = EventFilter::new("s3", "PutObject");
        let r = record(json!({"eventName": "PutObject", "eventSource": "ec2.amazonaws.com"}));
        assert!(filter.matches(&r));
    }

    #[test]
    fn test_no_match() {
        let filter = EventFilter::new("s3", "PutObject");
        let r = record(json!({"eventName": "RunInstances", "eventSource": "ec2.amazonaws.com"}));
        assert!(!filter.matches(&r));
    }

    #[test]
    fn test_missing_and_non_string_fields_never_match() {
        let filter = EventFilter::new("s3", "PutObject");
        assert!(!filter.matches(&record(json!({}))));
        assert!(!filter.matches(&record(json!({"eventName": null, "eventSource": 3}))));
        assert!(!filter.matches(&record(json!({"eventName": ["PutObject"]}))));
    }
}
