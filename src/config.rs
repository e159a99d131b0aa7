use std::str::FromStr;

use crate::error::{Error, Result};
use crate::filter::FilterSet;
use crate::publisher::MAX_BATCH_SIZE;

const KINESIS_STREAM_VAR: &str = "CT_KINESIS_STREAM";
const KINESIS_REGION_VAR: &str = "CT_KINESIS_REGION";
const KINESIS_BATCH_SIZE_VAR: &str = "CT_KINESIS_BATCH_SIZE";
const S3_ROLE_ARN_VAR: &str = "CT_S3_ROLE_ARN";
const EVENT_TYPE_VAR: &str = "CT_EVENT_TYPE";
const EVENT_FILTERS_VAR: &str = "CT_EVENT_FILTERS";
const DEBUG_LOGGING_VAR: &str = "CT_DEBUG_LOGGING";

/// Shape of the events the function is invoked with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventType {
    /// S3 event notifications delivered directly.
    #[default]
    S3,
    /// S3 event notifications wrapped in SNS messages.
    Sns,
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "S3" => Ok(Self::S3),
            "SNS" => Ok(Self::Sns),
            _ => Err(Error::Config(format!(
                "{EVENT_TYPE_VAR} is set to an invalid value, {s}, must be either 'S3' or 'SNS'"
            ))),
        }
    }
}

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    kinesis_stream: String,
    kinesis_region: String,
    kinesis_batch_size: usize,
    s3_role_arn: Option<String>,
    event_type: EventType,
    event_filters: FilterSet,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to its value. Empty
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let kinesis_stream =
            get(KINESIS_STREAM_VAR).ok_or_else(|| missing_variable(KINESIS_STREAM_VAR))?;
        let kinesis_region =
            get(KINESIS_REGION_VAR).ok_or_else(|| missing_variable(KINESIS_REGION_VAR))?;

        let kinesis_batch_size = match get(KINESIS_BATCH_SIZE_VAR) {
            Some(value) => parse_batch_size(&value)?,
            None => MAX_BATCH_SIZE,
        };

        let event_type = match get(EVENT_TYPE_VAR) {
            Some(value) => value.parse()?,
            None => EventType::default(),
        };

        let event_filters = get(EVENT_FILTERS_VAR)
            .map(|rules| FilterSet::parse(&rules))
            .unwrap_or_default();

        Ok(Self {
            kinesis_stream,
            kinesis_region,
            kinesis_batch_size,
            s3_role_arn: get(S3_ROLE_ARN_VAR),
            event_type,
            event_filters,
        })
    }

    pub fn get_kinesis_stream(&self) -> &str {
        &self.kinesis_stream
    }

    pub fn get_kinesis_region(&self) -> &str {
        &self.kinesis_region
    }

    pub const fn get_kinesis_batch_size(&self) -> usize {
        self.kinesis_batch_size
    }

    pub fn get_s3_role_arn(&self) -> Option<&str> {
        self.s3_role_arn.as_deref()
    }

    pub const fn get_event_type(&self) -> EventType {
        self.event_type
    }

    pub const fn get_event_filters(&self) -> &FilterSet {
        &self.event_filters
    }
}

/// Whether debug logging was requested. Read separately from [`Config`] so the logger can be up
/// before configuration errors need reporting.
pub fn debug_logging_requested() -> bool {
    std::env::var(DEBUG_LOGGING_VAR).is_ok_and(|value| value == "1")
}

fn missing_variable(name: &str) -> Error {
    Error::Config(format!("{name} must be set"))
}

fn parse_batch_size(value: &str) -> Result<usize> {
    let size: usize = value.parse().map_err(|e| {
        Error::Config(format!(
            "Error converting {KINESIS_BATCH_SIZE_VAR} ({value}) to int: {e}"
        ))
    })?;
    if size == 0 || size > MAX_BATCH_SIZE {
        return Err(Error::Config(format!(
            "{KINESIS_BATCH_SIZE_VAR} must be set to a value between 1 and {MAX_BATCH_SIZE}"
        )));
    }
    Ok(size)
}
