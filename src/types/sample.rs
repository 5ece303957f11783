use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type Tags = BTreeMap<String, String>;
pub type Fields = BTreeMap<&'static str, FieldValue>;

/// Tag key carrying the activity start time.
pub const ACTIVITY_TIME_TAG: &str = "activity_time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Record,
    Event,
    Lap,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Record => "record",
            MessageKind::Event => "event",
            MessageKind::Lap => "lap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<i8> for FieldValue {
    fn from(value: i8) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// One emitted measurement: a projected message plus the activity's shared tags.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub name: MessageKind,
    pub tags: Arc<Tags>,
    pub fields: Fields,
    pub timestamp: DateTime<Utc>,
}

/// Default tags plus the formatted activity start time, shared by every sample of one activity.
pub fn activity_tags(defaults: &Tags, activity_time: DateTime<Utc>) -> Arc<Tags> {
    let mut tags = defaults.clone();
    tags.insert(
        ACTIVITY_TIME_TAG.to_string(),
        activity_time.to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    Arc::new(tags)
}
