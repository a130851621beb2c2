use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, Protocol, parse_duration_arg};
use crate::error::{AppError, AppResult, ConfigError};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub target: Option<String>,
    pub duration: Option<DurationValue>,
    pub rate: Option<u64>,
    #[serde(alias = "concurrent")]
    pub concurrency: Option<usize>,
    pub protocol: Option<Protocol>,
    pub method: Option<HttpMethod>,
    pub headers: Option<HeadersValue>,
    #[serde(alias = "data")]
    pub body: Option<String>,
    pub timeout: Option<DurationValue>,
    pub ui: Option<UiConfig>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    pub refresh_ms: Option<u64>,
    pub no_color: Option<bool>,
    pub linger: Option<bool>,
}

/// Either a number of seconds or a suffixed string such as `"500ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(0) => Err(AppError::config(ConfigError::FieldMustBePositive {
                field: "duration",
            })),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}

/// Headers may be written as a table or as a list of `Key: Value` lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeadersValue {
    Map(BTreeMap<String, String>),
    List(Vec<String>),
}
