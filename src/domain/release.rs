//! Raw release records as produced by the fetch layer

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A list field that may arrive either as a native JSON array or as a string
/// holding a JSON-encoded array (the document store keeps the latter).
/// Anything else is kept as `Invalid` so the record still decodes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum JsonList {
    Items(Vec<serde_json::Value>),
    Encoded(String),
    Invalid(serde_json::Value),
}

impl Default for JsonList {
    fn default() -> Self {
        JsonList::Items(Vec::new())
    }
}

impl JsonList {
    /// Decode the list items.
    ///
    /// # Returns
    /// * `Ok(Vec<Value>)` - The items (an empty string decodes to no items)
    /// * `Err(String)` - The payload is not valid JSON or not an array
    pub fn items(&self) -> Result<Vec<serde_json::Value>, String> {
        match self {
            JsonList::Items(items) => Ok(items.clone()),
            JsonList::Encoded(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            JsonList::Encoded(raw) => match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(serde_json::Value::Array(items)) => Ok(items),
                Ok(other) => Err(format!("expected an array, found {}", json_kind(&other))),
                Err(e) => Err(e.to_string()),
            },
            JsonList::Invalid(serde_json::Value::Null) => Ok(Vec::new()),
            JsonList::Invalid(other) => {
                Err(format!("expected an array, found {}", json_kind(other)))
            }
        }
    }

    /// Decode the items as strings; non-string items are rendered as JSON text
    pub fn strings(&self) -> Result<Vec<String>, String> {
        Ok(self.items()?.iter().map(value_to_text).collect())
    }
}

impl From<Vec<&str>> for JsonList {
    fn from(items: Vec<&str>) -> Self {
        JsonList::Items(
            items
                .into_iter()
                .map(|s| serde_json::Value::String(s.to_string()))
                .collect(),
        )
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

pub(crate) fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Release date as stored: usually text, sometimes a Unix timestamp.
/// Other JSON values (null, fractional timestamps) land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ReleaseDate {
    Timestamp(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for ReleaseDate {
    fn default() -> Self {
        ReleaseDate::Text(String::new())
    }
}

impl ReleaseDate {
    /// Parse as an ISO-8601 date or date-time (or timestamp)
    pub fn parse(&self) -> Option<NaiveDateTime> {
        match self {
            ReleaseDate::Timestamp(ts) => from_epoch(*ts),
            ReleaseDate::Text(text) => parse_iso(text.trim()),
            ReleaseDate::Other(value) => value
                .as_f64()
                .filter(|ts| ts.is_finite() && ts.abs() < i64::MAX as f64)
                .and_then(|ts| from_epoch(ts.trunc() as i64)),
        }
    }

    /// Year of the release; falls back to a leading four-digit prefix
    pub fn year(&self) -> Year {
        if let Some(dt) = self.parse() {
            return Year::Known(dt.year());
        }
        if let ReleaseDate::Text(text) = self {
            let prefix: String = text.chars().take(4).collect();
            if prefix.len() == 4 && prefix.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(year) = prefix.parse() {
                    return Year::Known(year);
                }
            }
        }
        Year::Unknown
    }

    /// `YYYY-MM-DD` when parseable, otherwise the raw text
    pub fn display(&self) -> String {
        match self.parse() {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => self.raw(),
        }
    }

    /// Sort key text: the stored string, or RFC 3339 for timestamps
    pub fn raw(&self) -> String {
        match self {
            ReleaseDate::Text(text) => text.clone(),
            ReleaseDate::Other(serde_json::Value::Null) => String::new(),
            ReleaseDate::Timestamp(_) | ReleaseDate::Other(_) => match self.parse() {
                Some(dt) => dt.and_utc().to_rfc3339(),
                None => match self {
                    ReleaseDate::Other(value) => value_to_text(value),
                    _ => String::new(),
                },
            },
        }
    }
}

/// Seconds since the epoch; more than 10 digits means milliseconds
fn from_epoch(ts: i64) -> Option<NaiveDateTime> {
    let secs = if ts.unsigned_abs() > 9_999_999_999 {
        ts / 1000
    } else {
        ts
    };
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

impl From<&str> for ReleaseDate {
    fn from(text: &str) -> Self {
        ReleaseDate::Text(text.to_string())
    }
}

fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Release year bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Year {
    Known(i32),
    Unknown,
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Known(year) => write!(f, "{}", year),
            Year::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for Year {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Year::Known(year) => serializer.serialize_i32(*year),
            Year::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// A named download link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct DownloadLink {
    pub name: String,
    pub url: String,
}

impl DownloadLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        DownloadLink {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parse a stored link entry.
    ///
    /// Text entries look like `"UDM Pro: https://..."`; the text before `http`
    /// (minus a trailing colon) names the link. Entries without a URL are dropped.
    pub fn from_entry(entry: &serde_json::Value, default_name: &str) -> Option<Self> {
        match entry {
            serde_json::Value::String(text) => {
                let http_pos = text.find("http")?;
                let prefix = text[..http_pos].trim();
                let prefix = prefix.strip_suffix(':').unwrap_or(prefix).trim();
                let name = if prefix.is_empty() { default_name } else { prefix };
                Some(DownloadLink::new(name, text[http_pos..].trim()))
            }
            serde_json::Value::Object(_) => {
                serde_json::from_value::<DownloadLink>(entry.clone()).ok()
            }
            _ => None,
        }
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One normalized record per fetched release
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawRelease {
    #[serde(deserialize_with = "null_as_default")]
    pub release_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub firmware_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_beta: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    pub tags: JsonList,
    pub release_date: ReleaseDate,
    #[serde(deserialize_with = "null_as_default")]
    pub release_notes: String,
    pub download_links: JsonList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_post: Option<String>,
}

impl RawRelease {
    /// Look up one of the alternate source-URL fields by name
    pub fn source_field(&self, field: &str) -> Option<&str> {
        let value = match field {
            "source_url" => &self.source_url,
            "post_url" => &self.post_url,
            "url" => &self.url,
            "thread_url" => &self.thread_url,
            "forum_url" => &self.forum_url,
            "original_post" => &self.original_post,
            _ => &None,
        };
        value.as_deref()
    }
}

impl fmt::Display for RawRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) - {}",
            self.product_name,
            self.version,
            self.stage,
            self.release_date.raw()
        )
    }
}
