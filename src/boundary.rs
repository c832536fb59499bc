use serde::Serialize;
use std::fmt;

/// Non-fatal problems found while reading individual release records.
/// The affected field falls back to a safe default and the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordWarning {
    /// The `tags` payload was not a JSON array
    MalformedTags { release_id: String, reason: String },
    /// The `download_links` payload was not a JSON array
    MalformedLinks { release_id: String, reason: String },
    /// The release date could not be parsed; the year is unknown
    UnparsableDate { release_id: String, date: String },
    /// An input document could not be decoded as a release record
    UndecodableRecord { index: usize, reason: String },
}

impl RecordWarning {
    /// Short machine-friendly label for the warning kind
    pub fn kind(&self) -> &'static str {
        match self {
            RecordWarning::MalformedTags { .. } => "malformed_tags",
            RecordWarning::MalformedLinks { .. } => "malformed_links",
            RecordWarning::UnparsableDate { .. } => "unparsable_date",
            RecordWarning::UndecodableRecord { .. } => "undecodable_record",
        }
    }
}

impl fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordWarning::MalformedTags { release_id, reason } => {
                write!(
                    f,
                    "Release '{}' has malformed tags ({}); treating as empty",
                    release_id, reason
                )
            }
            RecordWarning::MalformedLinks { release_id, reason } => {
                write!(
                    f,
                    "Release '{}' has malformed download links ({}); treating as empty",
                    release_id, reason
                )
            }
            RecordWarning::UnparsableDate { release_id, date } => {
                let shown = if date.is_empty() { "<empty>" } else { date.as_str() };
                write!(
                    f,
                    "Cannot determine year of release '{}' from date '{}'",
                    release_id, shown
                )
            }
            RecordWarning::UndecodableRecord { index, reason } => {
                write!(f, "Skipping input record #{}: {}", index, reason)
            }
        }
    }
}
