//! Reading raw release exports
//!
//! Input is a JSON array of release documents. Each document is decoded on its
//! own so one bad entry only costs that entry.

use crate::boundary::RecordWarning;
use crate::domain::RawRelease;
use crate::error::{Result, TimelineError};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Decoded records plus warnings for documents that were skipped
#[derive(Debug, Clone, Default)]
pub struct LoadedReleases {
    pub releases: Vec<RawRelease>,
    pub warnings: Vec<RecordWarning>,
}

/// Load releases from a file path, or stdin when `path` is `-`.
///
/// # Returns
/// * `Ok(LoadedReleases)` - Decoded records and per-record warnings
/// * `Err` - If the input cannot be read or is not a JSON array
pub fn load_releases(path: &str) -> Result<LoadedReleases> {
    let text = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = Path::new(path);
        if !path.exists() {
            return Err(TimelineError::input(format!(
                "Input file not found: {}",
                path.display()
            )));
        }
        fs::read_to_string(path)?
    };
    parse_releases(&text)
}

/// Decode a JSON array of release documents
pub fn parse_releases(text: &str) -> Result<LoadedReleases> {
    let documents = match serde_json::from_str::<Value>(text)? {
        Value::Array(documents) => documents,
        Value::Object(mut map) => match map.remove("releases") {
            Some(Value::Array(documents)) => documents,
            _ => {
                return Err(TimelineError::input(
                    "expected a JSON array of releases or an object with a \"releases\" array",
                ))
            }
        },
        _ => return Err(TimelineError::input("expected a JSON array of releases")),
    };
    Ok(decode_documents(documents))
}

/// Decode documents one at a time, skipping the ones that do not fit
pub fn decode_documents(documents: Vec<Value>) -> LoadedReleases {
    let mut loaded = LoadedReleases::default();
    for (index, document) in documents.into_iter().enumerate() {
        match serde_json::from_value::<RawRelease>(document) {
            Ok(release) => loaded.releases.push(release),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping undecodable record");
                loaded.warnings.push(RecordWarning::UndecodableRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }
    tracing::debug!(
        decoded = loaded.releases.len(),
        skipped = loaded.warnings.len(),
        "decoded input documents"
    );
    loaded
}
