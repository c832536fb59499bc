//! Display-ready timeline document for the rendering layer

use crate::boundary::RecordWarning;
use crate::classifier::Classifier;
use crate::config::OutputConfig;
use crate::domain::{ProductGroup, ProductLine, VersionType, Year};
use crate::error::Result;
use crate::merge::{OrganizedTree, ProductLineStats, Stats, Timeline};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Everything a template needs, with no further derivation left to do
#[derive(Debug, Serialize)]
pub struct TimelineDocument<'a> {
    pub generated_at: String,
    /// Display date of the newest dated entry, or `unknown`
    pub latest_update: String,
    pub stats: &'a Stats,
    pub product_line_stats: &'a ProductLineStats,
    pub organized: &'a OrganizedTree,
    pub product_line_order: Vec<ProductLine>,
    pub product_line_labels: BTreeMap<ProductLine, String>,
    pub product_line_groups: BTreeMap<ProductGroup, Vec<ProductLine>>,
    pub version_type_labels: BTreeMap<VersionType, &'static str>,
    pub warnings: &'a [RecordWarning],
}

impl<'a> TimelineDocument<'a> {
    /// Build a document stamped with the current time
    pub fn new(timeline: &'a Timeline, classifier: &Classifier) -> Self {
        Self::at(timeline, classifier, Utc::now())
    }

    pub fn at(
        timeline: &'a Timeline,
        classifier: &Classifier,
        generated_at: DateTime<Utc>,
    ) -> Self {
        TimelineDocument {
            generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            latest_update: latest_update(timeline),
            stats: &timeline.stats,
            product_line_stats: &timeline.product_line_stats,
            organized: &timeline.organized,
            product_line_order: ProductLine::ALL.to_vec(),
            product_line_labels: classifier.labels(),
            product_line_groups: ProductGroup::ALL
                .iter()
                .map(|&group| (group, group.members()))
                .collect(),
            version_type_labels: VersionType::ALL
                .iter()
                .map(|&vtype| (vtype, vtype.label()))
                .collect(),
            warnings: &timeline.warnings,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

fn latest_update(timeline: &Timeline) -> String {
    timeline
        .entries()
        .filter(|r| r.year != Year::Unknown)
        .max_by(|a, b| a.raw_date.cmp(&b.raw_date))
        .map(|r| r.date.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Write the document to `<output.dir>/<output.file>`, creating the directory.
///
/// # Returns
/// * `Ok(PathBuf)` - The written file
/// * `Err` - If the directory or file cannot be written
pub fn write_document(document: &TimelineDocument<'_>, output: &OutputConfig) -> Result<PathBuf> {
    fs::create_dir_all(&output.dir)?;
    let path = output.path();
    fs::write(&path, document.to_json(output.pretty)?)?;
    tracing::info!(path = %path.display(), "wrote timeline document");
    Ok(path)
}
