//! Merge Engine: folds per-device release records into logical releases
//!
//! One pass over the batch with a side index from merge key to entry. Entries
//! are created on the first record of a key and mutated by every later one;
//! once the pass ends they are sorted into the organized tree and never touched
//! again.

pub mod source_url;
pub mod stats;

pub use source_url::resolve_source_url;
pub use stats::{ProductLineStats, Stats};

use crate::boundary::RecordWarning;
use crate::classifier::Classifier;
use crate::config::{DisplayConfig, SourcesConfig};
use crate::domain::{DownloadLink, MergedRelease, ProductLine, RawRelease, VersionType, Year};
use crate::version::sortable_key;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// `product_line -> version_type -> year -> entries`, newest first
pub type OrganizedTree =
    BTreeMap<ProductLine, BTreeMap<VersionType, BTreeMap<Year, Vec<MergedRelease>>>>;

/// Identity of a logical release
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub product_line: ProductLine,
    pub version_type: VersionType,
    pub year: Year,
    /// Normalized version with `.` also mapped to `-`
    pub version: String,
}

impl MergeKey {
    pub fn new(
        product_line: ProductLine,
        version_type: VersionType,
        year: Year,
        version: &str,
    ) -> Self {
        MergeKey {
            product_line,
            version_type,
            year,
            version: canonical_version(version),
        }
    }
}

/// Everything one `process` call produces
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub organized: OrganizedTree,
    pub stats: Stats,
    pub product_line_stats: ProductLineStats,
    pub warnings: Vec<RecordWarning>,
}

impl Timeline {
    /// All merged entries in tree order
    pub fn entries(&self) -> impl Iterator<Item = &MergedRelease> {
        self.organized
            .values()
            .flat_map(|types| types.values())
            .flat_map(|years| years.values())
            .flatten()
    }

    /// Entry for one merge key, if present
    pub fn find(&self, key: &MergeKey) -> Option<&MergedRelease> {
        self.organized
            .get(&key.product_line)?
            .get(&key.version_type)?
            .get(&key.year)?
            .iter()
            .find(|r| canonical_version(&r.version) == key.version)
    }
}

/// Record fields after display normalization
struct Normalized {
    product_name: String,
    version: String,
    notes: String,
    links: Vec<DownloadLink>,
    source_url: Option<String>,
}

/// Classifies and merges a batch of raw releases
pub struct MergeEngine {
    classifier: Classifier,
    display: DisplayConfig,
    sources: SourcesConfig,
}

impl MergeEngine {
    pub fn new(classifier: Classifier, display: DisplayConfig, sources: SourcesConfig) -> Self {
        MergeEngine {
            classifier,
            display,
            sources,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Classify, merge and organize a batch.
    ///
    /// Never fails: malformed fields fall back to empty values and are reported
    /// in `Timeline::warnings`.
    ///
    /// # Example
    /// ```ignore
    /// let engine = MergeEngine::new(classifier, config.display, config.sources);
    /// let timeline = engine.process(&releases);
    /// println!("{} entries", timeline.stats.merged_releases);
    /// ```
    pub fn process(&self, releases: &[RawRelease]) -> Timeline {
        let mut stats = Stats::new(releases.len());
        let mut product_line_stats = ProductLineStats::default();
        let mut warnings = Vec::new();
        let mut entries: Vec<MergedRelease> = Vec::new();
        let mut index: HashMap<MergeKey, usize> = HashMap::new();

        for release in releases {
            let classification = self.classifier.classify_detailed(release);
            if let Some(reason) = classification.tag_error {
                tracing::warn!(release_id = %release.release_id, %reason, "malformed tags");
                warnings.push(RecordWarning::MalformedTags {
                    release_id: release.release_id.clone(),
                    reason,
                });
            }

            let year = release.release_date.year();
            if year == Year::Unknown {
                let date = release.release_date.raw();
                tracing::warn!(release_id = %release.release_id, %date, "unparsable release date");
                warnings.push(RecordWarning::UnparsableDate {
                    release_id: release.release_id.clone(),
                    date,
                });
            }

            let fields = self.normalize(release, &mut warnings);
            let key = MergeKey::new(
                classification.product_line,
                classification.version_type,
                year,
                &fields.version,
            );

            match index.get(&key) {
                Some(&i) => self.fold(&mut entries[i], fields),
                None => {
                    stats.record_entry(key.product_line, key.version_type, key.year);
                    product_line_stats.record_entry(key.product_line, key.version_type);
                    index.insert(key.clone(), entries.len());
                    entries.push(self.seed(&key, release, fields));
                }
            }
        }

        tracing::info!(
            records = stats.total_releases,
            entries = stats.merged_releases,
            warnings = warnings.len(),
            "merged release batch"
        );

        Timeline {
            organized: organize(entries),
            stats,
            product_line_stats,
            warnings,
        }
    }

    fn normalize(&self, release: &RawRelease, warnings: &mut Vec<RecordWarning>) -> Normalized {
        let product_name = release.product_name.replace('_', " ").trim().to_string();
        let product_name = if product_name.is_empty() {
            self.display.unknown_product.clone()
        } else {
            product_name
        };

        let version = release.version.replace('_', "-").trim().to_string();
        let version = if version.is_empty() {
            self.display.unknown_version.clone()
        } else {
            version
        };

        let notes = release.release_notes.replace('_', " ").trim().to_string();

        let links = match release.download_links.items() {
            Ok(items) => items
                .iter()
                .filter_map(|item| DownloadLink::from_entry(item, &self.display.default_link_name))
                .collect(),
            Err(reason) => {
                tracing::warn!(
                    release_id = %release.release_id,
                    %reason,
                    "malformed download links"
                );
                warnings.push(RecordWarning::MalformedLinks {
                    release_id: release.release_id.clone(),
                    reason,
                });
                Vec::new()
            }
        };

        let source_url = resolve_source_url(release, &product_name, &version, &self.sources);

        Normalized {
            product_name,
            version,
            notes,
            links,
            source_url,
        }
    }

    fn seed(&self, key: &MergeKey, release: &RawRelease, fields: Normalized) -> MergedRelease {
        let mut entry = MergedRelease::new(
            key.product_line,
            key.version_type,
            key.year,
            fields.version,
            release.release_date.display(),
            release.release_date.raw(),
            fields.product_name,
            fields.notes,
        );
        if let Some(url) = &fields.source_url {
            entry.add_source_url(url);
        }
        for link in fields.links {
            entry.add_download_link(link);
        }
        entry
    }

    fn fold(&self, entry: &mut MergedRelease, fields: Normalized) {
        entry.record_count += 1;
        entry.add_device(&fields.product_name);
        if let Some(url) = &fields.source_url {
            entry.add_source_url(url);
        }
        for link in fields.links {
            entry.add_download_link(link);
        }
        entry.add_note(&fields.product_name, &fields.notes);
        let label = self.classifier.label(entry.product_line).to_string();
        entry.retitle(&label, &self.display.merged_title);

        tracing::debug!(
            title = %entry.display_title,
            devices = entry.compatible_devices.len(),
            "folded record into existing entry"
        );
    }
}

/// Version component of a merge key
pub fn canonical_version(version: &str) -> String {
    version.trim().replace(['_', '.'], "-")
}

/// Group entries into the tree and sort each list by date, then version,
/// newest first.
fn organize(entries: Vec<MergedRelease>) -> OrganizedTree {
    let mut tree = OrganizedTree::new();
    for entry in entries {
        tree.entry(entry.product_line)
            .or_default()
            .entry(entry.version_type)
            .or_default()
            .entry(entry.year)
            .or_default()
            .push(entry);
    }
    for list in tree
        .values_mut()
        .flat_map(|types| types.values_mut())
        .flat_map(|years| years.values_mut())
    {
        list.sort_by_cached_key(|r| Reverse((r.raw_date.clone(), sortable_key(&r.version))));
    }
    tree
}
