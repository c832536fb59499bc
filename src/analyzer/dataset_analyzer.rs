use crate::classifier::{Classifier, Rule};
use crate::domain::{ProductLine, RawRelease};
use std::collections::{BTreeMap, HashMap};

const TOP_VALUES: usize = 20;
const TOP_TAGS: usize = 50;
const TOP_PATTERNS: usize = 10;

/// Profiled fields, in display order
pub const PROFILED_FIELDS: [&str; 5] = [
    "product_name",
    "version",
    "firmware_type",
    "stage",
    "is_beta",
];

/// Distinct value count plus the most frequent values, most common first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub unique: usize,
    pub top: Vec<(String, usize)>,
}

impl Tally {
    fn from_counts(counts: HashMap<String, usize>, limit: usize) -> Self {
        let unique = counts.len();
        let mut top: Vec<(String, usize)> = counts.into_iter().collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top.truncate(limit);
        Tally { unique, top }
    }

    /// Count of one value, if it made the top list
    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.top.iter().find(|(v, _)| v == value).map(|(_, n)| *n)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagProfile {
    pub unique_tags: usize,
    pub total_tags: usize,
    /// Releases by number of tags they carry
    pub tags_per_release: BTreeMap<usize, usize>,
    pub most_common: Tally,
    /// Releases whose tags payload could not be decoded
    pub malformed: usize,
}

/// First-two-word prefixes of tags and product names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixProfile {
    pub tag_prefixes: Tally,
    pub product_name_prefixes: Tally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionProfile {
    pub versions: Tally,
    /// Version shapes with every digit written as `n`
    pub patterns: Tally,
}

/// How the configured rules classify the batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationCoverage {
    pub product_lines: BTreeMap<ProductLine, usize>,
    pub rules: BTreeMap<Rule, usize>,
}

impl ClassificationCoverage {
    /// Records that only the catch-all buckets took
    pub fn unclassified(&self) -> usize {
        [ProductLine::UnifiOther, ProductLine::Other]
            .iter()
            .filter_map(|line| self.product_lines.get(line))
            .sum()
    }
}

/// Complete profile of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetProfile {
    pub total_releases: usize,
    pub fields: BTreeMap<&'static str, Tally>,
    pub tags: TagProfile,
    pub prefixes: PrefixProfile,
    pub versions: VersionProfile,
    pub coverage: ClassificationCoverage,
}

/// Profiles raw records without merging them
pub struct DatasetAnalyzer<'a> {
    classifier: &'a Classifier,
}

impl<'a> DatasetAnalyzer<'a> {
    pub fn new(classifier: &'a Classifier) -> Self {
        DatasetAnalyzer { classifier }
    }

    /// Build the full profile of `releases`
    pub fn analyze(&self, releases: &[RawRelease]) -> DatasetProfile {
        let profile = DatasetProfile {
            total_releases: releases.len(),
            fields: analyze_fields(releases),
            tags: analyze_tags(releases),
            prefixes: analyze_prefixes(releases),
            versions: analyze_versions(releases),
            coverage: self.analyze_coverage(releases),
        };
        tracing::info!(
            releases = profile.total_releases,
            unique_tags = profile.tags.unique_tags,
            unclassified = profile.coverage.unclassified(),
            "profiled dataset"
        );
        profile
    }

    fn analyze_coverage(&self, releases: &[RawRelease]) -> ClassificationCoverage {
        let mut coverage = ClassificationCoverage::default();
        for release in releases {
            let c = self.classifier.classify_detailed(release);
            *coverage.product_lines.entry(c.product_line).or_insert(0) += 1;
            *coverage.rules.entry(c.rule).or_insert(0) += 1;
        }
        coverage
    }
}

fn field_value(release: &RawRelease, field: &str) -> Option<String> {
    let value = match field {
        "product_name" => release.product_name.clone(),
        "version" => release.version.clone(),
        "firmware_type" => release.firmware_type.clone(),
        "stage" => release.stage.clone(),
        "is_beta" => release.is_beta.to_string(),
        _ => return None,
    };
    (!value.is_empty()).then_some(value)
}

fn analyze_fields(releases: &[RawRelease]) -> BTreeMap<&'static str, Tally> {
    PROFILED_FIELDS
        .iter()
        .map(|&field| {
            let mut counts = HashMap::new();
            for value in releases.iter().filter_map(|r| field_value(r, field)) {
                *counts.entry(value).or_insert(0) += 1;
            }
            (field, Tally::from_counts(counts, TOP_VALUES))
        })
        .collect()
}

fn analyze_tags(releases: &[RawRelease]) -> TagProfile {
    let mut profile = TagProfile::default();
    let mut counts = HashMap::new();
    for release in releases {
        match release.tags.strings() {
            Ok(tags) => {
                *profile.tags_per_release.entry(tags.len()).or_insert(0) += 1;
                profile.total_tags += tags.len();
                for tag in tags {
                    *counts.entry(tag).or_insert(0) += 1;
                }
            }
            Err(_) => profile.malformed += 1,
        }
    }
    profile.unique_tags = counts.len();
    profile.most_common = Tally::from_counts(counts, TOP_TAGS);
    profile
}

/// First two whitespace-separated words, or the single word
fn word_prefix(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().take(2).collect();
    (!words.is_empty()).then(|| words.join(" "))
}

fn analyze_prefixes(releases: &[RawRelease]) -> PrefixProfile {
    let mut tag_prefixes = HashMap::new();
    let mut name_prefixes = HashMap::new();
    for release in releases {
        for tag in release.tags.strings().unwrap_or_default() {
            if let Some(prefix) = word_prefix(&tag) {
                *tag_prefixes.entry(prefix).or_insert(0) += 1;
            }
        }
        if let Some(prefix) = word_prefix(&release.product_name) {
            *name_prefixes.entry(prefix).or_insert(0) += 1;
        }
    }
    PrefixProfile {
        tag_prefixes: Tally::from_counts(tag_prefixes, TOP_VALUES),
        product_name_prefixes: Tally::from_counts(name_prefixes, TOP_VALUES),
    }
}

/// Shape of a version string, e.g. `v7.0.23-beta` becomes `vn.n.nn-beta`
pub fn version_pattern(version: &str) -> String {
    version
        .chars()
        .map(|c| if c.is_ascii_digit() { 'n' } else { c })
        .collect()
}

fn analyze_versions(releases: &[RawRelease]) -> VersionProfile {
    let mut versions = HashMap::new();
    let mut patterns = HashMap::new();
    for release in releases.iter().filter(|r| !r.version.is_empty()) {
        *versions.entry(release.version.clone()).or_insert(0) += 1;
        *patterns.entry(version_pattern(&release.version)).or_insert(0) += 1;
    }
    VersionProfile {
        versions: Tally::from_counts(versions, TOP_VALUES),
        patterns: Tally::from_counts(patterns, TOP_PATTERNS),
    }
}
