//! Dataset profiling over raw release records
//!
//! Used to tune the keyword table: shows which values, tags and name prefixes
//! occur in an export and how the current rules classify it.

pub mod dataset_analyzer;

pub use dataset_analyzer::{
    ClassificationCoverage, DatasetAnalyzer, DatasetProfile, PrefixProfile, TagProfile, Tally,
    VersionProfile,
};
