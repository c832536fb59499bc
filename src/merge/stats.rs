//! Aggregate counters over merged entries
//!
//! Every counter is bumped once, when a merge key is first seen. Records that
//! fold into an existing entry leave the counters untouched.

use crate::domain::{ProductLine, VersionType, Year};
use serde::Serialize;
use std::collections::BTreeMap;

/// Batch-wide release counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Raw records in the batch
    pub total_releases: usize,
    /// Distinct merge keys
    pub merged_releases: usize,
    pub product_lines: BTreeMap<ProductLine, usize>,
    pub version_types: BTreeMap<VersionType, usize>,
    pub years: BTreeMap<Year, usize>,
}

impl Stats {
    pub fn new(total_releases: usize) -> Self {
        Stats {
            total_releases,
            ..Default::default()
        }
    }

    /// Count a newly created merged entry
    pub fn record_entry(
        &mut self,
        product_line: ProductLine,
        version_type: VersionType,
        year: Year,
    ) {
        self.merged_releases += 1;
        *self.product_lines.entry(product_line).or_insert(0) += 1;
        *self.version_types.entry(version_type).or_insert(0) += 1;
        *self.years.entry(year).or_insert(0) += 1;
    }

    /// Records that were folded into an existing entry
    pub fn folded_records(&self) -> usize {
        self.total_releases.saturating_sub(self.merged_releases)
    }
}

/// Per product line, the number of merged entries of each version type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProductLineStats(BTreeMap<ProductLine, BTreeMap<VersionType, usize>>);

impl ProductLineStats {
    pub fn record_entry(&mut self, product_line: ProductLine, version_type: VersionType) {
        *self
            .0
            .entry(product_line)
            .or_default()
            .entry(version_type)
            .or_insert(0) += 1;
    }

    pub fn get(&self, product_line: ProductLine, version_type: VersionType) -> usize {
        self.0
            .get(&product_line)
            .and_then(|types| types.get(&version_type))
            .copied()
            .unwrap_or(0)
    }

    /// Merged entries across all version types of one product line
    pub fn line_total(&self, product_line: ProductLine) -> usize {
        self.0
            .get(&product_line)
            .map(|types| types.values().sum())
            .unwrap_or(0)
    }
}
