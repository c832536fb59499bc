//! Release classification into product lines and version types
//!
//! The classifier is total: every record lands in some product line, with
//! `unifi-other` / `other` as the catch-all buckets.

pub mod context;
pub mod keywords;
pub mod rules;

pub use context::ReleaseText;
pub use keywords::{default_keyword_table, KeywordRule, KeywordTable};
pub use rules::{Rule, RuleSet, RULE_ORDER};

use crate::config::TaxonomyConfig;
use crate::domain::{ProductLine, RawRelease, VersionType};
use crate::error::Result;
use std::collections::BTreeMap;

/// Full outcome of classifying one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub product_line: ProductLine,
    pub version_type: VersionType,
    /// The rule that decided the product line
    pub rule: Rule,
    /// Decode error of the tags payload, if any
    pub tag_error: Option<String>,
}

/// Maps raw releases onto the product-line / version-type taxonomy
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
    labels: BTreeMap<ProductLine, String>,
}

impl Classifier {
    /// Build a classifier from taxonomy configuration.
    ///
    /// # Returns
    /// * `Ok(Classifier)` - Keyword phrases compiled
    /// * `Err` - If a phrase cannot be compiled
    pub fn new(taxonomy: &TaxonomyConfig) -> Result<Self> {
        Ok(Classifier {
            rules: RuleSet::new(&taxonomy.keywords)?,
            labels: taxonomy.labels.clone(),
        })
    }

    /// Classify a release into `(product_line, version_type)`
    pub fn classify(&self, release: &RawRelease) -> (ProductLine, VersionType) {
        let c = self.classify_detailed(release);
        (c.product_line, c.version_type)
    }

    /// Classify a release and report which rule decided
    pub fn classify_detailed(&self, release: &RawRelease) -> Classification {
        let (text, tag_error) = ReleaseText::from_release(release);
        let (product_line, rule) = self.decide(&text);
        let version_type = version_type_for(product_line, release, &text);

        tracing::debug!(
            release_id = %release.release_id,
            product = %release.product_name,
            %product_line,
            %version_type,
            %rule,
            "classified release"
        );

        Classification {
            product_line,
            version_type,
            rule,
            tag_error,
        }
    }

    pub fn product_line(&self, release: &RawRelease) -> ProductLine {
        let (text, _) = ReleaseText::from_release(release);
        self.decide(&text).0
    }

    pub fn version_type(&self, release: &RawRelease) -> VersionType {
        let (text, _) = ReleaseText::from_release(release);
        let (line, _) = self.decide(&text);
        version_type_for(line, release, &text)
    }

    /// Display label of a product line, honouring configured overrides
    pub fn label(&self, line: ProductLine) -> &str {
        self.labels
            .get(&line)
            .map(String::as_str)
            .unwrap_or_else(|| line.default_label())
    }

    /// Labels for every product line, in display order
    pub fn labels(&self) -> BTreeMap<ProductLine, String> {
        ProductLine::ALL
            .iter()
            .map(|&line| (line, self.label(line).to_string()))
            .collect()
    }

    fn decide(&self, text: &ReleaseText) -> (ProductLine, Rule) {
        RULE_ORDER
            .iter()
            .find_map(|rule| rule.apply(text, &self.rules).map(|line| (line, *rule)))
            .unwrap_or((ProductLine::Other, Rule::Fallback))
    }
}

/// Version type of a release already assigned to `line`.
///
/// App lines are bucketed by platform; everything else by release stage, then
/// by the version text, then by the `is_beta` flag, defaulting to GA.
fn version_type_for(line: ProductLine, release: &RawRelease, text: &ReleaseText) -> VersionType {
    if line.is_app() {
        return if text.contains_any(&["ios", "iphone", "ipad"]) {
            VersionType::Ios
        } else if text.contains("android") {
            VersionType::Android
        } else if text.contains_any(&["desktop", "windows", "mac"]) {
            VersionType::Desktop
        } else {
            VersionType::Other
        };
    }

    VersionType::from_stage(&release.stage)
        .or_else(|| VersionType::from_version_text(&release.version))
        .unwrap_or(if release.is_beta {
            VersionType::Beta
        } else {
            VersionType::Ga
        })
}
