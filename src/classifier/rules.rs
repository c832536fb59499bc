//! Ordered product-line rules
//!
//! Rules are evaluated strictly in [`RULE_ORDER`]; the first rule that yields a
//! product line decides. The order is part of the contract: the OS rule must run
//! before the mobile-app rule and both before the generic keyword scan.

use super::context::ReleaseText;
use super::keywords::{KeywordRule, KeywordTable};
use crate::domain::ProductLine;
use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Substrings that name UniFi OS at the top-level OS check
pub const OS_MARKERS: [&str; 4] = ["unifi os", "dream os", "udm os", "console os"];

/// Substrings that re-route a `unifi-gateway` tag to UniFi OS
// TODO: fold into OS_MARKERS once sample data confirms "console os" never carries a gateway tag
pub const GATEWAY_OS_MARKERS: [&str; 3] = ["unifi os", "dream os", "udm os"];

/// Substrings that mark a mobile app release
pub const MOBILE_MARKERS: [&str; 5] = ["ios", "iphone", "ipad", "android", "mobile app"];

/// Tags (besides `unifi-*`) that name a product line directly; `unms` is the
/// old name of `uisp`
pub const DIRECT_TAGS: [&str; 8] = [
    "edgemax",
    "airmax",
    "airfiber",
    "amplifi",
    "ufiber",
    "uisp",
    "unms",
    "design-center",
];

/// Secondary keywords for mobile releases, checked in this order
const MOBILE_APP_ROUTES: [(&[&str], ProductLine); 8] = [
    (&["play", "protect"], ProductLine::ProtectApp),
    (&["wifiman"], ProductLine::WifimanApp),
    (&["access"], ProductLine::AccessApp),
    (&["connect"], ProductLine::ConnectApp),
    (&["verify"], ProductLine::VerifyApp),
    (&["portal"], ProductLine::PortalApp),
    (&["identity"], ProductLine::IdentityEndpoint),
    (&["unifi"], ProductLine::UnifiApp),
];

/// Family names checked by substring when nothing else matched
const FAMILY_FALLBACKS: [(&[&str], ProductLine); 6] = [
    (&["edgemax", "edgerouter", "edgeswitch"], ProductLine::Edgemax),
    (&["airmax"], ProductLine::Airmax),
    (&["airfiber", "ltu"], ProductLine::Airfiber),
    (&["amplifi"], ProductLine::Amplifi),
    (&["ufiber"], ProductLine::Ufiber),
    (&["uisp", "unms"], ProductLine::Uisp),
];

/// A product-line decision rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// 5.x.x UniFi controller releases
    LegacyController,
    /// UniFi OS / Dream OS, unless the text mentions iOS
    OsOverride,
    /// Mobile apps routed by a secondary keyword
    MobileApp,
    /// A `unifi-*` or family tag names the line
    DirectTag,
    /// Whole-word scan of the keyword table
    KeywordTable,
    /// Substring fallbacks ending in `unifi-other` / `other`
    Fallback,
}

/// Evaluation order of the product-line rules
pub const RULE_ORDER: [Rule; 6] = [
    Rule::LegacyController,
    Rule::OsOverride,
    Rule::MobileApp,
    Rule::DirectTag,
    Rule::KeywordTable,
    Rule::Fallback,
];

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::LegacyController => "legacy_controller",
            Rule::OsOverride => "os_override",
            Rule::MobileApp => "mobile_app",
            Rule::DirectTag => "direct_tag",
            Rule::KeywordTable => "keyword_table",
            Rule::Fallback => "fallback",
        }
    }

    /// Apply this rule; `None` passes the decision to the next rule
    pub fn apply(&self, text: &ReleaseText, set: &RuleSet) -> Option<ProductLine> {
        match self {
            Rule::LegacyController => legacy_controller(text, set),
            Rule::OsOverride => os_override(text),
            Rule::MobileApp => mobile_app(text),
            Rule::DirectTag => direct_tag(text),
            Rule::KeywordTable => keyword_scan(text, &set.keywords),
            Rule::Fallback => Some(fallback(text, set)),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiled matchers shared by all rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub keywords: KeywordTable,
    legacy_version: Regex,
    controller: Regex,
}

impl RuleSet {
    /// Compile the keyword table and the fixed version/controller patterns
    pub fn new(keyword_rules: &[KeywordRule]) -> Result<Self> {
        Ok(RuleSet {
            keywords: KeywordTable::compile(keyword_rules)?,
            legacy_version: Regex::new(r"\b5\.\d+\.\d+\b")?,
            controller: Regex::new(
                r"unifi.*controller|controller.*unifi|network.*controller|\bunifi\s+\d+\.\d+\.\d+",
            )?,
        })
    }
}

/// True when the text names UniFi OS and does not mention iOS
fn names_os(text: &ReleaseText, markers: &[&str]) -> bool {
    text.contains_any(markers) && !text.mentions_ios()
}

fn legacy_controller(text: &ReleaseText, set: &RuleSet) -> Option<ProductLine> {
    let is_legacy = text.product_name.contains("unifi")
        && set.legacy_version.is_match(&text.version)
        && text.contains_any(&["stable", "controller"]);
    is_legacy.then_some(ProductLine::UnifiNetworkApp)
}

fn os_override(text: &ReleaseText) -> Option<ProductLine> {
    names_os(text, &OS_MARKERS).then_some(ProductLine::UnifiOs)
}

fn mobile_app(text: &ReleaseText) -> Option<ProductLine> {
    if !text.contains_any(&MOBILE_MARKERS) {
        return None;
    }
    MOBILE_APP_ROUTES
        .iter()
        .find(|(keywords, _)| text.contains_any(keywords))
        .map(|(_, line)| *line)
}

/// The first tag that names a product line, in original tag order
pub fn primary_tag(tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(String::as_str)
        .find(|tag| tag.starts_with("unifi-") || DIRECT_TAGS.contains(tag))
}

fn direct_tag(text: &ReleaseText) -> Option<ProductLine> {
    let tag = primary_tag(&text.tags)?;
    match tag {
        "unifi-gateway" => Some(gateway_or_os(text)),
        "unifi-gateway-cloudkey" if text.contains("gateway") => Some(gateway_or_os(text)),
        "unifi-gateway-cloudkey" | "unifi-cloud" | "unifi-cloudkey" => {
            Some(ProductLine::UnifiCloud)
        }
        "unifi-switch" | "unifi-switching" | "unifi-routing-switching" => {
            Some(ProductLine::UnifiSwitch)
        }
        "unifi-wireless" if text.contains("lte") => Some(ProductLine::UnifiGateway),
        "unifi-wireless" => Some(ProductLine::UnifiAp),
        "unms" => Some(ProductLine::Uisp),
        // Any other tag that is itself a product-line id is taken as-is
        other => other.parse().ok(),
    }
}

fn gateway_or_os(text: &ReleaseText) -> ProductLine {
    if names_os(text, &GATEWAY_OS_MARKERS) {
        ProductLine::UnifiOs
    } else {
        ProductLine::UnifiGateway
    }
}

fn keyword_scan(text: &ReleaseText, keywords: &KeywordTable) -> Option<ProductLine> {
    if !text.mentions_ios() && keywords.matches_line(ProductLine::UnifiOs, &text.phrase) {
        return Some(ProductLine::UnifiOs);
    }
    keywords
        .first_match(&text.phrase, |line| line == ProductLine::UnifiOs)
        .map(|(line, _)| line)
}

fn fallback(text: &ReleaseText, set: &RuleSet) -> ProductLine {
    if text.contains("unifi") {
        if text.contains("play") {
            return ProductLine::ProtectApp;
        }
        if set.controller.is_match(&text.all) {
            return ProductLine::UnifiNetworkApp;
        }
        return ProductLine::UnifiOther;
    }
    FAMILY_FALLBACKS
        .iter()
        .find(|(names, _)| text.contains_any(names))
        .map(|(_, line)| *line)
        .unwrap_or(ProductLine::Other)
}
