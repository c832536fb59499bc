//! Source (community post) URL resolution

use crate::config::SourcesConfig;
use crate::domain::RawRelease;

/// Pick the source URL of a release.
///
/// Explicit fields are tried in `sources.url_fields` order; a candidate is
/// trimmed, loses a leading `@`, and must contain `http`. Without one, a
/// community URL is synthesized when the record has a `release_id`.
///
/// # Arguments
/// * `release` - The raw record
/// * `product_name` - Normalized product name
/// * `version` - Normalized version
/// * `sources` - URL field priority and community base URL
pub fn resolve_source_url(
    release: &RawRelease,
    product_name: &str,
    version: &str,
    sources: &SourcesConfig,
) -> Option<String> {
    sources
        .url_fields
        .iter()
        .filter_map(|field| release.source_field(field))
        .find_map(clean_candidate)
        .or_else(|| synthesize(release, product_name, version, sources))
}

fn clean_candidate(raw: &str) -> Option<String> {
    let url = raw.trim();
    let url = url.strip_prefix('@').unwrap_or(url);
    url.contains("http").then(|| url.to_string())
}

fn synthesize(
    release: &RawRelease,
    product_name: &str,
    version: &str,
    sources: &SourcesConfig,
) -> Option<String> {
    let resource_id = release.release_id.trim();
    if resource_id.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}-{}/{}",
        sources.community_base_url.trim_end_matches('/'),
        url_product_name(product_name),
        url_version(version),
        resource_id
    ))
}

/// Spaces become `-`, other non `[A-Za-z0-9-]` characters are dropped and
/// runs of `-` collapse to one.
fn url_product_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c == ' ' { '-' } else { c };
        if c == '-' {
            if !out.ends_with('-') {
                out.push(c);
            }
        } else if c.is_ascii_alphanumeric() {
            out.push(c);
        }
    }
    out
}

fn url_version(version: &str) -> String {
    version
        .chars()
        .map(|c| if c == '.' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}
