//! Lower-cased text views of a release used by the rules

use crate::domain::RawRelease;

/// Text assembled from a release for matching.
///
/// `all` is `"<product_name> <firmware_type> <tags...>"`; `phrase` is the same
/// text reduced to its word characters separated by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseText {
    pub product_name: String,
    pub version: String,
    pub tags: Vec<String>,
    pub name: String,
    pub all: String,
    pub phrase: String,
}

impl ReleaseText {
    /// Build the text views. A malformed tags payload yields no tags plus the
    /// decode error, so the caller can report it.
    pub fn from_release(release: &RawRelease) -> (Self, Option<String>) {
        let (tags, tag_error) = match release.tags.strings() {
            Ok(tags) => (tags, None),
            Err(reason) => (Vec::new(), Some(reason)),
        };
        let tags: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();

        let product_name = release.product_name.to_lowercase();
        let name = format!("{} {}", product_name, release.firmware_type.to_lowercase());
        let all = format!("{} {}", name, tags.join(" "));
        let phrase = word_phrase(&all);

        let text = ReleaseText {
            product_name,
            version: release.version.to_lowercase(),
            tags,
            name,
            all,
            phrase,
        };
        (text, tag_error)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.all.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.all.contains(n))
    }

    /// "ios" anywhere in the text; guards every OS match
    pub fn mentions_ios(&self) -> bool {
        self.all.contains("ios")
    }
}

/// Runs of word characters joined by single spaces
fn word_phrase(text: &str) -> String {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JsonList;

    #[test]
    fn test_text_assembly() {
        let release = RawRelease {
            product_name: "UniFi OS".to_string(),
            firmware_type: "Console".to_string(),
            tags: vec!["Stable", "unifi-gateway"].into(),
            ..Default::default()
        };
        let (text, err) = ReleaseText::from_release(&release);
        assert!(err.is_none());
        assert_eq!(text.name, "unifi os console");
        assert_eq!(text.all, "unifi os console stable unifi-gateway");
        assert_eq!(text.phrase, "unifi os console stable unifi gateway");
        assert_eq!(text.tags, vec!["stable", "unifi-gateway"]);
    }

    #[test]
    fn test_malformed_tags_reported() {
        let release = RawRelease {
            product_name: "USW".to_string(),
            tags: JsonList::Encoded("[not json".to_string()),
            ..Default::default()
        };
        let (text, err) = ReleaseText::from_release(&release);
        assert!(err.is_some());
        assert!(text.tags.is_empty());
        assert_eq!(text.phrase, "usw");
    }

    #[test]
    fn test_word_phrase_collapses_punctuation() {
        assert_eq!(word_phrase("  u6-pro (v6.5.28) "), "u6 pro v6 5 28");
        assert_eq!(word_phrase("a__b"), "a__b");
    }

    #[test]
    fn test_ios_guard() {
        let release = RawRelease {
            product_name: "UniFi iOS App".to_string(),
            ..Default::default()
        };
        let (text, _) = ReleaseText::from_release(&release);
        assert!(text.mentions_ios());
    }
}
