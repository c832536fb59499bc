use std::cmp::Ordering;

/// Prerelease ordinals; lower sorts earlier
const RC_MARKER: i64 = -1;
const BETA_MARKER: i64 = -2;
const ALPHA_MARKER: i64 = -3;

/// One component of a decomposed version.
///
/// Numbers sort before text so mixed components still compare totally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    Num(i64),
    Text(String),
}

/// Ordering key for version strings. Used only for sorting, never for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortableKey {
    Parts(Vec<KeyPart>),
    /// Fallback for input that could not be decomposed
    Raw(String),
}

impl Ord for SortableKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortableKey::Parts(a), SortableKey::Parts(b)) => a.cmp(b),
            (SortableKey::Raw(a), SortableKey::Raw(b)) => a.cmp(b),
            (SortableKey::Raw(_), SortableKey::Parts(_)) => Ordering::Less,
            (SortableKey::Parts(_), SortableKey::Raw(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortableKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Decomposes a version string into a comparable key.
///
/// A leading `version`/`v` token is stripped. A `-rc`, `-beta` or `-alpha`
/// suffix prepends a negative ordinal (followed by the suffix's own number),
/// so prereleases sort below finals and alpha < beta < rc. The base is split
/// on `.` with all-digit components compared numerically.
///
/// # Example
/// ```ignore
/// assert!(sortable_key("2.1.0") > sortable_key("2.1.0-rc.1"));
/// assert!(sortable_key("2.1.0-rc.1") > sortable_key("2.1.0-beta.3"));
/// ```
pub fn sortable_key(version: &str) -> SortableKey {
    decompose(version).unwrap_or_else(|| SortableKey::Raw(version.to_string()))
}

fn decompose(version: &str) -> Option<SortableKey> {
    let lowered = version.trim().to_lowercase();
    let stripped = lowered
        .strip_prefix("version")
        .or_else(|| lowered.strip_prefix('v'))
        .unwrap_or(&lowered)
        .trim();

    let mut parts = Vec::new();
    let (base, suffix) = match stripped.split_once('-') {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (stripped, None),
    };

    if let Some(suffix) = suffix {
        for (label, marker) in [("rc", RC_MARKER), ("beta", BETA_MARKER), ("alpha", ALPHA_MARKER)] {
            if suffix.contains(label) {
                parts.push(KeyPart::Num(marker));
                let rest = suffix.replace(label, "").replace('.', "");
                let rest = rest.trim();
                if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                    parts.push(KeyPart::Num(rest.parse().ok()?));
                }
                break;
            }
        }
    }

    for component in base.split('.') {
        if !component.is_empty() && component.chars().all(|c| c.is_ascii_digit()) {
            parts.push(KeyPart::Num(component.parse().ok()?));
        } else {
            parts.push(KeyPart::Text(component.to_string()));
        }
    }

    Some(SortableKey::Parts(parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[i64]) -> SortableKey {
        SortableKey::Parts(values.iter().map(|&n| KeyPart::Num(n)).collect())
    }

    #[test]
    fn test_plain_version() {
        assert_eq!(sortable_key("2.1.0"), nums(&[2, 1, 0]));
    }

    #[test]
    fn test_prefix_stripped() {
        assert_eq!(sortable_key("v4.0.6"), nums(&[4, 0, 6]));
        assert_eq!(sortable_key("Version 7.3.83"), nums(&[7, 3, 83]));
        assert_eq!(sortable_key("  V1.2 "), nums(&[1, 2]));
    }

    #[test]
    fn test_prerelease_suffixes() {
        assert_eq!(sortable_key("2.1.0-rc.1"), nums(&[-1, 1, 2, 1, 0]));
        assert_eq!(sortable_key("2.1.0-beta.3"), nums(&[-2, 3, 2, 1, 0]));
        assert_eq!(sortable_key("2.1.0-alpha"), nums(&[-3, 2, 1, 0]));
    }

    #[test]
    fn test_release_maturity_ordering() {
        let ga = sortable_key("2.1.0");
        let rc = sortable_key("2.1.0-rc.1");
        let beta = sortable_key("2.1.0-beta.3");
        let alpha = sortable_key("2.1.0-alpha.1");
        assert!(ga > rc);
        assert!(rc > beta);
        assert!(beta > alpha);
    }

    #[test]
    fn test_numeric_components_compare_numerically() {
        assert!(sortable_key("7.10.1") > sortable_key("7.9.12"));
        assert!(sortable_key("10.0") > sortable_key("9.99"));
    }

    #[test]
    fn test_text_components_sort_after_numbers() {
        assert_eq!(
            sortable_key("6.5.28b3"),
            SortableKey::Parts(vec![
                KeyPart::Num(6),
                KeyPart::Num(5),
                KeyPart::Text("28b3".to_string())
            ])
        );
        assert!(sortable_key("1.x") > sortable_key("1.9"));
    }

    #[test]
    fn test_unknown_suffix_ignored() {
        assert_eq!(sortable_key("6-0-0"), nums(&[6]));
    }

    #[test]
    fn test_overflow_falls_back_to_raw() {
        let huge = "99999999999999999999999.1";
        assert_eq!(sortable_key(huge), SortableKey::Raw(huge.to_string()));
        assert!(sortable_key(huge) < sortable_key("0.0.1"));
    }
}
