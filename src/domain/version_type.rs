use serde::{Deserialize, Serialize};
use std::fmt;

/// Release maturity stage, or target platform for app products
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VersionType {
    #[serde(rename = "GA")]
    Ga,
    #[serde(rename = "RC")]
    Rc,
    Beta,
    Alpha,
    #[serde(rename = "iOS")]
    Ios,
    Android,
    Desktop,
    Other,
}

impl VersionType {
    pub const ALL: [VersionType; 8] = [
        VersionType::Ga,
        VersionType::Rc,
        VersionType::Beta,
        VersionType::Alpha,
        VersionType::Ios,
        VersionType::Android,
        VersionType::Desktop,
        VersionType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionType::Ga => "GA",
            VersionType::Rc => "RC",
            VersionType::Beta => "Beta",
            VersionType::Alpha => "Alpha",
            VersionType::Ios => "iOS",
            VersionType::Android => "Android",
            VersionType::Desktop => "Desktop",
            VersionType::Other => "Other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VersionType::Ga => "General Availability",
            VersionType::Rc => "Release Candidate",
            VersionType::Beta => "Beta",
            VersionType::Alpha => "Alpha",
            VersionType::Ios => "iOS",
            VersionType::Android => "Android",
            VersionType::Desktop => "Desktop",
            VersionType::Other => "Other Platform",
        }
    }

    /// Interpret a free-text release stage such as `GA`, `RC` or `BETA`.
    ///
    /// # Returns
    /// * `Some(VersionType)` - The stage clearly names a maturity level
    /// * `None` - The stage is empty or inconclusive
    pub fn from_stage(stage: &str) -> Option<Self> {
        let stage = stage.to_lowercase();
        if stage.contains("ga") || stage.contains("general") {
            Some(VersionType::Ga)
        } else if stage.contains("rc") || stage.contains("release candidate") {
            Some(VersionType::Rc)
        } else if stage.contains("beta") {
            Some(VersionType::Beta)
        } else if stage.contains("alpha") {
            Some(VersionType::Alpha)
        } else {
            None
        }
    }

    /// Infer the maturity level from the version text itself.
    ///
    /// A bare `b` or `a` only counts when it is not part of a longer word,
    /// e.g. `6.5.28b3` is a beta while `6.0.0-patch` is not an alpha.
    pub fn from_version_text(version: &str) -> Option<Self> {
        let version = version.to_lowercase();
        if version.contains("rc") {
            Some(VersionType::Rc)
        } else if version.contains("beta") || has_lone_letter(&version, 'b') {
            Some(VersionType::Beta)
        } else if version.contains("alpha") || has_lone_letter(&version, 'a') {
            Some(VersionType::Alpha)
        } else {
            None
        }
    }
}

fn has_lone_letter(text: &str, letter: char) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        if c != letter {
            return false;
        }
        let before = i.checked_sub(1).map(|j| chars[j]);
        let after = chars.get(i + 1).copied();
        !before.is_some_and(char::is_alphabetic) && !after.is_some_and(char::is_alphabetic)
    })
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
