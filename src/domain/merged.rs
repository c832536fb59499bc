//! Logical release entries built by folding per-device records together

use super::release::{DownloadLink, Year};
use super::{ProductLine, VersionType};
use serde::Serialize;

/// Release notes contributed by one device record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceNotes {
    pub device_name: String,
    pub notes: String,
}

/// One display entry per distinct `(product_line, version_type, year, version)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRelease {
    pub product_line: ProductLine,
    pub version_type: VersionType,
    pub year: Year,
    /// Display version, taken from the first record
    pub version: String,
    /// Display date (`YYYY-MM-DD` when parseable)
    pub date: String,
    /// Sort key for the date
    pub raw_date: String,
    pub product_name: String,
    pub notes: String,
    pub compatible_devices: Vec<String>,
    pub combined_notes: Vec<DeviceNotes>,
    pub source_urls: Vec<String>,
    pub download_links: Vec<DownloadLink>,
    pub display_title: String,
    pub is_merged: bool,
    /// Raw records folded into this entry
    pub record_count: usize,
}

impl MergedRelease {
    /// Seed an entry from its first record
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product_line: ProductLine,
        version_type: VersionType,
        year: Year,
        version: impl Into<String>,
        date: impl Into<String>,
        raw_date: impl Into<String>,
        product_name: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        let product_name = product_name.into();
        let notes = notes.into();
        let mut release = MergedRelease {
            product_line,
            version_type,
            year,
            version: version.into(),
            date: date.into(),
            raw_date: raw_date.into(),
            display_title: product_name.clone(),
            compatible_devices: vec![product_name.clone()],
            product_name: product_name.clone(),
            notes: notes.clone(),
            combined_notes: Vec::new(),
            source_urls: Vec::new(),
            download_links: Vec::new(),
            is_merged: false,
            record_count: 1,
        };
        release.add_note(&product_name, &notes);
        release
    }

    /// Record another device; returns whether it was new
    pub fn add_device(&mut self, device_name: &str) -> bool {
        if self.compatible_devices.iter().any(|d| d == device_name) {
            return false;
        }
        self.compatible_devices.push(device_name.to_string());
        self.is_merged = self.compatible_devices.len() > 1;
        true
    }

    /// Append a device's notes; blank notes are ignored
    pub fn add_note(&mut self, device_name: &str, notes: &str) -> bool {
        let notes = notes.trim();
        if notes.is_empty() || device_name.is_empty() {
            return false;
        }
        self.combined_notes.push(DeviceNotes {
            device_name: device_name.to_string(),
            notes: notes.to_string(),
        });
        true
    }

    /// Add a source URL unless one with the same path (ignoring the query) exists
    pub fn add_source_url(&mut self, url: &str) -> bool {
        let path = strip_query(url);
        if self.source_urls.iter().any(|u| strip_query(u) == path) {
            return false;
        }
        self.source_urls.push(url.to_string());
        true
    }

    /// Add a download link unless an identical one exists
    pub fn add_download_link(&mut self, link: DownloadLink) -> bool {
        if self.download_links.contains(&link) {
            return false;
        }
        self.download_links.push(link);
        true
    }

    /// Regenerate the title from the current device count.
    ///
    /// `template` understands `{label}`, `{version}` and `{count}`. A single-device
    /// entry keeps its product name.
    pub fn retitle(&mut self, label: &str, template: &str) {
        self.display_title = if self.is_merged {
            template
                .replace("{label}", label)
                .replace("{version}", &self.version)
                .replace("{count}", &self.compatible_devices.len().to_string())
                .trim()
                .to_string()
        } else {
            self.product_name.clone()
        };
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &str = "{label} unified firmware {version} (for {count} devices)";

    fn sample() -> MergedRelease {
        MergedRelease::new(
            ProductLine::UnifiSwitch,
            VersionType::Ga,
            Year::Known(2023),
            "6.0.0",
            "2023-05-01",
            "2023-05-01",
            "USW-24-PoE",
            "- Fixed PoE budget",
        )
    }

    #[test]
    fn test_new_seeds_single_device() {
        let release = sample();
        assert_eq!(release.compatible_devices, vec!["USW-24-PoE"]);
        assert_eq!(release.combined_notes.len(), 1);
        assert_eq!(release.display_title, "USW-24-PoE");
        assert!(!release.is_merged);
        assert_eq!(release.record_count, 1);
    }

    #[test]
    fn test_new_without_notes() {
        let release = MergedRelease::new(
            ProductLine::Uisp,
            VersionType::Beta,
            Year::Unknown,
            "2.0",
            "",
            "",
            "UISP",
            "   ",
        );
        assert!(release.combined_notes.is_empty());
    }

    #[test]
    fn test_add_device_deduplicates() {
        let mut release = sample();
        assert!(release.add_device("USW-48"));
        assert!(!release.add_device("USW-48"));
        assert_eq!(release.compatible_devices, vec!["USW-24-PoE", "USW-48"]);
        assert!(release.is_merged);
    }

    #[test]
    fn test_duplicate_device_is_not_a_merge() {
        let mut release = sample();
        assert!(!release.add_device("USW-24-PoE"));
        assert!(!release.is_merged);
    }

    #[test]
    fn test_add_note_keeps_order() {
        let mut release = sample();
        assert!(release.add_note("USW-48", "Improved LLDP"));
        assert!(!release.add_note("USW-48", ""));
        let devices: Vec<&str> = release
            .combined_notes
            .iter()
            .map(|n| n.device_name.as_str())
            .collect();
        assert_eq!(devices, vec!["USW-24-PoE", "USW-48"]);
    }

    #[test]
    fn test_add_source_url_ignores_query() {
        let mut release = sample();
        assert!(release.add_source_url("https://community.ui.com/releases/x?ref=1"));
        assert!(!release.add_source_url("https://community.ui.com/releases/x?ref=2"));
        assert!(release.add_source_url("https://community.ui.com/releases/y"));
        assert_eq!(release.source_urls.len(), 2);
    }

    #[test]
    fn test_add_download_link_exact_match() {
        let mut release = sample();
        assert!(release.add_download_link(DownloadLink::new("USW", "https://dl/a")));
        assert!(!release.add_download_link(DownloadLink::new("USW", "https://dl/a")));
        assert!(release.add_download_link(DownloadLink::new("USW 48", "https://dl/a")));
        assert_eq!(release.download_links.len(), 2);
    }

    #[test]
    fn test_retitle_merged() {
        let mut release = sample();
        release.add_device("USW-48");
        release.retitle("UniFi Switch", TITLE);
        assert_eq!(
            release.display_title,
            "UniFi Switch unified firmware 6.0.0 (for 2 devices)"
        );
    }

    #[test]
    fn test_retitle_single_keeps_name() {
        let mut release = sample();
        release.retitle("UniFi Switch", TITLE);
        assert_eq!(release.display_title, "USW-24-PoE");
    }
}
