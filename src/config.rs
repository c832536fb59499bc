use crate::classifier::keywords::{default_keyword_table, KeywordRule};
use crate::domain::ProductLine;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "UNIFI_TIMELINE_CONFIG";

/// Config file name looked up in the working directory and the user config dir
pub const CONFIG_FILE_NAME: &str = "timeline.toml";

/// Represents the complete configuration for unifi-timeline.
///
/// Contains output settings, display strings, source URL rules and the
/// classification taxonomy.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("timeline_output")
}

fn default_output_file() -> String {
    "timeline.json".to_string()
}

fn default_true() -> bool {
    true
}

/// Where the timeline document is written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_output_file")]
    pub file: String,

    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: default_output_dir(),
            file: default_output_file(),
            pretty: true,
        }
    }
}

impl OutputConfig {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

fn default_merged_title() -> String {
    "{label} unified firmware {version} (for {count} devices)".to_string()
}

fn default_link_name() -> String {
    "Download".to_string()
}

fn default_unknown_product() -> String {
    "Unknown Product".to_string()
}

fn default_unknown_version() -> String {
    "Unknown Version".to_string()
}

/// Display strings used while building merged entries.
///
/// `merged_title` understands the `{label}`, `{version}` and `{count}` placeholders.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_merged_title")]
    pub merged_title: String,

    #[serde(default = "default_link_name")]
    pub default_link_name: String,

    #[serde(default = "default_unknown_product")]
    pub unknown_product: String,

    #[serde(default = "default_unknown_version")]
    pub unknown_version: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            merged_title: default_merged_title(),
            default_link_name: default_link_name(),
            unknown_product: default_unknown_product(),
            unknown_version: default_unknown_version(),
        }
    }
}

fn default_community_base_url() -> String {
    "https://community.ui.com/releases".to_string()
}

/// Returns the default source-URL field priority.
fn default_url_fields() -> Vec<String> {
    vec![
        "source_url".to_string(),
        "post_url".to_string(),
        "url".to_string(),
        "thread_url".to_string(),
        "forum_url".to_string(),
        "original_post".to_string(),
    ]
}

/// Rules for resolving a release's source (community post) URL.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourcesConfig {
    #[serde(default = "default_community_base_url")]
    pub community_base_url: String,

    #[serde(default = "default_url_fields")]
    pub url_fields: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            community_base_url: default_community_base_url(),
            url_fields: default_url_fields(),
        }
    }
}

/// Classification taxonomy: the ordered keyword table and label overrides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaxonomyConfig {
    #[serde(default = "default_keyword_table")]
    pub keywords: Vec<KeywordRule>,

    #[serde(default)]
    pub labels: BTreeMap<ProductLine, String>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        TaxonomyConfig {
            keywords: default_keyword_table(),
            labels: BTreeMap::new(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. Path in the `UNIFI_TIMELINE_CONFIG` environment variable
/// 3. `timeline.toml` in current directory
/// 4. `<config dir>/unifi-timeline/timeline.toml` in user config directory
/// 5. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    match resolve_config_path(config_path) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            load_config_file(&path)
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Reads and parses one configuration file.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

fn resolve_config_path(config_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("unifi-timeline").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        let config = Config::default();
        assert_eq!(
            config.output.path(),
            PathBuf::from("timeline_output").join("timeline.json")
        );
        assert!(config.output.pretty);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[display]
default_link_name = "Get it"
"#,
        )
        .unwrap();
        assert_eq!(config.display.default_link_name, "Get it");
        assert_eq!(config.display.merged_title, default_merged_title());
        assert_eq!(config.taxonomy.keywords, default_keyword_table());
        assert_eq!(config.sources.url_fields.len(), 6);
    }

    #[test]
    fn test_taxonomy_from_toml() {
        let config: Config = toml::from_str(
            r#"
[taxonomy.labels]
unifi-ap = "Access Points"

[[taxonomy.keywords]]
line = "unifi-switch"
phrases = ["usw"]

[[taxonomy.keywords]]
line = "unifi-other"
phrases = ["unifi"]
"#,
        )
        .unwrap();
        assert_eq!(config.taxonomy.keywords.len(), 2);
        assert_eq!(config.taxonomy.keywords[0].line, ProductLine::UnifiSwitch);
        assert_eq!(
            config.taxonomy.labels.get(&ProductLine::UnifiAp),
            Some(&"Access Points".to_string())
        );
    }

    #[test]
    fn test_unknown_product_line_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
[[taxonomy.keywords]]
line = "toaster"
phrases = ["bread"]
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(load_config(Some("/definitely/not/here/timeline.toml")).is_err());
    }
}
