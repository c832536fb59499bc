//! Product-line keyword table
//!
//! An ordered list of product lines with the phrases that identify them. Order
//! matters: the keyword scan returns the first line with a matching phrase.

use crate::domain::ProductLine;
use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One row of the keyword table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeywordRule {
    pub line: ProductLine,
    pub phrases: Vec<String>,
}

impl KeywordRule {
    pub fn new(line: ProductLine, phrases: &[&str]) -> Self {
        KeywordRule {
            line,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Built-in keyword table.
pub fn default_keyword_table() -> Vec<KeywordRule> {
    use ProductLine::*;
    vec![
        // Platform
        KeywordRule::new(
            UnifiOs,
            &[
                "unifi os",
                "unifi console",
                "dream os",
                "udm os",
                "dream machine os",
                "unifi os console",
                "uisp os",
            ],
        ),
        KeywordRule::new(
            UnifiNetworkApp,
            &[
                "unifi network application",
                "network controller",
                "network management",
                "uap controller",
                "unifi sdn",
            ],
        ),
        KeywordRule::new(
            UnifiProtectApp,
            &[
                "unifi protect application",
                "unifi protect server",
                "protect controller",
                "video controller",
            ],
        ),
        KeywordRule::new(
            UnifiAccessApp,
            &[
                "access application",
                "access app",
                "access controller",
                "door controller",
                "identity controller",
            ],
        ),
        KeywordRule::new(
            UnifiTalkApp,
            &[
                "talk application",
                "talk app",
                "talk controller",
                "voip controller",
                "voice controller",
                "phone controller",
            ],
        ),
        KeywordRule::new(
            UnifiLedApp,
            &[
                "led application",
                "led controller",
                "led app",
                "lighting controller",
            ],
        ),
        KeywordRule::new(
            UnifiConnectApp,
            &[
                "connect application",
                "connect app",
                "connect controller",
                "sense controller",
                "iot controller",
            ],
        ),
        KeywordRule::new(
            UnifiDriveApp,
            &[
                "drive application",
                "drive app",
                "storage controller",
                "backup controller",
            ],
        ),
        KeywordRule::new(
            UnifiPlatformOther,
            &[
                "security advisory",
                "security bulletin",
                "advisory bulletin",
                "platform advisory",
            ],
        ),
        // Devices
        KeywordRule::new(
            UnifiSwitch,
            &[
                "switch",
                "campus",
                "aggregation",
                "usw",
                "flex switch",
                "enterprise switch",
                "poe switch",
                "switch firmware",
                "usw firmware",
            ],
        ),
        KeywordRule::new(
            UnifiGateway,
            &[
                "gateway",
                "usg",
                "security gateway",
                "routing",
                "cable internet",
                "mobile routers",
                "mobile router",
                "dream router",
                "dream machine",
                "udr",
                "udm",
                "lte",
                "unifi lte",
                "udm firmware",
                "dream firmware",
                "gateway firmware",
                "usg firmware",
            ],
        ),
        KeywordRule::new(
            UnifiAp,
            &[
                "access point",
                "uap",
                "wifi",
                "wireless",
                "u6",
                "nanohd",
                "flexhd",
                "ac-lite",
                "ac-pro",
                "access point firmware",
                "uap firmware",
                "ap firmware",
                "bridge",
            ],
        ),
        KeywordRule::new(
            UnifiCloud,
            &[
                "cloud key",
                "uck",
                "cloud gateway",
                "console",
                "ck",
                "cloudkey firmware",
            ],
        ),
        KeywordRule::new(
            UnifiProtect,
            &[
                "protect",
                "camera",
                "g4",
                "g3",
                "doorbell",
                "viewport",
                "nvr",
                "unvr",
                "video",
                "camera firmware",
                "g4 firmware",
                "g3 firmware",
                "doorbell firmware",
                "viewport firmware",
            ],
        ),
        KeywordRule::new(
            UnifiAccess,
            &[
                "access",
                "door",
                "smart lock",
                "hub",
                "identity",
                "access hub firmware",
                "door firmware",
                "smart lock firmware",
            ],
        ),
        KeywordRule::new(
            UnifiTalk,
            &["talk", "phone", "voip", "phone firmware", "talk hardware firmware"],
        ),
        KeywordRule::new(
            UnifiLed,
            &["led", "light", "lighting", "led hardware firmware", "light firmware"],
        ),
        KeywordRule::new(
            UnifiConnect,
            &["connect", "sense", "sensor", "uid", "sense firmware", "sensor firmware"],
        ),
        // Apps and tools
        KeywordRule::new(
            ProtectApp,
            &[
                "protect app",
                "protect ios",
                "protect android",
                "unifi play",
                "unifi play ios",
                "play android",
                "play ios",
                "play app",
            ],
        ),
        KeywordRule::new(AccessApp, &["access app", "access ios", "access android"]),
        KeywordRule::new(ConnectApp, &["connect app", "connect ios", "connect android"]),
        KeywordRule::new(VerifyApp, &["verify app", "verify ios", "verify android"]),
        KeywordRule::new(PortalApp, &["portal app", "portal ios", "portal android"]),
        KeywordRule::new(
            IdentityEndpoint,
            &[
                "identity endpoint",
                "identity endpoint ios",
                "identity endpoint android",
            ],
        ),
        KeywordRule::new(
            WifimanApp,
            &[
                "wifiman app",
                "wifiman ios",
                "wifiman android",
                "wifiman desktop",
                "wifiman for desktop",
            ],
        ),
        KeywordRule::new(UnifiApp, &["unifi app", "unifi ios", "unifi android"]),
        KeywordRule::new(DesignCenter, &["unifi design center", "unifi innerspace"]),
        // Other product families
        KeywordRule::new(
            Airmax,
            &[
                "airmax",
                "nanostation",
                "litebeam",
                "powerbeam",
                "rocket",
                "prism",
                "aircube",
                "60ghz",
            ],
        ),
        KeywordRule::new(Airfiber, &["airfiber", "ltu", "gigabeam"]),
        KeywordRule::new(Edgemax, &["edgerouter", "edgeswitch", "edgepoint", "edgemax"]),
        KeywordRule::new(Amplifi, &["amplifi", "alien", "mesh", "poweramp"]),
        KeywordRule::new(Ufiber, &["ufiber", "fiber"]),
        KeywordRule::new(
            Uisp,
            &[
                "uisp",
                "unms",
                "isp design",
                "isp-app",
                "uisp design center",
                "isp design center",
            ],
        ),
        // Catch-all, kept last
        KeywordRule::new(UnifiOther, &["unifi"]),
    ]
}

/// A phrase compiled to a whole-word matcher
#[derive(Debug, Clone)]
struct CompiledPhrase {
    phrase: String,
    pattern: Regex,
}

/// Keyword table compiled once at classifier construction
#[derive(Debug, Clone)]
pub struct KeywordTable {
    rows: Vec<(ProductLine, Vec<CompiledPhrase>)>,
}

impl KeywordTable {
    /// Compile every phrase into a `\b<phrase>\b` regex.
    pub fn compile(rules: &[KeywordRule]) -> Result<Self> {
        let mut rows = Vec::with_capacity(rules.len());
        for rule in rules {
            let mut phrases = Vec::with_capacity(rule.phrases.len());
            for phrase in &rule.phrases {
                let phrase = phrase.to_lowercase();
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&phrase)))?;
                phrases.push(CompiledPhrase { phrase, pattern });
            }
            rows.push((rule.line, phrases));
        }
        Ok(KeywordTable { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First product line (in table order) with a phrase matching `text`.
    ///
    /// `skip` is consulted before each row; the OS rows are scanned separately
    /// by the classifier so they can be guarded against "iOS".
    pub fn first_match<F>(&self, text: &str, skip: F) -> Option<(ProductLine, &str)>
    where
        F: Fn(ProductLine) -> bool,
    {
        self.rows
            .iter()
            .filter(|(line, _)| !skip(*line))
            .find_map(|(line, phrases)| {
                phrases
                    .iter()
                    .find(|p| p.pattern.is_match(text))
                    .map(|p| (*line, p.phrase.as_str()))
            })
    }

    /// Whether any phrase of `line` matches `text`
    pub fn matches_line(&self, line: ProductLine, text: &str) -> bool {
        self.rows
            .iter()
            .filter(|(l, _)| *l == line)
            .any(|(_, phrases)| phrases.iter().any(|p| p.pattern.is_match(text)))
    }
}
