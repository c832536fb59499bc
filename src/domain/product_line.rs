//! Product-line taxonomy
//!
//! Variants are declared in display order, so the derived `Ord` doubles as the
//! timeline's product-line ordering.

use crate::error::{Result, TimelineError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The taxonomy bucket a release is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductLine {
    // Platform
    UnifiOs,
    UnifiNetworkApp,
    UnifiProtectApp,
    UnifiAccessApp,
    UnifiTalkApp,
    UnifiLedApp,
    UnifiConnectApp,
    UnifiDriveApp,
    UnifiPlatformOther,
    // UniFi devices
    UnifiSwitch,
    UnifiGateway,
    UnifiAp,
    UnifiCloud,
    UnifiProtect,
    UnifiAccess,
    UnifiTalk,
    UnifiLed,
    UnifiConnect,
    // Apps and tools
    UnifiApp,
    ProtectApp,
    WifimanApp,
    DesignCenter,
    AccessApp,
    ConnectApp,
    VerifyApp,
    PortalApp,
    IdentityEndpoint,
    // Other product families
    Airmax,
    Airfiber,
    Edgemax,
    Amplifi,
    Ufiber,
    Uisp,
    UnifiOther,
    Other,
}

/// High-level grouping used by the timeline navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ProductGroup {
    #[serde(rename = "Platform")]
    Platform,
    #[serde(rename = "UniFi Devices")]
    Devices,
    #[serde(rename = "APP & Tools")]
    Apps,
    #[serde(rename = "Other Products")]
    OtherProducts,
}

impl ProductGroup {
    pub const ALL: [ProductGroup; 4] = [
        ProductGroup::Platform,
        ProductGroup::Devices,
        ProductGroup::Apps,
        ProductGroup::OtherProducts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProductGroup::Platform => "Platform",
            ProductGroup::Devices => "UniFi Devices",
            ProductGroup::Apps => "APP & Tools",
            ProductGroup::OtherProducts => "Other Products",
        }
    }

    /// Product lines belonging to this group, in display order
    pub fn members(&self) -> Vec<ProductLine> {
        ProductLine::ALL
            .iter()
            .copied()
            .filter(|line| line.group() == *self)
            .collect()
    }
}

impl ProductLine {
    /// Every product line in display order
    pub const ALL: [ProductLine; 35] = [
        ProductLine::UnifiOs,
        ProductLine::UnifiNetworkApp,
        ProductLine::UnifiProtectApp,
        ProductLine::UnifiAccessApp,
        ProductLine::UnifiTalkApp,
        ProductLine::UnifiLedApp,
        ProductLine::UnifiConnectApp,
        ProductLine::UnifiDriveApp,
        ProductLine::UnifiPlatformOther,
        ProductLine::UnifiSwitch,
        ProductLine::UnifiGateway,
        ProductLine::UnifiAp,
        ProductLine::UnifiCloud,
        ProductLine::UnifiProtect,
        ProductLine::UnifiAccess,
        ProductLine::UnifiTalk,
        ProductLine::UnifiLed,
        ProductLine::UnifiConnect,
        ProductLine::UnifiApp,
        ProductLine::ProtectApp,
        ProductLine::WifimanApp,
        ProductLine::DesignCenter,
        ProductLine::AccessApp,
        ProductLine::ConnectApp,
        ProductLine::VerifyApp,
        ProductLine::PortalApp,
        ProductLine::IdentityEndpoint,
        ProductLine::Airmax,
        ProductLine::Airfiber,
        ProductLine::Edgemax,
        ProductLine::Amplifi,
        ProductLine::Ufiber,
        ProductLine::Uisp,
        ProductLine::UnifiOther,
        ProductLine::Other,
    ];

    /// Stable identifier, e.g. `unifi-switch`
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductLine::UnifiOs => "unifi-os",
            ProductLine::UnifiNetworkApp => "unifi-network-app",
            ProductLine::UnifiProtectApp => "unifi-protect-app",
            ProductLine::UnifiAccessApp => "unifi-access-app",
            ProductLine::UnifiTalkApp => "unifi-talk-app",
            ProductLine::UnifiLedApp => "unifi-led-app",
            ProductLine::UnifiConnectApp => "unifi-connect-app",
            ProductLine::UnifiDriveApp => "unifi-drive-app",
            ProductLine::UnifiPlatformOther => "unifi-platform-other",
            ProductLine::UnifiSwitch => "unifi-switch",
            ProductLine::UnifiGateway => "unifi-gateway",
            ProductLine::UnifiAp => "unifi-ap",
            ProductLine::UnifiCloud => "unifi-cloud",
            ProductLine::UnifiProtect => "unifi-protect",
            ProductLine::UnifiAccess => "unifi-access",
            ProductLine::UnifiTalk => "unifi-talk",
            ProductLine::UnifiLed => "unifi-led",
            ProductLine::UnifiConnect => "unifi-connect",
            ProductLine::UnifiApp => "unifi-app",
            ProductLine::ProtectApp => "protect-app",
            ProductLine::WifimanApp => "wifiman-app",
            ProductLine::DesignCenter => "design-center",
            ProductLine::AccessApp => "access-app",
            ProductLine::ConnectApp => "connect-app",
            ProductLine::VerifyApp => "verify-app",
            ProductLine::PortalApp => "portal-app",
            ProductLine::IdentityEndpoint => "identity-endpoint",
            ProductLine::Airmax => "airmax",
            ProductLine::Airfiber => "airfiber",
            ProductLine::Edgemax => "edgemax",
            ProductLine::Amplifi => "amplifi",
            ProductLine::Ufiber => "ufiber",
            ProductLine::Uisp => "uisp",
            ProductLine::UnifiOther => "unifi-other",
            ProductLine::Other => "other",
        }
    }

    /// Built-in display label
    pub fn default_label(&self) -> &'static str {
        match self {
            ProductLine::UnifiOs => "UniFi OS/Dream OS",
            ProductLine::UnifiNetworkApp => "UniFi Network Application",
            ProductLine::UnifiProtectApp => "UniFi Protect Application",
            ProductLine::UnifiAccessApp => "UniFi Access Application",
            ProductLine::UnifiTalkApp => "UniFi Talk Application",
            ProductLine::UnifiLedApp => "UniFi LED Application",
            ProductLine::UnifiConnectApp => "UniFi Connect Application",
            ProductLine::UnifiDriveApp => "UniFi Drive Application",
            ProductLine::UnifiPlatformOther => "Security & Platform Bulletins",
            ProductLine::UnifiSwitch => "UniFi Switch",
            ProductLine::UnifiGateway => "UniFi Gateway",
            ProductLine::UnifiAp => "UniFi AP",
            ProductLine::UnifiCloud => "UniFi Cloud Key",
            ProductLine::UnifiProtect => "UniFi Protect Devices",
            ProductLine::UnifiAccess => "UniFi Access Devices",
            ProductLine::UnifiTalk => "UniFi Talk Devices",
            ProductLine::UnifiLed => "UniFi LED Devices",
            ProductLine::UnifiConnect => "UniFi Connect Devices",
            ProductLine::UnifiApp => "UniFi APP",
            ProductLine::ProtectApp => "Protect APP",
            ProductLine::WifimanApp => "WiFiMan APP",
            ProductLine::DesignCenter => "Design Center",
            ProductLine::AccessApp => "Access APP",
            ProductLine::ConnectApp => "Connect APP",
            ProductLine::VerifyApp => "Verify APP",
            ProductLine::PortalApp => "Portal APP",
            ProductLine::IdentityEndpoint => "Identity Endpoint",
            ProductLine::Airmax => "airMAX",
            ProductLine::Airfiber => "airFiber",
            ProductLine::Edgemax => "EdgeMAX",
            ProductLine::Amplifi => "AmpliFi",
            ProductLine::Ufiber => "UFiber",
            ProductLine::Uisp => "UISP/UNMS",
            ProductLine::UnifiOther => "Other UniFi Products",
            ProductLine::Other => "Other",
        }
    }

    pub fn group(&self) -> ProductGroup {
        use ProductLine::*;
        match self {
            UnifiOs | UnifiNetworkApp | UnifiProtectApp | UnifiAccessApp | UnifiTalkApp
            | UnifiLedApp | UnifiConnectApp | UnifiDriveApp | UnifiPlatformOther => {
                ProductGroup::Platform
            }
            UnifiSwitch | UnifiGateway | UnifiAp | UnifiCloud | UnifiProtect | UnifiAccess
            | UnifiTalk | UnifiLed | UnifiConnect => ProductGroup::Devices,
            UnifiApp | ProtectApp | WifimanApp | DesignCenter | AccessApp | ConnectApp
            | VerifyApp | PortalApp | IdentityEndpoint => ProductGroup::Apps,
            Airmax | Airfiber | Edgemax | Amplifi | Ufiber | Uisp | UnifiOther | Other => {
                ProductGroup::OtherProducts
            }
        }
    }

    /// Mobile/desktop app lines, whose version type is a platform rather than a stage.
    /// Design Center is grouped with the apps but versioned like firmware.
    pub fn is_app(&self) -> bool {
        matches!(
            self,
            ProductLine::UnifiApp
                | ProductLine::ProtectApp
                | ProductLine::WifimanApp
                | ProductLine::AccessApp
                | ProductLine::ConnectApp
                | ProductLine::VerifyApp
                | ProductLine::PortalApp
                | ProductLine::IdentityEndpoint
        )
    }
}

impl FromStr for ProductLine {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ProductLine::ALL
            .iter()
            .copied()
            .find(|line| line.as_str() == wanted)
            .ok_or_else(|| TimelineError::config(format!("Unknown product line: '{}'", s)))
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_round_trip() {
        for line in ProductLine::ALL {
            assert_eq!(line.as_str().parse::<ProductLine>().unwrap(), line);
        }
    }

    #[test]
    fn test_serde_matches_identifier() {
        for line in ProductLine::ALL {
            let json = serde_json::to_string(&line).unwrap();
            assert_eq!(json, format!("\"{}\"", line.as_str()));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "UniFi-Switch".parse::<ProductLine>().unwrap(),
            ProductLine::UnifiSwitch
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert!("unifi-gateway-cloudkey".parse::<ProductLine>().is_err());
    }

    #[test]
    fn test_display_order_follows_groups() {
        assert!(ProductLine::UnifiOs < ProductLine::UnifiSwitch);
        assert!(ProductLine::UnifiConnect < ProductLine::UnifiApp);
        assert!(ProductLine::IdentityEndpoint < ProductLine::Airmax);
        assert!(ProductLine::UnifiOther < ProductLine::Other);
    }

    #[test]
    fn test_groups_partition_all_lines() {
        let total: usize = ProductGroup::ALL.iter().map(|g| g.members().len()).sum();
        assert_eq!(total, ProductLine::ALL.len());
        assert_eq!(ProductGroup::Platform.members().len(), 9);
        assert_eq!(ProductGroup::Devices.members().len(), 9);
        assert_eq!(ProductGroup::Apps.members().len(), 9);
    }

    #[test]
    fn test_app_lines() {
        assert!(ProductLine::ProtectApp.is_app());
        assert!(ProductLine::IdentityEndpoint.is_app());
        assert!(!ProductLine::DesignCenter.is_app());
        assert!(!ProductLine::UnifiProtectApp.is_app());
    }
}
