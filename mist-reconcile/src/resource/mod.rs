//! Desired-state types for each resource kind.
//!
//! Every optional field is an `Option`; `None` means "unset" and is never
//! sent to the API, while `Some(false)` / `Some(0)` are sent as given.

mod site;
mod site_group;
mod switch;
mod wlan;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use site::{LatLng, SiteSpec};
pub use site_group::SiteGroupSpec;
pub use switch::{IpConfig, PortConfigEntry, PortMode, PortProfile, SwitchNetwork, SwitchSpec};
pub use wlan::{
    Airwatch, AuthType, CiscoCwa, CoaServer, DynamicVlan, Radsec, RadsecServer, RadiusServer,
    RateBand, Rateset, Schedule, ScheduleHours, WlanAuth, WlanLevel, WlanSpec,
};

/// Whether the resource should exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    #[default]
    Present,
    Absent,
}

/// Resource kinds handled by the reconcilers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Site,
    SiteGroup,
    Wlan,
    Switch,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Site => "site",
            ResourceKind::SiteGroup => "site group",
            ResourceKind::Wlan => "wlan",
            ResourceKind::Switch => "switch",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired state for one resource instance, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DesiredState {
    Site(SiteSpec),
    SiteGroup(SiteGroupSpec),
    Wlan(WlanSpec),
    Switch(SwitchSpec),
}

impl DesiredState {
    pub fn kind(&self) -> ResourceKind {
        match self {
            DesiredState::Site(_) => ResourceKind::Site,
            DesiredState::SiteGroup(_) => ResourceKind::SiteGroup,
            DesiredState::Wlan(_) => ResourceKind::Wlan,
            DesiredState::Switch(_) => ResourceKind::Switch,
        }
    }

    /// Name (or SSID) the resource is identified by.
    pub fn name(&self) -> &str {
        match self {
            DesiredState::Site(s) => &s.name,
            DesiredState::SiteGroup(s) => &s.name,
            DesiredState::Wlan(s) => &s.ssid,
            DesiredState::Switch(s) => &s.name,
        }
    }
}

/// A flat desired-state document: the state flag plus one resource.
///
/// ```yaml
/// kind: site
/// state: present
/// name: katy
/// timezone: America/Chicago
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub state: State,
    #[serde(flatten)]
    pub resource: DesiredState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_defaults_to_present() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"kind": "site_group", "name": "Burnt Tomato"}"#).unwrap();
        assert_eq!(manifest.state, State::Present);
        assert_eq!(manifest.resource.kind(), ResourceKind::SiteGroup);
        assert_eq!(manifest.resource.name(), "Burnt Tomato");
    }

    #[test]
    fn test_manifest_absent_wlan() {
        let manifest: Manifest = serde_yaml::from_str(
            "kind: wlan\nstate: absent\nssid: Yorke\nlevel: org\n",
        )
        .unwrap();
        assert_eq!(manifest.state, State::Absent);
        assert_eq!(manifest.resource.kind(), ResourceKind::Wlan);
        assert_eq!(manifest.resource.name(), "Yorke");
    }

    #[test]
    fn test_credentials_in_manifest_are_ignored() {
        let manifest: Manifest = serde_json::from_str(
            r#"{"kind": "site", "name": "katy", "api_token": "t", "org_id": "o"}"#,
        )
        .unwrap();
        let DesiredState::Site(site) = manifest.resource else {
            panic!("expected a site");
        };
        let value = serde_json::to_value(&site).unwrap();
        assert!(value.get("api_token").is_none());
        assert!(value.get("org_id").is_none());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = serde_json::from_str::<Manifest>(r#"{"kind": "router", "name": "x"}"#);
        assert!(err.is_err());
    }
}
