use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Whether a WLAN lives on the organization or on a single site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WlanLevel {
    #[default]
    Org,
    Site,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthType {
    Open,
    Psk,
    Wep,
    Eap,
    PskTkip,
    PskWpa2Tkip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WlanAuth {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_mac_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_psk_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairwise: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wep_as_secondary_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_wlan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_idx: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eap_reauth: Option<bool>,
}

/// RADIUS authentication or accounting server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadiusServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// RADIUS change-of-authorization server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoaServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_event_timestamp_check: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airwatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Cisco central web authentication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CiscoCwa {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_subnets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_hostnames: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicVlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub vlan_type: Option<String>,
    /// VLAN id to RADIUS-assigned name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlans: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_vlan_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_vlan_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadsecServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Radsec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<RadsecServer>>,
}

/// Data rates for one band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateBand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rssi: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ht: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vht: Option<String>,
}

/// Per-band rates. The API keys bands by frequency: `"24"` and `"5"`.
///
/// Band keys are read as strings (`"24"`, `twentyfour`, `"5"`, `five`) or
/// as the integers YAML produces for a bare `24:` / `5:`. Any other key is
/// an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rateset {
    #[serde(rename = "24", skip_serializing_if = "Option::is_none")]
    pub band_24: Option<RateBand>,
    #[serde(rename = "5", skip_serializing_if = "Option::is_none")]
    pub band_5: Option<RateBand>,
}

impl<'de> Deserialize<'de> for Rateset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bands = BTreeMap::<Band, RateBand>::deserialize(deserializer)?;
        let mut rateset = Rateset::default();
        for (band, rates) in bands {
            match band {
                Band::TwentyFour => rateset.band_24 = Some(rates),
                Band::Five => rateset.band_5 = Some(rates),
            }
        }
        Ok(rateset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Band {
    TwentyFour,
    Five,
}

const BAND_KEYS: &[&str] = &["24", "twentyfour", "5", "five"];

impl<'de> Deserialize<'de> for Band {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BandVisitor;

        impl Visitor<'_> for BandVisitor {
            type Value = Band;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a rateset band: 24 or 5")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Band, E> {
                match v {
                    "24" | "twentyfour" => Ok(Band::TwentyFour),
                    "5" | "five" => Ok(Band::Five),
                    other => Err(E::unknown_variant(other, BAND_KEYS)),
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Band, E> {
                match v {
                    24 => Ok(Band::TwentyFour),
                    5 => Ok(Band::Five),
                    other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Band, E> {
                match u64::try_from(v) {
                    Ok(v) => self.visit_u64(v),
                    Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(BandVisitor)
    }
}

/// Hours per weekday, e.g. `"09:00-17:00"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sun: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<ScheduleHours>,
}

/// Desired state of a WLAN, identified by SSID within its scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WlanSpec {
    pub ssid: String,

    // Scope selection, never sent.
    #[serde(default, skip_serializing)]
    pub level: Option<WlanLevel>,
    #[serde(default, skip_serializing)]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub site_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_ssid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wxtag_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_steer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_steer_force_band5: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,

    // Authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<WlanAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_servers: Option<Vec<RadiusServer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_servers_nas_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_servers_nas_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_servers_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_servers_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_server_selection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acct_servers: Option<Vec<RadiusServer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acct_interim_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coa_servers: Option<Vec<CoaServer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radsec: Option<Radsec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airwatch: Option<Airwatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cisco_cwa: Option<CiscoCwa>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_psk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_eapol_v1: Option<bool>,

    // VLANs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_pooling: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_vlan: Option<DynamicVlan>,

    // Client behaviour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_mdns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_ipv6_ndp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arp_filter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_blacklist_clients: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_bcast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_probe_response: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idletime: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_static_ip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_static_dns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_wireless_bridging: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname_ie: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sle_excluded: Option<bool>,

    // Radio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_11ax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_uapsd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_wmm: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtim: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_overds: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roam_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rateset: Option<Rateset>,

    // Rate limits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_limit_up_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_limit_up: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_limit_down_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_limit_down: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wlan_limit_up_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wlan_limit_up: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wlan_limit_down_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wlan_limit_down: Option<u32>,

    // Tunneling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mxtunnel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wxtunnel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wxtunnel_remote_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}
