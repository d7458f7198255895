use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// In-band or out-of-band management interface settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpConfig {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// A VLAN declared on the switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchNetwork {
    pub name: String,
    /// Kept as text on the wire; a bare `91` in YAML is accepted too.
    #[serde(deserialize_with = "vlan_id_text")]
    pub vlan_id: String,
}

fn vlan_id_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Binding of an interface (or interface range) to a port profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortConfigEntry {
    pub name: String,
    pub profile: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortMode {
    Access,
    Trunk,
}

/// Interface configuration template.
///
/// Unlike the other desired-state types every field is emitted, `null`
/// included, because the API replaces the whole profile on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortProfile {
    pub name: String,
    pub all_networks: Option<bool>,
    pub disabled: Option<bool>,
    pub duplex: Option<String>,
    pub mac_limit: Option<u32>,
    pub mode: Option<PortMode>,
    pub networks: Option<Vec<String>>,
    pub poe_disabled: Option<bool>,
    pub port_auth: Option<Value>,
    pub port_network: Option<String>,
    pub speed: Option<String>,
    pub stp_edge: Option<bool>,
    pub voip_network: Option<String>,
}

/// Desired configuration of a claimed switch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchSpec {
    pub name: String,
    #[serde(default, skip_serializing)]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_auto_config: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_config_cmds: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_config: Option<IpConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oob_ip_config: Option<IpConfig>,
    #[serde(default, skip_serializing)]
    pub networks: Option<Vec<SwitchNetwork>>,
    #[serde(default, skip_serializing)]
    pub port_config: Option<Vec<PortConfigEntry>>,
    #[serde(default, skip_serializing)]
    pub port_profiles: Option<Vec<PortProfile>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{DesiredState, Manifest};

    #[test]
    fn test_vlan_id_accepts_bare_integers() {
        let manifest: Manifest = serde_yaml::from_str(
            "kind: switch\nname: Katy-SW1\nnetworks:\n  - name: home\n    vlan_id: 91\n  - name: devops\n    vlan_id: \"101\"\n",
        )
        .unwrap();
        let DesiredState::Switch(spec) = manifest.resource else {
            panic!("expected a switch");
        };
        let networks = spec.networks.unwrap();
        assert_eq!(networks[0].vlan_id, "91");
        assert_eq!(networks[1].vlan_id, "101");
    }

    #[test]
    fn test_vlan_id_rejects_other_types() {
        let err = serde_json::from_str::<SwitchNetwork>(r#"{"name": "home", "vlan_id": [91]}"#);
        assert!(err.is_err());
    }
}
