//! Switch configuration: named lists collapse into maps keyed by name.

use serde_json::{Map, Value, json};

use super::base_payload;
use crate::error::{ReconcileError, Result};
use crate::resource::{PortConfigEntry, PortProfile, SwitchNetwork, SwitchSpec};

/// `[{name, vlan_id}]` to `{name: {vlan_id}}`. Later duplicates win.
pub fn collapse_networks(networks: &[SwitchNetwork]) -> Map<String, Value> {
    networks
        .iter()
        .map(|n| (n.name.clone(), json!({ "vlan_id": n.vlan_id })))
        .collect()
}

/// `[{name, profile}]` to `{name: {usage: profile}}`.
pub fn collapse_port_config(entries: &[PortConfigEntry]) -> Map<String, Value> {
    entries
        .iter()
        .map(|e| (e.name.clone(), json!({ "usage": e.profile })))
        .collect()
}

/// `[profile]` to `{profile.name: profile}`, keeping every field.
pub fn collapse_port_profiles(profiles: &[PortProfile]) -> Result<Map<String, Value>> {
    profiles
        .iter()
        .map(|p| -> Result<(String, Value)> { Ok((p.name.clone(), serde_json::to_value(p)?)) })
        .collect()
}

/// Device body for `PUT sites/{site}/devices/{id}`.
///
/// `networks`, `port_config` and `port_profiles` must all be present.
pub fn switch_payload(spec: &SwitchSpec) -> Result<Value> {
    let networks = require(spec.networks.as_deref(), "networks")?;
    let port_config = require(spec.port_config.as_deref(), "port_config")?;
    let port_profiles = require(spec.port_profiles.as_deref(), "port_profiles")?;

    let mut payload = base_payload(spec)?;
    payload.insert(
        "networks".to_string(),
        Value::Object(collapse_networks(networks)),
    );
    payload.insert(
        "port_config".to_string(),
        Value::Object(collapse_port_config(port_config)),
    );
    payload.insert(
        "port_usages".to_string(),
        Value::Object(collapse_port_profiles(port_profiles)?),
    );
    Ok(Value::Object(payload))
}

fn require<'a, T>(field: Option<&'a [T]>, name: &str) -> Result<&'a [T]> {
    field.ok_or_else(|| {
        ReconcileError::Precondition(format!("switch configuration requires '{name}'"))
    })
}
