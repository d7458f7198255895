use serde_json::Value;

use super::base_payload;
use crate::error::Result;
use crate::resource::WlanSpec;

/// WLAN body. Setting `vlan_id` implies `vlan_enabled: true` unless the
/// caller chose a value for `vlan_enabled`.
pub fn wlan_payload(spec: &WlanSpec) -> Result<Value> {
    let mut payload = base_payload(spec)?;
    if spec.vlan_id.is_some() && spec.vlan_enabled.is_none() {
        payload.insert("vlan_enabled".to_string(), Value::Bool(true));
    }
    Ok(Value::Object(payload))
}
