//! Desired state to API payload.
//!
//! The base rule is serde itself: unset fields are skipped during
//! serialization and scope-only fields are never serialized. Each kind then
//! applies its own structural rules on top.

mod site;
mod switch;
mod wlan;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ReconcileError, Result};

pub use site::{site_payload, sitegroup_payload};
pub use switch::{collapse_networks, collapse_port_config, collapse_port_profiles, switch_payload};
pub use wlan::wlan_payload;

/// Serialize a desired-state record into a JSON object.
pub fn base_payload<T: Serialize>(spec: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(spec)? {
        Value::Object(map) => Ok(map),
        other => Err(ReconcileError::Precondition(format!(
            "desired state must encode to an object, got {other}"
        ))),
    }
}
