use serde_json::{Value, json};

use super::base_payload;
use crate::error::Result;
use crate::resource::SiteSpec;

/// Site body for create/update. `sitegroups` never appears here.
pub fn site_payload(spec: &SiteSpec) -> Result<Value> {
    Ok(Value::Object(base_payload(spec)?))
}

/// Membership body that replaces every other site field for the call.
pub fn sitegroup_payload(ids: &[String]) -> Value {
    json!({ "sitegroup_ids": ids })
}
