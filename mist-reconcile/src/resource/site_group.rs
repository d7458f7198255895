use serde::{Deserialize, Serialize};

/// Desired state of a site group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteGroupSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_ids: Option<Vec<String>>,
}
