//! Existence probing over an already-fetched listing.

use serde_json::Value;

use crate::error::{ReconcileError, Result};

/// What to do when several remote objects share the target name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Keep the last match in listing order.
    #[default]
    LastWins,
    /// Fail with `AmbiguousName`.
    Strict,
}

/// Outcome of a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Existence {
    Absent,
    Present(String),
}

impl Existence {
    pub fn id(&self) -> Option<&str> {
        match self {
            Existence::Absent => None,
            Existence::Present(id) => Some(id),
        }
    }
}

/// Which fields identify an entry in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    pub name_field: &'static str,
    pub id_field: &'static str,
    /// Only entries whose `type` equals this value are considered.
    pub type_filter: Option<&'static str>,
}

impl Matcher {
    /// Sites, site groups.
    pub const fn by_name() -> Self {
        Self {
            name_field: "name",
            id_field: "id",
            type_filter: None,
        }
    }

    /// WLANs.
    pub const fn by_ssid() -> Self {
        Self {
            name_field: "ssid",
            ..Self::by_name()
        }
    }

    /// Switches in the org inventory.
    pub const fn switch() -> Self {
        Self {
            type_filter: Some("switch"),
            ..Self::by_name()
        }
    }

    fn accepts(&self, entry: &Value, name: &str) -> bool {
        if let Some(kind) = self.type_filter
            && entry.get("type").and_then(Value::as_str) != Some(kind)
        {
            return false;
        }
        entry.get(self.name_field).and_then(Value::as_str) == Some(name)
    }
}

/// Scan `items` for entries named `name`.
///
/// Entries without the name field are skipped. A matching entry without a
/// string id is a contract violation and fails the probe.
pub fn probe(items: &[Value], name: &str, matcher: &Matcher, policy: NamePolicy) -> Result<Existence> {
    let matches: Vec<&Value> = items.iter().filter(|e| matcher.accepts(e, name)).collect();

    if policy == NamePolicy::Strict && matches.len() > 1 {
        return Err(ReconcileError::AmbiguousName {
            name: name.to_string(),
            count: matches.len(),
        });
    }

    match matches.last() {
        None => Ok(Existence::Absent),
        Some(entry) => entry
            .get(matcher.id_field)
            .and_then(Value::as_str)
            .map(|id| Existence::Present(id.to_string()))
            .ok_or_else(|| ReconcileError::MissingId {
                name: name.to_string(),
                field: matcher.id_field.to_string(),
            }),
    }
}
