//! Name resolution against remote collections.
//!
//! No pagination: the API is expected to return whole collections in one
//! response.

use mist_client::Session;
use serde_json::Value;
use tracing::debug;

use crate::error::{ReconcileError, Result};
use crate::probe::{Matcher, NamePolicy, probe};

/// Fetch a collection and require a `200` with a JSON array body.
pub async fn list(session: &Session, path: &str) -> Result<Vec<Value>> {
    let response = session.get(path).await?;
    if response.status != 200 {
        return Err(ReconcileError::Upstream {
            path: path.to_string(),
            status: response.status,
            body: response.body,
        });
    }
    match response.body {
        Value::Array(items) => {
            debug!(path, count = items.len(), "Listed collection");
            Ok(items)
        }
        other => Err(ReconcileError::Shape {
            path: path.to_string(),
            body: other,
        }),
    }
}

/// Resolve `name` to an id within a listing fetched by [`list`].
///
/// Returns `None` when no entry carries exactly that name.
pub fn resolve(items: &[Value], name: &str, policy: NamePolicy) -> Result<Option<String>> {
    let existing = probe(items, name, &Matcher::by_name(), policy)?;
    Ok(existing.id().map(str::to_owned))
}

/// Resolve several names against a single listing, preserving input order.
///
/// Any name that does not resolve fails the whole call with the listing
/// attached.
pub async fn resolve_all(
    session: &Session,
    kind: &'static str,
    path: &str,
    names: &[String],
    policy: NamePolicy,
) -> Result<Vec<String>> {
    let items = list(session, path).await?;
    names
        .iter()
        .map(|name| -> Result<String> {
            resolve(&items, name, policy)?.ok_or_else(|| ReconcileError::ReferenceNotFound {
                kind,
                name: name.clone(),
                candidates: Value::Array(items.clone()),
            })
        })
        .collect()
}

/// Turn a `site_id` / `site_name` pair into a site id.
///
/// An explicit id wins and costs no API call.
pub async fn resolve_site(
    session: &Session,
    site_id: Option<&str>,
    site_name: Option<&str>,
    policy: NamePolicy,
) -> Result<String> {
    if let Some(id) = site_id {
        return Ok(id.to_string());
    }
    let Some(name) = site_name else {
        return Err(ReconcileError::Precondition(
            "you need to pass either a site_id or site_name parameter".to_string(),
        ));
    };

    let path = format!("orgs/{}/sites", session.org_id());
    let sites = list(session, &path).await?;
    match resolve(&sites, name, policy)? {
        Some(id) => {
            debug!(site_name = name, site_id = %id, "Resolved site");
            Ok(id)
        }
        None => Err(ReconcileError::ReferenceNotFound {
            kind: "site",
            name: name.to_string(),
            candidates: Value::Array(sites),
        }),
    }
}
