//! Reconcilers for the different resource kinds.
//!
//! Each reconciler locates its collection, probes it for the target name and
//! then issues the one mutation (or none) that converges remote state:
//!
//! ```text
//! Start -> Resolved -> Probed -> {Create | Update | Delete | NoOp} -> Done
//! ```

pub mod site;
pub mod site_group;
pub mod switch;
pub mod wlan;

use async_trait::async_trait;
use mist_client::{Method, Session};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ReconcileError, Result};
use crate::probe::{Existence, Matcher, NamePolicy, probe};
use crate::resolve;
use crate::resource::{DesiredState, Manifest, ResourceKind, State};

pub use site::SiteReconciler;
pub use site_group::SiteGroupReconciler;
pub use switch::SwitchReconciler;
pub use wlan::WlanReconciler;

/// What a reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated,
    Deleted,
    Unchanged,
}

/// Externally observable outcome: `{changed, data}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileResult {
    pub changed: bool,
    pub data: Value,
    #[serde(skip)]
    pub action: Action,
}

impl ReconcileResult {
    pub fn changed(action: Action, data: Value) -> Self {
        Self {
            changed: true,
            data,
            action,
        }
    }

    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            data: Value::String(message.into()),
            action: Action::Unchanged,
        }
    }
}

/// Where the target collection lives once the parent scope is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Listing path; also the create path for creatable kinds.
    pub collection: String,
    /// Prefix of `{prefix}/{id}` item paths.
    pub item_prefix: String,
    /// Name (or SSID) to probe for.
    pub target: String,
    pub matcher: Matcher,
}

impl Location {
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.item_prefix, id)
    }
}

/// Trait for resource reconcilers.
#[async_trait]
pub trait Reconciler: Send + Sync {
    /// The desired-state type.
    type Spec: Send + Sync;

    fn kind(&self) -> ResourceKind;

    fn policy(&self) -> NamePolicy;

    /// Kinds that cannot be deleted through the API reject `state: absent`
    /// before any call is made.
    fn deletable(&self) -> bool {
        true
    }

    /// Resolve the parent scope and describe the target collection.
    async fn locate(&self, session: &Session, spec: &Self::Spec) -> Result<Location>;

    /// Desired present, nothing found.
    async fn create(
        &self,
        session: &Session,
        spec: &Self::Spec,
        location: &Location,
    ) -> Result<ReconcileResult>;

    /// Desired present, found `id`. Always reported as changed.
    async fn update(
        &self,
        session: &Session,
        spec: &Self::Spec,
        location: &Location,
        id: &str,
    ) -> Result<ReconcileResult>;

    /// Desired absent, found `id`.
    async fn finalize(
        &self,
        session: &Session,
        location: &Location,
        id: &str,
    ) -> Result<ReconcileResult> {
        let data = mutate(session, Method::Delete, &location.item_path(id), None).await?;
        Ok(ReconcileResult::changed(Action::Deleted, data))
    }
}

/// Drive one reconciler through the state machine.
pub async fn reconcile<R: Reconciler>(
    reconciler: &R,
    session: &Session,
    spec: &R::Spec,
    state: State,
) -> Result<ReconcileResult> {
    let kind = reconciler.kind();
    if state == State::Absent && !reconciler.deletable() {
        return Err(ReconcileError::Precondition(format!(
            "{kind} cannot be deleted, only its configuration can be managed"
        )));
    }

    let location = reconciler.locate(session, spec).await?;
    debug!(%kind, collection = %location.collection, "Resolved scope");

    let items = resolve::list(session, &location.collection).await?;
    let existing = probe(&items, &location.target, &location.matcher, reconciler.policy())?;
    debug!(%kind, target = %location.target, ?existing, "Probed collection");

    let result = match (state, existing) {
        (State::Absent, Existence::Present(id)) => {
            info!(%kind, target = %location.target, %id, "Deleting");
            reconciler.finalize(session, &location, &id).await?
        }
        (State::Absent, Existence::Absent) => {
            ReconcileResult::unchanged(format!("{kind} does not exist, exiting"))
        }
        (State::Present, Existence::Absent) => {
            info!(%kind, target = %location.target, "Creating");
            reconciler.create(session, spec, &location).await?
        }
        (State::Present, Existence::Present(id)) => {
            info!(%kind, target = %location.target, %id, "Updating");
            reconciler.update(session, spec, &location, &id).await?
        }
    };

    info!(%kind, target = %location.target, changed = result.changed, action = ?result.action, "Reconciled");
    Ok(result)
}

/// Reconcile a manifest with the reconciler matching its kind.
pub async fn apply(session: &Session, manifest: &Manifest, policy: NamePolicy) -> Result<ReconcileResult> {
    match &manifest.resource {
        DesiredState::Site(spec) => {
            reconcile(&SiteReconciler::new(policy), session, spec, manifest.state).await
        }
        DesiredState::SiteGroup(spec) => {
            reconcile(&SiteGroupReconciler::new(policy), session, spec, manifest.state).await
        }
        DesiredState::Wlan(spec) => {
            reconcile(&WlanReconciler::new(policy), session, spec, manifest.state).await
        }
        DesiredState::Switch(spec) => {
            reconcile(&SwitchReconciler::new(policy), session, spec, manifest.state).await
        }
    }
}

/// Issue a mutating call and require a 2xx status.
pub(crate) async fn mutate(
    session: &Session,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> Result<Value> {
    let response = session.send(method, path, body).await?;
    if !response.is_success() {
        return Err(ReconcileError::Upstream {
            path: path.to_string(),
            status: response.status,
            body: response.body,
        });
    }
    Ok(response.body)
}
