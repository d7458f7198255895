use async_trait::async_trait;
use mist_client::{Method, Session};
use serde_json::Value;

use super::{Action, Location, ReconcileResult, Reconciler, mutate};
use crate::error::Result;
use crate::probe::{Matcher, NamePolicy};
use crate::resource::{ResourceKind, SiteGroupSpec};
use crate::transform::base_payload;

/// Site groups live under the org for every operation.
pub struct SiteGroupReconciler {
    policy: NamePolicy,
}

impl SiteGroupReconciler {
    pub fn new(policy: NamePolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Reconciler for SiteGroupReconciler {
    type Spec = SiteGroupSpec;

    fn kind(&self) -> ResourceKind {
        ResourceKind::SiteGroup
    }

    fn policy(&self) -> NamePolicy {
        self.policy
    }

    async fn locate(&self, session: &Session, spec: &Self::Spec) -> Result<Location> {
        let collection = format!("orgs/{}/sitegroups", session.org_id());
        Ok(Location {
            item_prefix: collection.clone(),
            collection,
            target: spec.name.clone(),
            matcher: Matcher::by_name(),
        })
    }

    async fn create(
        &self,
        session: &Session,
        spec: &Self::Spec,
        location: &Location,
    ) -> Result<ReconcileResult> {
        let body = Value::Object(base_payload(spec)?);
        let data = mutate(session, Method::Post, &location.collection, Some(&body)).await?;
        Ok(ReconcileResult::changed(Action::Created, data))
    }

    async fn update(
        &self,
        session: &Session,
        spec: &Self::Spec,
        location: &Location,
        id: &str,
    ) -> Result<ReconcileResult> {
        let body = Value::Object(base_payload(spec)?);
        let data = mutate(session, Method::Put, &location.item_path(id), Some(&body)).await?;
        Ok(ReconcileResult::changed(Action::Updated, data))
    }
}
