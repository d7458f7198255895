//! Switch configuration reconciler.
//!
//! Switches are claimed into the org inventory out of band; this only
//! manages the configuration of a device that is already there.

use async_trait::async_trait;
use mist_client::{Method, Session};

use super::{Action, Location, ReconcileResult, Reconciler, mutate};
use crate::error::Result;
use crate::probe::{Matcher, NamePolicy};
use crate::resolve::resolve_site;
use crate::resource::{ResourceKind, SwitchSpec};
use crate::transform::switch_payload;

pub struct SwitchReconciler {
    policy: NamePolicy,
}

impl SwitchReconciler {
    pub fn new(policy: NamePolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Reconciler for SwitchReconciler {
    type Spec = SwitchSpec;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Switch
    }

    fn policy(&self) -> NamePolicy {
        self.policy
    }

    fn deletable(&self) -> bool {
        false
    }

    async fn locate(&self, session: &Session, spec: &Self::Spec) -> Result<Location> {
        let site = resolve_site(
            session,
            spec.site_id.as_deref(),
            spec.site_name.as_deref(),
            self.policy,
        )
        .await?;
        Ok(Location {
            collection: format!("orgs/{}/inventory?vc=true", session.org_id()),
            item_prefix: format!("sites/{site}/devices"),
            target: spec.name.clone(),
            matcher: Matcher::switch(),
        })
    }

    async fn create(
        &self,
        _session: &Session,
        _spec: &Self::Spec,
        _location: &Location,
    ) -> Result<ReconcileResult> {
        Ok(ReconcileResult::unchanged("switch does not exist, exiting"))
    }

    async fn update(
        &self,
        session: &Session,
        spec: &Self::Spec,
        location: &Location,
        id: &str,
    ) -> Result<ReconcileResult> {
        let body = switch_payload(spec)?;
        let data = mutate(session, Method::Put, &location.item_path(id), Some(&body)).await?;
        Ok(ReconcileResult::changed(Action::Updated, data))
    }
}
