//! Site reconciler.
//!
//! Creating a site with `sitegroups` takes two calls: the group names are
//! resolved up front, the site is created, then its group membership is
//! written to the new id. If that last call fails the site stays created and
//! the error says so.

use async_trait::async_trait;
use mist_client::{Method, Session};
use serde_json::Value;
use tracing::{info, warn};

use super::{Action, Location, ReconcileResult, Reconciler, mutate};
use crate::error::{ReconcileError, Result};
use crate::probe::{Matcher, NamePolicy};
use crate::resolve;
use crate::resource::{ResourceKind, SiteSpec};
use crate::transform::{site_payload, sitegroup_payload};

pub struct SiteReconciler {
    policy: NamePolicy,
}

impl SiteReconciler {
    pub fn new(policy: NamePolicy) -> Self {
        Self { policy }
    }

    /// Resolve `sitegroups` names, if any were given, into the membership body.
    async fn membership_payload(&self, session: &Session, spec: &SiteSpec) -> Result<Option<Value>> {
        let Some(names) = spec.sitegroups.as_deref() else {
            return Ok(None);
        };
        let path = format!("orgs/{}/sitegroups", session.org_id());
        let ids = resolve::resolve_all(session, "site group", &path, names, self.policy).await?;
        Ok(Some(sitegroup_payload(&ids)))
    }
}

#[async_trait]
impl Reconciler for SiteReconciler {
    type Spec = SiteSpec;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Site
    }

    fn policy(&self) -> NamePolicy {
        self.policy
    }

    async fn locate(&self, session: &Session, spec: &Self::Spec) -> Result<Location> {
        Ok(Location {
            collection: format!("orgs/{}/sites", session.org_id()),
            item_prefix: "sites".to_string(),
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
        // Unknown group names fail here, before anything is created.
        let membership = self.membership_payload(session, spec).await?;

        let created = mutate(
            session,
            Method::Post,
            &location.collection,
            Some(&site_payload(spec)?),
        )
        .await?;

        let Some(membership) = membership else {
            return Ok(ReconcileResult::changed(Action::Created, created));
        };

        let attach = async {
            let id = created
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| ReconcileError::MissingId {
                    name: spec.name.clone(),
                    field: "id".to_string(),
                })?;
            info!(site = %spec.name, %id, "Attaching site groups");
            mutate(session, Method::Put, &location.item_path(id), Some(&membership)).await
        };

        match attach.await {
            Ok(data) => Ok(ReconcileResult::changed(Action::Created, data)),
            Err(source) => {
                warn!(site = %spec.name, error = %source, "Site created but site group attach failed");
                Err(ReconcileError::PartialFailure {
                    kind: "site",
                    created,
                    source: Box::new(source),
                })
            }
        }
    }

    async fn update(
        &self,
        session: &Session,
        spec: &Self::Spec,
        location: &Location,
        id: &str,
    ) -> Result<ReconcileResult> {
        let body = match self.membership_payload(session, spec).await? {
            Some(membership) => membership,
            None => site_payload(spec)?,
        };
        let data = mutate(session, Method::Put, &location.item_path(id), Some(&body)).await?;
        Ok(ReconcileResult::changed(Action::Updated, data))
    }
}
