//! WLAN reconciler.
//!
//! WLANs are matched by SSID and live either at the org or under one site.
//! When `level` is omitted the presence of `site_id` or `site_name` selects
//! the site scope.

use async_trait::async_trait;
use mist_client::{Method, Session};

use super::{Action, Location, ReconcileResult, Reconciler, mutate};
use crate::error::Result;
use crate::probe::{Matcher, NamePolicy};
use crate::resolve::resolve_site;
use crate::resource::{ResourceKind, WlanLevel, WlanSpec};
use crate::transform::wlan_payload;

pub struct WlanReconciler {
    policy: NamePolicy,
}

impl WlanReconciler {
    pub fn new(policy: NamePolicy) -> Self {
        Self { policy }
    }
}

/// Effective scope of a WLAN.
pub fn level_of(spec: &WlanSpec) -> WlanLevel {
    match spec.level {
        Some(level) => level,
        None if spec.site_id.is_some() || spec.site_name.is_some() => WlanLevel::Site,
        None => WlanLevel::Org,
    }
}

#[async_trait]
impl Reconciler for WlanReconciler {
    type Spec = WlanSpec;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Wlan
    }

    fn policy(&self) -> NamePolicy {
        self.policy
    }

    async fn locate(&self, session: &Session, spec: &Self::Spec) -> Result<Location> {
        let collection = match level_of(spec) {
            WlanLevel::Org => format!("orgs/{}/wlans", session.org_id()),
            WlanLevel::Site => {
                let site = resolve_site(
                    session,
                    spec.site_id.as_deref(),
                    spec.site_name.as_deref(),
                    self.policy,
                )
                .await?;
                format!("sites/{site}/wlans")
            }
        };
        Ok(Location {
            item_prefix: collection.clone(),
            collection,
            target: spec.ssid.clone(),
            matcher: Matcher::by_ssid(),
        })
    }

    async fn create(
        &self,
        session: &Session,
        spec: &Self::Spec,
        location: &Location,
    ) -> Result<ReconcileResult> {
        let body = wlan_payload(spec)?;
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
        let body = wlan_payload(spec)?;
        let data = mutate(session, Method::Put, &location.item_path(id), Some(&body)).await?;
        Ok(ReconcileResult::changed(Action::Updated, data))
    }
}
