//! mist-reconcile: declarative state reconciliation for Mist resources.
//!
//! A [`Manifest`] names one site, site group, WLAN or switch and whether it
//! should exist. [`apply`] lists the remote collection, decides on create,
//! update, delete or nothing, and returns `{changed, data}`.

pub mod error;
pub mod probe;
pub mod reconciler;
pub mod resolve;
pub mod resource;
pub mod transform;

#[cfg(test)]
mod testing;

pub use error::{ReconcileError, Result};
pub use probe::{Existence, Matcher, NamePolicy};
pub use reconciler::{Action, ReconcileResult, Reconciler, apply, reconcile};
pub use resource::{DesiredState, Manifest, ResourceKind, State};
