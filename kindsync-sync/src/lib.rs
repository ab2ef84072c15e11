//! Entity synchronization for kindsync.
//!
//! - [`EntitySynchronizer::reconcile`] makes sure every declared kind has a
//!   persisted entity. It is additive: nothing is updated or deleted, and a
//!   second pass over the same kinds creates nothing.
//! - [`EntitySynchronizer::upsert`] writes one typed instance, creating its
//!   entity on first save.
//! - [`TypedDirectory`] reads entities back as typed instances.

mod directory;
mod error;
mod kinds;
mod synchronizer;

pub use directory::TypedDirectory;
pub use error::{SyncError, SyncResult, ValidationError};
pub use kinds::KindRegistry;
pub use synchronizer::{EntitySynchronizer, ReconcileReport, ReconciledKind};
