//! Install/uninstall orchestration for toolver.
//!
//! This crate reconciles what plugins report as physically installed with
//! what toolver has declared as installed:
//! - The persisted declared-state store.
//! - The per-project `.tool-versions` manifest.
//! - Jobs, batches and the action dispatcher that drives them.

mod action;
mod batch;
mod dispatch;
mod error;
mod fs;
mod job;
mod manifest;
mod outcome;
mod request;
mod store;
#[cfg(test)]
mod testing;

/// Action vocabulary shared by the command line and the dispatcher.
pub use action::Action;
/// Ordered job collection and its aggregate result code.
pub use batch::{BATCH_FAILURE_BASE, JobBatch, aggregate_code};
/// Action-to-handler table and the dispatch entry point.
pub use dispatch::{Handler, dispatch, handler_for};
pub use error::{ManifestError, StoreError};
pub use job::{Job, NOT_RUN_CODE};
/// Per-project manifest reader and writer.
pub use manifest::{MANIFEST_FILE_NAME, Manifest, ManifestEntry, parse as parse_manifest};
pub use outcome::JobOutcome;
/// Builds install jobs, resolving `latest[:prefix]` requests.
pub use request::install_job;
/// Declared-state store trait and its JSON-backed implementation.
pub use store::{DeclaredState, DeclaredStore, StateStore, ToolRecord, VersionRecord};
