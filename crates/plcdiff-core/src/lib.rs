//! plcdiff Core - semantic history of PLC DID audit logs
//!
//! This crate turns the signed, append-only audit log of a `did:plc`
//! identity into a timeline of semantic changes:
//! - Typed log entry and operation models (genesis, state, tombstone)
//! - Canonical document state shared by every operation shape
//! - The operation history builder (`build_history`)
//! - Generic set difference, deep equality, and grouping utilities
//! - Audit log decoding and a Markdown timeline renderer
//!
//! The builder is a pure function: it performs no I/O and never fails.

pub mod audit_log;
pub mod errors;
pub mod history;
pub mod logging_facility;
pub mod model;
pub mod util;

// Re-export commonly used types
pub use audit_log::{into_oldest_first, parse_audit_log, LogOrder};
pub use errors::{ExError, ExErrorKind, PlcDiffError};
pub use history::{build_history, render_timeline, Change, DiffEvent, EntryRef};
pub use model::{DocumentState, LogEntry, Operation, Service};
