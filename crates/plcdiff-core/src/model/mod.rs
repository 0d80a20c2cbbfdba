//! Domain model for PLC audit logs
//!
//! - [`LogEntry`]: one row of the append-only audit log
//! - [`Operation`]: the closed set of operation shapes a row can carry
//! - [`DocumentState`]: the uniform full-state view every shape canonicalises into

pub mod entry;
pub mod operation;
pub mod state;

pub use entry::LogEntry;
pub use operation::{GenesisOperation, Operation, OperationKind, StateOperation, TombstoneOperation};
pub use state::{DocumentState, Service};
