use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::operation::Operation;

/// One row of a DID's audit log, as delivered by the directory server.
///
/// `nullified` marks a row that lost a fork: it stays in the record but is
/// never used as the baseline for a later row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// The DID this row belongs to
    pub did: String,
    /// The signed operation
    pub operation: Operation,
    /// Content hash of the operation, opaque to this crate
    pub cid: String,
    /// True if a later fork superseded this row
    #[serde(default)]
    pub nullified: bool,
    /// When the directory accepted the row
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    /// Create a canonical (non-nullified) entry
    pub fn new(
        did: impl Into<String>,
        cid: impl Into<String>,
        operation: Operation,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            did: did.into(),
            operation,
            cid: cid.into(),
            nullified: false,
            created_at,
        }
    }

    /// Builder-style setter for the nullified flag
    pub fn with_nullified(mut self, nullified: bool) -> Self {
        self.nullified = nullified;
        self
    }
}
