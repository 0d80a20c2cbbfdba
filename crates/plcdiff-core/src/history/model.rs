//! History output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! A [`DiffEvent`] serialises as a flat JSON object: the correlation fields
//! plus a `type` discriminant and the variant's own fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{DocumentState, LogEntry};

/// Correlation reference from an event back to the log entry that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntryRef {
    /// Position of the entry in the oldest-first input
    pub index: usize,
    /// Content hash of the entry
    pub cid: String,
    /// Whether the entry was later superseded by a fork
    pub nullified: bool,
}

impl EntryRef {
    pub fn new(index: usize, entry: &LogEntry) -> Self {
        Self {
            index,
            cid: entry.cid.clone(),
            nullified: entry.nullified,
        }
    }
}

/// One semantic change produced by one log entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffEvent {
    /// The originating entry
    pub entry: EntryRef,
    /// Timestamp of the originating entry
    pub created_at: DateTime<Utc>,
    /// What changed
    #[serde(flatten)]
    pub change: Change,
}

/// The thirteen kinds of change a log entry can produce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    /// First state of the identity (or first state with no usable baseline)
    IdentityCreated { state: DocumentState },
    IdentityTombstoned,
    RotationKeyAdded {
        rotation_key: String,
    },
    RotationKeyRemoved {
        rotation_key: String,
    },
    VerificationMethodAdded {
        method_id: String,
        method_key: String,
    },
    VerificationMethodRemoved {
        method_id: String,
        method_key: String,
    },
    VerificationMethodChanged {
        method_id: String,
        prev_method_key: String,
        next_method_key: String,
    },
    HandleAdded {
        handle: String,
    },
    HandleRemoved {
        handle: String,
    },
    /// A single alias replaced by a different single alias
    HandleChanged {
        prev_handle: String,
        next_handle: String,
    },
    ServiceAdded {
        service_id: String,
        service_type: String,
        service_endpoint: String,
    },
    ServiceRemoved {
        service_id: String,
        service_type: String,
        service_endpoint: String,
    },
    ServiceChanged {
        service_id: String,
        prev_service_type: String,
        next_service_type: String,
        prev_service_endpoint: String,
        next_service_endpoint: String,
    },
}

impl Change {
    /// The wire discriminant (`identity_created`, `rotation_key_added`, ...)
    pub fn type_name(&self) -> &'static str {
        match self {
            Change::IdentityCreated { .. } => "identity_created",
            Change::IdentityTombstoned => "identity_tombstoned",
            Change::RotationKeyAdded { .. } => "rotation_key_added",
            Change::RotationKeyRemoved { .. } => "rotation_key_removed",
            Change::VerificationMethodAdded { .. } => "verification_method_added",
            Change::VerificationMethodRemoved { .. } => "verification_method_removed",
            Change::VerificationMethodChanged { .. } => "verification_method_changed",
            Change::HandleAdded { .. } => "handle_added",
            Change::HandleRemoved { .. } => "handle_removed",
            Change::HandleChanged { .. } => "handle_changed",
            Change::ServiceAdded { .. } => "service_added",
            Change::ServiceRemoved { .. } => "service_removed",
            Change::ServiceChanged { .. } => "service_changed",
        }
    }

    /// Human-readable label
    pub fn title(&self) -> &'static str {
        match self {
            Change::IdentityCreated { .. } => "Identity created",
            Change::IdentityTombstoned => "Identity tombstoned",
            Change::RotationKeyAdded { .. } => "Rotation key added",
            Change::RotationKeyRemoved { .. } => "Rotation key removed",
            Change::VerificationMethodAdded { .. } => "Verification method added",
            Change::VerificationMethodRemoved { .. } => "Verification method removed",
            Change::VerificationMethodChanged { .. } => "Verification method changed",
            Change::HandleAdded { .. } => "Handle added",
            Change::HandleRemoved { .. } => "Handle removed",
            Change::HandleChanged { .. } => "Handle changed",
            Change::ServiceAdded { .. } => "Service added",
            Change::ServiceRemoved { .. } => "Service removed",
            Change::ServiceChanged { .. } => "Service changed",
        }
    }

    /// One-line description of the change
    pub fn describe(&self) -> String {
        match self {
            Change::IdentityCreated { state } => format!(
                "{}: {} rotation key(s), {} verification method(s), {} handle(s), {} service(s)",
                self.title(),
                state.rotation_keys.len(),
                state.verification_methods.len(),
                state.also_known_as.len(),
                state.services.len()
            ),
            Change::IdentityTombstoned => self.title().to_string(),
            Change::RotationKeyAdded { rotation_key }
            | Change::RotationKeyRemoved { rotation_key } => {
                format!("{}: `{}`", self.title(), rotation_key)
            }
            Change::VerificationMethodAdded {
                method_id,
                method_key,
            }
            | Change::VerificationMethodRemoved {
                method_id,
                method_key,
            } => format!("{}: `{}` = `{}`", self.title(), method_id, method_key),
            Change::VerificationMethodChanged {
                method_id,
                prev_method_key,
                next_method_key,
            } => format!(
                "{}: `{}` `{}` → `{}`",
                self.title(),
                method_id,
                prev_method_key,
                next_method_key
            ),
            Change::HandleAdded { handle } | Change::HandleRemoved { handle } => {
                format!("{}: `{}`", self.title(), handle)
            }
            Change::HandleChanged {
                prev_handle,
                next_handle,
            } => format!("{}: `{}` → `{}`", self.title(), prev_handle, next_handle),
            Change::ServiceAdded {
                service_id,
                service_type,
                service_endpoint,
            }
            | Change::ServiceRemoved {
                service_id,
                service_type,
                service_endpoint,
            } => format!(
                "{}: `{}` ({}) at {}",
                self.title(),
                service_id,
                service_type,
                service_endpoint
            ),
            Change::ServiceChanged {
                service_id,
                prev_service_type,
                next_service_type,
                prev_service_endpoint,
                next_service_endpoint,
            } => {
                if prev_service_type == next_service_type {
                    format!(
                        "{}: `{}` ({}) {} → {}",
                        self.title(),
                        service_id,
                        next_service_type,
                        prev_service_endpoint,
                        next_service_endpoint
                    )
                } else {
                    format!(
                        "{}: `{}` {} at {} → {} at {}",
                        self.title(),
                        service_id,
                        prev_service_type,
                        prev_service_endpoint,
                        next_service_type,
                        next_service_endpoint
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serialises_flat_with_type_tag() {
        let event = DiffEvent {
            entry: EntryRef {
                index: 1,
                cid: "bafy1".to_string(),
                nullified: true,
            },
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            change: Change::HandleChanged {
                prev_handle: "at://a.test".to_string(),
                next_handle: "at://b.test".to_string(),
            },
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], json!("handle_changed"));
        assert_eq!(value["prev_handle"], json!("at://a.test"));
        assert_eq!(value["entry"]["nullified"], json!(true));

        let back: DiffEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_type_name_matches_serde_tag() {
        let change = Change::ServiceRemoved {
            service_id: "atproto_pds".to_string(),
            service_type: "AtprotoPersonalDataServer".to_string(),
            service_endpoint: "https://pds.test".to_string(),
        };
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value["type"], json!(change.type_name()));
        assert_eq!(
            serde_json::to_value(Change::IdentityTombstoned).unwrap(),
            json!({"type": "identity_tombstoned"})
        );
    }
}
