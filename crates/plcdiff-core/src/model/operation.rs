use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use crate::model::state::{DocumentState, Service};

/// A signed audit log operation.
///
/// Internally tagged by the wire `type` field. Tags this crate does not know
/// decode to [`Operation::Unknown`] instead of failing, so newer log schemas
/// degrade to "no event" rather than to a decode error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Operation {
    /// Legacy creation payload
    #[serde(rename = "create")]
    Genesis(GenesisOperation),
    /// Full replacement snapshot of the document
    #[serde(rename = "plc_operation")]
    State(StateOperation),
    /// Retires the identity
    #[serde(rename = "plc_tombstone")]
    Tombstone(TombstoneOperation),
    #[serde(other)]
    Unknown,
}

/// Short operation label for logs and summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Genesis,
    State,
    Tombstone,
    Unknown,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Genesis => "genesis",
            OperationKind::State => "state",
            OperationKind::Tombstone => "tombstone",
            OperationKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The narrow creation shape used by the first generation of PLC identities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenesisOperation {
    pub signing_key: String,
    pub recovery_key: String,
    /// Bare handle, without the `at://` scheme
    pub handle: String,
    /// PDS endpoint URL
    pub service: String,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub sig: Option<String>,
}

/// A complete document snapshot replacing the previous state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateOperation {
    /// Keys allowed to sign later operations, highest priority first
    pub rotation_keys: Vec<String>,
    /// Verification method id to `did:key`
    pub verification_methods: IndexMap<String, String>,
    /// `at://` aliases
    pub also_known_as: Vec<String>,
    /// Service id to service record
    pub services: IndexMap<String, Service>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub sig: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TombstoneOperation {
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub sig: Option<String>,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Genesis(_) => OperationKind::Genesis,
            Operation::State(_) => OperationKind::State,
            Operation::Tombstone(_) => OperationKind::Tombstone,
            Operation::Unknown => OperationKind::Unknown,
        }
    }

    /// The full document state this operation establishes.
    ///
    /// `None` for tombstones and unknown operations, which carry no state.
    pub fn document_state(&self) -> Option<DocumentState> {
        match self {
            Operation::Genesis(op) => Some(DocumentState::from_genesis(op)),
            Operation::State(op) => Some(DocumentState::from_state_operation(op)),
            Operation::Tombstone(_) | Operation::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_each_known_tag() {
        let genesis: Operation = serde_json::from_value(json!({
            "type": "create",
            "signingKey": "did:key:zSign",
            "recoveryKey": "did:key:zRecover",
            "handle": "alice.test",
            "service": "https://pds.test",
            "prev": null,
            "sig": "sig0"
        }))
        .unwrap();
        assert_eq!(genesis.kind(), OperationKind::Genesis);

        let state: Operation = serde_json::from_value(json!({
            "type": "plc_operation",
            "rotationKeys": ["did:key:zA"],
            "verificationMethods": {"atproto": "did:key:zB"},
            "alsoKnownAs": ["at://alice.test"],
            "services": {
                "atproto_pds": {"type": "AtprotoPersonalDataServer", "endpoint": "https://pds.test"}
            },
            "prev": "bafyprev",
            "sig": "sig1"
        }))
        .unwrap();
        assert_eq!(state.kind(), OperationKind::State);

        let tombstone: Operation =
            serde_json::from_value(json!({"type": "plc_tombstone", "prev": "bafyprev", "sig": "s"}))
                .unwrap();
        assert_eq!(tombstone.kind(), OperationKind::Tombstone);
        assert!(tombstone.document_state().is_none());
    }

    #[test]
    fn test_unknown_tag_decodes_to_unknown() {
        let op: Operation =
            serde_json::from_value(json!({"type": "plc_future_thing", "payload": [1, 2, 3]}))
                .unwrap();
        assert_eq!(op, Operation::Unknown);
        assert!(op.document_state().is_none());
        assert_eq!(op.kind().to_string(), "unknown");
    }
}
