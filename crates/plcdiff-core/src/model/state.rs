use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::model::operation::{GenesisOperation, StateOperation};

/// Verification method id a genesis signing key is published under.
pub const GENESIS_VERIFICATION_METHOD_ID: &str = "atproto";
/// Service id a genesis PDS endpoint is published under.
pub const GENESIS_SERVICE_ID: &str = "atproto_pds";
/// Service type of a genesis PDS endpoint.
pub const GENESIS_SERVICE_TYPE: &str = "AtprotoPersonalDataServer";
/// Scheme prefixed to a bare genesis handle to form an alias.
pub const HANDLE_ALIAS_SCHEME: &str = "at://";

/// A service record of a DID document.
///
/// Fields beyond `type` and `endpoint` are preserved in `extra` so that
/// change detection sees them too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    #[serde(rename = "type")]
    pub service_type: String,
    pub endpoint: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Service {
    pub fn new(service_type: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            endpoint: endpoint.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Structural JSON view of the record, as it appears on the wire.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }
        obj.insert("type".to_string(), Value::String(self.service_type.clone()));
        obj.insert("endpoint".to_string(), Value::String(self.endpoint.clone()));
        Value::Object(obj)
    }
}

/// Full document state after an operation.
///
/// Both operation shapes are canonicalised into this form so that any two
/// states can be diffed the same way. Maps keep the order their keys had on
/// the wire; equality ignores that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentState {
    pub rotation_keys: Vec<String>,
    pub verification_methods: IndexMap<String, String>,
    pub also_known_as: Vec<String>,
    pub services: IndexMap<String, Service>,
}

impl DocumentState {
    /// Canonical state established by a genesis operation.
    ///
    /// Rotation keys are `[recovery, signing]`, the signing key is the
    /// `atproto` verification method, the handle becomes one `at://` alias,
    /// and the endpoint becomes the `atproto_pds` service.
    pub fn from_genesis(op: &GenesisOperation) -> Self {
        let mut verification_methods = IndexMap::new();
        verification_methods.insert(
            GENESIS_VERIFICATION_METHOD_ID.to_string(),
            op.signing_key.clone(),
        );

        let mut services = IndexMap::new();
        services.insert(
            GENESIS_SERVICE_ID.to_string(),
            Service::new(GENESIS_SERVICE_TYPE, op.service.clone()),
        );

        Self {
            rotation_keys: vec![op.recovery_key.clone(), op.signing_key.clone()],
            verification_methods,
            also_known_as: vec![format!("{}{}", HANDLE_ALIAS_SCHEME, op.handle)],
            services,
        }
    }

    pub fn from_state_operation(op: &StateOperation) -> Self {
        Self {
            rotation_keys: op.rotation_keys.clone(),
            verification_methods: op.verification_methods.clone(),
            also_known_as: op.also_known_as.clone(),
            services: op.services.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_genesis_canonicalisation() {
        let op = GenesisOperation {
            signing_key: "did:key:zSign".to_string(),
            recovery_key: "did:key:zRecover".to_string(),
            handle: "alice.test".to_string(),
            service: "https://pds.test".to_string(),
            prev: None,
            sig: None,
        };
        let state = DocumentState::from_genesis(&op);

        assert_eq!(
            state.rotation_keys,
            vec!["did:key:zRecover".to_string(), "did:key:zSign".to_string()]
        );
        assert_eq!(
            state.verification_methods.get("atproto").map(String::as_str),
            Some("did:key:zSign")
        );
        assert_eq!(state.also_known_as, vec!["at://alice.test".to_string()]);
        assert_eq!(
            state.services.get("atproto_pds"),
            Some(&Service::new("AtprotoPersonalDataServer", "https://pds.test"))
        );
    }

    #[test]
    fn test_service_extra_fields_round_into_value() {
        let service: Service = serde_json::from_value(json!({
            "type": "AtprotoLabeler",
            "endpoint": "https://labeler.test",
            "priority": 2
        }))
        .unwrap();
        assert_eq!(service.extra.get("priority"), Some(&json!(2)));
        assert_eq!(
            service.to_value(),
            json!({"type": "AtprotoLabeler", "endpoint": "https://labeler.test", "priority": 2})
        );
    }
}
