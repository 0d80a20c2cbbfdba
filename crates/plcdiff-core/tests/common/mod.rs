//! Shared fixtures for plcdiff-core integration tests.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use plcdiff_core::model::{GenesisOperation, StateOperation, TombstoneOperation};
use plcdiff_core::{LogEntry, Operation, Service};

#[allow(dead_code)]
pub const DID: &str = "did:plc:ewvi7nxzyoun6zhxrhs64oiz";

/// Timestamp `minute` minutes after a fixed origin (0..60).
#[allow(dead_code)]
pub fn at(minute: u32) -> DateTime<Utc> {
    format!("2023-04-01T12:{:02}:00Z", minute).parse().unwrap()
}

#[allow(dead_code)]
pub fn genesis_entry(cid: &str, minute: u32, handle: &str) -> LogEntry {
    LogEntry::new(
        DID,
        cid,
        Operation::Genesis(GenesisOperation {
            signing_key: "did:key:zSigning".to_string(),
            recovery_key: "did:key:zRecovery".to_string(),
            handle: handle.to_string(),
            service: "https://bsky.social".to_string(),
            prev: None,
            sig: Some("sig".to_string()),
        }),
        at(minute),
    )
}

/// A state operation with the given keys, `atproto` method, aliases and services.
#[allow(dead_code)]
pub fn plc_operation(
    rotation_keys: &[&str],
    atproto_key: &str,
    aliases: &[&str],
    services: &[(&str, &str, &str)],
) -> StateOperation {
    let mut verification_methods = IndexMap::new();
    verification_methods.insert("atproto".to_string(), atproto_key.to_string());

    StateOperation {
        rotation_keys: rotation_keys.iter().map(|s| s.to_string()).collect(),
        verification_methods,
        also_known_as: aliases.iter().map(|s| s.to_string()).collect(),
        services: services
            .iter()
            .map(|(id, ty, endpoint)| (id.to_string(), Service::new(*ty, *endpoint)))
            .collect(),
        prev: None,
        sig: Some("sig".to_string()),
    }
}

/// The state a `genesis_entry(.., "alice.test")` canonicalises into.
#[allow(dead_code)]
pub fn genesis_equivalent(handle: &str) -> StateOperation {
    let alias = format!("at://{}", handle);
    plc_operation(
        &["did:key:zRecovery", "did:key:zSigning"],
        "did:key:zSigning",
        &[alias.as_str()],
        &[("atproto_pds", "AtprotoPersonalDataServer", "https://bsky.social")],
    )
}

#[allow(dead_code)]
pub fn state_entry(cid: &str, minute: u32, op: StateOperation) -> LogEntry {
    LogEntry::new(DID, cid, Operation::State(op), at(minute))
}

#[allow(dead_code)]
pub fn tombstone_entry(cid: &str, minute: u32) -> LogEntry {
    LogEntry::new(
        DID,
        cid,
        Operation::Tombstone(TombstoneOperation {
            prev: None,
            sig: Some("sig".to_string()),
        }),
        at(minute),
    )
}

#[allow(dead_code)]
pub fn unknown_entry(cid: &str, minute: u32) -> LogEntry {
    LogEntry::new(DID, cid, Operation::Unknown, at(minute))
}
