//! Audit log decoding.
//!
//! Turns the raw JSON body the directory server returns for a DID's audit
//! log into typed [`LogEntry`] values. Fetching the body is the caller's job.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{ExError, PlcDiffError};
use crate::model::{LogEntry, Operation};
use crate::{log_op_end, log_op_error, log_op_skip, log_op_start};

const OP_PARSE_AUDIT_LOG: &str = "parse_audit_log";

/// Skip reason: the operation has a known tag but a body that does not fit it.
pub const SKIP_MALFORMED_OPERATION: &str = "malformed_operation";

/// Entry envelope with the operation left undecoded.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    did: String,
    operation: Value,
    cid: String,
    #[serde(default)]
    nullified: bool,
    created_at: DateTime<Utc>,
}

/// Order in which a caller delivers or wants to display entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogOrder {
    /// Chronological; what the history builder expects
    #[default]
    OldestFirst,
    /// Reverse chronological
    NewestFirst,
}

/// Put `entries`, delivered in `order`, into the oldest-first order the
/// history builder expects.
pub fn into_oldest_first(mut entries: Vec<LogEntry>, order: LogOrder) -> Vec<LogEntry> {
    if order == LogOrder::NewestFirst {
        entries.reverse();
    }
    entries
}

/// Decode raw audit log bytes into entries, preserving their order.
///
/// Operations are decoded leniently: an unknown tag, or a known tag whose
/// body is malformed, decodes to [`Operation::Unknown`] and the entry is
/// kept, so the builder omits it instead of losing the whole log.
///
/// # Errors
///
/// - `InvalidLog`: bytes are not UTF-8 JSON, the root is not an array, or
///   entries belong to more than one DID
/// - `InvalidEntry`: an element lacks `did`, `operation`, `cid` or a valid
///   `createdAt` (carries the element index)
pub fn parse_audit_log(bytes: &[u8]) -> Result<Vec<LogEntry>, ExError> {
    log_op_start!(OP_PARSE_AUDIT_LOG, byte_len = bytes.len());
    let start = std::time::Instant::now();

    let entries = parse_audit_log_impl(bytes).map_err(|e| {
        log_op_error!(
            OP_PARSE_AUDIT_LOG,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        ExError::from(e).with_op(OP_PARSE_AUDIT_LOG)
    })?;

    log_op_end!(
        OP_PARSE_AUDIT_LOG,
        duration_ms = start.elapsed().as_millis() as u64,
        entry_count = entries.len()
    );

    Ok(entries)
}

fn parse_audit_log_impl(bytes: &[u8]) -> Result<Vec<LogEntry>, PlcDiffError> {
    let text = std::str::from_utf8(bytes).map_err(|e| PlcDiffError::InvalidLog {
        reason: format!("not valid UTF-8: {}", e),
    })?;

    let raw: Value = serde_json::from_str(text).map_err(|e| PlcDiffError::InvalidLog {
        reason: format!("not valid JSON: {}", e),
    })?;

    let Value::Array(items) = raw else {
        return Err(PlcDiffError::InvalidLog {
            reason: "JSON root must be an array of entries".to_string(),
        });
    };

    let mut entries: Vec<LogEntry> = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let raw: RawEntry =
            serde_json::from_value(item).map_err(|e| PlcDiffError::InvalidEntry {
                index,
                reason: e.to_string(),
            })?;
        let entry = decode_entry(index, raw);

        if let Some(first) = entries.first() {
            if first.did != entry.did {
                return Err(PlcDiffError::DidMismatch {
                    index,
                    expected: first.did.clone(),
                    found: entry.did,
                });
            }
        }
        entries.push(entry);
    }

    Ok(entries)
}

fn decode_entry(index: usize, raw: RawEntry) -> LogEntry {
    let operation = match serde_json::from_value::<Operation>(raw.operation) {
        Ok(operation) => operation,
        Err(e) => {
            log_op_skip!(
                OP_PARSE_AUDIT_LOG,
                entry_index = index,
                cid = raw.cid.as_str(),
                reason = SKIP_MALFORMED_OPERATION,
                error = %e
            );
            Operation::Unknown
        }
    };

    LogEntry {
        did: raw.did,
        operation,
        cid: raw.cid,
        nullified: raw.nullified,
        created_at: raw.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_oldest_first_reverses_only_newest_first() {
        let a = LogEntry::new(
            "did:plc:x",
            "a",
            crate::model::Operation::Unknown,
            "2024-01-01T00:00:00Z".parse().unwrap(),
        );
        let b = LogEntry {
            cid: "b".to_string(),
            ..a.clone()
        };

        let kept = into_oldest_first(vec![a.clone(), b.clone()], LogOrder::OldestFirst);
        assert_eq!(kept[0].cid, "a");

        let flipped = into_oldest_first(vec![b, a], LogOrder::NewestFirst);
        assert_eq!(flipped[0].cid, "a");
        assert_eq!(flipped[1].cid, "b");
    }

    #[test]
    fn test_empty_array_is_an_empty_log() {
        assert!(parse_audit_log(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_operation_without_type_decodes_to_unknown() {
        let raw: RawEntry = serde_json::from_value(serde_json::json!({
            "did": "did:plc:x",
            "operation": {"rotationKeys": []},
            "cid": "bafy0",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let entry = decode_entry(0, raw);
        assert_eq!(entry.operation, crate::model::Operation::Unknown);
        assert!(!entry.nullified);
    }
}
