//! Operation history computation engine.
//!
//! The core entry point is [`build_history`], which walks an oldest-first
//! audit log and emits the [`DiffEvent`]s describing each entry relative to
//! the nearest earlier entry that was not nullified.

use crate::history::model::{Change, DiffEvent, EntryRef};
use crate::model::{DocumentState, LogEntry, Operation};
use crate::util::{deep_equal, difference, group_by, unique};
use crate::{log_op_end, log_op_skip, log_op_start};

const OP_BUILD_HISTORY: &str = "build_history";

/// Skip reason: the baseline entry is a tombstone.
pub const SKIP_TOMBSTONED_BASELINE: &str = "tombstoned_baseline";
/// Skip reason: the baseline entry carries an unknown operation.
pub const SKIP_UNKNOWN_BASELINE: &str = "unknown_baseline";
/// Skip reason: the entry itself carries an unknown operation.
pub const SKIP_UNKNOWN_OPERATION: &str = "unknown_operation";

/// Compute the semantic change history of an audit log.
///
/// `entries` must be oldest-first; see
/// [`into_oldest_first`](crate::audit_log::into_oldest_first). Output events
/// follow input entry order, and within one entry the fixed category order
/// of [`diff_states`].
///
/// Never fails: entries that cannot be described (unknown operations, or a
/// state operation whose baseline is a tombstone) yield no events.
pub fn build_history(entries: &[LogEntry]) -> Vec<DiffEvent> {
    log_op_start!(OP_BUILD_HISTORY, entry_count = entries.len());
    let start = std::time::Instant::now();

    let events: Vec<DiffEvent> = (0..entries.len())
        .flat_map(|index| entry_events(entries, index))
        .collect();

    log_op_end!(
        OP_BUILD_HISTORY,
        duration_ms = start.elapsed().as_millis() as u64,
        entry_count = entries.len(),
        event_count = events.len()
    );

    events
}

/// Events produced by the entry at `index` alone.
///
/// Returns nothing if `index` is out of range.
pub fn entry_events(entries: &[LogEntry], index: usize) -> Vec<DiffEvent> {
    let Some(entry) = entries.get(index) else {
        return Vec::new();
    };

    let changes = match &entry.operation {
        Operation::Genesis(op) => vec![Change::IdentityCreated {
            state: DocumentState::from_genesis(op),
        }],
        Operation::State(op) => {
            let next = DocumentState::from_state_operation(op);
            match previous_canonical_entry(entries, index) {
                // No surviving predecessor: this entry is the baseline
                None => vec![Change::IdentityCreated { state: next }],
                Some(baseline) => match baseline.operation.document_state() {
                    Some(prev) => diff_states(&prev, &next),
                    None => {
                        let reason = match baseline.operation {
                            Operation::Tombstone(_) => SKIP_TOMBSTONED_BASELINE,
                            _ => SKIP_UNKNOWN_BASELINE,
                        };
                        log_op_skip!(
                            OP_BUILD_HISTORY,
                            entry_index = index,
                            cid = entry.cid.as_str(),
                            baseline_cid = baseline.cid.as_str(),
                            reason = reason
                        );
                        Vec::new()
                    }
                },
            }
        }
        Operation::Tombstone(_) => vec![Change::IdentityTombstoned],
        Operation::Unknown => {
            log_op_skip!(
                OP_BUILD_HISTORY,
                entry_index = index,
                cid = entry.cid.as_str(),
                reason = SKIP_UNKNOWN_OPERATION
            );
            Vec::new()
        }
    };

    let entry_ref = EntryRef::new(index, entry);
    changes
        .into_iter()
        .map(|change| DiffEvent {
            entry: entry_ref.clone(),
            created_at: entry.created_at,
            change,
        })
        .collect()
}

/// The nearest entry before `index` that is not nullified.
///
/// Scans backwards on every call: nullification is learned after the fact,
/// so no running "current state" can be carried forward.
pub fn previous_canonical_entry(entries: &[LogEntry], index: usize) -> Option<&LogEntry> {
    entries.get(..index)?.iter().rev().find(|e| !e.nullified)
}

/// Changes turning `prev` into `next`.
///
/// Order: rotation keys (added, then removed), verification methods, aliases,
/// services. Map-valued categories emit added/changed in `next` key order,
/// then removed in `prev` key order.
pub fn diff_states(prev: &DocumentState, next: &DocumentState) -> Vec<Change> {
    let mut changes = Vec::new();

    // Rotation keys
    let prev_keys = unique(&prev.rotation_keys);
    let next_keys = unique(&next.rotation_keys);
    for rotation_key in difference(&next_keys, &prev_keys) {
        changes.push(Change::RotationKeyAdded { rotation_key });
    }
    for rotation_key in difference(&prev_keys, &next_keys) {
        changes.push(Change::RotationKeyRemoved { rotation_key });
    }

    // Verification methods
    for (method_id, method_key) in &next.verification_methods {
        match prev.verification_methods.get(method_id) {
            None => changes.push(Change::VerificationMethodAdded {
                method_id: method_id.clone(),
                method_key: method_key.clone(),
            }),
            Some(prev_key) if prev_key != method_key => {
                changes.push(Change::VerificationMethodChanged {
                    method_id: method_id.clone(),
                    prev_method_key: prev_key.clone(),
                    next_method_key: method_key.clone(),
                })
            }
            Some(_) => {}
        }
    }
    for (method_id, method_key) in &prev.verification_methods {
        if !next.verification_methods.contains_key(method_id) {
            changes.push(Change::VerificationMethodRemoved {
                method_id: method_id.clone(),
                method_key: method_key.clone(),
            });
        }
    }

    // Aliases: a one-for-one swap reads as a rename
    match (prev.also_known_as.as_slice(), next.also_known_as.as_slice()) {
        ([prev_handle], [next_handle]) => {
            if prev_handle != next_handle {
                changes.push(Change::HandleChanged {
                    prev_handle: prev_handle.clone(),
                    next_handle: next_handle.clone(),
                });
            }
        }
        (prev_aliases, next_aliases) => {
            let prev_aliases = unique(prev_aliases);
            let next_aliases = unique(next_aliases);
            for handle in difference(&next_aliases, &prev_aliases) {
                changes.push(Change::HandleAdded { handle });
            }
            for handle in difference(&prev_aliases, &next_aliases) {
                changes.push(Change::HandleRemoved { handle });
            }
        }
    }

    // Services
    for (service_id, service) in &next.services {
        match prev.services.get(service_id) {
            None => changes.push(Change::ServiceAdded {
                service_id: service_id.clone(),
                service_type: service.service_type.clone(),
                service_endpoint: service.endpoint.clone(),
            }),
            Some(prev_service) if !deep_equal(&prev_service.to_value(), &service.to_value()) => {
                changes.push(Change::ServiceChanged {
                    service_id: service_id.clone(),
                    prev_service_type: prev_service.service_type.clone(),
                    next_service_type: service.service_type.clone(),
                    prev_service_endpoint: prev_service.endpoint.clone(),
                    next_service_endpoint: service.endpoint.clone(),
                })
            }
            Some(_) => {}
        }
    }
    for (service_id, service) in &prev.services {
        if !next.services.contains_key(service_id) {
            changes.push(Change::ServiceRemoved {
                service_id: service_id.clone(),
                service_type: service.service_type.clone(),
                service_endpoint: service.endpoint.clone(),
            });
        }
    }

    changes
}

/// Group events by the `cid` of their originating entry.
///
/// Groups keep first-seen order and events keep their order within a group.
pub fn group_events_by_entry(events: &[DiffEvent]) -> Vec<(String, Vec<&DiffEvent>)> {
    group_by(events.iter(), |event| event.entry.cid.clone())
}

/// Document state after the latest non-nullified entry.
///
/// `None` if the log is empty or the latest canonical entry is a tombstone
/// or an unknown operation.
pub fn resolve_current_state(entries: &[LogEntry]) -> Option<DocumentState> {
    entries
        .iter()
        .rev()
        .find(|e| !e.nullified)?
        .operation
        .document_state()
}
