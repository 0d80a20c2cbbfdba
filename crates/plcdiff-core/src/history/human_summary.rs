//! Human-readable timeline renderer for operation histories.

use crate::audit_log::LogOrder;
use crate::history::engine::group_events_by_entry;
use crate::history::model::{Change, DiffEvent};

/// Render an oldest-first Markdown timeline of `events`.
pub fn render_timeline(events: &[DiffEvent]) -> String {
    render_timeline_ordered(events, LogOrder::OldestFirst)
}

/// Render a Markdown timeline with one section per originating entry.
///
/// `order` controls section order only; events inside a section keep their
/// category order. Informational output, not meant to be parsed.
pub fn render_timeline_ordered(events: &[DiffEvent], order: LogOrder) -> String {
    let mut out = String::new();
    out.push_str("## PLC Operation History\n\n");

    let mut groups = group_events_by_entry(events);
    if groups.is_empty() {
        out.push_str("_No changes recorded._\n");
        return out;
    }
    if order == LogOrder::NewestFirst {
        groups.reverse();
    }

    for (cid, group) in &groups {
        let Some(first) = group.first() else {
            continue;
        };
        out.push_str(&format!(
            "### {} `{}`\n\n",
            first.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            short(cid)
        ));
        if first.entry.nullified {
            out.push_str("> **Nullified**: superseded by a later fork.\n\n");
        }
        for event in group {
            out.push_str(&format!("- {}\n", event.change.describe()));
            if let Change::IdentityCreated { state } = &event.change {
                for key in &state.rotation_keys {
                    out.push_str(&format!("  - rotation key `{}`\n", key));
                }
                for (id, key) in &state.verification_methods {
                    out.push_str(&format!("  - verification method `{}` = `{}`\n", id, key));
                }
                for handle in &state.also_known_as {
                    out.push_str(&format!("  - handle `{}`\n", handle));
                }
                for (id, service) in &state.services {
                    out.push_str(&format!(
                        "  - service `{}` ({}) at {}\n",
                        id, service.service_type, service.endpoint
                    ));
                }
            }
        }
        out.push('\n');
    }

    out
}

/// Shorten a content hash for display.
fn short(cid: &str) -> &str {
    const LEN: usize = 16;
    match cid.char_indices().nth(LEN) {
        Some((end, _)) => &cid[..end],
        None => cid,
    }
}
