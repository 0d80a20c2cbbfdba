//! Operation history builder.
//!
//! Turns an oldest-first audit log into a flat timeline of semantic
//! changes, one or more per entry.
//!
//! ## Entry point
//!
//! ```ignore
//! use plcdiff_core::history::build_history;
//!
//! let events = build_history(&entries);
//! let summary = plcdiff_core::history::render_timeline(&events);
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no I/O, no mutation of the input, identical output for
//!   identical input.
//! - **Nullification-aware baselines**: each state operation is diffed
//!   against the nearest earlier entry that was not nullified.
//! - **Permissive**: unknown operations produce no events rather than errors.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{
    build_history, diff_states, entry_events, group_events_by_entry, previous_canonical_entry,
    resolve_current_state,
};
pub use human_summary::{render_timeline, render_timeline_ordered};
pub use model::{Change, DiffEvent, EntryRef};
