//! History command
//!
//! Usage: plcdiff history <FILE|-> [--format markdown|json] [--newest-first] [--output <FILE>]

use anyhow::Context;
use clap::{Args, ValueEnum};
use plcdiff_core::history::{build_history, group_events_by_entry, render_timeline_ordered};
use plcdiff_core::{into_oldest_first, parse_audit_log, DiffEvent, LogOrder};
use serde_json::json;
use std::path::PathBuf;

use super::{read_input, write_output, InputOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Audit log JSON file, or `-` for stdin
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Order the input entries are in
    #[arg(long, value_enum, default_value_t = InputOrder::OldestFirst)]
    pub input_order: InputOrder,

    /// Show the most recent entries first
    #[arg(long)]
    pub newest_first: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute history command
pub fn execute(args: HistoryArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.input)?;
    let entries = parse_audit_log(&bytes)
        .with_context(|| format!("failed to decode audit log {}", args.input.display()))?;
    let entries = into_oldest_first(entries, args.input_order.into());

    let events = build_history(&entries);
    let display_order = if args.newest_first {
        LogOrder::NewestFirst
    } else {
        LogOrder::OldestFirst
    };

    let text = match args.format {
        OutputFormat::Markdown => render_timeline_ordered(&events, display_order),
        OutputFormat::Json => {
            let ordered = order_events(&events, display_order);
            let doc = json!({
                "did": entries.first().map(|e| e.did.as_str()),
                "events": ordered,
            });
            let mut text = serde_json::to_string_pretty(&doc)?;
            text.push('\n');
            text
        }
    };

    write_output(args.output.as_deref(), &text)
}

/// Events in display order: entry groups reversed for newest-first, events
/// within an entry untouched.
fn order_events(events: &[DiffEvent], order: LogOrder) -> Vec<&DiffEvent> {
    let mut groups = group_events_by_entry(events);
    if order == LogOrder::NewestFirst {
        groups.reverse();
    }
    groups.into_iter().flat_map(|(_, group)| group).collect()
}
