//! State command
//!
//! Usage: plcdiff state <FILE|-> [--input-order oldest-first|newest-first] [--output <FILE>]

use anyhow::{bail, Context};
use clap::Args;
use plcdiff_core::history::resolve_current_state;
use plcdiff_core::{into_oldest_first, parse_audit_log, Operation};
use serde_json::json;
use std::path::PathBuf;

use super::{read_input, write_output, InputOrder};

#[derive(Debug, Args)]
pub struct StateArgs {
    /// Audit log JSON file, or `-` for stdin
    pub input: PathBuf,

    /// Order the input entries are in
    #[arg(long, value_enum, default_value_t = InputOrder::OldestFirst)]
    pub input_order: InputOrder,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute state command
pub fn execute(args: StateArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.input)?;
    let entries = parse_audit_log(&bytes)
        .with_context(|| format!("failed to decode audit log {}", args.input.display()))?;
    let entries = into_oldest_first(entries, args.input_order.into());

    let Some(latest) = entries.iter().rev().find(|e| !e.nullified) else {
        bail!("audit log has no canonical entries");
    };

    let text = match resolve_current_state(&entries) {
        Some(state) => {
            let doc = json!({
                "did": latest.did,
                "cid": latest.cid,
                "createdAt": latest.created_at,
                "state": state,
            });
            let mut text = serde_json::to_string_pretty(&doc)?;
            text.push('\n');
            text
        }
        None => match latest.operation {
            Operation::Tombstone(_) => format!(
                "{} was tombstoned at {} ({})\n",
                latest.did,
                latest.created_at.to_rfc3339(),
                latest.cid
            ),
            _ => bail!(
                "latest canonical entry {} has an unrecognised operation type",
                latest.cid
            ),
        },
    };

    write_output(args.output.as_deref(), &text)
}
