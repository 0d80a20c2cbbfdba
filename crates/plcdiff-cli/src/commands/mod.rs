//! Subcommands and the input/output plumbing they share

use anyhow::Context;
use clap::ValueEnum;
use plcdiff_core::logging_facility::Profile;
use plcdiff_core::LogOrder;
use std::io::Read;
use std::path::Path;

pub mod history;
pub mod state;

/// Path argument that stands for stdin
const STDIN_PATH: &str = "-";

/// Order the input log is delivered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputOrder {
    OldestFirst,
    NewestFirst,
}

impl From<InputOrder> for LogOrder {
    fn from(order: InputOrder) -> Self {
        match order {
            InputOrder::OldestFirst => LogOrder::OldestFirst,
            InputOrder::NewestFirst => LogOrder::NewestFirst,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogProfileArg {
    /// Human-readable, debug level
    Development,
    /// JSON lines, info level
    Production,
}

impl From<LogProfileArg> for Profile {
    fn from(profile: LogProfileArg) -> Self {
        match profile {
            LogProfileArg::Development => Profile::Development,
            LogProfileArg::Production => Profile::Production,
        }
    }
}

/// Read the raw audit log from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == STDIN_PATH {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read audit log from stdin")?;
        return Ok(bytes);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
