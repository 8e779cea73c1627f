//! Line-oriented evaluation loop over standard input

use anyhow::{Context, Result};
use flaggate_core::models::treatment;
use flaggate_core::TreatmentClient;
use std::io::{BufRead, Write};

/// Line that ends the loop
pub const EXIT_COMMAND: &str = "exit";

/// Printed for lines that are not `<key> <flag>`
pub const UNRECOGNIZED: &str = "Could not understand command";

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The `exit` line was read
    ExitCommand,
    /// The input stream ended
    EndOfInput,
}

/// Evaluate `<key> <flag>` lines from `reader`, printing `on` or `off` to `out`.
///
/// Malformed lines print a diagnostic and the loop continues.
pub fn run<R, W>(reader: R, mut out: W, client: &dyn TreatmentClient) -> Result<LoopExit>
where
    R: BufRead,
    W: Write,
{
    for line_result in reader.lines() {
        let line = line_result.context("Failed to read line from stdin")?;
        let line = line.trim_end_matches('\r');

        if line == EXIT_COMMAND {
            return Ok(LoopExit::ExitCommand);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [key, flag] => {
                let result = client.get_treatment(key, flag);
                tracing::debug!(key = %key, flag = %flag, treatment = %result, "Evaluated flag");
                writeln!(out, "{}", treatment::normalize(&result))?;
            }
            _ => {
                writeln!(out, "{}", UNRECOGNIZED)?;
            }
        }
        out.flush().context("Failed to flush stdout")?;
    }

    Ok(LoopExit::EndOfInput)
}
