//! `tickets delete` — remove a ticket permanently.

use super::Service;
use crate::output::OutputMode;
use clap::Args;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Ticket ID to delete.
    pub id: String,
}

/// Execute `tickets delete <id>`.
///
/// # Errors
///
/// Returns an error if no ticket has the id (the store is left untouched)
/// or the store cannot be written.
pub fn run_delete(
    args: &DeleteArgs,
    service: &mut Service,
    output: OutputMode,
) -> anyhow::Result<()> {
    service.delete_ticket(&args.id)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match output {
        OutputMode::Json => {
            let body = serde_json::json!({ "ok": true, "id": args.id });
            serde_json::to_writer_pretty(&mut out, &body)?;
            writeln!(out)?;
        }
        OutputMode::Text => writeln!(out, "{}", args.id)?,
        OutputMode::Pretty => writeln!(out, "✓ Ticket deleted: {}", args.id)?,
    }
    Ok(())
}
