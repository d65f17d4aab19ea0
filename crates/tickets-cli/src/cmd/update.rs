//! `tickets update` — change a ticket's status.

use super::Service;
use crate::input::parse_status;
use crate::output::{OutputMode, pretty_kv, render_item};
use clap::Args;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Ticket ID to update.
    pub id: String,

    /// OPEN, IN_PROGRESS, RESOLVED or CLOSED (case-insensitive).
    #[arg(short, long)]
    pub status: String,
}

/// Execute `tickets update <id> --status <status>`.
///
/// # Errors
///
/// Returns an error for an unknown status, a missing ticket, or a store
/// failure.
pub fn run_update(
    args: &UpdateArgs,
    service: &mut Service,
    output: OutputMode,
) -> anyhow::Result<()> {
    let status = parse_status(&args.status)?;
    let ticket = service.update_ticket_status(&args.id, status)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if output == OutputMode::Pretty {
        writeln!(out, "✓ Ticket updated")?;
        pretty_kv(&mut out, "ID", ticket.id())?;
        pretty_kv(&mut out, "Title", ticket.title())?;
        pretty_kv(&mut out, "Status", ticket.status().as_str())?;
    } else {
        render_item(&mut out, &ticket, output)?;
    }
    Ok(())
}
