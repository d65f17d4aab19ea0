//! `tickets create` — open a new ticket.

use super::Service;
use crate::input::{parse_priority, parse_tags};
use crate::output::{OutputMode, pretty_kv, render_item};
use clap::Args;
use std::io::{self, Write};
use tickets_core::{CreateTicket, Ticket};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Short summary, at most 200 characters.
    #[arg(short, long)]
    pub title: String,

    /// Free-form details.
    #[arg(short, long)]
    pub description: String,

    /// LOW, MEDIUM, HIGH or CRITICAL (case-insensitive).
    #[arg(short, long)]
    pub priority: String,

    /// Comma-separated tags, e.g. "bug,backend".
    #[arg(long, default_value = "")]
    pub tags: String,
}

/// Execute `tickets create`.
///
/// # Errors
///
/// Returns an error for an unknown priority, a field that breaks a ticket
/// rule, or a store failure. Nothing is written in the first two cases.
pub fn run_create(
    args: &CreateArgs,
    service: &mut Service,
    output: OutputMode,
) -> anyhow::Result<()> {
    let priority = parse_priority(&args.priority)?;
    let ticket = service.create_ticket(CreateTicket {
        title: args.title.clone(),
        description: args.description.clone(),
        priority,
        tags: Some(parse_tags(&args.tags)),
    })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match output {
        OutputMode::Pretty => render_created_human(&ticket, &mut out)?,
        OutputMode::Text | OutputMode::Json => render_item(&mut out, &ticket, output)?,
    }
    Ok(())
}

fn render_created_human(ticket: &Ticket, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "✓ Ticket created")?;
    pretty_kv(w, "ID", ticket.id())?;
    pretty_kv(w, "Title", ticket.title())?;
    pretty_kv(w, "Priority", ticket.priority().as_str())?;
    pretty_kv(w, "Status", ticket.status().as_str())?;
    let tags = ticket.tags();
    if !tags.is_empty() {
        pretty_kv(w, "Tags", tags.join(", "))?;
    }
    Ok(())
}
