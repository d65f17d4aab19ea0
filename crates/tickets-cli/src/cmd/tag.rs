//! `tickets tag` and `tickets untag` — add/remove tags on a ticket.

use super::Service;
use crate::input::require_tags;
use crate::output::{OutputMode, pretty_kv, render_item};
use clap::Args;
use std::io::{self, Write};
use tickets_core::Ticket;

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Ticket ID to tag.
    pub id: String,

    /// Tags to add.
    #[arg(required = true)]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UntagArgs {
    /// Ticket ID to untag.
    pub id: String,

    /// Tags to remove.
    #[arg(required = true)]
    pub tags: Vec<String>,
}

/// Execute `tickets tag <id> <tag>...`. Tags already present are skipped.
///
/// # Errors
///
/// Returns an error for a blank tag (before anything is written), a missing
/// ticket, or a store failure.
pub fn run_tag(args: &TagArgs, service: &mut Service, output: OutputMode) -> anyhow::Result<()> {
    require_tags(&args.tags)?;
    let mut ticket = service.get_ticket_by_id(&args.id)?;
    for tag in &args.tags {
        if !ticket.has_tag(tag) {
            ticket = service.add_tag_to_ticket(&args.id, tag)?;
        }
    }
    report(&ticket, output)
}

/// Execute `tickets untag <id> <tag>...`. Absent tags are ignored.
///
/// # Errors
///
/// Returns an error for a missing ticket or a store failure.
pub fn run_untag(
    args: &UntagArgs,
    service: &mut Service,
    output: OutputMode,
) -> anyhow::Result<()> {
    let mut ticket = service.get_ticket_by_id(&args.id)?;
    for tag in &args.tags {
        if ticket.has_tag(tag) {
            ticket = service.remove_tag_from_ticket(&args.id, tag)?;
        }
    }
    report(&ticket, output)
}

fn report(ticket: &Ticket, output: OutputMode) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if output == OutputMode::Pretty {
        writeln!(out, "✓ Tags updated")?;
        pretty_kv(&mut out, "ID", ticket.id())?;
        let tags = ticket.tags();
        let shown = if tags.is_empty() {
            "(none)".to_string()
        } else {
            tags.join(", ")
        };
        pretty_kv(&mut out, "Tags", shown)?;
    } else {
        render_item(&mut out, ticket, output)?;
    }
    Ok(())
}
