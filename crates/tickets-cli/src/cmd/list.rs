//! `tickets list` — list tickets with optional filters.

use super::Service;
use crate::input::{parse_priority, parse_status, parse_tags};
use crate::output::{OutputMode, render_list};
use clap::Args;
use std::io::{self, Write};
use tickets_core::TicketFilter;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only tickets in this status.
    #[arg(short, long)]
    pub status: Option<String>,

    /// Only tickets with this priority.
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Only tickets carrying any of these comma-separated tags.
    #[arg(short, long)]
    pub tags: Option<String>,
}

impl ListArgs {
    /// Build the repository filter, or `None` when no flag was given.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown status or priority.
    pub fn to_filter(&self) -> anyhow::Result<Option<TicketFilter>> {
        let mut filter = TicketFilter::new();
        if let Some(ref raw) = self.status {
            filter = filter.with_status(parse_status(raw)?);
        }
        if let Some(ref raw) = self.priority {
            filter = filter.with_priority(parse_priority(raw)?);
        }
        if let Some(ref raw) = self.tags {
            filter = filter.with_tags(parse_tags(raw));
        }
        Ok((!filter.is_empty()).then_some(filter))
    }
}

/// Execute `tickets list`.
///
/// # Errors
///
/// Returns an error for an invalid filter value or a store failure.
pub fn run_list(args: &ListArgs, service: &Service, output: OutputMode) -> anyhow::Result<()> {
    let filter = args.to_filter()?;
    let tickets = service.list_tickets(filter.as_ref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if output == OutputMode::Pretty {
        if tickets.is_empty() {
            writeln!(out, "No tickets found.")?;
            return Ok(());
        }
        writeln!(out, "Found {} ticket(s):", tickets.len())?;
        writeln!(out)?;
    }
    render_list(&mut out, &tickets, output)?;
    Ok(())
}
