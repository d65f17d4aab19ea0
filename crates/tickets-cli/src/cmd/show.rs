//! `tickets show` — display full details of a single ticket.

use super::Service;
use crate::output::{
    OutputMode, iso_time, local_time, pretty_kv, pretty_rule, pretty_section, render_mode,
};
use clap::Args;
use std::io::Write;
use tickets_core::TicketRecord;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Ticket ID to display.
    pub id: String,
}

/// Execute `tickets show <id>`.
///
/// # Errors
///
/// Returns an error if no ticket has the id or the store cannot be read.
pub fn run_show(args: &ShowArgs, service: &Service, output: OutputMode) -> anyhow::Result<()> {
    let ticket = service.get_ticket_by_id(&args.id)?;
    render_mode(
        output,
        &ticket.to_record(),
        |record, w| render_show_text(record, w),
        |record, w| render_show_human(record, w),
    )
}

fn tag_list(record: &TicketRecord) -> Vec<&str> {
    record
        .tags
        .as_array()
        .map(|tags| tags.iter().filter_map(serde_json::Value::as_str).collect())
        .unwrap_or_default()
}

fn render_show_human(record: &TicketRecord, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Ticket {}", record.id))?;
    pretty_kv(w, "Title", &record.title)?;
    pretty_kv(w, "Status", &record.status)?;
    pretty_kv(w, "Priority", &record.priority)?;
    let tags = tag_list(record);
    if !tags.is_empty() {
        pretty_kv(w, "Tags", tags.join(", "))?;
    }
    pretty_kv(w, "Created", local_time(record.created_at))?;
    pretty_kv(w, "Updated", local_time(record.updated_at))?;

    writeln!(w)?;
    pretty_section(w, "Description")?;
    for line in record.description.lines() {
        writeln!(w, "{line}")?;
    }
    pretty_rule(w)
}

fn render_show_text(record: &TicketRecord, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "id:          {}", record.id)?;
    writeln!(w, "title:       {}", record.title)?;
    writeln!(w, "description: {}", record.description)?;
    writeln!(w, "status:      {}", record.status)?;
    writeln!(w, "priority:    {}", record.priority)?;
    writeln!(w, "tags:        {}", tag_list(record).join(","))?;
    writeln!(w, "created:     {}", iso_time(record.created_at))?;
    writeln!(w, "updated:     {}", iso_time(record.updated_at))
}
