//! Ticket workflows.
//!
//! [`TicketService`] is the only place with multi-step logic: it creates
//! entities, converts a repository "absent" result into
//! [`TicketError::NotFound`], and runs fetch-mutate-persist cycles. Every
//! mutation is validated in memory before the repository is asked to write.

use crate::error::{Result, TicketError};
use crate::model::{Priority, Status, Ticket, TicketProps, now_millis};
use crate::repository::{TicketFilter, TicketRepository};
use tracing::info;
use uuid::Uuid;

/// Input for [`TicketService::create_ticket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// `None` means no tags.
    pub tags: Option<Vec<String>>,
}

pub struct TicketService<R> {
    repository: R,
}

impl<R: TicketRepository> TicketService<R> {
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Create an OPEN ticket with a fresh UUID and persist it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input (nothing is written) or a
    /// storage error if the save fails.
    pub fn create_ticket(&mut self, dto: CreateTicket) -> Result<Ticket> {
        let now = now_millis();
        let ticket = Ticket::new(TicketProps {
            id: Uuid::new_v4().to_string(),
            title: dto.title,
            description: dto.description,
            status: Status::Open,
            priority: dto.priority,
            tags: dto.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })?;

        self.repository.save(&ticket)?;
        info!(id = ticket.id(), priority = %ticket.priority(), "created ticket");
        Ok(ticket)
    }

    /// # Errors
    ///
    /// Returns [`TicketError::NotFound`] if no ticket has `id`.
    pub fn get_ticket_by_id(&self, id: &str) -> Result<Ticket> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| TicketError::not_found(id))
    }

    /// # Errors
    ///
    /// Returns a storage error if the repository cannot be read.
    pub fn list_tickets(&self, filter: Option<&TicketFilter>) -> Result<Vec<Ticket>> {
        self.repository.find_all(filter)
    }

    /// # Errors
    ///
    /// Returns [`TicketError::NotFound`] if no ticket has `id`.
    pub fn update_ticket_status(&mut self, id: &str, status: Status) -> Result<Ticket> {
        let mut ticket = self.get_ticket_by_id(id)?;
        let previous = ticket.status();
        ticket.update_status(status);
        self.repository.update(&ticket)?;
        info!(id, from = %previous, to = %status, "updated ticket status");
        Ok(ticket)
    }

    /// # Errors
    ///
    /// Returns [`TicketError::NotFound`] if no ticket has `id`, or a
    /// validation error for a blank tag.
    pub fn add_tag_to_ticket(&mut self, id: &str, tag: &str) -> Result<Ticket> {
        let mut ticket = self.get_ticket_by_id(id)?;
        ticket.add_tag(tag)?;
        self.repository.update(&ticket)?;
        Ok(ticket)
    }

    /// # Errors
    ///
    /// Returns [`TicketError::NotFound`] if no ticket has `id`.
    pub fn remove_tag_from_ticket(&mut self, id: &str, tag: &str) -> Result<Ticket> {
        let mut ticket = self.get_ticket_by_id(id)?;
        ticket.remove_tag(tag);
        self.repository.update(&ticket)?;
        Ok(ticket)
    }

    /// Delete after confirming the ticket exists, so the not-found message is
    /// the same whatever the repository would report.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::NotFound`] if no ticket has `id`.
    pub fn delete_ticket(&mut self, id: &str) -> Result<()> {
        self.get_ticket_by_id(id)?;
        self.repository.delete(id)?;
        info!(id, "deleted ticket");
        Ok(())
    }
}
