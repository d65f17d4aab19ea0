//! Storage contract for tickets.
//!
//! [`TicketRepository`] is the boundary between the service layer and the
//! storage medium. Two adapters ship with the crate:
//!
//! - [`JsonFileRepository`]: the durable store, one pretty-printed JSON array
//!   rewritten in full on every operation.
//! - [`InMemoryRepository`]: a `Vec`-backed store for tests and embedding.
//!
//! Both return tickets in insertion order and apply [`TicketFilter`] the same
//! way, via [`TicketFilter::matches`].

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryRepository;
pub use json_file::JsonFileRepository;

use crate::error::Result;
use crate::model::{Priority, Status, Ticket};

/// Selects a subset of tickets for [`TicketRepository::find_all`].
///
/// Populated dimensions are combined with AND. Within `tags` a ticket
/// matches when it carries any of the listed tags. An unset dimension (or an
/// empty `tags`) does not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

impl TicketFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// True when no dimension is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.tags.is_empty()
    }

    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if self.status.is_some_and(|status| ticket.status() != status) {
            return false;
        }
        if self
            .priority
            .is_some_and(|priority| ticket.priority() != priority)
        {
            return false;
        }
        self.tags.is_empty() || self.tags.iter().any(|tag| ticket.has_tag(tag))
    }

    /// Keep the tickets that match, preserving their order.
    #[must_use]
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        if self.is_empty() {
            return tickets;
        }
        tickets.into_iter().filter(|t| self.matches(t)).collect()
    }
}

/// Storage contract consumed by [`crate::service::TicketService`].
///
/// "Not found" is a valid result for [`find_by_id`](Self::find_by_id) and
/// an error for [`update`](Self::update) and [`delete`](Self::delete).
pub trait TicketRepository {
    /// Append a new ticket.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the medium cannot be written.
    fn save(&mut self, ticket: &Ticket) -> Result<()>;

    /// Look up a ticket by id. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the medium cannot be read.
    fn find_by_id(&self, id: &str) -> Result<Option<Ticket>>;

    /// Every ticket matching `filter` (all of them for `None`), in insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the medium cannot be read.
    fn find_all(&self, filter: Option<&TicketFilter>) -> Result<Vec<Ticket>>;

    /// Replace the stored ticket that shares `ticket`'s id.
    ///
    /// # Errors
    ///
    /// Returns `TicketError::NotFound` if no stored ticket has that id; the
    /// store is left unchanged.
    fn update(&mut self, ticket: &Ticket) -> Result<()>;

    /// Remove the ticket with `id`.
    ///
    /// # Errors
    ///
    /// Returns `TicketError::NotFound` if no stored ticket has that id; the
    /// store is left unchanged.
    fn delete(&mut self, id: &str) -> Result<()>;
}

impl<R: TicketRepository + ?Sized> TicketRepository for Box<R> {
    fn save(&mut self, ticket: &Ticket) -> Result<()> {
        (**self).save(ticket)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Ticket>> {
        (**self).find_by_id(id)
    }

    fn find_all(&self, filter: Option<&TicketFilter>) -> Result<Vec<Ticket>> {
        (**self).find_all(filter)
    }

    fn update(&mut self, ticket: &Ticket) -> Result<()> {
        (**self).update(ticket)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        (**self).delete(id)
    }
}
