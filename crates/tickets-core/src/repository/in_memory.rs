//! `Vec`-backed [`TicketRepository`]. Nothing is persisted.

use super::{TicketFilter, TicketRepository};
use crate::error::{Result, TicketError};
use crate::model::Ticket;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tickets: Vec<Ticket>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing tickets, keeping their order.
    #[must_use]
    pub const fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

impl TicketRepository for InMemoryRepository {
    fn save(&mut self, ticket: &Ticket) -> Result<()> {
        self.tickets.push(ticket.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Ticket>> {
        Ok(self.tickets.iter().find(|t| t.id() == id).cloned())
    }

    fn find_all(&self, filter: Option<&TicketFilter>) -> Result<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| filter.is_none_or(|f| f.matches(t)))
            .cloned()
            .collect())
    }

    fn update(&mut self, ticket: &Ticket) -> Result<()> {
        let slot = self
            .tickets
            .iter_mut()
            .find(|t| t.id() == ticket.id())
            .ok_or_else(|| TicketError::not_found(ticket.id()))?;
        *slot = ticket.clone();
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let index = self
            .tickets
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| TicketError::not_found(id))?;
        self.tickets.remove(index);
        Ok(())
    }
}
