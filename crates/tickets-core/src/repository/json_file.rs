//! JSON file adapter for [`TicketRepository`].
//!
//! The store is a single pretty-printed JSON array of [`TicketRecord`]s.
//! Every operation reads and parses the whole file, applies the change in
//! memory, and rewrites the whole file. There is no locking: two processes
//! writing at once will race and the last writer wins. That is accepted for a
//! single-user local tool.

use super::{TicketFilter, TicketRepository};
use crate::error::{Result, StorageError, TicketError};
use crate::model::{Ticket, TicketRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name used inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "tickets.json";

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Store tickets in `<data_dir>/tickets.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::with_file(data_dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// Store tickets in an explicit file path.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty array if the file is missing.
    fn ensure_file_exists(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        debug!(path = %self.path.display(), "initializing empty ticket store");
        fs::write(&self.path, "[]\n").map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn read_tickets(&self) -> Result<Vec<Ticket>, StorageError> {
        self.ensure_file_exists()?;

        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<TicketRecord> =
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let tickets = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Ticket::from_record(record).map_err(|source| StorageError::InvalidRecord {
                    path: self.path.clone(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(path = %self.path.display(), count = tickets.len(), "read tickets");
        Ok(tickets)
    }

    fn write_tickets(&self, tickets: &[Ticket]) -> Result<(), StorageError> {
        let records: Vec<TicketRecord> = tickets.iter().map(Ticket::to_record).collect();
        let mut content = serde_json::to_string_pretty(&records).map_err(StorageError::Encode)?;
        content.push('\n');

        fs::write(&self.path, content).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), count = tickets.len(), "wrote tickets");
        Ok(())
    }
}

impl TicketRepository for JsonFileRepository {
    fn save(&mut self, ticket: &Ticket) -> Result<()> {
        let mut tickets = self.read_tickets()?;
        tickets.push(ticket.clone());
        self.write_tickets(&tickets)?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Ticket>> {
        let tickets = self.read_tickets()?;
        Ok(tickets.into_iter().find(|t| t.id() == id))
    }

    fn find_all(&self, filter: Option<&TicketFilter>) -> Result<Vec<Ticket>> {
        let tickets = self.read_tickets()?;
        Ok(match filter {
            Some(filter) => filter.apply(tickets),
            None => tickets,
        })
    }

    fn update(&mut self, ticket: &Ticket) -> Result<()> {
        let mut tickets = self.read_tickets()?;
        let slot = tickets
            .iter_mut()
            .find(|t| t.id() == ticket.id())
            .ok_or_else(|| TicketError::not_found(ticket.id()))?;
        *slot = ticket.clone();
        self.write_tickets(&tickets)?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut tickets = self.read_tickets()?;
        let before = tickets.len();
        tickets.retain(|t| t.id() != id);
        if tickets.len() == before {
            return Err(TicketError::not_found(id));
        }
        self.write_tickets(&tickets)?;
        Ok(())
    }
}
