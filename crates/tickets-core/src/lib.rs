//! tickets-core library.
//!
//! The ticket entity and its rules live in [`model`], storage behind the
//! [`repository::TicketRepository`] port, and multi-step workflows in
//! [`service::TicketService`].
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::TicketError`] for domain operations,
//!   `anyhow::Result` for configuration loading.
//! - **Logging**: `tracing` macros (`info!` for mutations, `debug!` for I/O).

pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use error::{ErrorCode, Result, StorageError, TicketError, ValidationError};
pub use model::{Priority, Status, Ticket, TicketProps, TicketRecord};
pub use repository::{InMemoryRepository, JsonFileRepository, TicketFilter, TicketRepository};
pub use service::{CreateTicket, TicketService};
