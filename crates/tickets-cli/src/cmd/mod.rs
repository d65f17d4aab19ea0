pub mod completions;
pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod tag;
pub mod update;

use tickets_core::{JsonFileRepository, TicketService};

/// Service wired to the on-disk store, as every command uses it.
pub type Service = TicketService<JsonFileRepository>;
