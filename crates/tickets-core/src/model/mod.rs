pub mod record;
pub mod ticket;

pub use record::TicketRecord;
pub use ticket::{MAX_TITLE_LEN, Priority, Status, Ticket, TicketProps};

use chrono::{DateTime, SubsecRound, Utc};

/// Current wall-clock time at the precision tickets are persisted with.
#[must_use]
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
