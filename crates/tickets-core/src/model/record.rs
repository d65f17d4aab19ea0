//! Persisted shape of a ticket.
//!
//! A [`TicketRecord`] is what lands in `tickets.json`: camelCase keys,
//! upper-case status/priority names, and ISO-8601 timestamps with
//! millisecond precision. Status, priority and tags are kept loosely typed
//! here so that a hand-edited file fails with the same messages as any
//! other invalid input instead of a serde type error.

use super::ticket::{Priority, Status, Ticket, TicketProps, validate_text};
use crate::error::ValidationError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub tags: Value,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub updated_at: DateTime<Utc>,
}

fn serialize_iso_millis<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl Ticket {
    /// Snapshot this ticket in its persisted shape.
    #[must_use]
    pub fn to_record(&self) -> TicketRecord {
        TicketRecord::from(self.clone())
    }

    /// Rebuild a ticket from its persisted shape, applying every rule a
    /// freshly constructed ticket is held to.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found in the record.
    pub fn from_record(record: TicketRecord) -> Result<Self, ValidationError> {
        validate_text(&record.title, &record.description)?;
        let status = record.status.parse::<Status>()?;
        let priority = record.priority.parse::<Priority>()?;
        let tags = tags_from_value(record.tags)?;

        Self::new(TicketProps {
            id: record.id,
            title: record.title,
            description: record.description,
            status,
            priority,
            tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

fn tags_from_value(value: Value) -> Result<Vec<String>, ValidationError> {
    let Value::Array(items) = value else {
        return Err(ValidationError::TagsNotArray);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(tag) => Ok(tag),
            _ => Err(ValidationError::TagsNotArray),
        })
        .collect()
}

impl From<Ticket> for TicketRecord {
    fn from(ticket: Ticket) -> Self {
        let parts = ticket.into_parts();
        Self {
            id: parts.id,
            title: parts.title,
            description: parts.description,
            status: parts.status.as_str().to_string(),
            priority: parts.priority.as_str().to_string(),
            tags: Value::from(parts.tags),
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }
}

impl TryFrom<TicketRecord> for Ticket {
    type Error = ValidationError;

    fn try_from(record: TicketRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}
