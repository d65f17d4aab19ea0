use crate::error::ValidationError;
use crate::model::now_millis;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MAX_TITLE_LEN: usize = 200;

/// The four lifecycle states of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

/// How urgently a ticket needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the canonical upper-case name only. Case folding is the caller's
/// job (the CLI upper-cases flags before parsing).
impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidPriority(s.to_string()))
    }
}

/// Every field needed to construct a [`Ticket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketProps {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A trackable unit of work.
///
/// Every instance satisfies the ticket rules: non-blank title of at most
/// [`MAX_TITLE_LEN`] characters, non-blank description, no blank or
/// duplicate tags, and `updated_at >= created_at`. Fields are private so the
/// rules cannot be bypassed; the tag list is only ever handed out as a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "super::TicketRecord", into = "super::TicketRecord")]
pub struct Ticket {
    id: String,
    title: String,
    description: String,
    status: Status,
    priority: Priority,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Validate `props` and build a ticket from them.
    ///
    /// Duplicate tags are collapsed, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found; no ticket is produced.
    pub fn new(props: TicketProps) -> Result<Self, ValidationError> {
        validate_text(&props.title, &props.description)?;
        let tags = normalize_tags(props.tags)?;
        if props.updated_at < props.created_at {
            return Err(ValidationError::UpdatedBeforeCreated);
        }

        Ok(Self {
            id: props.id,
            title: props.title,
            description: props.description,
            status: props.status,
            priority: props.priority,
            tags,
            created_at: props.created_at,
            updated_at: props.updated_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// A fresh copy of the tag list. Mutating it never affects the ticket.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Set the status and refresh `updated_at`.
    pub fn update_status(&mut self, status: Status) {
        self.status = status;
        self.touch();
    }

    /// Append `tag` unless it is already present.
    ///
    /// Returns `true` when the tag was added. Adding a present tag leaves
    /// `updated_at` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTag`] if `tag` is blank.
    pub fn add_tag(&mut self, tag: &str) -> Result<bool, ValidationError> {
        if tag.trim().is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        if self.has_tag(tag) {
            return Ok(false);
        }
        self.tags.push(tag.to_string());
        self.touch();
        Ok(true)
    }

    /// Remove `tag` if present. Returns `true` when something was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let Some(index) = self.tags.iter().position(|t| t == tag) else {
            return false;
        };
        self.tags.remove(index);
        self.touch();
        true
    }

    /// Move `updated_at` strictly forward.
    fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at, now_millis());
    }

    pub(crate) fn into_parts(self) -> TicketProps {
        TicketProps {
            id: self.id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Title and description rules, checked in this order.
pub(crate) fn validate_text(title: &str, description: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(())
}

fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if tag.trim().is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        if !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    Ok(normalized)
}

/// The clock reading, or one millisecond past `previous` when the clock has
/// not moved beyond it.
fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
