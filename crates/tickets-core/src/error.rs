use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes for scripting against the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    TicketNotFound,
    InvalidField,
    InvalidEnumValue,
    StoreReadFailed,
    StoreWriteFailed,
    CorruptStore,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::TicketNotFound => "E2001",
            Self::InvalidField => "E2002",
            Self::InvalidEnumValue => "E2003",
            Self::StoreReadFailed => "E3001",
            Self::StoreWriteFailed => "E3002",
            Self::CorruptStore => "E3003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::TicketNotFound => "Ticket not found",
            Self::InvalidField => "Invalid ticket field",
            Self::InvalidEnumValue => "Invalid status/priority value",
            Self::StoreReadFailed => "Ticket store read failed",
            Self::StoreWriteFailed => "Ticket store write failed",
            Self::CorruptStore => "Ticket store is corrupt",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .tickets/config.toml and retry."),
            Self::TicketNotFound => Some("Use `tickets list` to see available ticket ids."),
            Self::InvalidField => None,
            Self::InvalidEnumValue => Some(
                "Status is one of OPEN, IN_PROGRESS, RESOLVED, CLOSED; \
                 priority is one of LOW, MEDIUM, HIGH, CRITICAL.",
            ),
            Self::StoreReadFailed => Some("Check that the data directory exists and is readable."),
            Self::StoreWriteFailed => Some("Check disk space and write permissions."),
            Self::CorruptStore => {
                Some("Repair or remove the tickets.json file; it must hold a JSON array.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A field value that breaks one of the ticket rules.
///
/// Raised by entity construction and mutation, always before anything is
/// written to storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title cannot exceed 200 characters")]
    TitleTooLong,
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),
    #[error("Tags must be an array")]
    TagsNotArray,
    #[error("Tag cannot be empty")]
    EmptyTag,
    #[error("Updated timestamp cannot precede creation timestamp")]
    UpdatedBeforeCreated,
}

impl ValidationError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidStatus(_) | Self::InvalidPriority(_) => ErrorCode::InvalidEnumValue,
            _ => ErrorCode::InvalidField,
        }
    }
}

/// Failures of the file-backed ticket store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode tickets: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid ticket record #{index} in {}: {source}", .path.display())]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        source: ValidationError,
    },
}

impl StorageError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::StoreReadFailed,
            Self::Write { .. } | Self::CreateDir { .. } => ErrorCode::StoreWriteFailed,
            Self::Parse { .. } | Self::InvalidRecord { .. } => ErrorCode::CorruptStore,
            Self::Encode(_) => ErrorCode::InternalUnexpected,
        }
    }
}

/// Top-level error for every ticket operation.
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Ticket with id {id} not found")]
    NotFound { id: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TicketError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(err) => err.code(),
            Self::NotFound { .. } => ErrorCode::TicketNotFound,
            Self::Storage(err) => err.code(),
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T, E = TicketError> = std::result::Result<T, E>;
