//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is local and synchronous. Nothing in the domain layer retries;
/// that decision belongs to whoever drives it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested item has no catalog entry.
    #[error("not found")]
    NotFound,

    /// A request was malformed (e.g. a non-positive purchase quantity).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A purchase asked for more units than remain in stock.
    #[error("insufficient stock (requested: {requested}, available: {available})")]
    InsufficientStock { requested: u64, available: u64 },

    /// The catalog source could not be read or parsed.
    #[error("catalog source failed to load: {0}")]
    SourceLoad(String),
}

impl DomainError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn source_load(msg: impl Into<String>) -> Self {
        Self::SourceLoad(msg.into())
    }

    pub fn insufficient_stock(requested: u64, available: u64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// True for errors caused by the caller's input rather than system state.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::SourceLoad(_))
    }
}
