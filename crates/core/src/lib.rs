//! Shared primitives for all Rust crates in Ledgerdesk.

#![forbid(unsafe_code)]

/// Entity family labels shared across services.
pub mod kind;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use kind::EntityKind;

/// Result type used across Ledgerdesk crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Record identifier assigned by the external store.
///
/// Identity is never minted locally; a `RecordId` only ever wraps a value
/// the backing store handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(i64);

impl RecordId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Collection or single-record fetch failed.
    #[error("failed to fetch {}: {detail}", .kind.plural())]
    FetchFailed {
        /// Entity family the fetch targeted.
        kind: EntityKind,
        /// Transport, status, or decoding detail.
        detail: String,
    },

    /// Record creation failed.
    #[error("failed to add {}: {detail}", .kind.singular())]
    AddFailed {
        /// Entity family the creation targeted.
        kind: EntityKind,
        /// Transport, status, or decoding detail.
        detail: String,
    },

    /// Record update failed.
    #[error("failed to update {}: {detail}", .kind.singular())]
    UpdateFailed {
        /// Entity family the update targeted.
        kind: EntityKind,
        /// Transport, status, or decoding detail.
        detail: String,
    },

    /// Record deletion failed.
    #[error("failed to delete {}: {detail}", .kind.singular())]
    DeleteFailed {
        /// Entity family the deletion targeted.
        kind: EntityKind,
        /// Transport, status, or decoding detail.
        detail: String,
    },

    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
