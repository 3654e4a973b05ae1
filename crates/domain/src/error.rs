//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`LendError`]
//! via `From`, so workflows can propagate gateway failures unmodified.

use std::error::Error as StdError;

use crate::id::{EquipmentId, RentalId};

/// Top-level error returned by every use-case.
#[derive(Debug, thiserror::Error)]
pub enum LendError {
    /// Bad or missing input, detected before any store access.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced row does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A reservation was denied because no unit is available.
    #[error(transparent)]
    OutOfStock(#[from] OutOfStockError),

    /// The store could not be reached.
    #[error("network error")]
    Network(#[source] Box<dyn StdError + Send + Sync>),

    /// The store answered with an error.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl LendError {
    /// Wrap a transport failure.
    pub fn network(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Network(Box::new(err))
    }

    /// Coarse category, enough for a presentation layer to pick its wording.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::OutOfStock(_) => ErrorKind::OutOfStock,
            Self::Network(_) | Self::Remote(_) => ErrorKind::Transient,
        }
    }
}

/// Message category of a [`LendError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    OutOfStock,
    Transient,
}

/// Input rejected by local validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("field `{0}` is required")]
    MissingField(&'static str),

    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),

    #[error("field `{field}` is not a valid identifier")]
    InvalidId { field: &'static str },

    #[error("field `{field}` is not a date in YYYY-MM-DD format")]
    InvalidDate { field: &'static str },

    #[error("end date is before start date")]
    EndBeforeStart,

    #[error("count must not be negative")]
    NegativeCount,

    #[error("count must not exceed 4294967295")]
    CountTooLarge,

    #[error("count is already zero")]
    CountBelowZero,

    #[error("rental {rental_id} does not reference equipment {equipment_id}")]
    EquipmentMismatch {
        rental_id: RentalId,
        equipment_id: EquipmentId,
    },
}

/// A referenced row is absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn equipment(id: EquipmentId) -> Self {
        Self {
            entity: "equipment",
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn rental(id: RentalId) -> Self {
        Self {
            entity: "rental",
            id: id.to_string(),
        }
    }
}

/// Reservation denied: the equipment has no available unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("equipment {equipment_id} is out of stock")]
pub struct OutOfStockError {
    pub equipment_id: EquipmentId,
}

/// Error descriptor returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("remote error {code}: {message}")]
pub struct RemoteError {
    pub code: String,
    pub message: String,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
