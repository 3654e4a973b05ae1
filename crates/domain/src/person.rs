//! Person — a party to a rental, either a lender or a borrower.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{LendError, ValidationError};
use crate::id::PersonId;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));

/// Whether `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// A lender or borrower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: Option<String>,
    pub is_lender: bool,
}

impl Person {
    /// A borrower identified by `(name, email)`; never a lender.
    pub fn borrower(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            email: Some(email.into()),
            is_lender: false,
        }
    }

    /// A lender, selectable when creating rentals.
    pub fn lender(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            email,
            is_lender: true,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LendError::Validation`] when `name` is blank or `email`
    /// is present but malformed.
    pub fn validate(&self) -> Result<(), LendError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if let Some(email) = &self.email
            && !is_valid_email(email)
        {
            return Err(ValidationError::InvalidEmail(email.clone()).into());
        }
        Ok(())
    }
}
