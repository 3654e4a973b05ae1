//! Rental — one equipment unit lent by a lender to a borrower over a date range.
//!
//! A rental's existence is what holds its unit out of the equipment's
//! `available_count`: creating one reserves a unit, deleting one releases it.

use serde::{Deserialize, Serialize};

use crate::equipment::EquipmentSummary;
use crate::error::ValidationError;
use crate::id::{EquipmentId, PersonId, RentalId};
use crate::person::{Person, is_valid_email};
use crate::time::{Date, parse_date};

/// A persisted rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub id: RentalId,
    pub equipment_id: EquipmentId,
    pub lender_id: PersonId,
    pub borrower_id: PersonId,
    pub start_date: Date,
    pub end_date: Date,
}

impl Rental {
    /// Materialize a validated request for the resolved borrower.
    #[must_use]
    pub fn new(request: &ValidRentalRequest, borrower_id: PersonId) -> Self {
        Self {
            id: RentalId::new(),
            equipment_id: request.equipment_id,
            lender_id: request.lender_id,
            borrower_id,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}

/// A rental with its related records resolved.
///
/// Each relation is a single record or absent, never a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalDetails {
    #[serde(flatten)]
    pub rental: Rental,
    pub borrower: Option<Person>,
    pub lender: Option<Person>,
    pub equipment: Option<EquipmentSummary>,
}

/// Rental request as submitted by a form: every field is raw text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalRequest {
    pub lender_id: String,
    pub borrower_name: String,
    pub borrower_email: String,
    pub equipment_id: String,
    pub start_date: String,
    pub end_date: String,
}

/// A [`RentalRequest`] that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRentalRequest {
    pub lender_id: PersonId,
    pub borrower_name: String,
    pub borrower_email: String,
    pub equipment_id: EquipmentId,
    pub start_date: Date,
    pub end_date: Date,
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

impl RentalRequest {
    /// Check the request without touching the store.
    ///
    /// Blank fields are reported first, in form order, then the email
    /// format, identifiers and dates.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<ValidRentalRequest, ValidationError> {
        let lender_id = required("lender_id", &self.lender_id)?;
        let borrower_name = required("borrower_name", &self.borrower_name)?;
        let borrower_email = required("borrower_email", &self.borrower_email)?;
        let equipment_id = required("equipment_id", &self.equipment_id)?;
        let start_date = required("start_date", &self.start_date)?;
        let end_date = required("end_date", &self.end_date)?;

        if !is_valid_email(borrower_email) {
            return Err(ValidationError::InvalidEmail(borrower_email.to_string()));
        }

        let lender_id = lender_id
            .parse::<PersonId>()
            .map_err(|_| ValidationError::InvalidId { field: "lender_id" })?;
        let equipment_id = equipment_id
            .parse::<EquipmentId>()
            .map_err(|_| ValidationError::InvalidId {
                field: "equipment_id",
            })?;
        let start_date = parse_date("start_date", start_date)?;
        let end_date = parse_date("end_date", end_date)?;
        if end_date < start_date {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(ValidRentalRequest {
            lender_id,
            borrower_name: borrower_name.to_string(),
            borrower_email: borrower_email.to_string(),
            equipment_id,
            start_date,
            end_date,
        })
    }
}
