//! Equipment — a stocked, reusable item with a remaining-available count.

use serde::{Deserialize, Serialize};

use crate::error::{LendError, OutOfStockError, ValidationError};
use crate::id::EquipmentId;

/// A stocked item. `available_count` is unsigned, so it can never go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub available_count: u32,
}

impl Equipment {
    /// Create a builder for constructing an [`Equipment`].
    #[must_use]
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LendError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), LendError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Count after reserving one unit.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfStockError`] when no unit is available.
    pub fn reserve_one(&self) -> Result<u32, OutOfStockError> {
        self.available_count
            .checked_sub(1)
            .ok_or(OutOfStockError {
                equipment_id: self.id,
            })
    }

    /// Count after releasing one unit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CountTooLarge`] when the count cannot grow.
    pub fn release_one(&self) -> Result<u32, ValidationError> {
        self.available_count
            .checked_add(1)
            .ok_or(ValidationError::CountTooLarge)
    }

    /// Light projection used by joined rental listings.
    #[must_use]
    pub fn summary(&self) -> EquipmentSummary {
        EquipmentSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Identity and label of an equipment item, as embedded in rental listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSummary {
    pub id: EquipmentId,
    pub name: String,
}

/// Step-by-step builder for [`Equipment`].
#[derive(Debug, Default)]
pub struct EquipmentBuilder {
    id: Option<EquipmentId>,
    name: Option<String>,
    available_count: u32,
}

impl EquipmentBuilder {
    #[must_use]
    pub fn id(mut self, id: EquipmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn available_count(mut self, count: u32) -> Self {
        self.available_count = count;
        self
    }

    /// Consume the builder, validate, and return an [`Equipment`].
    ///
    /// The name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`LendError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Equipment, LendError> {
        let equipment = Equipment {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default().trim().to_string(),
            available_count: self.available_count,
        };
        equipment.validate()?;
        Ok(equipment)
    }
}
