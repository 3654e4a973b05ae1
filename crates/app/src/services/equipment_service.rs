//! Equipment service — stock administration outside of rentals.

use lendstock_domain::equipment::Equipment;
use lendstock_domain::error::{LendError, NotFoundError, ValidationError};
use lendstock_domain::id::EquipmentId;

use crate::ports::DataGateway;

/// Application service for equipment CRUD and manual count edits.
pub struct EquipmentService<G> {
    gateway: G,
}

impl<G: DataGateway> EquipmentService<G> {
    /// Create a new service backed by the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// List all equipment, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn list_equipment(&self) -> Result<Vec<Equipment>, LendError> {
        self.gateway.list_equipment().await
    }

    /// Look up one equipment row, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LendError::NotFound`] when no row with `id` exists, or the
    /// gateway error.
    pub async fn get_equipment(&self, id: EquipmentId) -> Result<Equipment, LendError> {
        self.gateway
            .get_equipment(id)
            .await?
            .ok_or_else(|| NotFoundError::equipment(id).into())
    }

    /// Register a new item with an initial stock.
    ///
    /// # Errors
    ///
    /// Returns [`LendError::Validation`] when `name` is blank or `count` is
    /// negative or does not fit the stock counter, or the gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn create_equipment(&self, name: &str, count: i64) -> Result<Equipment, LendError> {
        let count = u32::try_from(count).map_err(|_| {
            if count < 0 {
                ValidationError::NegativeCount
            } else {
                ValidationError::CountTooLarge
            }
        })?;
        let equipment = Equipment::builder()
            .name(name)
            .available_count(count)
            .build()?;
        self.gateway.create_equipment(equipment).await
    }

    /// Add one unit to the stock.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CountTooLarge`] without writing when the
    /// count is at its maximum, [`LendError::NotFound`] when no row with `id`
    /// exists, or the gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn increment(&self, id: EquipmentId) -> Result<Equipment, LendError> {
        let mut equipment = self.get_equipment(id).await?;
        equipment.available_count = equipment.release_one()?;
        self.gateway
            .update_equipment_count(id, equipment.available_count)
            .await?;
        Ok(equipment)
    }

    /// Remove one unit from the stock.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CountBelowZero`] without writing when the
    /// count is already zero, [`LendError::NotFound`] when no row with `id`
    /// exists, or the gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn decrement(&self, id: EquipmentId) -> Result<Equipment, LendError> {
        let mut equipment = self.get_equipment(id).await?;
        equipment.available_count = equipment
            .reserve_one()
            .map_err(|_| ValidationError::CountBelowZero)?;
        self.gateway
            .update_equipment_count(id, equipment.available_count)
            .await?;
        Ok(equipment)
    }

    /// Delete an item.
    ///
    /// The store refuses to delete an item still referenced by a rental.
    ///
    /// # Errors
    ///
    /// Returns [`LendError::NotFound`] when no row with `id` exists, or the
    /// gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_equipment(&self, id: EquipmentId) -> Result<(), LendError> {
        self.gateway.delete_equipment(id).await
    }
}
