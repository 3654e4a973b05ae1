//! Cancellation workflow — delete a rental and release its unit back to stock.
//!
//! Fail-closed: the unit is released only once the rental row is gone.

use lendstock_domain::error::{LendError, NotFoundError, ValidationError};
use lendstock_domain::id::{EquipmentId, RentalId};
use lendstock_domain::integrity::IntegrityViolation;

use crate::ports::{DataGateway, IntegrityReporter};

/// Outcome of a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    pub rental_id: RentalId,
    pub equipment_id: EquipmentId,
    /// Count after the unit was released.
    pub available_count: u32,
}

fn parse_id<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    raw.parse().map_err(|_| ValidationError::InvalidId { field })
}

/// Application service cancelling rentals.
pub struct CancellationWorkflow<G, R> {
    gateway: G,
    integrity: R,
}

impl<G: DataGateway, R: IntegrityReporter> CancellationWorkflow<G, R> {
    /// Create a new workflow backed by the given gateway and integrity channel.
    pub fn new(gateway: G, integrity: R) -> Self {
        Self { gateway, integrity }
    }

    /// Cancel a rental given the raw identifiers submitted by a caller.
    ///
    /// # Errors
    ///
    /// Returns [`LendError::Validation`] when either id is blank or malformed,
    /// otherwise see [`Self::cancel`].
    pub async fn cancel_rental(
        &self,
        rental_id: &str,
        equipment_id: &str,
    ) -> Result<Cancellation, LendError> {
        let rental_id: RentalId = parse_id("rental_id", rental_id)?;
        let equipment_id: EquipmentId = parse_id("equipment_id", equipment_id)?;
        self.cancel(rental_id, equipment_id).await
    }

    /// Delete the rental, then release one unit of its equipment.
    ///
    /// On success the caller should refresh its inventory snapshot and rental
    /// listing.
    ///
    /// # Errors
    ///
    /// - [`LendError::NotFound`] when the rental or the equipment is absent
    /// - [`LendError::Validation`] when the rental holds a different equipment,
    ///   or when the count cannot take the released unit (reported as an
    ///   integrity violation, the rental being already gone)
    /// - the gateway error of the failed step; if the delete fails nothing is
    ///   released, if the release fails an integrity violation is reported
    #[tracing::instrument(skip(self))]
    pub async fn cancel(
        &self,
        rental_id: RentalId,
        equipment_id: EquipmentId,
    ) -> Result<Cancellation, LendError> {
        let rental = self
            .gateway
            .get_rental(rental_id)
            .await?
            .ok_or_else(|| NotFoundError::rental(rental_id))?;
        self.gateway
            .get_equipment(equipment_id)
            .await?
            .ok_or_else(|| NotFoundError::equipment(equipment_id))?;
        if rental.equipment_id != equipment_id {
            return Err(ValidationError::EquipmentMismatch {
                rental_id,
                equipment_id,
            }
            .into());
        }

        self.gateway
            .delete_rental(rental_id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "rental delete failed"))?;

        match self.release(equipment_id).await {
            Ok(available_count) => {
                tracing::info!(available_count, "rental cancelled, unit released");
                Ok(Cancellation {
                    rental_id,
                    equipment_id,
                    available_count,
                })
            }
            Err((err, expected_count)) => {
                self.integrity.report(&IntegrityViolation::release_lost(
                    equipment_id,
                    rental_id,
                    expected_count,
                    &err,
                ));
                Err(err)
            }
        }
    }

    /// Fresh read, then write the count plus one.
    ///
    /// On failure, also returns the count that should have been written when
    /// it is known.
    async fn release(&self, equipment_id: EquipmentId) -> Result<u32, (LendError, Option<u32>)> {
        let equipment = match self.gateway.get_equipment(equipment_id).await {
            Ok(Some(equipment)) => equipment,
            Ok(None) => return Err((NotFoundError::equipment(equipment_id).into(), None)),
            Err(err) => return Err((err, None)),
        };
        let released = equipment.release_one().map_err(|err| (LendError::from(err), None))?;
        self.gateway
            .update_equipment_count(equipment_id, released)
            .await
            .map_err(|err| (err, Some(released)))?;
        Ok(released)
    }
}
