//! Rental workflow — create a rental while reserving one unit of stock.
//!
//! Phases run strictly in order:
//! `Draft → Validating → ReservingStock → PersistingRental → Committed | RolledBack`.
//!
//! The reservation is a read-then-write against the gateway. It is not atomic
//! across clients: two concurrent reservations of the last unit can both read
//! `1` and both write `0`. Deployments with more than one writer need a
//! conditional decrement in the store.

use std::fmt;

use lendstock_domain::error::{LendError, NotFoundError};
use lendstock_domain::integrity::IntegrityViolation;
use lendstock_domain::person::Person;
use lendstock_domain::rental::{Rental, RentalDetails, RentalRequest, ValidRentalRequest};

use crate::ports::{DataGateway, IntegrityReporter};

/// Where a `create_rental` call currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalPhase {
    Draft,
    Validating,
    ReservingStock,
    PersistingRental,
    Committed,
    RolledBack,
}

impl fmt::Display for RentalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Draft => "draft",
            Self::Validating => "validating",
            Self::ReservingStock => "reserving_stock",
            Self::PersistingRental => "persisting_rental",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        };
        f.write_str(name)
    }
}

fn enter(phase: RentalPhase) {
    tracing::debug!(%phase, "rental workflow transition");
}

/// Application service creating rentals and listing them.
pub struct RentalWorkflow<G, R> {
    gateway: G,
    integrity: R,
}

impl<G: DataGateway, R: IntegrityReporter> RentalWorkflow<G, R> {
    /// Create a new workflow backed by the given gateway and integrity channel.
    pub fn new(gateway: G, integrity: R) -> Self {
        Self { gateway, integrity }
    }

    /// Create a rental, reserving one unit of the requested equipment.
    ///
    /// Not idempotent: two identical calls create two rentals and reserve two
    /// units. On success the caller should refresh its inventory snapshot and
    /// rental listing.
    ///
    /// # Errors
    ///
    /// - [`LendError::Validation`] for blank or malformed input (no store access)
    /// - [`LendError::NotFound`] when the equipment does not exist
    /// - [`LendError::OutOfStock`] when no unit is available (no write made)
    /// - the gateway error of whichever step failed; when the rental insert
    ///   fails the reservation is rolled back first
    #[tracing::instrument(skip_all, fields(equipment_id = %request.equipment_id))]
    pub async fn create_rental(&self, request: &RentalRequest) -> Result<Rental, LendError> {
        enter(RentalPhase::Draft);

        enter(RentalPhase::Validating);
        let request = request.validate().inspect_err(|err| {
            tracing::debug!(error = %err, "rental request rejected");
        })?;

        let borrower = self.resolve_borrower(&request).await?;

        enter(RentalPhase::ReservingStock);
        let previous_count = self.reserve(&request).await?;

        enter(RentalPhase::PersistingRental);
        let rental = Rental::new(&request, borrower.id);
        match self.gateway.create_rental(rental).await {
            Ok(rental) => {
                enter(RentalPhase::Committed);
                tracing::info!(
                    rental_id = %rental.id,
                    borrower_id = %rental.borrower_id,
                    "rental created"
                );
                Ok(rental)
            }
            Err(err) => {
                enter(RentalPhase::RolledBack);
                tracing::warn!(error = %err, "rental insert failed, releasing reserved unit");
                self.compensate(&request, previous_count).await;
                Err(err)
            }
        }
    }

    /// List every rental with borrower, lender, and equipment resolved.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn list_rentals(&self) -> Result<Vec<RentalDetails>, LendError> {
        self.gateway.list_rentals_with_joins().await
    }

    /// Find the borrower by exact `(name, email)`, creating them if absent.
    async fn resolve_borrower(&self, request: &ValidRentalRequest) -> Result<Person, LendError> {
        let existing = self
            .gateway
            .find_person(&request.borrower_name, &request.borrower_email)
            .await?;
        if let Some(person) = existing {
            tracing::debug!(borrower_id = %person.id, "reusing existing borrower");
            return Ok(person);
        }

        let person = Person::borrower(&request.borrower_name, &request.borrower_email);
        let person = self.gateway.create_person(person).await?;
        tracing::debug!(borrower_id = %person.id, "created borrower");
        Ok(person)
    }

    /// Decrement the fresh count by one. Returns the count before the write.
    async fn reserve(&self, request: &ValidRentalRequest) -> Result<u32, LendError> {
        let equipment = self
            .gateway
            .get_equipment(request.equipment_id)
            .await?
            .ok_or_else(|| NotFoundError::equipment(request.equipment_id))?;

        let reserved = equipment.reserve_one().inspect_err(|_| {
            tracing::debug!("reservation denied, no unit available");
        })?;
        self.gateway
            .update_equipment_count(equipment.id, reserved)
            .await?;
        Ok(equipment.available_count)
    }

    /// Single best-effort attempt at restoring the pre-reservation count.
    async fn compensate(&self, request: &ValidRentalRequest, previous_count: u32) {
        if let Err(err) = self
            .gateway
            .update_equipment_count(request.equipment_id, previous_count)
            .await
        {
            self.integrity.report(&IntegrityViolation::reservation_leaked(
                request.equipment_id,
                previous_count,
                err,
            ));
        }
    }
}
