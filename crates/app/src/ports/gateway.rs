//! Data access port — row-level operations against the `equipment`, `person`
//! and `rental` collections.
//!
//! Every call may fail with [`LendError::Network`] or [`LendError::Remote`].
//! Implementations perform no retries: failures propagate to the calling
//! use-case unmodified.

use std::future::Future;
use std::sync::Arc;

use lendstock_domain::equipment::Equipment;
use lendstock_domain::error::LendError;
use lendstock_domain::id::{EquipmentId, RentalId};
use lendstock_domain::person::Person;
use lendstock_domain::rental::{Rental, RentalDetails};

/// Gateway to the relational store.
pub trait DataGateway {
    /// All equipment, ascending by name.
    fn list_equipment(&self) -> impl Future<Output = Result<Vec<Equipment>, LendError>> + Send;

    /// Fresh read of one equipment row.
    fn get_equipment(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, LendError>> + Send;

    /// Insert a new equipment row.
    fn create_equipment(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, LendError>> + Send;

    /// Overwrite `available_count` of one row.
    ///
    /// Fails with [`LendError::NotFound`] when the row does not exist.
    fn update_equipment_count(
        &self,
        id: EquipmentId,
        count: u32,
    ) -> impl Future<Output = Result<(), LendError>> + Send;

    /// Delete one equipment row.
    ///
    /// Fails with [`LendError::NotFound`] when the row does not exist.
    fn delete_equipment(&self, id: EquipmentId)
    -> impl Future<Output = Result<(), LendError>> + Send;

    /// Persons flagged as lenders, ascending by name.
    fn list_lenders(&self) -> impl Future<Output = Result<Vec<Person>, LendError>> + Send;

    /// Person matching exactly `(name, email)`, if any.
    fn find_person(
        &self,
        name: &str,
        email: &str,
    ) -> impl Future<Output = Result<Option<Person>, LendError>> + Send;

    /// Insert a new person row.
    fn create_person(
        &self,
        person: Person,
    ) -> impl Future<Output = Result<Person, LendError>> + Send;

    /// One rental row, without its relations.
    fn get_rental(
        &self,
        id: RentalId,
    ) -> impl Future<Output = Result<Option<Rental>, LendError>> + Send;

    /// Insert a new rental row.
    fn create_rental(
        &self,
        rental: Rental,
    ) -> impl Future<Output = Result<Rental, LendError>> + Send;

    /// Delete one rental row.
    ///
    /// Fails with [`LendError::NotFound`] when the row does not exist.
    fn delete_rental(&self, id: RentalId) -> impl Future<Output = Result<(), LendError>> + Send;

    /// Every rental with borrower, lender, and equipment resolved.
    fn list_rentals_with_joins(
        &self,
    ) -> impl Future<Output = Result<Vec<RentalDetails>, LendError>> + Send;
}

impl<T: DataGateway + Send + Sync> DataGateway for Arc<T> {
    fn list_equipment(&self) -> impl Future<Output = Result<Vec<Equipment>, LendError>> + Send {
        (**self).list_equipment()
    }

    fn get_equipment(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, LendError>> + Send {
        (**self).get_equipment(id)
    }

    fn create_equipment(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, LendError>> + Send {
        (**self).create_equipment(equipment)
    }

    fn update_equipment_count(
        &self,
        id: EquipmentId,
        count: u32,
    ) -> impl Future<Output = Result<(), LendError>> + Send {
        (**self).update_equipment_count(id, count)
    }

    fn delete_equipment(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<(), LendError>> + Send {
        (**self).delete_equipment(id)
    }

    fn list_lenders(&self) -> impl Future<Output = Result<Vec<Person>, LendError>> + Send {
        (**self).list_lenders()
    }

    fn find_person(
        &self,
        name: &str,
        email: &str,
    ) -> impl Future<Output = Result<Option<Person>, LendError>> + Send {
        (**self).find_person(name, email)
    }

    fn create_person(
        &self,
        person: Person,
    ) -> impl Future<Output = Result<Person, LendError>> + Send {
        (**self).create_person(person)
    }

    fn get_rental(
        &self,
        id: RentalId,
    ) -> impl Future<Output = Result<Option<Rental>, LendError>> + Send {
        (**self).get_rental(id)
    }

    fn create_rental(
        &self,
        rental: Rental,
    ) -> impl Future<Output = Result<Rental, LendError>> + Send {
        (**self).create_rental(rental)
    }

    fn delete_rental(&self, id: RentalId) -> impl Future<Output = Result<(), LendError>> + Send {
        (**self).delete_rental(id)
    }

    fn list_rentals_with_joins(
        &self,
    ) -> impl Future<Output = Result<Vec<RentalDetails>, LendError>> + Send {
        (**self).list_rentals_with_joins()
    }
}
