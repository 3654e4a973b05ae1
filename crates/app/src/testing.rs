//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use lendstock_domain::equipment::Equipment;
use lendstock_domain::error::{LendError, NotFoundError, RemoteError};
use lendstock_domain::id::{EquipmentId, PersonId, RentalId};
use lendstock_domain::integrity::IntegrityViolation;
use lendstock_domain::person::Person;
use lendstock_domain::rental::{Rental, RentalDetails};

use crate::ports::{DataGateway, IntegrityReporter};

/// Gateway operations, used to inject faults and to inspect call history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    ListEquipment,
    GetEquipment,
    CreateEquipment,
    UpdateEquipmentCount,
    DeleteEquipment,
    ListLenders,
    FindPerson,
    CreatePerson,
    GetRental,
    CreateRental,
    DeleteRental,
    ListRentals,
}

impl Op {
    fn is_write(self) -> bool {
        matches!(
            self,
            Self::CreateEquipment
                | Self::UpdateEquipmentCount
                | Self::DeleteEquipment
                | Self::CreatePerson
                | Self::CreateRental
                | Self::DeleteRental
        )
    }
}

#[derive(Default)]
struct State {
    equipment: HashMap<EquipmentId, Equipment>,
    persons: Vec<Person>,
    rentals: Vec<Rental>,
    calls: Vec<Op>,
    /// Remaining successful calls before the operation starts failing.
    faults: HashMap<Op, usize>,
}

/// Store held in memory, with per-operation fault injection.
#[derive(Default)]
pub(crate) struct InMemoryGateway {
    state: Mutex<State>,
}

fn foreign_key_violation() -> LendError {
    RemoteError::new("23503", "foreign key violation").into()
}

impl InMemoryGateway {
    fn run<T>(
        &self,
        op: Op,
        f: impl FnOnce(&mut State) -> Result<T, LendError>,
    ) -> Result<T, LendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        if let Some(remaining) = state.faults.get_mut(&op) {
            if *remaining == 0 {
                return Err(LendError::network(std::io::Error::other(format!(
                    "injected {op:?} failure"
                ))));
            }
            *remaining -= 1;
        }
        f(&mut *state)
    }

    /// Make every following call of `op` fail.
    pub fn fail(&self, op: Op) {
        self.fail_after(op, 0);
    }

    /// Let `successes` more calls of `op` through, then fail the rest.
    pub fn fail_after(&self, op: Op, successes: usize) {
        self.state.lock().unwrap().faults.insert(op, successes);
    }

    pub fn seed_equipment(&self, name: &str, count: u32) -> Equipment {
        let equipment = Equipment::builder()
            .name(name)
            .available_count(count)
            .build()
            .unwrap();
        self.state
            .lock()
            .unwrap()
            .equipment
            .insert(equipment.id, equipment.clone());
        equipment
    }

    pub fn seed_person(&self, person: Person) -> Person {
        self.state.lock().unwrap().persons.push(person.clone());
        person
    }

    pub fn seed_lender(&self, name: &str) -> Person {
        self.seed_person(Person::lender(name, None))
    }

    /// Current count, read without recording a call.
    pub fn count(&self, id: EquipmentId) -> Option<u32> {
        self.state
            .lock()
            .unwrap()
            .equipment
            .get(&id)
            .map(|e| e.available_count)
    }

    pub fn rentals(&self) -> Vec<Rental> {
        self.state.lock().unwrap().rentals.clone()
    }

    pub fn persons(&self) -> Vec<Person> {
        self.state.lock().unwrap().persons.clone()
    }

    pub fn calls(&self, op: Op) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == op)
            .count()
    }

    pub fn writes(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.is_write())
            .count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }
}

impl DataGateway for InMemoryGateway {
    fn list_equipment(&self) -> impl Future<Output = Result<Vec<Equipment>, LendError>> + Send {
        let result = self.run(Op::ListEquipment, |state| {
            let mut all: Vec<Equipment> = state.equipment.values().cloned().collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(all)
        });
        async { result }
    }

    fn get_equipment(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, LendError>> + Send {
        let result = self.run(Op::GetEquipment, |state| {
            Ok(state.equipment.get(&id).cloned())
        });
        async { result }
    }

    fn create_equipment(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, LendError>> + Send {
        let result = self.run(Op::CreateEquipment, |state| {
            state.equipment.insert(equipment.id, equipment.clone());
            Ok(equipment)
        });
        async { result }
    }

    fn update_equipment_count(
        &self,
        id: EquipmentId,
        count: u32,
    ) -> impl Future<Output = Result<(), LendError>> + Send {
        let result = self.run(Op::UpdateEquipmentCount, |state| {
            let equipment = state
                .equipment
                .get_mut(&id)
                .ok_or_else(|| NotFoundError::equipment(id))?;
            equipment.available_count = count;
            Ok(())
        });
        async { result }
    }

    fn delete_equipment(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<(), LendError>> + Send {
        let result = self.run(Op::DeleteEquipment, |state| {
            if state.rentals.iter().any(|r| r.equipment_id == id) {
                return Err(foreign_key_violation());
            }
            state
                .equipment
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| NotFoundError::equipment(id).into())
        });
        async { result }
    }

    fn list_lenders(&self) -> impl Future<Output = Result<Vec<Person>, LendError>> + Send {
        let result = self.run(Op::ListLenders, |state| {
            let mut lenders: Vec<Person> = state
                .persons
                .iter()
                .filter(|p| p.is_lender)
                .cloned()
                .collect();
            lenders.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(lenders)
        });
        async { result }
    }

    fn find_person(
        &self,
        name: &str,
        email: &str,
    ) -> impl Future<Output = Result<Option<Person>, LendError>> + Send {
        let result = self.run(Op::FindPerson, |state| {
            Ok(state
                .persons
                .iter()
                .find(|p| p.name == name && p.email.as_deref() == Some(email))
                .cloned())
        });
        async { result }
    }

    fn create_person(
        &self,
        person: Person,
    ) -> impl Future<Output = Result<Person, LendError>> + Send {
        let result = self.run(Op::CreatePerson, |state| {
            state.persons.push(person.clone());
            Ok(person)
        });
        async { result }
    }

    fn get_rental(
        &self,
        id: RentalId,
    ) -> impl Future<Output = Result<Option<Rental>, LendError>> + Send {
        let result = self.run(Op::GetRental, |state| {
            Ok(state.rentals.iter().find(|r| r.id == id).cloned())
        });
        async { result }
    }

    fn create_rental(
        &self,
        rental: Rental,
    ) -> impl Future<Output = Result<Rental, LendError>> + Send {
        let result = self.run(Op::CreateRental, |state| {
            let person_exists = |id: PersonId| state.persons.iter().any(|p| p.id == id);
            if !state.equipment.contains_key(&rental.equipment_id)
                || !person_exists(rental.lender_id)
                || !person_exists(rental.borrower_id)
            {
                return Err(foreign_key_violation());
            }
            state.rentals.push(rental.clone());
            Ok(rental)
        });
        async { result }
    }

    fn delete_rental(&self, id: RentalId) -> impl Future<Output = Result<(), LendError>> + Send {
        let result = self.run(Op::DeleteRental, |state| {
            let before = state.rentals.len();
            state.rentals.retain(|r| r.id != id);
            if state.rentals.len() == before {
                return Err(NotFoundError::rental(id).into());
            }
            Ok(())
        });
        async { result }
    }

    fn list_rentals_with_joins(
        &self,
    ) -> impl Future<Output = Result<Vec<RentalDetails>, LendError>> + Send {
        let result = self.run(Op::ListRentals, |state| {
            let person = |id: PersonId| state.persons.iter().find(|p| p.id == id).cloned();
            Ok(state
                .rentals
                .iter()
                .map(|rental| RentalDetails {
                    rental: rental.clone(),
                    borrower: person(rental.borrower_id),
                    lender: person(rental.lender_id),
                    equipment: state
                        .equipment
                        .get(&rental.equipment_id)
                        .map(Equipment::summary),
                })
                .collect())
        });
        async { result }
    }
}

/// Integrity channel that keeps every report for assertions.
#[derive(Default)]
pub(crate) struct RecordingReporter {
    violations: Mutex<Vec<IntegrityViolation>>,
}

impl RecordingReporter {
    pub fn violations(&self) -> Vec<IntegrityViolation> {
        self.violations.lock().unwrap().clone()
    }
}

impl IntegrityReporter for RecordingReporter {
    fn report(&self, violation: &IntegrityViolation) {
        self.violations.lock().unwrap().push(violation.clone());
    }
}
