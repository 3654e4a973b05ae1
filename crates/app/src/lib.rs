//! # lendstock-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DataGateway` — row-level access to equipment, persons, and rentals
//!   - `IntegrityReporter` — channel for failed compensating writes
//! - Define **driving/inbound** use-cases as service structs:
//!   - `InventoryStore` — caller-owned snapshot of the equipment list
//!   - `RentalWorkflow` — validate, resolve borrower, reserve stock, persist
//!   - `CancellationWorkflow` — delete a rental and release its unit
//!   - `EquipmentService` / `PersonService` — stock and lender administration
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `lendstock-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod integrity_log;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
