//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod cancellation_workflow;
pub mod equipment_service;
pub mod inventory_store;
pub mod person_service;
pub mod rental_workflow;
