//! # lendstock-domain
//!
//! Pure domain model for the lendstock equipment-rental tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, calendar dates
//! - Define **Equipment** (stocked items with a remaining-available count)
//! - Define **Persons** (lenders and borrowers)
//! - Define **Rentals** (one reserved unit lent from a lender to a borrower
//!   over a date range) and the validation of incoming rental requests
//! - Define **Integrity violations** (a compensating write that could not be
//!   applied)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod equipment;
pub mod integrity;
pub mod person;
pub mod rental;
