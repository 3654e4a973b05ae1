//! # lendstock-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for the stock screen, the lender picker and the
//!   rental list (`/api/equipment`, `/api/lenders`, `/api/rentals`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map [`LendError`](lendstock_domain::error::LendError) into status codes
//! - Refresh the shared inventory snapshot after every rental mutation
//!
//! ## Dependency rule
//! Depends on `lendstock-app` (for port traits and services) and `lendstock-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
