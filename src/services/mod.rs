//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the business rules and session state so route
//! handlers can stay focused on cookie plumbing and status codes.

pub mod card;
pub mod ledger;
pub mod loan;
pub mod session;
pub mod views;
