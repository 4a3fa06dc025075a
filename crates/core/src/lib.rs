//! FinTrack Core - Domain entities, services, and traits.
//!
//! This crate holds the expense tracker's business rules: validation of
//! incoming payloads, money conversion between cents and decimal currency
//! units, and the monthly dashboard aggregation. It is database-agnostic and
//! defines repository traits that are implemented by the `storage-sqlite`
//! crate.

pub mod budgets;
pub mod categories;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod expenses;
pub mod subscriptions;
pub mod utils;

pub use categories::Category;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
