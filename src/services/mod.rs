//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, identifier assignment, and aggregate queries.

pub mod expense;

pub use expense::{ExpenseQuery, ExpenseService};
