//! Expense Tracker - personal expense records in a single JSON document
//!
//! This library provides the core functionality for the expense tracker: a
//! storage gateway that bulk-loads and atomically replaces the backing
//! document, and an expense service that implements CRUD and the two
//! aggregate queries on top of it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense record, inputs, and aggregate results
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `api`: HTTP adapter (axum)
//! - `cli`, `display`: Command-line adapter
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::services::{ExpenseQuery, ExpenseService};
//! use expense_tracker::storage::ExpenseStore;
//!
//! let store = ExpenseStore::new("data/expense.json".into());
//! let listing = ExpenseService::new(&store).list(&ExpenseQuery::new().category("food"))?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
