//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes, per-document locking, and
//! automatic directory creation.

pub mod expenses;
pub mod file_io;
pub mod init;

pub use expenses::ExpenseStore;
pub use file_io::{read_json_required, write_json_atomic};
pub use init::initialize_storage;
