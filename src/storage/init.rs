//! Storage initialization
//!
//! Handles first-run setup of the backing document

use std::path::Path;

use tracing::info;

use crate::error::ExpenseError;
use crate::models::Expense;

use super::file_io::write_json_atomic;

/// Create an empty backing document if none exists yet
///
/// Returns `true` when a new document was written. An existing document is
/// never touched.
pub fn initialize_storage(path: &Path) -> Result<bool, ExpenseError> {
    if path.exists() {
        return Ok(false);
    }

    write_json_atomic(path, &Vec::<Expense>::new())?;
    info!(path = %path.display(), "created empty expense document");
    Ok(true)
}
