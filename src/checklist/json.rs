//! Full-fidelity JSON export/import of the category collection

use super::error::ChecklistError;
use super::model::Category;

/// Pretty-print the collection exactly as held in memory, `progress` included
pub fn export_json(categories: &[Category]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(categories)
}

/// Parse an exported collection
///
/// Only the parse happens here; the caller replaces its state once this
/// succeeds, so a malformed payload never clobbers existing data.
pub fn import_json(text: &str) -> Result<Vec<Category>, ChecklistError> {
    let categories: Vec<Category> = serde_json::from_str(text)?;
    Ok(categories)
}
