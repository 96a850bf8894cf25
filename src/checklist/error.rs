use thiserror::Error;

/// Errors raised by checklist operations
///
/// Boundary moves, empty answers and unconfirmed deletes are not errors;
/// they come back as `Outcome::Unchanged`.
#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("No category is open. Open a category before editing its items.")]
    NoOpenCategory,

    #[error("Category '{0}' does not exist")]
    CategoryNotFound(String),

    #[error("Item {0} does not exist in the open category")]
    ItemNotFound(usize),

    #[error("Child {child} of item {parent} does not exist")]
    ChildNotFound { parent: usize, child: usize },

    #[error("Failed to read JSON data: {0}")]
    MalformedImport(#[from] serde_json::Error),
}
