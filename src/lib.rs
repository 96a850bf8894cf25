//! Checklist MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for stamp-style
//! checklists: categories (subjects) hold items (tasks), items hold child items
//! (sub-tasks), and every category shows how much of it is stamped done.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `ChecklistServerHandler` - one tool per user action
//! - **Domain Layer**: `checklist` module - data model, mutators, JSON/CSV formats
//! - **Persistence Layer**: `storage` module - single JSON file with optional Git sync
//!
//! Between the MCP layer and the domain sits the `Controller`, which runs
//! each `Command` as apply → save → redraw.
//!
//! # Example
//!
//! ```no_run
//! use checklist_mcp::ChecklistServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = ChecklistServerHandler::new("checklist.json", false)?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod checklist;
pub mod config;
mod controller;
mod formatting;
mod git_ops;
mod handlers;
pub mod notifier;
pub mod storage;
mod validation;

use anyhow::Result;
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail_public};
use std::path::Path;
use std::sync::Mutex;

use crate::checklist::{CategoryId, Checklist, Command, Outcome};
use crate::notifier::{EventLog, UiEvent};

// Re-export commonly used types
pub use checklist::{Category, ChildItem, Item};
pub use controller::{Controller, ControllerError};
pub use storage::Storage;
pub use validation::DataFormat;

/// Result of one dispatched command together with the redrawn views
pub(crate) struct Applied {
    pub outcome: Outcome,
    pub view: String,
}

impl Applied {
    /// Build the tool response: a summary line followed by the redrawn views
    pub fn respond(self, summary: impl Into<String>) -> String {
        if self.outcome.is_unchanged() {
            return "No changes made".to_string();
        }
        let summary = summary.into();
        match (summary.is_empty(), self.view.is_empty()) {
            (_, true) => summary,
            (true, false) => self.view,
            (false, false) => format!("{}\n\n{}", summary, self.view),
        }
    }
}

/// MCP Server handler for checklist management
///
/// Every change is written to the JSON data file before the tool returns
/// and optionally committed to Git.
pub struct ChecklistServerHandler {
    pub(crate) controller: Mutex<Controller<EventLog>>,
}

impl ChecklistServerHandler {
    /// Create a new checklist server handler
    ///
    /// # Arguments
    /// * `storage_path` - Path to the checklist data file (JSON)
    /// * `sync_git` - Commit every save when the file is inside a Git repository
    ///
    /// # Example
    /// ```no_run
    /// # use checklist_mcp::ChecklistServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = ChecklistServerHandler::new("checklist.json", false)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: impl AsRef<Path>, sync_git: bool) -> Result<Self> {
        Self::with_storage(Storage::new(storage_path, sync_git))
    }

    pub fn with_storage(storage: Storage) -> Result<Self> {
        let controller = Controller::open(storage, EventLog::new())?;
        Ok(Self {
            controller: Mutex::new(controller),
        })
    }

    /// Run `f` against the current state
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Checklist) -> R) -> R {
        let controller = self.controller.lock().unwrap();
        f(controller.checklist())
    }

    pub(crate) fn resolve(&self, key: &str) -> McpResult<CategoryId> {
        let controller = self.controller.lock().unwrap();
        validation::resolve_category_id(controller.checklist(), key)
    }

    /// Dispatch a command and render whatever the notifier was asked to redraw
    pub(crate) fn execute(&self, command: Command) -> McpResult<Applied> {
        let mut controller = self.controller.lock().unwrap();
        let outcome = match controller.dispatch(command) {
            Ok(outcome) => outcome,
            Err(e) => {
                drop(controller);
                bail_public!(_, "{}", e);
            }
        };

        let events = controller.notifier_mut().drain();
        let checklist = controller.checklist();
        let views: Vec<String> = events
            .iter()
            .map(|event| match event {
                UiEvent::RefreshItems => formatting::format_open_category(checklist),
                UiEvent::RefreshCategories => formatting::format_categories(checklist),
                UiEvent::Cue(cue) => format!("Sound: {} ({})", cue.name(), cue.asset()),
            })
            .collect();

        Ok(Applied {
            outcome,
            view: views.join("\n"),
        })
    }
}

impl Drop for ChecklistServerHandler {
    fn drop(&mut self) {
        // Push to git on shutdown if sync is enabled
        let controller = self
            .controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = controller.shutdown() {
            tracing::warn!(error = %e, "Shutdown git sync failed");
        }
    }
}

/// Stamp checklist server: track progress through subjects, tasks and sub-tasks.
///
/// Key concepts:
/// - **category**: a subject such as "Math"; shows `completed/total` progress
/// - **item**: a task inside a category; can be stamped (done) and collapsed
/// - **child**: a sub-task of an item; when every child is stamped the item is stamped too
///
/// Workflow: list_categories → open_category → add_item/add_child → toggle_stamp.
/// Items are addressed by their position in the open category (0-based); children
/// as `parent.child`. Categories are addressed by the id shown in list_categories.
#[mcp_server]
impl McpServer for ChecklistServerHandler {
    /// **Overview**: List all categories with progress (completed/total and percent).
    #[tool]
    async fn list_categories(&self) -> McpResult<String> {
        self.handle_list_categories().await
    }

    /// **Add category**: Create a new, empty category at the end of the list.
    #[tool]
    async fn add_category(
        &self,
        /// Category name (e.g., "Math")
        name: String,
    ) -> McpResult<String> {
        self.handle_add_category(name).await
    }

    /// **Reorder category**: Swap a category with its neighbour. No-op at either end.
    #[tool]
    async fn move_category(
        &self,
        /// Position shown by list_categories (0-based)
        index: usize,
        /// Direction: up/down
        direction: String,
    ) -> McpResult<String> {
        self.handle_move_category(index, direction).await
    }

    /// **Rename category**: Empty name leaves it unchanged.
    #[tool]
    async fn rename_category(
        &self,
        /// Category ID
        id: String,
        /// New name
        name: String,
    ) -> McpResult<String> {
        self.handle_rename_category(id, name).await
    }

    /// **Delete category**: Removes the category and all its items. Requires confirm=true.
    #[tool]
    async fn delete_category(
        &self,
        /// Category ID
        id: String,
        /// Confirm deletion (default: false)
        confirm: Option<bool>,
    ) -> McpResult<String> {
        self.handle_delete_category(id, confirm).await
    }

    /// **Open category**: Select the category whose items the item tools work on.
    #[tool]
    async fn open_category(
        &self,
        /// Category ID
        id: String,
    ) -> McpResult<String> {
        self.handle_open_category(id).await
    }

    /// **Close category**: Go back to the category list. Saves the data.
    #[tool]
    async fn close_category(&self) -> McpResult<String> {
        self.handle_close_category().await
    }

    /// **Show items**: Items and children of the open category.
    #[tool]
    async fn show_items(&self) -> McpResult<String> {
        self.handle_show_items().await
    }

    /// **Add item**: Append a task to the open category.
    #[tool]
    async fn add_item(
        &self,
        /// Item text
        text: String,
    ) -> McpResult<String> {
        self.handle_add_item(text).await
    }

    /// **Reorder item**: Swap an item with its neighbour. No-op at either end.
    #[tool]
    async fn move_item(
        &self,
        /// Item position (0-based)
        index: usize,
        /// Direction: up/down
        direction: String,
    ) -> McpResult<String> {
        self.handle_move_item(index, direction).await
    }

    /// **Rename item**: Empty text leaves it unchanged.
    #[tool]
    async fn rename_item(
        &self,
        /// Item position (0-based)
        index: usize,
        /// New text
        text: String,
    ) -> McpResult<String> {
        self.handle_rename_item(index, text).await
    }

    /// **Delete item**: Removes the item and its children. Requires confirm=true.
    #[tool]
    async fn delete_item(
        &self,
        /// Item position (0-based)
        index: usize,
        /// Confirm deletion (default: false)
        confirm: Option<bool>,
    ) -> McpResult<String> {
        self.handle_delete_item(index, confirm).await
    }

    /// **Stamp**: Toggle done on an item, or on one of its children when `child` is given.
    /// Stamping a child re-stamps the parent: done only when all children are done.
    #[tool]
    async fn toggle_stamp(
        &self,
        /// Item position (0-based)
        index: usize,
        /// Child position within the item (optional)
        child: Option<usize>,
    ) -> McpResult<String> {
        self.handle_toggle_stamp(index, child).await
    }

    /// **Collapse**: Show or hide an item's children. Does not affect progress.
    #[tool]
    async fn toggle_collapsed(
        &self,
        /// Item position (0-based)
        index: usize,
    ) -> McpResult<String> {
        self.handle_toggle_collapsed(index).await
    }

    /// **Add child**: Append a sub-task to an item.
    #[tool]
    async fn add_child(
        &self,
        /// Parent item position (0-based)
        parent: usize,
        /// Child text
        text: String,
    ) -> McpResult<String> {
        self.handle_add_child(parent, text).await
    }

    /// **Reorder child**: Swap a child with its neighbour inside the same parent.
    #[tool]
    async fn move_child(
        &self,
        /// Parent item position (0-based)
        parent: usize,
        /// Child position (0-based)
        child: usize,
        /// Direction: up/down
        direction: String,
    ) -> McpResult<String> {
        self.handle_move_child(parent, child, direction).await
    }

    /// **Rename child**: Empty text leaves it unchanged.
    #[tool]
    async fn rename_child(
        &self,
        /// Parent item position (0-based)
        parent: usize,
        /// Child position (0-based)
        child: usize,
        /// New text
        text: String,
    ) -> McpResult<String> {
        self.handle_rename_child(parent, child, text).await
    }

    /// **Delete child**: Requires confirm=true.
    #[tool]
    async fn delete_child(
        &self,
        /// Parent item position (0-based)
        parent: usize,
        /// Child position (0-based)
        child: usize,
        /// Confirm deletion (default: false)
        confirm: Option<bool>,
    ) -> McpResult<String> {
        self.handle_delete_child(parent, child, confirm).await
    }

    /// **Export**: Whole dataset as JSON (full fidelity) or CSV (Category,Parent,Child,Done).
    #[tool]
    async fn export_data(
        &self,
        /// Format: json/csv
        format: String,
    ) -> McpResult<String> {
        self.handle_export(format).await
    }

    /// **Import**: Replace ALL data with the given JSON or CSV text.
    /// Invalid JSON leaves existing data untouched; CSV rows without category or parent are skipped.
    #[tool]
    async fn import_data(
        &self,
        /// Format: json/csv
        format: String,
        /// File content to import
        content: String,
    ) -> McpResult<String> {
        self.handle_import(format, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;

    fn get_test_handler() -> ChecklistServerHandler {
        ChecklistServerHandler::with_storage(Storage::with_slot(MemorySlot::new())).unwrap()
    }

    #[test]
    fn test_applied_respond() {
        let unchanged = Applied {
            outcome: Outcome::Unchanged,
            view: "ignored".to_string(),
        };
        assert_eq!(unchanged.respond("Done"), "No changes made");

        let changed = Applied {
            outcome: Outcome::Changed,
            view: "view".to_string(),
        };
        assert_eq!(changed.respond("Done"), "Done\n\nview");

        let silent = Applied {
            outcome: Outcome::Changed,
            view: String::new(),
        };
        assert_eq!(silent.respond("Done"), "Done");
    }

    #[test]
    fn test_execute_renders_requested_views() {
        let handler = get_test_handler();
        let applied = handler
            .execute(Command::AddCategory {
                name: "Math".to_string(),
            })
            .unwrap();

        assert!(matches!(applied.outcome, Outcome::Created(_)));
        assert!(applied.view.contains("0. Math"));
    }

    #[test]
    fn test_execute_reports_errors() {
        let handler = get_test_handler();
        let result = handler.execute(Command::AddItem {
            text: "orphan".to_string(),
        });
        assert!(result.is_err());
        assert!(handler.read(|c| c.categories.is_empty()));
    }
}
