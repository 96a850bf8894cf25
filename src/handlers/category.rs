//! Category handlers: list, add, reorder, rename, delete, open and close

use crate::ChecklistServerHandler;
use crate::checklist::{Command, Outcome};
use crate::formatting::{format_categories, format_open_category};
use crate::validation::{confirmed, parse_direction};
use mcp_attr::Result as McpResult;

impl ChecklistServerHandler {
    pub async fn handle_list_categories(&self) -> McpResult<String> {
        Ok(self.read(format_categories))
    }

    pub async fn handle_add_category(&self, name: String) -> McpResult<String> {
        let applied = self.execute(Command::AddCategory { name })?;
        let summary = match &applied.outcome {
            Outcome::Created(id) => format!("Category created with ID: {}", id),
            _ => String::new(),
        };
        Ok(applied.respond(summary))
    }

    pub async fn handle_move_category(
        &self,
        index: usize,
        direction: String,
    ) -> McpResult<String> {
        let direction = parse_direction(&direction)?;
        let applied = self.execute(Command::MoveCategory { index, direction })?;
        Ok(applied.respond(format!("Category {} moved {}", index, direction)))
    }

    pub async fn handle_rename_category(&self, id: String, name: String) -> McpResult<String> {
        let id = self.resolve(&id)?;
        let applied = self.execute(Command::RenameCategory {
            id: id.clone(),
            name,
        })?;
        Ok(applied.respond(format!("Category {} renamed", id)))
    }

    pub async fn handle_delete_category(
        &self,
        id: String,
        confirm: Option<bool>,
    ) -> McpResult<String> {
        let id = self.resolve(&id)?;
        let confirmed = confirmed(confirm);
        if !confirmed {
            return Ok(format!(
                "Deletion of category {} not confirmed. Call again with confirm=true to delete it and all its items.",
                id
            ));
        }
        let applied = self.execute(Command::DeleteCategory {
            id: id.clone(),
            confirmed,
        })?;
        Ok(applied.respond(format!("Deleted category {}", id)))
    }

    pub async fn handle_open_category(&self, id: String) -> McpResult<String> {
        let id = self.resolve(&id)?;
        self.execute(Command::OpenCategory { id })?;
        // Opening only switches the view; always show the items
        Ok(self.read(format_open_category))
    }

    pub async fn handle_close_category(&self) -> McpResult<String> {
        let applied = self.execute(Command::CloseCategory)?;
        Ok(applied.respond(""))
    }
}
