//! Child item handlers, addressed as `parent.child` within the open category

use crate::ChecklistServerHandler;
use crate::checklist::Command;
use crate::validation::{confirmed, parse_direction};
use mcp_attr::Result as McpResult;

impl ChecklistServerHandler {
    pub async fn handle_add_child(&self, parent: usize, text: String) -> McpResult<String> {
        let applied = self.execute(Command::AddChild { parent, text })?;
        Ok(applied.respond(format!("Child added to item {}", parent)))
    }

    pub async fn handle_move_child(
        &self,
        parent: usize,
        child: usize,
        direction: String,
    ) -> McpResult<String> {
        let direction = parse_direction(&direction)?;
        let applied = self.execute(Command::MoveChild {
            parent,
            child,
            direction,
        })?;
        Ok(applied.respond(format!("Child {}.{} moved {}", parent, child, direction)))
    }

    pub async fn handle_rename_child(
        &self,
        parent: usize,
        child: usize,
        text: String,
    ) -> McpResult<String> {
        let applied = self.execute(Command::RenameChild {
            parent,
            child,
            text,
        })?;
        Ok(applied.respond(format!("Child {}.{} renamed", parent, child)))
    }

    pub async fn handle_delete_child(
        &self,
        parent: usize,
        child: usize,
        confirm: Option<bool>,
    ) -> McpResult<String> {
        let confirmed = confirmed(confirm);
        if !confirmed {
            return Ok(format!(
                "Deletion of child {}.{} not confirmed. Call again with confirm=true to delete it.",
                parent, child
            ));
        }
        let applied = self.execute(Command::DeleteChild {
            parent,
            child,
            confirmed,
        })?;
        Ok(applied.respond(format!("Deleted child {}.{}", parent, child)))
    }
}
