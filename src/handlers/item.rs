//! Item handlers for the open category

use crate::ChecklistServerHandler;
use crate::checklist::{Checklist, Command, Outcome, SoundCue, StampIcon};
use crate::formatting::format_open_category;
use crate::validation::{confirmed, parse_direction};
use mcp_attr::Result as McpResult;

/// Text and stamp artwork of the node that was just toggled
fn stamped_node(checklist: &Checklist, index: usize, child: Option<usize>) -> Option<(String, StampIcon)> {
    let item = checklist.open_category()?.items.get(index)?;
    match child {
        Some(child) => {
            let node = item.children.get(child)?;
            Some((node.text.clone(), StampIcon::for_child(node.stamped)))
        }
        None => Some((item.text.clone(), StampIcon::for_item(item))),
    }
}

impl ChecklistServerHandler {
    pub async fn handle_show_items(&self) -> McpResult<String> {
        Ok(self.read(format_open_category))
    }

    pub async fn handle_add_item(&self, text: String) -> McpResult<String> {
        let applied = self.execute(Command::AddItem { text })?;
        Ok(applied.respond("Item added"))
    }

    pub async fn handle_move_item(&self, index: usize, direction: String) -> McpResult<String> {
        let direction = parse_direction(&direction)?;
        let applied = self.execute(Command::MoveItem { index, direction })?;
        Ok(applied.respond(format!("Item {} moved {}", index, direction)))
    }

    pub async fn handle_rename_item(&self, index: usize, text: String) -> McpResult<String> {
        let applied = self.execute(Command::RenameItem { index, text })?;
        Ok(applied.respond(format!("Item {} renamed", index)))
    }

    pub async fn handle_delete_item(
        &self,
        index: usize,
        confirm: Option<bool>,
    ) -> McpResult<String> {
        let confirmed = confirmed(confirm);
        if !confirmed {
            return Ok(format!(
                "Deletion of item {} not confirmed. Call again with confirm=true to delete it and its children.",
                index
            ));
        }
        let applied = self.execute(Command::DeleteItem { index, confirmed })?;
        Ok(applied.respond(format!("Deleted item {}", index)))
    }

    /// Toggle the stamp on an item, or on one child of it
    pub async fn handle_toggle_stamp(
        &self,
        index: usize,
        child: Option<usize>,
    ) -> McpResult<String> {
        let command = match child {
            Some(child) => Command::ToggleChildStamp {
                parent: index,
                child,
            },
            None => Command::ToggleItemStamp { index },
        };
        let applied = self.execute(command)?;

        let Outcome::Stamped(stamped) = applied.outcome else {
            return Ok(applied.respond(""));
        };
        let summary = match self.read(|c| stamped_node(c, index, child)) {
            Some((text, icon)) => format!(
                "{} '{}' {} [{}]",
                if stamped { "Stamped" } else { "Unstamped" },
                text,
                icon.marker(),
                icon.asset()
            ),
            None => format!("Stamp cue: {}", SoundCue::for_stamp(stamped).name()),
        };
        Ok(applied.respond(summary))
    }

    pub async fn handle_toggle_collapsed(&self, index: usize) -> McpResult<String> {
        let applied = self.execute(Command::ToggleCollapsed { index })?;
        let collapsed = self.read(|c| {
            c.open_category()
                .and_then(|category| category.items.get(index))
                .is_some_and(|item| item.collapsed)
        });
        Ok(applied.respond(format!(
            "Item {} {}",
            index,
            if collapsed { "collapsed" } else { "expanded" }
        )))
    }
}
