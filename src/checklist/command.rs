//! Explicit command dispatch for checklist operations
//!
//! Every user-facing action is a `Command` value. `Checklist::apply` maps a
//! command onto the tree mutators or the serializers and reports what
//! happened as an `Outcome`, without touching storage or any UI. The
//! controller decides what to persist and what to refresh.

use std::fmt;
use std::str::FromStr;

use super::error::ChecklistError;
use super::model::{CategoryId, Checklist};
use super::{csv, json};

/// Direction of a reorder within a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(format!(
                "Invalid direction '{}'. Valid options are: up, down",
                s
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
        })
    }
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing happened: boundary move, empty answer, delete not confirmed
    Unchanged,
    /// Data changed in place
    Changed,
    /// A category was added with this id
    Created(CategoryId),
    /// A stamp flipped; carries the new value of the toggled node
    Stamped(bool),
    /// Only the open category pointer moved
    Navigated,
}

impl Outcome {
    /// Whether the stored collection has to be written back
    pub fn needs_persist(&self) -> bool {
        matches!(
            self,
            Outcome::Changed | Outcome::Created(_) | Outcome::Stamped(_)
        )
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Outcome::Unchanged)
    }
}

/// Which views need redrawing after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshScope {
    Categories,
    Items,
    Both,
}

impl RefreshScope {
    pub fn categories(&self) -> bool {
        matches!(self, RefreshScope::Categories | RefreshScope::Both)
    }

    pub fn items(&self) -> bool {
        matches!(self, RefreshScope::Items | RefreshScope::Both)
    }
}

/// A user-facing action on the checklist
///
/// Prompt answers arrive already collected: text fields hold whatever the
/// user typed (empty means cancelled) and `confirmed` carries the yes/no
/// answer for deletes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddCategory { name: String },
    MoveCategory { index: usize, direction: Direction },
    RenameCategory { id: CategoryId, name: String },
    DeleteCategory { id: CategoryId, confirmed: bool },
    OpenCategory { id: CategoryId },
    CloseCategory,

    AddItem { text: String },
    MoveItem { index: usize, direction: Direction },
    RenameItem { index: usize, text: String },
    DeleteItem { index: usize, confirmed: bool },
    ToggleItemStamp { index: usize },
    ToggleCollapsed { index: usize },

    AddChild { parent: usize, text: String },
    MoveChild { parent: usize, child: usize, direction: Direction },
    RenameChild { parent: usize, child: usize, text: String },
    DeleteChild { parent: usize, child: usize, confirmed: bool },
    ToggleChildStamp { parent: usize, child: usize },

    ImportJson { text: String },
    ImportCsv { text: String },
}

impl Command {
    /// One-line description, used as the commit message for the save
    pub fn describe(&self) -> String {
        match self {
            Command::AddCategory { name } => format!("Add category {}", name.trim()),
            Command::MoveCategory { index, direction } => {
                format!("Move category {} {}", index, direction)
            }
            Command::RenameCategory { id, name } => {
                format!("Rename category {} to {}", id, name.trim())
            }
            Command::DeleteCategory { id, .. } => format!("Delete category {}", id),
            Command::OpenCategory { id } => format!("Open category {}", id),
            Command::CloseCategory => "Close category".to_string(),
            Command::AddItem { text } => format!("Add item {}", text.trim()),
            Command::MoveItem { index, direction } => {
                format!("Move item {} {}", index, direction)
            }
            Command::RenameItem { index, text } => {
                format!("Rename item {} to {}", index, text.trim())
            }
            Command::DeleteItem { index, .. } => format!("Delete item {}", index),
            Command::ToggleItemStamp { index } => format!("Toggle stamp on item {}", index),
            Command::ToggleCollapsed { index } => format!("Toggle collapse on item {}", index),
            Command::AddChild { parent, text } => {
                format!("Add child {} to item {}", text.trim(), parent)
            }
            Command::MoveChild {
                parent,
                child,
                direction,
            } => format!("Move child {}/{} {}", parent, child, direction),
            Command::RenameChild {
                parent,
                child,
                text,
            } => format!("Rename child {}/{} to {}", parent, child, text.trim()),
            Command::DeleteChild { parent, child, .. } => {
                format!("Delete child {}/{}", parent, child)
            }
            Command::ToggleChildStamp { parent, child } => {
                format!("Toggle stamp on child {}/{}", parent, child)
            }
            Command::ImportJson { .. } => "Import JSON".to_string(),
            Command::ImportCsv { .. } => "Import CSV".to_string(),
        }
    }

    pub fn refresh_scope(&self) -> RefreshScope {
        match self {
            Command::AddCategory { .. }
            | Command::MoveCategory { .. }
            | Command::RenameCategory { .. }
            | Command::DeleteCategory { .. }
            | Command::CloseCategory => RefreshScope::Categories,
            Command::OpenCategory { .. }
            | Command::MoveItem { .. }
            | Command::RenameItem { .. }
            | Command::ToggleCollapsed { .. }
            | Command::MoveChild { .. }
            | Command::RenameChild { .. } => RefreshScope::Items,
            Command::AddItem { .. }
            | Command::DeleteItem { .. }
            | Command::ToggleItemStamp { .. }
            | Command::AddChild { .. }
            | Command::DeleteChild { .. }
            | Command::ToggleChildStamp { .. }
            | Command::ImportJson { .. }
            | Command::ImportCsv { .. } => RefreshScope::Both,
        }
    }
}

impl Checklist {
    /// Apply one command to the in-memory state
    pub fn apply(&mut self, command: &Command) -> Result<Outcome, ChecklistError> {
        match command {
            Command::AddCategory { name } => Ok(self.add_category(name)),
            Command::MoveCategory { index, direction } => self.move_category(*index, *direction),
            Command::RenameCategory { id, name } => self.rename_category(id, name),
            Command::DeleteCategory { id, confirmed } => self.delete_category(id, *confirmed),
            Command::OpenCategory { id } => self.open_by_id(id),
            Command::CloseCategory => Ok(self.close()),

            Command::AddItem { text } => self.add_item(text),
            Command::MoveItem { index, direction } => self.move_item(*index, *direction),
            Command::RenameItem { index, text } => self.rename_item(*index, text),
            Command::DeleteItem { index, confirmed } => self.delete_item(*index, *confirmed),
            Command::ToggleItemStamp { index } => self.toggle_item_stamp(*index),
            Command::ToggleCollapsed { index } => self.toggle_collapsed(*index),

            Command::AddChild { parent, text } => self.add_child(*parent, text),
            Command::MoveChild {
                parent,
                child,
                direction,
            } => self.move_child(*parent, *child, *direction),
            Command::RenameChild {
                parent,
                child,
                text,
            } => self.rename_child(*parent, *child, text),
            Command::DeleteChild {
                parent,
                child,
                confirmed,
            } => self.delete_child(*parent, *child, *confirmed),
            Command::ToggleChildStamp { parent, child } => {
                self.toggle_child_stamp(*parent, *child)
            }

            Command::ImportJson { text } => {
                // Parse fully before touching the collection
                let categories = json::import_json(text)?;
                self.replace_all(categories);
                Ok(Outcome::Changed)
            }
            Command::ImportCsv { text } => {
                let categories = csv::import_csv(text);
                self.replace_all(categories);
                Ok(Outcome::Changed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" down ".parse::<Direction>().unwrap(), Direction::Down);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_outcome_persistence() {
        assert!(!Outcome::Unchanged.needs_persist());
        assert!(!Outcome::Navigated.needs_persist());
        assert!(Outcome::Changed.needs_persist());
        assert!(Outcome::Stamped(false).needs_persist());
        assert!(Outcome::Created(CategoryId::from(1)).needs_persist());
    }

    #[test]
    fn test_apply_routes_to_mutators() {
        let mut checklist = Checklist::new();
        let outcome = checklist
            .apply(&Command::AddCategory {
                name: "Math".to_string(),
            })
            .unwrap();
        let Outcome::Created(id) = outcome else {
            panic!("expected a created category");
        };

        checklist
            .apply(&Command::OpenCategory { id: id.clone() })
            .unwrap();
        checklist
            .apply(&Command::AddItem {
                text: "Algebra".to_string(),
            })
            .unwrap();

        assert_eq!(checklist.open, Some(id));
        assert_eq!(checklist.categories[0].items[0].text, "Algebra");
    }

    // インポート失敗時は既存データが保持される
    #[test]
    fn test_failed_json_import_keeps_state() {
        let mut checklist = Checklist::new();
        checklist.add_category("Math");
        let before = checklist.clone();

        let result = checklist.apply(&Command::ImportJson {
            text: "{not json".to_string(),
        });

        assert!(matches!(result, Err(ChecklistError::MalformedImport(_))));
        assert_eq!(checklist, before);
    }

    #[test]
    fn test_refresh_scope() {
        assert_eq!(
            Command::ToggleCollapsed { index: 0 }.refresh_scope(),
            RefreshScope::Items
        );
        assert!(Command::ImportCsv {
            text: String::new()
        }
        .refresh_scope()
        .categories());
        assert!(!Command::CloseCategory.refresh_scope().items());
    }
}
