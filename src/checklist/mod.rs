//! Checklist domain models and business logic
//!
//! - `model`: categories, items, child items and the `Checklist` state
//! - `progress`: completed/total aggregation per category
//! - `mutator`: add/rename/delete/reorder/stamp operations
//! - `command`: `Command` values and their dispatch onto the state
//! - `json`, `csv`: export and import formats
//! - `view`: stamp icons and sound cues

mod command;
pub mod csv;
mod error;
pub mod json;
mod model;
mod mutator;
mod progress;
mod view;

pub use command::{Command, Direction, Outcome, RefreshScope};
pub use error::ChecklistError;
pub use model::{Category, CategoryId, Checklist, ChildItem, Item, normalize};
pub use progress::{Totals, compute_totals};
pub use view::{SoundCue, StampIcon};
