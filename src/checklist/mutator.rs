//! Tree mutations on categories, items and child items
//!
//! Item and child operations work on the currently opened category. A target
//! that does not exist is an error; moving past either end of a list, an
//! empty text answer and an unconfirmed delete are silent no-ops.

use super::command::{Direction, Outcome};
use super::error::ChecklistError;
use super::model::{Category, CategoryId, Checklist, ChildItem, Item};

/// Answer of a text prompt, `None` when it was cancelled (left empty).
/// Anything else, surrounding whitespace included, is stored as given.
fn answered(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

/// Swap `list[index]` with its neighbour in `direction`
///
/// Returns `None` if `index` is out of range and `Some(false)` when the
/// element already sits at the boundary.
fn shift<T>(list: &mut [T], index: usize, direction: Direction) -> Option<bool> {
    if index >= list.len() {
        return None;
    }
    match direction {
        Direction::Up if index > 0 => {
            list.swap(index - 1, index);
            Some(true)
        }
        Direction::Down if index + 1 < list.len() => {
            list.swap(index, index + 1);
            Some(true)
        }
        _ => Some(false),
    }
}

fn moved(swapped: bool) -> Outcome {
    if swapped {
        Outcome::Changed
    } else {
        Outcome::Unchanged
    }
}

impl Checklist {
    // ----- categories -----

    /// Append a new empty category and return its fresh id
    pub fn add_category(&mut self, name: &str) -> Outcome {
        let Some(name) = answered(name) else {
            return Outcome::Unchanged;
        };
        let id = CategoryId::fresh(&self.ids());
        self.categories.push(Category::new(id.clone(), name));
        Outcome::Created(id)
    }

    pub fn move_category(
        &mut self,
        index: usize,
        direction: Direction,
    ) -> Result<Outcome, ChecklistError> {
        shift(&mut self.categories, index, direction)
            .map(moved)
            .ok_or_else(|| ChecklistError::CategoryNotFound(format!("#{}", index)))
    }

    pub fn rename_category(
        &mut self,
        id: &CategoryId,
        name: &str,
    ) -> Result<Outcome, ChecklistError> {
        let category = self
            .find_category_mut(id)
            .ok_or_else(|| ChecklistError::CategoryNotFound(id.to_string()))?;
        let Some(name) = answered(name) else {
            return Ok(Outcome::Unchanged);
        };
        category.name = name.to_string();
        Ok(Outcome::Changed)
    }

    /// Remove a category; closes it first if it was the open one
    pub fn delete_category(
        &mut self,
        id: &CategoryId,
        confirmed: bool,
    ) -> Result<Outcome, ChecklistError> {
        let pos = self
            .position(id)
            .ok_or_else(|| ChecklistError::CategoryNotFound(id.to_string()))?;
        if !confirmed {
            return Ok(Outcome::Unchanged);
        }
        self.categories.remove(pos);
        if self.open.as_ref() == Some(id) {
            self.open = None;
        }
        Ok(Outcome::Changed)
    }

    pub fn open_by_id(&mut self, id: &CategoryId) -> Result<Outcome, ChecklistError> {
        if self.find_category(id).is_none() {
            return Err(ChecklistError::CategoryNotFound(id.to_string()));
        }
        self.open = Some(id.clone());
        Ok(Outcome::Navigated)
    }

    /// Leave the item view. The collection is written back on the way out.
    pub fn close(&mut self) -> Outcome {
        self.open = None;
        Outcome::Changed
    }

    // ----- items -----

    fn open_items_mut(&mut self) -> Result<&mut Vec<Item>, ChecklistError> {
        self.open_category_mut()
            .map(|c| &mut c.items)
            .ok_or(ChecklistError::NoOpenCategory)
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut Item, ChecklistError> {
        self.open_items_mut()?
            .get_mut(index)
            .ok_or(ChecklistError::ItemNotFound(index))
    }

    fn child_mut(&mut self, parent: usize, child: usize) -> Result<&mut ChildItem, ChecklistError> {
        self.item_mut(parent)?
            .children
            .get_mut(child)
            .ok_or(ChecklistError::ChildNotFound { parent, child })
    }

    /// Append an item to the open category
    ///
    /// Fails with `NoOpenCategory` before looking at the text.
    pub fn add_item(&mut self, text: &str) -> Result<Outcome, ChecklistError> {
        let items = self.open_items_mut()?;
        let Some(text) = answered(text) else {
            return Ok(Outcome::Unchanged);
        };
        items.push(Item::new(text));
        Ok(Outcome::Changed)
    }

    pub fn move_item(&mut self, index: usize, direction: Direction) -> Result<Outcome, ChecklistError> {
        shift(self.open_items_mut()?, index, direction)
            .map(moved)
            .ok_or(ChecklistError::ItemNotFound(index))
    }

    pub fn rename_item(&mut self, index: usize, text: &str) -> Result<Outcome, ChecklistError> {
        let item = self.item_mut(index)?;
        let Some(text) = answered(text) else {
            return Ok(Outcome::Unchanged);
        };
        item.text = text.to_string();
        Ok(Outcome::Changed)
    }

    pub fn delete_item(&mut self, index: usize, confirmed: bool) -> Result<Outcome, ChecklistError> {
        let items = self.open_items_mut()?;
        if index >= items.len() {
            return Err(ChecklistError::ItemNotFound(index));
        }
        if !confirmed {
            return Ok(Outcome::Unchanged);
        }
        items.remove(index);
        Ok(Outcome::Changed)
    }

    /// Flip an item's own stamp. Children are left alone.
    pub fn toggle_item_stamp(&mut self, index: usize) -> Result<Outcome, ChecklistError> {
        let item = self.item_mut(index)?;
        item.stamped = !item.stamped;
        Ok(Outcome::Stamped(item.stamped))
    }

    pub fn toggle_collapsed(&mut self, index: usize) -> Result<Outcome, ChecklistError> {
        let item = self.item_mut(index)?;
        item.collapsed = !item.collapsed;
        Ok(Outcome::Changed)
    }

    // ----- child items -----

    /// Append a child; the parent's stamp is not re-derived here
    pub fn add_child(&mut self, parent: usize, text: &str) -> Result<Outcome, ChecklistError> {
        let item = self.item_mut(parent)?;
        let Some(text) = answered(text) else {
            return Ok(Outcome::Unchanged);
        };
        item.children.push(ChildItem::new(text));
        Ok(Outcome::Changed)
    }

    pub fn move_child(
        &mut self,
        parent: usize,
        child: usize,
        direction: Direction,
    ) -> Result<Outcome, ChecklistError> {
        let item = self.item_mut(parent)?;
        shift(&mut item.children, child, direction)
            .map(moved)
            .ok_or(ChecklistError::ChildNotFound { parent, child })
    }

    pub fn rename_child(
        &mut self,
        parent: usize,
        child: usize,
        text: &str,
    ) -> Result<Outcome, ChecklistError> {
        let node = self.child_mut(parent, child)?;
        let Some(text) = answered(text) else {
            return Ok(Outcome::Unchanged);
        };
        node.text = text.to_string();
        Ok(Outcome::Changed)
    }

    pub fn delete_child(
        &mut self,
        parent: usize,
        child: usize,
        confirmed: bool,
    ) -> Result<Outcome, ChecklistError> {
        let item = self.item_mut(parent)?;
        if child >= item.children.len() {
            return Err(ChecklistError::ChildNotFound { parent, child });
        }
        if !confirmed {
            return Ok(Outcome::Unchanged);
        }
        item.children.remove(child);
        Ok(Outcome::Changed)
    }

    /// Flip a child's stamp, then set the parent to the AND of all children
    pub fn toggle_child_stamp(
        &mut self,
        parent: usize,
        child: usize,
    ) -> Result<Outcome, ChecklistError> {
        let item = self.item_mut(parent)?;
        let node = item
            .children
            .get_mut(child)
            .ok_or(ChecklistError::ChildNotFound { parent, child })?;
        node.stamped = !node.stamped;
        let stamped = node.stamped;
        item.sync_stamp_with_children();
        Ok(Outcome::Stamped(stamped))
    }
}
