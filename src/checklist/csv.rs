//! Flat CSV export/import
//!
//! Layout: a `Category,Parent,Child,Done` header, one row per item (child
//! column empty) followed by one row per child of that item. Category and
//! parent text repeat on every row. Fields are written verbatim with no
//! quoting, so text containing a comma or a newline does not survive a round
//! trip.

use super::model::{Category, CategoryId, ChildItem, Item};

pub const HEADER: &str = "Category,Parent,Child,Done";

fn flag(stamped: bool) -> u8 {
    u8::from(stamped)
}

pub fn export_csv(categories: &[Category]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for category in categories {
        for item in &category.items {
            csv.push_str(&format!(
                "{},{},,{}\n",
                category.name,
                item.text,
                flag(item.stamped)
            ));
            for child in &item.children {
                csv.push_str(&format!(
                    "{},{},{},{}\n",
                    category.name,
                    item.text,
                    child.text,
                    flag(child.stamped)
                ));
            }
        }
    }
    csv
}

/// One data line split into its four columns
#[derive(Debug, PartialEq)]
struct Row<'a> {
    category: &'a str,
    parent: &'a str,
    child: &'a str,
    done: bool,
}

impl<'a> Row<'a> {
    /// Split on commas and trim every field. Missing trailing columns read as
    /// empty, extra columns are ignored.
    fn parse(line: &'a str) -> Self {
        let mut fields = line.split(',').map(str::trim);
        let mut next = || fields.next().unwrap_or("");
        let category = next();
        let parent = next();
        let child = next();
        let done = next() == "1";
        Self {
            category,
            parent,
            child,
            done,
        }
    }
}

/// Rebuild a category tree from CSV text
///
/// Categories are merged by exact name and items by exact text within their
/// category, in order of first appearance. Every child row appends a new
/// child. A parent-only row can raise the parent's stamp but never lowers a
/// stamp already set by an earlier row. Rows missing the category or parent
/// column are skipped; the import itself never fails.
pub fn import_csv(text: &str) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    for (number, line) in text.split('\n').enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let row = Row::parse(line);
        if row.category.is_empty() || row.parent.is_empty() {
            tracing::debug!(line = number + 1, "Skipping CSV row without category or parent");
            continue;
        }

        let category_pos = match categories.iter().position(|c| c.name == row.category) {
            Some(pos) => pos,
            None => {
                let taken: Vec<CategoryId> = categories.iter().map(|c| c.id.clone()).collect();
                categories.push(Category::new(CategoryId::fresh(&taken), row.category));
                categories.len() - 1
            }
        };
        let items = &mut categories[category_pos].items;

        let item_pos = match items.iter().position(|i| i.text == row.parent) {
            Some(pos) => pos,
            None => {
                items.push(Item::new(row.parent));
                items.len() - 1
            }
        };
        let parent = &mut items[item_pos];

        if !row.child.is_empty() {
            parent.children.push(ChildItem {
                text: row.child.to_string(),
                stamped: row.done,
            });
        } else if !parent.stamped {
            parent.stamped = row.done;
        }
    }

    categories
}
