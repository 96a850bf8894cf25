//! Plain-text rendering of the category list and the open category
//!
//! These are the "views" the server redraws after every change: the
//! category list with progress, and the item tree of the open category.

use crate::checklist::{Category, Checklist, StampIcon, compute_totals};

/// Render all categories with their progress
///
/// Each line shows the position used by `move_category`, the id used by the
/// other category tools, and `completed/total (percent)`.
pub fn format_categories(checklist: &Checklist) -> String {
    if checklist.categories.is_empty() {
        return "No categories yet".to_string();
    }

    let mut result = format!(
        "Found {} categor{}:\n\n",
        checklist.categories.len(),
        if checklist.categories.len() == 1 {
            "y"
        } else {
            "ies"
        }
    );
    for (index, category) in checklist.categories.iter().enumerate() {
        let totals = compute_totals(category);
        let open_marker = if checklist.open.as_ref() == Some(&category.id) {
            " [open]"
        } else {
            ""
        };
        result.push_str(&format!(
            "{}. {} (id: {}) {} ({:.0}%){}\n",
            index,
            category.name,
            category.id,
            totals,
            totals.percent(),
            open_marker
        ));
    }
    result
}

/// Render the item tree of one category
///
/// Children are listed under their parent as `parent.child` unless the
/// parent is collapsed.
pub fn format_items(category: &Category) -> String {
    let totals = compute_totals(category);
    let mut result = format!("{} ({})\n", category.name, totals);

    if category.items.is_empty() {
        result.push_str("\nNo items yet");
        return result;
    }

    result.push('\n');
    for (index, item) in category.items.iter().enumerate() {
        let icon = StampIcon::for_item(item);
        let collapsed = if item.collapsed && item.has_children() {
            format!(" ({} hidden)", item.children.len())
        } else {
            String::new()
        };
        result.push_str(&format!(
            "{}. {} {}{}\n",
            index,
            icon.marker(),
            item.text,
            collapsed
        ));

        if item.collapsed {
            continue;
        }
        for (child_index, child) in item.children.iter().enumerate() {
            result.push_str(&format!(
                "   {}.{} {} {}\n",
                index,
                child_index,
                StampIcon::for_child(child.stamped).marker(),
                child.text
            ));
        }
    }
    result
}

/// Render the open category, or say that none is open
pub fn format_open_category(checklist: &Checklist) -> String {
    match checklist.open_category() {
        Some(category) => format_items(category),
        None => "No category is open".to_string(),
    }
}
