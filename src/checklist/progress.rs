use std::fmt;

use super::model::Category;

/// Completed/total counts for one category. Parents and children each count
/// as one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total: usize,
    pub completed: usize,
}

impl Totals {
    /// Completion in percent, `0.0` for an empty category
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    /// Hue of the progress ring, from yellow-green (80) at 0% to blue (210) at 100%
    pub fn hue(&self) -> f64 {
        80.0 + (210.0 - 80.0) * (self.percent() / 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

pub fn compute_totals(category: &Category) -> Totals {
    category
        .items
        .iter()
        .fold(Totals::default(), |mut totals, item| {
            totals.total += 1 + item.children.len();
            totals.completed += usize::from(item.stamped)
                + item.children.iter().filter(|c| c.stamped).count();
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::model::{CategoryId, ChildItem, Item};
    use proptest::prelude::*;

    fn category_with(items: Vec<Item>) -> Category {
        let mut category = Category::new(CategoryId::from(1), "Math");
        category.items = items;
        category
    }

    #[test]
    fn test_empty_category() {
        let totals = compute_totals(&category_with(vec![]));
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.to_string(), "0/0");
        assert_eq!(totals.percent(), 0.0);
        assert_eq!(totals.hue(), 80.0);
        assert!(!totals.is_complete());
    }

    // 親と子の両方が集計されることを確認
    #[test]
    fn test_parents_and_children_are_counted() {
        let mut algebra = Item::new("Algebra");
        algebra.stamped = true;
        algebra.children.push(ChildItem::new("Quiz1"));
        let mut quiz2 = ChildItem::new("Quiz2");
        quiz2.stamped = true;
        algebra.children.push(quiz2);

        let geometry = Item::new("Geometry");

        let totals = compute_totals(&category_with(vec![algebra, geometry]));
        assert_eq!(totals.total, 4);
        assert_eq!(totals.completed, 2);
        assert_eq!(totals.to_string(), "2/4");
        assert_eq!(totals.percent(), 50.0);
        assert_eq!(totals.hue(), 145.0);
    }

    #[test]
    fn test_full_completion() {
        let mut item = Item::new("Done");
        item.stamped = true;
        let totals = compute_totals(&category_with(vec![item]));
        assert!(totals.is_complete());
        assert_eq!(totals.hue(), 210.0);
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            any::<bool>(),
            any::<bool>(),
            prop::collection::vec(any::<bool>(), 0..6),
        )
            .prop_map(|(stamped, collapsed, children)| Item {
                text: "item".to_string(),
                stamped,
                collapsed,
                children: children
                    .into_iter()
                    .map(|stamped| ChildItem {
                        text: "child".to_string(),
                        stamped,
                    })
                    .collect(),
            })
    }

    proptest! {
        #[test]
        fn prop_totals_count_every_node(items in prop::collection::vec(arb_item(), 0..10)) {
            let expected_total = items.len() + items.iter().map(|i| i.children.len()).sum::<usize>();
            let totals = compute_totals(&category_with(items));

            prop_assert_eq!(totals.total, expected_total);
            prop_assert!(totals.completed <= totals.total);
            prop_assert!(totals.percent() >= 0.0 && totals.percent() <= 100.0);
        }
    }
}
