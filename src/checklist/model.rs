use chrono::Utc;
use rand::Rng;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::progress::compute_totals;

/// Identity of a category
///
/// Stored data may carry either a JSON number (millisecond timestamps, possibly
/// with a fractional tiebreaker from older CSV imports) or a JSON string, so
/// both are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryId {
    Number(serde_json::Number),
    Text(String),
}

impl CategoryId {
    /// Generate a time-based id that does not collide with any id in `taken`
    ///
    /// Starts from the current time in milliseconds and bumps by a random
    /// step until the value is free, so several categories created within
    /// the same millisecond still get distinct ids.
    pub fn fresh(taken: &[CategoryId]) -> Self {
        let mut millis = Utc::now().timestamp_millis();
        let mut rng = rand::rng();
        loop {
            let candidate = CategoryId::Number(millis.into());
            if !taken.contains(&candidate) {
                return candidate;
            }
            millis += rng.random_range(1..=1000);
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, CategoryId::Text(s) if s.is_empty())
    }
}

/// The unassigned id: an empty string. Stored categories whose id is
/// missing or not a number/string get this, and `normalize` replaces it.
impl Default for CategoryId {
    fn default() -> Self {
        CategoryId::Text(String::new())
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryId::Number(n) => write!(f, "{}", n),
            CategoryId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for CategoryId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<serde_json::Number>() {
            Ok(n) => CategoryId::Number(n),
            Err(_) => CategoryId::Text(trimmed.to_string()),
        })
    }
}

impl From<i64> for CategoryId {
    fn from(value: i64) -> Self {
        CategoryId::Number(value.into())
    }
}

/// A sub-task of an item. Children cannot have children of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub stamped: bool,
}

impl ChildItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stamped: false,
        }
    }
}

/// A task within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub stamped: bool,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<ChildItem>,
    /// Display state only; hides the children list
    #[serde(default, deserialize_with = "lenient_bool")]
    pub collapsed: bool,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stamped: false,
            children: Vec::new(),
            collapsed: false,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Re-derive `stamped` from the children: done iff every child is done.
    /// Items without children keep their own flag.
    pub fn sync_stamp_with_children(&mut self) {
        if self.has_children() {
            self.stamped = self.children.iter().all(|c| c.stamped);
        }
    }
}

/// A top-level grouping ("subject") holding an ordered list of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: CategoryId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub items: Vec<Item>,
    /// Last computed `completed/total`; rebuilt after every mutation
    #[serde(default, deserialize_with = "lenient_string")]
    pub progress: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
            progress: "0/0".to_string(),
        }
    }

    pub fn refresh_progress(&mut self) {
        self.progress = compute_totals(self).to_string();
    }
}

/// The whole application state: the category collection plus the category
/// currently opened for item editing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checklist {
    pub categories: Vec<Category>,
    pub open: Option<CategoryId>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a checklist from raw categories, repairing them first
    pub fn from_categories(mut categories: Vec<Category>) -> Self {
        normalize(&mut categories);
        Self {
            categories,
            open: None,
        }
    }

    pub fn ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }

    pub fn position(&self, id: &CategoryId) -> Option<usize> {
        self.categories.iter().position(|c| &c.id == id)
    }

    pub fn find_category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn find_category_mut(&mut self, id: &CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| &c.id == id)
    }

    /// Resolve an id typed by a user against the ids actually stored
    ///
    /// Matching is done on the displayed form so that `"42"` finds both a
    /// numeric id `42` and a string id `"42"`.
    pub fn resolve_id(&self, key: &str) -> Option<CategoryId> {
        let key = key.trim();
        self.categories
            .iter()
            .find(|c| c.id.to_string() == key)
            .map(|c| c.id.clone())
    }

    /// The currently opened category, if it still exists
    pub fn open_category(&self) -> Option<&Category> {
        self.open.as_ref().and_then(|id| self.find_category(id))
    }

    pub fn open_category_mut(&mut self) -> Option<&mut Category> {
        let id = self.open.clone()?;
        self.find_category_mut(&id)
    }

    /// Discard the whole collection and adopt `categories`
    ///
    /// The open pointer survives only if the same id exists in the new data.
    pub fn replace_all(&mut self, mut categories: Vec<Category>) {
        normalize(&mut categories);
        self.categories = categories;
        if let Some(ref id) = self.open
            && self.find_category(id).is_none()
        {
            self.open = None;
        }
    }

    pub fn refresh_progress(&mut self) {
        for category in self.categories.iter_mut() {
            category.refresh_progress();
        }
    }
}

/// Repair pass run after every load and import
///
/// Field-level defaults are already applied during deserialization; this
/// gives a fresh id to categories stored without one or with an id that
/// duplicates an earlier category, and recomputes the progress strings. Running it twice changes nothing the second time.
pub fn normalize(categories: &mut [Category]) {
    let mut taken: Vec<CategoryId> = categories.iter().map(|c| c.id.clone()).collect();
    let mut seen: Vec<CategoryId> = Vec::with_capacity(categories.len());

    for category in categories.iter_mut() {
        if category.id.is_unassigned() || seen.contains(&category.id) {
            let fresh = CategoryId::fresh(&taken);
            tracing::debug!(old = %category.id, new = %fresh, "Assigned fresh category id");
            taken.push(fresh.clone());
            category.id = fresh;
        }
        seen.push(category.id.clone());
        category.refresh_progress();
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<CategoryId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => CategoryId::Number(n),
        Value::String(s) => CategoryId::Text(s),
        _ => CategoryId::default(),
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(D::Error::custom),
        _ => Ok(Vec::new()),
    }
}
