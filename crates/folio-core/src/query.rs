//! List filtering for list pages: category, then text, then visibility window.
//!
//! The order is fixed. Applying the window before the text filter would change
//! how many items are visible, so callers go through [`ListQuery::apply`].

use crate::search::{self, same_text, stringify};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_CATEGORY_FIELD: &str = "category";

/// Filters applied to an already-loaded list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Keep items whose category field equals this (case-insensitive).
    /// Blank or `"all"` keeps everything.
    #[serde(default)]
    pub category: Option<String>,
    /// Property holding the category. Defaults to `category`.
    #[serde(default)]
    pub category_field: Option<String>,
    /// Free-text filter; see [`crate::Repository::search`].
    #[serde(default)]
    pub text: Option<String>,
    /// Properties the text filter looks at; all of the entity when unset.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    #[serde(default)]
    pub offset: usize,
    /// Number of visible items; unlimited when unset.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn category_field(mut self, field: impl Into<String>) -> Self {
        self.category_field = Some(field.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn window(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    /// Apply category → text → window to `items`.
    pub fn apply<T: Serialize>(&self, items: Vec<T>) -> Vec<T> {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !same_text(c, "all"));
        let needle = self.text.as_deref().and_then(search::needle);
        let fields: Option<Vec<&str>> = self
            .fields
            .as_ref()
            .map(|f| f.iter().map(String::as_str).collect());
        let category_field = self
            .category_field
            .as_deref()
            .unwrap_or(DEFAULT_CATEGORY_FIELD);

        let filtered = if category.is_none() && needle.is_none() {
            items
        } else {
            items
                .into_iter()
                .filter(|item| {
                    let Ok(value) = serde_json::to_value(item) else {
                        return false;
                    };
                    if let Some(category) = &category {
                        if !in_category(&value, category_field, category) {
                            return false;
                        }
                    }
                    match &needle {
                        Some(needle) => search::matches(&value, needle, fields.as_deref()),
                        None => true,
                    }
                })
                .collect()
        };

        let visible = filtered.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => visible.take(limit).collect(),
            None => visible.collect(),
        }
    }
}

fn in_category(value: &Value, field: &str, category: &str) -> bool {
    match value.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(stringify)
            .any(|c| same_text(&c, category)),
        Some(other) => stringify(other).is_some_and(|c| same_text(&c, category)),
        None => false,
    }
}
