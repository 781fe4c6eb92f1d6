//! Normalized recipe search criteria.
//!
//! Raw criteria arrive as loosely typed optional fields. They pass through a
//! single normalization step here (trim, blank to absent, non-numeric to
//! absent) so that the query layer only ever sees meaningful predicates.

use serde::{Deserialize, Serialize};

use crate::domain::recipe::Recipe;

/// Number of suggestions returned when the caller does not ask for a usable limit.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Conjunction of optional recipe predicates.
///
/// An empty filter matches every recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFilter {
    search: Option<String>,
    category: Option<String>,
    max_duration: Option<i32>,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a number that arrived as text; anything unparseable is absent.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Resolve the requested suggestion count, falling back to
/// [`DEFAULT_SUGGESTION_LIMIT`] for missing, non-finite or sub-one values.
pub fn suggestion_limit(limit: Option<f64>) -> usize {
    match limit {
        Some(limit) if limit.is_finite() && limit >= 1.0 => limit.floor() as usize,
        _ => DEFAULT_SUGGESTION_LIMIT,
    }
}

impl RecipeFilter {
    /// Build a filter from raw optional criteria.
    pub fn new(search: Option<&str>, category: Option<&str>, max_duration: Option<f64>) -> Self {
        let mut filter = Self::default();
        if let Some(search) = search {
            filter = filter.search(search);
        }
        if let Some(category) = category {
            filter = filter.category(category);
        }
        if let Some(max_duration) = max_duration {
            filter = filter.max_duration(max_duration);
        }
        filter
    }

    /// Case-insensitive substring match against title or description.
    pub fn search(mut self, search: impl AsRef<str>) -> Self {
        self.search = non_blank(search.as_ref());
        self
    }

    /// Case-insensitive exact match against any category name.
    pub fn category(mut self, category: impl AsRef<str>) -> Self {
        self.category = non_blank(category.as_ref());
        self
    }

    /// Upper bound (inclusive) on the preparation time in minutes.
    ///
    /// Durations are whole minutes, so fractional bounds are floored.
    pub fn max_duration(mut self, max_duration: f64) -> Self {
        self.max_duration = if max_duration.is_finite() {
            Some(max_duration.floor() as i32)
        } else {
            None
        };
        self
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn max_duration_minutes(&self) -> Option<i32> {
        self.max_duration
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none() && self.max_duration.is_none()
    }

    /// Evaluate the filter against an already loaded recipe.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = recipe.title.to_lowercase().contains(&needle);
            let in_description = recipe
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }

        if let Some(category) = &self.category {
            let wanted = category.to_lowercase();
            if !recipe
                .categories
                .iter()
                .any(|c| c.name.to_lowercase() == wanted)
            {
                return false;
            }
        }

        match self.max_duration {
            Some(max_duration) => recipe.duration_minutes.get() <= max_duration,
            None => true,
        }
    }
}
