use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::AdStatus;

/// Selected statuses; ordered so that encoding is deterministic. Empty means all.
pub type StatusSet = BTreeSet<AdStatus>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "priority")]
    Priority,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::Price => "price",
            SortField::Priority => "priority",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "createdAt" => Some(SortField::CreatedAt),
            "price" => Some(SortField::Price),
            "priority" => Some(SortField::Priority),
            _ => None,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Every search, filter, sort and pagination choice that decides what the list shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search: String,
    pub statuses: StatusSet,
    pub category_id: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            statuses: StatusSet::new(),
            category_id: None,
            min_price: None,
            max_price: None,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            page: 1,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamps the page and drops prices that are negative or not finite.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.min_price = sanitize_price(self.min_price);
        self.max_price = sanitize_price(self.max_price);
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Merges a partial update. The page returns to 1 when anything other
    /// than the page or the sort direction changed.
    ///
    /// Returns `true` when the state differs afterwards.
    pub fn apply(&mut self, patch: FilterPatch) -> bool {
        let before = self.clone();

        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(statuses) = patch.statuses {
            self.statuses = statuses;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(min_price) = patch.min_price {
            self.min_price = sanitize_price(min_price);
        }
        if let Some(max_price) = patch.max_price {
            self.max_price = sanitize_price(max_price);
        }
        if let Some(sort_field) = patch.sort_field {
            self.sort_field = sort_field;
        }
        if let Some(sort_direction) = patch.sort_direction {
            self.sort_direction = sort_direction;
        }
        if let Some(page) = patch.page {
            self.page = page.max(1);
        }

        if !self.same_scope(&before) {
            self.page = 1;
        }
        *self != before
    }

    /// Same field flips the direction; a new field starts at `Desc` on page 1.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Desc;
            self.page = 1;
        }
    }

    fn same_scope(&self, other: &FilterState) -> bool {
        self.search == other.search
            && self.statuses == other.statuses
            && self.category_id == other.category_id
            && self.min_price == other.min_price
            && self.max_price == other.max_price
            && self.sort_field == other.sort_field
    }
}

/// Partial update for [`FilterState::apply`]; `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub statuses: Option<StatusSet>,
    pub category_id: Option<Option<u32>>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
    pub sort_field: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub page: Option<u32>,
}

impl FilterPatch {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn statuses(mut self, statuses: impl IntoIterator<Item = AdStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn category_id(mut self, category_id: Option<u32>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn min_price(mut self, min_price: Option<f64>) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn max_price(mut self, max_price: Option<f64>) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn sort_field(mut self, sort_field: SortField) -> Self {
        self.sort_field = Some(sort_field);
        self
    }

    pub fn sort_direction(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = Some(sort_direction);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn sanitize_price(price: Option<f64>) -> Option<f64> {
    price.filter(|value| value.is_finite() && *value >= 0.0)
}
