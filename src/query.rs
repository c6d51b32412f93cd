//! Declarative list query construction
//!
//! Translates a filter / ordering / page-size / current-user-scoping
//! configuration into the offset-paged query parameters the REST backend
//! understands. Each page fetch supplies its own offset; everything else is
//! fixed for the lifetime of one cursor.

use crate::error::{Error, Result};
use crate::types::SortDirection;
use std::collections::HashMap;

/// Query parameter names used by the list endpoints
mod params {
    pub const FILTER: &str = "filter";
    pub const ORDER_BY: &str = "orderby";
    pub const DESC: &str = "desc";
    pub const TOP: &str = "top";
    pub const SKIP: &str = "skip";
}

/// A declarative paged list query
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Backend filter expression (opaque to the toolkit)
    pub filter: Option<String>,
    /// Sort field
    pub order_by: Option<String>,
    /// Sort direction (only meaningful with `order_by`)
    pub direction: SortDirection,
    /// Items per page
    pub page_size: usize,
    /// Extra filter clause scoping results to one user, e.g.
    /// `assigned_to eq 7`
    pub user_scope: Option<String>,
}

impl ListQuery {
    /// Default page size when none is configured
    pub const DEFAULT_PAGE_SIZE: usize = 5;

    /// Create a query with the default page size
    pub fn new() -> Self {
        Self {
            filter: None,
            order_by: None,
            direction: SortDirection::Ascending,
            page_size: Self::DEFAULT_PAGE_SIZE,
            user_scope: None,
        }
    }

    /// Set the filter expression
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the sort field and direction
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some(field.into());
        self.direction = direction;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Scope results to one user by an equality clause on `field`
    #[must_use]
    pub fn scope_to_user(mut self, field: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.user_scope = Some(format!("{} eq {}", field.into(), user_id.into()));
        self
    }

    /// Validate the query
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::config("page_size must be non-zero"));
        }
        Ok(())
    }

    /// The combined filter expression: user scoping joined with the
    /// configured filter
    pub fn effective_filter(&self) -> Option<String> {
        match (&self.user_scope, &self.filter) {
            (Some(scope), Some(filter)) => Some(format!("{scope} and {filter}")),
            (Some(scope), None) => Some(scope.clone()),
            (None, Some(filter)) => Some(filter.clone()),
            (None, None) => None,
        }
    }

    /// Query parameters for the page starting at item offset `skip`
    pub fn page_params(&self, skip: usize) -> HashMap<String, String> {
        let mut out = HashMap::new();
        if let Some(filter) = self.effective_filter() {
            out.insert(params::FILTER.to_string(), filter);
        }
        if let Some(field) = &self.order_by {
            out.insert(params::ORDER_BY.to_string(), field.clone());
            if self.direction.is_descending() {
                out.insert(params::DESC.to_string(), "true".to_string());
            }
        }
        out.insert(params::TOP.to_string(), self.page_size.to_string());
        out.insert(params::SKIP.to_string(), skip.to_string());
        out
    }

    /// Query parameters for the count query (filters apply, paging does not)
    pub fn count_params(&self) -> HashMap<String, String> {
        let mut out = HashMap::new();
        if let Some(filter) = self.effective_filter() {
            out.insert(params::FILTER.to_string(), filter);
        }
        out
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}
