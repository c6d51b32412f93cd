//! Service configuration and loaders
//!
//! The "configuration bag" handed to the factory: a declarative
//! description of one paged data source, deserialized from YAML (or JSON,
//! which YAML subsumes). Shape checks live in [`ServiceConfig::validate`];
//! per-source-type requirements are enforced by the factory at
//! construction time.

use crate::decode::DEFAULT_RECORD_PATH;
use crate::error::{Error, Result};
use crate::query::ListQuery;
use crate::types::SortDirection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

// ============================================================================
// Query configuration
// ============================================================================

/// Declarative query settings for one source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Backend filter expression
    #[serde(default)]
    pub filter: Option<String>,

    /// Sort field
    #[serde(default)]
    pub order_by: Option<String>,

    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,

    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Scope results to the current user
    #[serde(default)]
    pub only_current_user: bool,

    /// Field holding the owning user (required with `only_current_user`)
    #[serde(default)]
    pub user_field: Option<String>,

    /// Identifier of the current user (required with `only_current_user`)
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_page_size() -> usize {
    ListQuery::DEFAULT_PAGE_SIZE
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            filter: None,
            order_by: None,
            direction: SortDirection::Ascending,
            page_size: default_page_size(),
            only_current_user: false,
            user_field: None,
            user_id: None,
        }
    }
}

impl QueryConfig {
    /// Build the runtime [`ListQuery`] for this configuration
    pub fn to_list_query(&self) -> Result<ListQuery> {
        let mut query = ListQuery::new().page_size(self.page_size);
        if let Some(filter) = &self.filter {
            query = query.filter(filter.clone());
        }
        if let Some(field) = &self.order_by {
            query = query.order_by(field.clone(), self.direction);
        }
        if self.only_current_user {
            let field = self
                .user_field
                .as_ref()
                .ok_or_else(|| Error::missing_field("query.user_field"))?;
            let user = self
                .user_id
                .as_ref()
                .ok_or_else(|| Error::missing_field("query.user_id"))?;
            query = query.scope_to_user(field.clone(), user.clone());
        }
        query.validate()?;
        Ok(query)
    }
}

// ============================================================================
// Service configuration
// ============================================================================

/// Declarative description of one paged data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Source-type tag dispatched by the factory (`rest`, `memory`)
    pub source: String,

    /// Base URL of the backend (REST sources)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Path of the list endpoint (REST sources)
    #[serde(default)]
    pub list_path: Option<String>,

    /// Path of the count endpoint; defaults to `<list_path>/count`
    #[serde(default)]
    pub count_path: Option<String>,

    /// Dot path to the record array in list responses
    #[serde(default = "default_record_path")]
    pub record_path: String,

    /// Dot path to the total in count responses (bare number when unset)
    #[serde(default)]
    pub total_path: Option<String>,

    /// Headers sent with every backend request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Query settings
    #[serde(default)]
    pub query: QueryConfig,

    /// Fixed item set (memory sources)
    #[serde(default)]
    pub items: Option<Vec<Value>>,
}

fn default_record_path() -> String {
    DEFAULT_RECORD_PATH.to_string()
}

impl ServiceConfig {
    /// Shape-check the configuration.
    ///
    /// Fails fast on an empty source tag, a zero page size, or a base URL
    /// that does not parse. Per-type requirements (list path, items) are
    /// checked by the factory.
    pub fn validate(&self) -> Result<()> {
        if self.source.is_empty() {
            return Err(Error::missing_field("source"));
        }
        if self.query.page_size == 0 {
            return Err(Error::config("query.page_size must be non-zero"));
        }
        if let Some(base) = &self.base_url {
            Url::parse(base)?;
        }
        Ok(())
    }

    /// The effective count-endpoint path for REST sources
    pub fn effective_count_path(&self) -> Option<String> {
        match (&self.count_path, &self.list_path) {
            (Some(count), _) => Some(count.clone()),
            (None, Some(list)) => Some(format!("{}/count", list.trim_end_matches('/'))),
            (None, None) => None,
        }
    }
}

// ============================================================================
// Loaders
// ============================================================================

/// Load a service configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(path.as_ref())?;
    load_config_from_str(&content)
}

/// Load a service configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ServiceConfig> {
    let config: ServiceConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
