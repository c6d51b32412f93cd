//! Service factory
//!
//! Single construction point for paged data services: a source-type tag
//! plus a [`ServiceConfig`] select and build the matching backend adapter.
//! Unknown tags fail fast with a configuration error, as does a missing
//! update callback when the backend would support subscriptions.

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::memory::MemoryListService;
use crate::notify::ChangeNotifier;
use crate::rest::RestListService;
use crate::service::PagedDataService;
use crate::types::UpdateCallback;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use std::sync::Arc;


/// Known source types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Offset-paged REST list endpoint
    Rest,
    /// Fixed in-memory item set
    Memory,
}

impl FromStr for SourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rest" => Ok(Self::Rest),
            "memory" => Ok(Self::Memory),
            other => Err(Error::unknown_source(other)),
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rest => write!(f, "rest"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Constructs backend adapters from declarative configuration
pub struct ServiceFactory;

impl ServiceFactory {
    /// Build the paged data service for `source_type`.
    ///
    /// When a notifier is supplied the constructed adapter supports change
    /// subscriptions, so `on_update` becomes mandatory; the factory wires
    /// it by awaiting subscription setup and propagating its failure.
    pub async fn create<T>(
        source_type: &str,
        config: &ServiceConfig,
        notifier: Option<Arc<dyn ChangeNotifier>>,
        on_update: Option<UpdateCallback>,
    ) -> Result<Box<dyn PagedDataService<T>>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let source = SourceType::from_str(source_type)?;
        config.validate()?;

        if notifier.is_some() && on_update.is_none() {
            return Err(Error::config(
                "on_update callback is required for subscribable sources",
            ));
        }

        let mut service: Box<dyn PagedDataService<T>> = match source {
            SourceType::Rest => Box::new(RestListService::from_config(config, notifier)?),
            SourceType::Memory => Box::new(MemoryListService::from_config(config, notifier)?),
        };

        if let Some(callback) = on_update {
            if let Some(subscribable) = service.as_subscribable() {
                subscribable.setup_subscription(callback).await?;
            }
        }

        Ok(service)
    }
}
