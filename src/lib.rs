// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Pagerkit
//!
//! A minimal, Rust-native toolkit for building paged data services.
//!
//! Pagerkit turns a forward-only asynchronous page source into a
//! bidirectional, cacheable page cursor, and wraps that cursor in a
//! polymorphic service contract that concrete backends implement.
//!
//! ## Features
//!
//! - **Lazy page cache**: every fetched page is cached; revisiting a page
//!   never re-pulls the source
//! - **Service contract**: `next`/`prev`/`has_next`/`has_prev`/page-size
//!   changes/total counts behind one trait, with an optional
//!   change-subscription capability detected at runtime
//! - **REST backend**: offset-paged list endpoints with filter, ordering
//!   and current-user scoping, driven by a YAML configuration
//! - **Change notifications**: a zero-payload "something changed" callback
//!   bridged from a pluggable notifier
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagerkit::config::load_config;
//! use pagerkit::factory::ServiceFactory;
//! use pagerkit::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = load_config("sources/tasks.yaml")?;
//!     let mut service = ServiceFactory::create::<serde_json::Value>(
//!         &config.source.clone(),
//!         &config,
//!         None,
//!         None,
//!     )
//!     .await?;
//!
//!     let page = service.next().await;
//!     println!("page {}: {} items", service.current_page(), page.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 PagedDataService contract                   │
//! │  next() prev() has_next() has_prev() set_page_size()        │
//! │  total_count()        [optional] setup/dispose subscription │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴──────────┬────────────────────┐
//! │  AsyncPager  │    Backend adapters    │   ChangeNotifier   │
//! ├──────────────┼────────────────────────┼────────────────────┤
//! │ page cache   │ REST list (reqwest)    │ broadcast channel  │
//! │ cursor       │ in-memory item set     │ subscription handle│
//! │ exhaustion   │ count queries          │ connect/disconnect │
//! └──────────────┴────────────────────────┴────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for pagerkit
pub mod error;

/// Common types: pages, page streams, callbacks
pub mod types;

/// The lazy page cache (bidirectional cursor over a forward-only source)
pub mod pager;

/// The paged data service contract and subscription capability
pub mod service;

/// Declarative list query construction
pub mod query;

/// Record and count extraction from response bodies
pub mod decode;

/// HTTP client with retry and backoff
pub mod http;

/// REST list backend adapter
pub mod rest;

/// In-memory backend adapter
pub mod memory;

/// Change-notification plumbing
pub mod notify;

/// Service factory (source-type dispatch)
pub mod factory;

/// Memoized list catalog
pub mod catalog;

/// Service configuration and loaders
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pager::AsyncPager;
pub use service::{PagedDataService, SubscribableDataService};
pub use types::{Page, PageStream, UpdateCallback};

pub use config::{load_config, load_config_from_str, ServiceConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
