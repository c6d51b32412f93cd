//! HTTP transport for REST backends
//!
//! # Overview
//!
//! A thin, retrying GET client over reqwest:
//! - bounded retries with constant/linear/exponential backoff
//! - per-request query parameters, headers and timeout overrides
//! - typed JSON decoding
//!
//! Client errors (4xx) are terminal; 5xx responses, timeouts and connect
//! failures retry until the budget is spent.

mod client;

pub use client::{Backoff, HttpClient, HttpClientConfig, RequestConfig};
