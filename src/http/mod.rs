//! HTTP client module
//!
//! A thin, single-attempt client over `reqwest`. There is deliberately no
//! retry, backoff or throttling layer: a failed call aborts the whole
//! multi-page fetch and the error is surfaced to the caller verbatim.

mod client;

pub use client::{ApiClient, ApiClientConfig, RequestConfig};
