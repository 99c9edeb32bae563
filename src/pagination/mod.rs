//! Pagination module
//!
//! Supports the three parameter families the RDS query endpoints use:
//! offset/limit, page/limit, and limit/line_num (marker-based), plus a
//! single-page passthrough for endpoints that return everything at once.
//!
//! # Overview
//!
//! Each strategy computes the cursor parameters for the next request and
//! decides, together with the configured [`StopRule`], when the result set
//! is complete. Which family and which stop rule apply is per-endpoint
//! configuration, never hardcoded.

mod strategies;
mod types;

pub use strategies::{MarkerPaginator, OffsetPaginator, PageNumberPaginator, SinglePage};
pub use types::{NextPage, PaginationConfig, PaginationState, Paginator, StopRule};
