//! Pagination types and traits
//!
//! Defines the core pagination abstractions shared by all strategies.

use crate::search;
use serde_json::Value;
use std::collections::HashMap;

/// Result of the next page computation
#[derive(Debug, Clone)]
pub enum NextPage {
    /// More pages available with these cursor parameters
    Continue {
        /// Cursor parameters to merge into the next request. Counters
        /// (offset, page, limit) are JSON numbers; markers carry the
        /// record's value verbatim.
        params: HashMap<String, Value>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with cursor parameters
    pub fn with_params(params: HashMap<String, Value>) -> Self {
        Self::Continue { params }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Termination rule for a paginated fetch.
///
/// A property of the specific endpoint, carried on the request; the
/// fetcher applies whichever rule it is handed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StopRule {
    /// Stop once a page contains zero records
    EmptyPage,

    /// Stop once a page contains fewer records than the page size
    #[default]
    UnderPageSize,

    /// Stop once the accumulated record count reaches the server-reported
    /// total found at this dot path in the response body
    TotalCount { path: String },
}

impl StopRule {
    /// Create a total count stop rule
    pub fn total_count(path: impl Into<String>) -> Self {
        Self::TotalCount { path: path.into() }
    }
}

/// Check a stop rule against the page just received.
///
/// Returns `true` when pagination must stop.
pub fn stop_reached(
    rule: &StopRule,
    body: &Value,
    records_count: usize,
    page_size: u32,
    state: &PaginationState,
) -> bool {
    match rule {
        StopRule::EmptyPage => records_count == 0,
        StopRule::UnderPageSize => records_count < page_size as usize,
        StopRule::TotalCount { path } => match search::search_u64(path, body) {
            // An empty page always terminates, even when the reported
            // total was never reached (the dataset shrank mid-fetch).
            Some(total) => state.total_fetched >= total || records_count == 0,
            None => records_count == 0,
        },
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Current page number (for page-based pagination)
    pub page: u32,
    /// Current offset (for offset-based pagination)
    pub offset: u32,
    /// Current marker value (for marker-based pagination), kept exactly
    /// as it appeared in the record
    pub marker: Option<Value>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Advance the offset
    pub fn add_offset(&mut self, amount: u32) {
        self.offset += amount;
    }

    /// Set the marker
    pub fn set_marker(&mut self, marker: Value) {
        self.marker = Some(marker);
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Cursor parameters for the next request.
    ///
    /// Values are typed: counters are JSON numbers, markers are whatever
    /// the record carried. The fetcher must not re-encode them.
    fn params(&self, state: &PaginationState) -> HashMap<String, Value>;

    /// Process a page and determine whether there is a next one.
    ///
    /// `records` is the extracted record array of the page, in server
    /// order; the marker strategy reads its cursor from the last record.
    fn process_page(
        &self,
        body: &Value,
        records: &[Value],
        state: &mut PaginationState,
    ) -> NextPage;
}

/// Configuration for pagination behavior, one variant per parameter family
#[derive(Debug, Clone)]
pub enum PaginationConfig {
    /// Single request, no pagination
    None,

    /// Offset-based pagination (`offset`/`limit` family)
    Offset {
        /// Query parameter name for the offset
        offset_param: String,
        /// Query parameter name for the page size
        limit_param: String,
        /// Records per page
        page_size: u32,
        /// Termination rule
        stop: StopRule,
    },

    /// Page-number pagination (`page`/`limit` family)
    PageNumber {
        /// Query parameter name for the page number
        page_param: String,
        /// Query parameter name for the page size
        limit_param: String,
        /// First page number (the RDS APIs start at 1)
        start_page: u32,
        /// Records per page
        page_size: u32,
        /// Termination rule
        stop: StopRule,
    },

    /// Marker pagination (`limit`/`line_num` family); the marker for the
    /// next page is a field of the last record of the current page
    Marker {
        /// Query parameter name for the marker
        marker_param: String,
        /// Query parameter name for the page size
        limit_param: String,
        /// Dot path of the marker field within a record
        marker_field: String,
        /// Records per page
        page_size: u32,
    },
}

impl PaginationConfig {
    /// Create offset pagination config with standard parameter names
    pub fn offset(page_size: u32, stop: StopRule) -> Self {
        Self::Offset {
            offset_param: "offset".to_string(),
            limit_param: "limit".to_string(),
            page_size,
            stop,
        }
    }

    /// Create page-number pagination config with standard parameter names
    pub fn page_number(page_size: u32, stop: StopRule) -> Self {
        Self::PageNumber {
            page_param: "page".to_string(),
            limit_param: "limit".to_string(),
            start_page: 1,
            page_size,
            stop,
        }
    }

    /// Create marker pagination config with standard parameter names
    pub fn marker(page_size: u32, marker_field: impl Into<String>) -> Self {
        Self::Marker {
            marker_param: "line_num".to_string(),
            limit_param: "limit".to_string(),
            marker_field: marker_field.into(),
            page_size,
        }
    }

    /// The configured page size, if any
    pub fn page_size(&self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Offset { page_size, .. }
            | Self::PageNumber { page_size, .. }
            | Self::Marker { page_size, .. } => Some(*page_size),
        }
    }

    /// Build the paginator for this configuration
    pub fn build(&self) -> Box<dyn Paginator> {
        match self.clone() {
            Self::None => Box::new(super::SinglePage),
            Self::Offset {
                offset_param,
                limit_param,
                page_size,
                stop,
            } => Box::new(super::OffsetPaginator {
                offset_param,
                limit_param,
                page_size,
                stop,
            }),
            Self::PageNumber {
                page_param,
                limit_param,
                start_page,
                page_size,
                stop,
            } => Box::new(super::PageNumberPaginator {
                page_param,
                limit_param,
                start_page,
                page_size,
                stop,
            }),
            Self::Marker {
                marker_param,
                limit_param,
                marker_field,
                page_size,
            } => Box::new(super::MarkerPaginator {
                marker_param,
                limit_param,
                marker_field,
                page_size,
            }),
        }
    }
}
