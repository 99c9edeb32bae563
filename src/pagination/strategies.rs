//! Pagination strategy implementations
//!
//! One strategy per parameter family used by the RDS query endpoints.

use super::types::{stop_reached, NextPage, PaginationState, Paginator, StopRule};
use crate::search;
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination (`?offset=100&limit=100`)
///
/// The offset advances by the page size after every full page.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query parameter name for the offset
    pub offset_param: String,
    /// Query parameter name for the page size
    pub limit_param: String,
    /// Records per page
    pub page_size: u32,
    /// Termination rule
    pub stop: StopRule,
}

impl Paginator for OffsetPaginator {
    fn params(&self, state: &PaginationState) -> HashMap<String, Value> {
        let mut params = HashMap::new();
        params.insert(self.offset_param.clone(), Value::from(state.offset));
        params.insert(self.limit_param.clone(), Value::from(self.page_size));
        params
    }

    fn process_page(
        &self,
        body: &Value,
        records: &[Value],
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records.len() as u64);

        if stop_reached(&self.stop, body, records.len(), self.page_size, state) {
            state.mark_done();
            return NextPage::Done;
        }

        state.add_offset(self.page_size);
        NextPage::with_params(self.params(state))
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page-number pagination (`?page=2&limit=100`)
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for the page number
    pub page_param: String,
    /// Query parameter name for the page size
    pub limit_param: String,
    /// First page number
    pub start_page: u32,
    /// Records per page
    pub page_size: u32,
    /// Termination rule
    pub stop: StopRule,
}

impl Paginator for PageNumberPaginator {
    fn params(&self, state: &PaginationState) -> HashMap<String, Value> {
        let page = if state.page == 0 {
            self.start_page
        } else {
            state.page
        };
        let mut params = HashMap::new();
        params.insert(self.page_param.clone(), Value::from(page));
        params.insert(self.limit_param.clone(), Value::from(self.page_size));
        params
    }

    fn process_page(
        &self,
        body: &Value,
        records: &[Value],
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records.len() as u64);

        if stop_reached(&self.stop, body, records.len(), self.page_size, state) {
            state.mark_done();
            return NextPage::Done;
        }

        if state.page == 0 {
            state.page = self.start_page;
        }
        state.next_page();
        NextPage::with_params(self.params(state))
    }
}

// ============================================================================
// Marker Pagination
// ============================================================================

/// Marker-based pagination (`?limit=100&line_num=m1`)
///
/// The marker for the next page is read from a field of the LAST record
/// of the current page and propagated verbatim, whatever its JSON type.
/// Termination is by page size: a page shorter than `limit` is the final
/// one.
#[derive(Debug, Clone)]
pub struct MarkerPaginator {
    /// Query parameter name for the marker
    pub marker_param: String,
    /// Query parameter name for the page size
    pub limit_param: String,
    /// Dot path of the marker field within a record
    pub marker_field: String,
    /// Records per page
    pub page_size: u32,
}

impl Paginator for MarkerPaginator {
    fn params(&self, state: &PaginationState) -> HashMap<String, Value> {
        let mut params = HashMap::new();
        params.insert(self.limit_param.clone(), Value::from(self.page_size));
        if let Some(marker) = &state.marker {
            params.insert(self.marker_param.clone(), marker.clone());
        }
        params
    }

    fn process_page(
        &self,
        _body: &Value,
        records: &[Value],
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records.len() as u64);

        if records.len() < self.page_size as usize {
            state.mark_done();
            return NextPage::Done;
        }

        // A full page without a readable marker cannot continue
        let marker = records
            .last()
            .and_then(|last| search::search(&self.marker_field, last))
            .filter(|v| !v.is_null())
            .cloned();
        match marker {
            Some(marker) => {
                state.set_marker(marker);
                NextPage::with_params(self.params(state))
            }
            None => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// No pagination: one request returns the whole result set
#[derive(Debug, Clone, Default)]
pub struct SinglePage;

impl Paginator for SinglePage {
    fn params(&self, _state: &PaginationState) -> HashMap<String, Value> {
        HashMap::new()
    }

    fn process_page(
        &self,
        _body: &Value,
        records: &[Value],
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records.len() as u64);
        state.mark_done();
        NextPage::Done
    }
}
