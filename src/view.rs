// Listing-screen state: search/filter/sort/page intent and stale-result suppression

use crate::error::Result;
use crate::models::ResourceStatus;
use crate::query::{self, DEFAULT_LIMIT, Page, QueryParams};
use crate::sort::{SortDirection, SortField};
use crate::store::{ResourceStore, Snapshot};
use tracing::debug;

/// A query issued by a view, stamped with the generation that issued it
#[derive(Debug, Clone)]
pub struct QueryTicket {
    generation: u64,
    params: QueryParams,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn execute(&self, snapshot: &Snapshot) -> Page {
        query::execute(snapshot, &self.params)
    }
}

/// What happened to a completed query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer query was issued after this one; its result was dropped
    Superseded,
}

/// State behind one resource listing
///
/// Only one query is current at a time: [`ResourceView::begin`] supersedes
/// every ticket issued before it, and [`ResourceView::complete`] drops
/// results that arrive for a superseded ticket.
#[derive(Debug, Clone)]
pub struct ResourceView {
    search: String,
    resource_type: String,
    status: Option<ResourceStatus>,
    sort_field: Option<SortField>,
    sort_direction: SortDirection,
    current_page: usize,
    page_size: usize,
    generation: u64,
    page: Option<Page>,
}

impl Default for ResourceView {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl ResourceView {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            resource_type: String::new(),
            status: None,
            sort_field: None,
            sort_direction: SortDirection::Asc,
            current_page: 1,
            page_size: page_size.max(1),
            generation: 0,
            page: None,
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.current_page = 1;
    }

    /// Empty string clears the type filter
    pub fn set_type(&mut self, resource_type: impl Into<String>) {
        self.resource_type = resource_type.into();
        self.current_page = 1;
    }

    pub fn set_status(&mut self, status: Option<ResourceStatus>) {
        self.status = status;
        self.current_page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Clicking the current sort column flips direction; a new column sorts ascending
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == Some(field) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = Some(field);
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn change_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn sort(&self) -> (Option<SortField>, SortDirection) {
        (self.sort_field, self.sort_direction)
    }

    /// Parameters describing the view's current intent
    pub fn params(&self) -> QueryParams {
        QueryParams {
            page: Some(self.current_page),
            limit: Some(self.page_size),
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
            resource_type: Some(self.resource_type.clone()).filter(|t| !t.is_empty()),
            status: self.status,
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
            ..Default::default()
        }
    }

    /// Issue a new query, superseding any still in flight
    pub fn begin(&mut self) -> QueryTicket {
        self.generation += 1;
        QueryTicket {
            generation: self.generation,
            params: self.params(),
        }
    }

    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Accept `page` only if `ticket` is still the latest query
    pub fn complete(&mut self, ticket: &QueryTicket, page: Page) -> Completion {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "complete: dropping superseded result"
            );
            return Completion::Superseded;
        }
        self.page = Some(page);
        Completion::Applied
    }

    /// Query the store with the current intent and show the result
    pub fn refresh(&mut self, store: &ResourceStore) -> &Page {
        let ticket = self.begin();
        let page = ticket.execute(&store.snapshot());
        self.page.insert(page)
    }

    /// Delete through the store, then reload the listing
    pub fn delete(&mut self, store: &ResourceStore, id: &str) -> Result<&Page> {
        store.delete(id)?;
        Ok(self.refresh(store))
    }

    /// Result of the latest applied query, if any
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn total(&self) -> usize {
        self.page.as_ref().map_or(0, |p| p.total)
    }
}
