// Resource query engine: search, filter, sort, paginate over a snapshot

use crate::error::Result;
use crate::filter::{Filter, matches_all};
use crate::models::{Resource, ResourceStatus};
use crate::sort::{SortDirection, SortField, sort_resources};
use crate::store::Snapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// What a listing wants to see; every field is optional
///
/// `page` and `limit` of 0 are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub status: Option<ResourceStatus>,
    pub sort_field: Option<SortField>,
    pub sort_direction: SortDirection,
    pub min_quantity: Option<u32>,
    pub max_quantity: Option<u32>,
    pub updated_from: Option<DateTime<Utc>>,
    pub updated_to: Option<DateTime<Utc>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page.filter(|&p| p > 0).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> usize {
        self.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT)
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sorted(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = Some(field);
        self.sort_direction = direction;
        self
    }

    /// Sort by an attribute given by name, rejecting names that are not attributes
    pub fn sorted_by_name(self, field: &str, direction: SortDirection) -> Result<Self> {
        Ok(self.sorted(field.parse()?, direction))
    }

    /// Predicates in pipeline order: search, type, status, then the advanced bounds
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            filters.push(Filter::search(search));
        }
        if let Some(resource_type) = self.resource_type.as_deref().filter(|t| !t.is_empty()) {
            filters.push(Filter::Type(resource_type.to_string()));
        }
        if let Some(status) = self.status {
            filters.push(Filter::Status(status));
        }
        if let Some(min) = self.min_quantity {
            filters.push(Filter::MinQuantity(min));
        }
        if let Some(max) = self.max_quantity {
            filters.push(Filter::MaxQuantity(max));
        }
        if let Some(from) = self.updated_from {
            filters.push(Filter::UpdatedFrom(from));
        }
        if let Some(to) = self.updated_to {
            filters.push(Filter::UpdatedTo(to));
        }

        filters
    }
}

/// One page of a query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Resource>,
    /// Records matching the filters, before pagination
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

impl Page {
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.limit.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Run the full pipeline against `snapshot`
pub fn execute(snapshot: &Snapshot, params: &QueryParams) -> Page {
    let matched = matching(snapshot, params);
    let total = matched.len();

    let page = params.page();
    let limit = params.limit();
    let start = (page - 1).saturating_mul(limit);

    let items: Vec<Resource> = matched.into_iter().skip(start).take(limit).cloned().collect();

    debug!(total, page, limit, returned = items.len(), "execute: query complete");

    Page {
        items,
        total,
        page,
        limit,
    }
}

/// Every record matching `params`, sorted, without pagination
pub fn all_matches(snapshot: &Snapshot, params: &QueryParams) -> Vec<Resource> {
    matching(snapshot, params).into_iter().cloned().collect()
}

fn matching<'a>(snapshot: &'a Snapshot, params: &QueryParams) -> Vec<&'a Resource> {
    let filters = params.filters();
    if !filters.is_empty() {
        let described: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
        debug!(filters = ?described, "matching: applying filters");
    }

    let mut matched: Vec<&Resource> = snapshot.iter().filter(|r| matches_all(&filters, r)).collect();

    if let Some(field) = params.sort_field {
        sort_resources(&mut matched, field, params.sort_direction);
    }

    matched
}
