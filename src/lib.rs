// ResourceStore - In-memory inventory store with a search/filter/sort/paginate query engine

pub mod activity;
pub mod config;
pub mod error;
pub mod filter;
pub mod jsonl;
pub mod models;
pub mod query;
pub mod record;
pub mod sort;
pub mod stats;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use activity::{Activity, ActivityKind, ActivityLog};
pub use error::{Error, Result};
pub use filter::Filter;
pub use models::{Resource, ResourceDraft, ResourcePatch, ResourceStatus, now};
pub use query::{Page, QueryParams};
pub use record::Record;
pub use sort::{SortDirection, SortField};
pub use store::{ResourceStore, Snapshot, StoreOptions};
pub use view::{Completion, QueryTicket, ResourceView};
