// Record predicates for the query pipeline

use crate::models::{Resource, ResourceStatus};
use chrono::{DateTime, Utc};

/// A single predicate a resource must satisfy to be part of a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Case-insensitive substring of `name` or `type`; holds the lowercased needle
    Search(String),
    /// Exact, case-sensitive `type`
    Type(String),
    /// Exact `status`
    Status(ResourceStatus),
    /// `available_quantity >= n`
    MinQuantity(u32),
    /// `available_quantity <= n`
    MaxQuantity(u32),
    /// `last_updated >= t`
    UpdatedFrom(DateTime<Utc>),
    /// `last_updated <= t`
    UpdatedTo(DateTime<Utc>),
}

impl Filter {
    /// Build a search predicate; the needle is folded to lowercase once
    pub fn search(needle: &str) -> Self {
        Filter::Search(needle.to_lowercase())
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Filter::Search(needle) => {
                resource.name.to_lowercase().contains(needle.as_str())
                    || resource.resource_type.to_lowercase().contains(needle.as_str())
            }
            Filter::Type(resource_type) => resource.resource_type == *resource_type,
            Filter::Status(status) => resource.status == *status,
            Filter::MinQuantity(min) => resource.available_quantity >= *min,
            Filter::MaxQuantity(max) => resource.available_quantity <= *max,
            Filter::UpdatedFrom(from) => resource.last_updated >= *from,
            Filter::UpdatedTo(to) => resource.last_updated <= *to,
        }
    }
}

/// True when `resource` passes every filter
pub fn matches_all(filters: &[Filter], resource: &Resource) -> bool {
    filters.iter().all(|f| f.matches(resource))
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Search(needle) => write!(f, "search ~ {:?}", needle),
            Filter::Type(t) => write!(f, "type = {}", t),
            Filter::Status(s) => write!(f, "status = {}", s),
            Filter::MinQuantity(n) => write!(f, "availableQuantity >= {}", n),
            Filter::MaxQuantity(n) => write!(f, "availableQuantity <= {}", n),
            Filter::UpdatedFrom(t) => write!(f, "lastUpdated >= {}", t.to_rfc3339()),
            Filter::UpdatedTo(t) => write!(f, "lastUpdated <= {}", t.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceDraft;
    use chrono::TimeZone;

    fn bus() -> Resource {
        ResourceDraft::new("Tour Bus A1", "Vehicle", 5, 3)
            .into_resource("1".to_string(), Utc.timestamp_millis_opt(2_000).unwrap())
    }

    #[test]
    fn test_search_matches_name_or_type_case_insensitive() {
        assert!(Filter::search("tour").matches(&bus()));
        assert!(Filter::search("BUS a1").matches(&bus()));
        assert!(Filter::search("vehic").matches(&bus()));
        assert!(!Filter::search("camera").matches(&bus()));
    }

    #[test]
    fn test_type_is_case_sensitive() {
        assert!(Filter::Type("Vehicle".to_string()).matches(&bus()));
        assert!(!Filter::Type("vehicle".to_string()).matches(&bus()));
        assert!(!Filter::Type("Vehic".to_string()).matches(&bus()));
    }

    #[test]
    fn test_status() {
        assert!(Filter::Status(ResourceStatus::Available).matches(&bus()));
        assert!(!Filter::Status(ResourceStatus::Maintenance).matches(&bus()));
    }

    #[test]
    fn test_quantity_bounds_are_inclusive() {
        assert!(Filter::MinQuantity(3).matches(&bus()));
        assert!(!Filter::MinQuantity(4).matches(&bus()));
        assert!(Filter::MaxQuantity(3).matches(&bus()));
        assert!(!Filter::MaxQuantity(2).matches(&bus()));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let at = |ms| Utc.timestamp_millis_opt(ms).unwrap();
        assert!(Filter::UpdatedFrom(at(2_000)).matches(&bus()));
        assert!(!Filter::UpdatedFrom(at(2_001)).matches(&bus()));
        assert!(Filter::UpdatedTo(at(2_000)).matches(&bus()));
        assert!(!Filter::UpdatedTo(at(1_999)).matches(&bus()));
    }

    #[test]
    fn test_matches_all() {
        let filters = vec![Filter::search("bus"), Filter::Type("Vehicle".to_string())];
        assert!(matches_all(&filters, &bus()));
        assert!(matches_all(&[], &bus()));

        let filters = vec![Filter::search("bus"), Filter::Status(ResourceStatus::Unavailable)];
        assert!(!matches_all(&filters, &bus()));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::Type("Vehicle".to_string()).to_string(), "type = Vehicle");
        assert_eq!(Filter::Status(ResourceStatus::Maintenance).to_string(), "status = maintenance");
        assert_eq!(Filter::MinQuantity(2).to_string(), "availableQuantity >= 2");
        assert_eq!(Filter::search("Tour").to_string(), "search ~ \"tour\"");
    }
}
