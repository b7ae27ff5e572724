// Sortable resource attributes and their comparators

use crate::error::Error;
use crate::models::Resource;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

/// A resource attribute the query engine can order by
///
/// Names are parsed at the boundary; unknown names are rejected with
/// [`Error::InvalidSortField`] instead of failing at comparison time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortField {
    Id,
    Name,
    Type,
    TotalQuantity,
    AvailableQuantity,
    Status,
    LastUpdated,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        Self::Id,
        Self::Name,
        Self::Type,
        Self::TotalQuantity,
        Self::AvailableQuantity,
        Self::Status,
        Self::LastUpdated,
    ];

    /// Wire name of the attribute
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Type => "type",
            SortField::TotalQuantity => "totalQuantity",
            SortField::AvailableQuantity => "availableQuantity",
            SortField::Status => "status",
            SortField::LastUpdated => "lastUpdated",
        }
    }

    fn snake_case(self) -> &'static str {
        match self {
            SortField::TotalQuantity => "total_quantity",
            SortField::AvailableQuantity => "available_quantity",
            SortField::LastUpdated => "last_updated",
            other => other.as_str(),
        }
    }

    /// Natural ordering of this attribute between two records
    pub fn compare(self, a: &Resource, b: &Resource) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Type => a.resource_type.cmp(&b.resource_type),
            SortField::TotalQuantity => a.total_quantity.cmp(&b.total_quantity),
            SortField::AvailableQuantity => a.available_quantity.cmp(&b.available_quantity),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::LastUpdated => a.last_updated.cmp(&b.last_updated),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s || field.snake_case() == s)
            .ok_or_else(|| Error::InvalidSortField(s.to_string()))
    }
}

impl TryFrom<String> for SortField {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortField> for String {
    fn from(field: SortField) -> Self {
        field.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Stable sort of `records` by `field`
///
/// Equal keys keep their incoming relative order in both directions.
pub fn sort_resources<R: Borrow<Resource>>(records: &mut [R], field: SortField, direction: SortDirection) {
    fn key<R: Borrow<Resource>>(r: &R) -> &Resource {
        <R as Borrow<Resource>>::borrow(r)
    }

    match direction {
        SortDirection::Asc => records.sort_by(|a, b| field.compare(key(a), key(b))),
        SortDirection::Desc => records.sort_by(|a, b| field.compare(key(b), key(a))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceDraft, ResourceStatus};
    use chrono::{TimeZone, Utc};

    fn resource(id: &str, name: &str, total: u32, status: ResourceStatus, ms: i64) -> Resource {
        ResourceDraft::new(name, "Equipment", total, 0)
            .with_status(status)
            .into_resource(id.to_string(), Utc.timestamp_millis_opt(ms).unwrap())
    }

    fn ids(records: &[Resource]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!("name".parse::<SortField>().unwrap(), SortField::Name);
        assert_eq!("totalQuantity".parse::<SortField>().unwrap(), SortField::TotalQuantity);
        assert_eq!("available_quantity".parse::<SortField>().unwrap(), SortField::AvailableQuantity);
        assert_eq!("lastUpdated".parse::<SortField>().unwrap(), SortField::LastUpdated);
        assert_eq!("type".parse::<SortField>().unwrap(), SortField::Type);
    }

    #[test]
    fn test_parse_unknown_sort_field() {
        assert_eq!(
            "color".parse::<SortField>(),
            Err(Error::InvalidSortField("color".to_string()))
        );
        assert!("Name".parse::<SortField>().is_err());
        assert!("".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_field_serde() {
        let field: SortField = serde_json::from_str("\"availableQuantity\"").unwrap();
        assert_eq!(field, SortField::AvailableQuantity);
        assert_eq!(serde_json::to_string(&SortField::LastUpdated).unwrap(), "\"lastUpdated\"");

        let err = serde_json::from_str::<SortField>("\"price\"").unwrap_err();
        assert!(err.to_string().contains("Invalid sort field: price"));
    }

    #[test]
    fn test_numeric_sort_is_not_lexicographic() {
        let mut records = vec![
            resource("a", "A", 10, ResourceStatus::Available, 0),
            resource("b", "B", 9, ResourceStatus::Available, 0),
            resource("c", "C", 100, ResourceStatus::Available, 0),
        ];
        sort_resources(&mut records, SortField::TotalQuantity, SortDirection::Asc);
        assert_eq!(ids(&records), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_timestamp_sort_desc() {
        let mut records = vec![
            resource("old", "A", 1, ResourceStatus::Available, 1_000),
            resource("new", "B", 1, ResourceStatus::Available, 3_000),
            resource("mid", "C", 1, ResourceStatus::Available, 2_000),
        ];
        sort_resources(&mut records, SortField::LastUpdated, SortDirection::Desc);
        assert_eq!(ids(&records), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_status_sorts_by_name() {
        let mut records = vec![
            resource("u", "A", 1, ResourceStatus::Unavailable, 0),
            resource("m", "B", 1, ResourceStatus::Maintenance, 0),
            resource("a", "C", 1, ResourceStatus::Available, 0),
        ];
        sort_resources(&mut records, SortField::Status, SortDirection::Asc);
        assert_eq!(ids(&records), vec!["a", "m", "u"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let records = vec![
            resource("1", "Kit", 5, ResourceStatus::Available, 0),
            resource("2", "Bus", 3, ResourceStatus::Available, 0),
            resource("3", "Kit", 1, ResourceStatus::Available, 0),
            resource("4", "Bus", 2, ResourceStatus::Available, 0),
        ];

        let mut asc = records.clone();
        sort_resources(&mut asc, SortField::Name, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["2", "4", "1", "3"]);

        let mut desc = records;
        sort_resources(&mut desc, SortField::Name, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }
}
