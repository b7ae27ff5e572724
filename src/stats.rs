// Dashboard figures derived from a snapshot

use crate::models::ResourceStatus;
use crate::store::Snapshot;
use serde::{Deserialize, Serialize};

/// Stock totals for one resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    pub name: String,
    pub records: usize,
    pub total: u64,
    pub available: u64,
    pub in_use: u64,
}

/// A resource whose available stock fell below the alert threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub id: String,
    pub item: String,
    pub current: u32,
    pub threshold: u32,
    pub status: ResourceStatus,
}

/// Per-type totals, in the order each type first appears in the snapshot
pub fn summarize(snapshot: &Snapshot) -> Vec<TypeSummary> {
    let mut summaries: Vec<TypeSummary> = Vec::new();

    for resource in snapshot.iter() {
        let index = match summaries.iter().position(|s| s.name == resource.resource_type) {
            Some(index) => index,
            None => {
                summaries.push(TypeSummary {
                    name: resource.resource_type.clone(),
                    records: 0,
                    total: 0,
                    available: 0,
                    in_use: 0,
                });
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[index];
        summary.records += 1;
        summary.total += u64::from(resource.total_quantity);
        summary.available += u64::from(resource.available_quantity);
        summary.in_use += u64::from(resource.total_quantity.saturating_sub(resource.available_quantity));
    }

    summaries
}

/// Resources with fewer than `threshold` units available, in snapshot order
pub fn low_stock(snapshot: &Snapshot, threshold: u32) -> Vec<StockAlert> {
    snapshot
        .iter()
        .filter(|r| r.available_quantity < threshold)
        .map(|r| StockAlert {
            id: r.id.clone(),
            item: r.name.clone(),
            current: r.available_quantity,
            threshold,
            status: r.status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, ResourceDraft, now};

    fn snapshot() -> Snapshot {
        let records: Vec<Resource> = vec![
            ResourceDraft::new("Tour Bus A1", "Vehicle", 5, 2),
            ResourceDraft::new("Camera Set Pro", "Equipment", 10, 7),
            ResourceDraft::new("Minivan", "Vehicle", 3, 3),
            ResourceDraft::new("First Aid Kit", "Equipment", 20, 4),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, d)| d.into_resource(i.to_string(), now()))
        .collect();
        Snapshot::from(records)
    }

    #[test]
    fn test_summarize_groups_by_type_in_first_seen_order() {
        let summaries = summarize(&snapshot());
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].name, "Vehicle");
        assert_eq!(summaries[0].records, 2);
        assert_eq!(summaries[0].total, 8);
        assert_eq!(summaries[0].available, 5);
        assert_eq!(summaries[0].in_use, 3);

        assert_eq!(summaries[1].name, "Equipment");
        assert_eq!(summaries[1].total, 30);
        assert_eq!(summaries[1].in_use, 19);
    }

    #[test]
    fn test_in_use_saturates() {
        let record = ResourceDraft::new("Odd", "Staff", 1, 3).into_resource("x".to_string(), now());
        let summaries = summarize(&Snapshot::from(vec![record]));
        assert_eq!(summaries[0].in_use, 0);
    }

    #[test]
    fn test_low_stock() {
        let alerts = low_stock(&snapshot(), 4);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].item, "Tour Bus A1");
        assert_eq!(alerts[0].current, 2);
        assert_eq!(alerts[1].item, "Minivan");
        assert!(alerts.iter().all(|a| a.threshold == 4));

        assert!(low_stock(&snapshot(), 0).is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(summarize(&Snapshot::default()).is_empty());
        assert!(low_stock(&Snapshot::default(), 10).is_empty());
    }
}
