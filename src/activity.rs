// Recent stock movements, newest first

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_ACTIVITY_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    CheckIn,
    CheckOut,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::CheckIn => write!(f, "check-in"),
            ActivityKind::CheckOut => write!(f, "check-out"),
        }
    }
}

/// One committed stock movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub resource_id: String,
    pub item: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub time: DateTime<Utc>,
}

/// Ring buffer of the latest activities; the oldest entry is evicted when full
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ACTIVITY_CAPACITY)
    }
}

impl ActivityLog {
    /// A capacity of 0 keeps nothing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_ACTIVITY_CAPACITY)),
            capacity,
        }
    }

    pub fn record(&mut self, activity: Activity) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(activity);
    }

    /// Up to `n` entries, newest first
    pub fn recent(&self, n: usize) -> Vec<Activity> {
        self.entries.iter().rev().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn activity(item: &str, ms: i64) -> Activity {
        Activity {
            kind: ActivityKind::CheckOut,
            resource_id: item.to_lowercase(),
            item: item.to_string(),
            quantity: 1,
            user: None,
            time: Utc.timestamp_millis_opt(ms).unwrap(),
        }
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut log = ActivityLog::default();
        log.record(activity("Bus", 1));
        log.record(activity("Camera", 2));
        log.record(activity("Kit", 3));

        let items: Vec<String> = log.recent(2).into_iter().map(|a| a.item).collect();
        assert_eq!(items, vec!["Kit", "Camera"]);
        assert_eq!(log.recent(10).len(), 3);
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let mut log = ActivityLog::with_capacity(2);
        log.record(activity("Bus", 1));
        log.record(activity("Camera", 2));
        log.record(activity("Kit", 3));

        assert_eq!(log.len(), 2);
        let items: Vec<String> = log.recent(5).into_iter().map(|a| a.item).collect();
        assert_eq!(items, vec!["Kit", "Camera"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut log = ActivityLog::with_capacity(0);
        log.record(activity("Bus", 1));
        assert!(log.is_empty());
    }

    #[test]
    fn test_wire_format() {
        let mut entry = activity("Tour Bus #103", 0);
        entry.user = Some("John Smith".to_string());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "check-out");
        assert_eq!(value["resourceId"], "tour bus #103");
        assert_eq!(value["user"], "John Smith");

        let anonymous = serde_json::to_value(activity("Kit", 0)).unwrap();
        assert!(anonymous.get("user").is_none());
        assert_eq!(ActivityKind::CheckIn.to_string(), "check-in");
    }
}
