// Identity and freshness shared by stored records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Resource;

/// Core trait for records the store and the JSONL loader can reconcile
pub trait Record: Serialize + for<'de> Deserialize<'de> + Clone + Send + Sync + 'static {
    /// Unique identifier for this record
    fn id(&self) -> &str;

    /// When this record was last written; the newest version of an id wins
    fn last_updated(&self) -> DateTime<Utc>;
}

impl Record for Resource {
    fn id(&self) -> &str {
        &self.id
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceDraft;
    use chrono::TimeZone;

    fn latest<T: Record>(a: T, b: T) -> T {
        if b.last_updated() >= a.last_updated() { b } else { a }
    }

    #[test]
    fn test_resource_identity_and_freshness() {
        let earlier = Utc.timestamp_millis_opt(1_000).unwrap();
        let later = Utc.timestamp_millis_opt(2_000).unwrap();

        let old = ResourceDraft::new("Tour Bus A1", "Vehicle", 5, 3).into_resource("bus-1".to_string(), earlier);
        let new = ResourceDraft::new("Tour Bus A1", "Vehicle", 5, 1).into_resource("bus-1".to_string(), later);

        assert_eq!(Record::id(&old), "bus-1");
        assert_eq!(Record::last_updated(&new), later);
        assert_eq!(latest(new.clone(), old.clone()).available_quantity, 1);
        assert_eq!(latest(old, new).available_quantity, 1);
    }
}
