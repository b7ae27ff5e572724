// Data models for ResourceStore

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// A tracked inventory item (vehicle, equipment, staff, facility, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub total_quantity: u32,
    pub available_quantity: u32,
    pub status: ResourceStatus,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Available,
    Maintenance,
    Unavailable,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 3] = [Self::Available, Self::Maintenance, Self::Unavailable];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceStatus::Available => "available",
            ResourceStatus::Maintenance => "maintenance",
            ResourceStatus::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("Unknown status: {}", s)))
    }
}

/// A resource as submitted for creation, before `id` and `last_updated` are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub total_quantity: u32,
    pub available_quantity: u32,
    pub status: ResourceStatus,
}

impl ResourceDraft {
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>, total: u32, available: u32) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            total_quantity: total,
            available_quantity: available,
            status: ResourceStatus::Available,
        }
    }

    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn into_resource(self, id: String, last_updated: DateTime<Utc>) -> Resource {
        Resource {
            id,
            name: self.name,
            resource_type: self.resource_type,
            total_quantity: self.total_quantity,
            available_quantity: self.available_quantity,
            status: self.status,
            last_updated,
        }
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourcePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
}

impl ResourcePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields onto `resource`
    pub(crate) fn apply_to(self, resource: &mut Resource) {
        if let Some(name) = self.name {
            resource.name = name;
        }
        if let Some(resource_type) = self.resource_type {
            resource.resource_type = resource_type;
        }
        if let Some(total) = self.total_quantity {
            resource.total_quantity = total;
        }
        if let Some(available) = self.available_quantity {
            resource.available_quantity = available;
        }
        if let Some(status) = self.status {
            resource.status = status;
        }
    }
}

/// The inventory the dashboard starts with when no data file is given
pub fn sample_inventory() -> Vec<ResourceDraft> {
    vec![
        ResourceDraft::new("Tour Bus A1", "Vehicle", 5, 3),
        ResourceDraft::new("Camera Set Pro", "Equipment", 10, 7),
        ResourceDraft::new("Tour Guide Equipment", "Equipment", 15, 12).with_status(ResourceStatus::Maintenance),
    ]
}

/// Helper function to get the current timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
