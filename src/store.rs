// In-memory record store for inventory resources

use crate::activity::{Activity, ActivityKind, ActivityLog, DEFAULT_ACTIVITY_CAPACITY};
use crate::error::{Error, Result};
use crate::models::{Resource, ResourceDraft, ResourcePatch, now};
use crate::query::{self, Page, QueryParams};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};
use uuid::Uuid;

/// Behavior switches for a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Reject records whose available quantity exceeds their total quantity
    pub strict_quantities: bool,
    /// How many stock movements the activity log keeps
    pub activity_capacity: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            strict_quantities: false,
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
        }
    }
}

/// Immutable point-in-time view of the collection, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Arc<Vec<Resource>>,
}

impl Snapshot {
    pub fn records(&self) -> &[Resource] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.records.iter()
    }
}

impl From<Vec<Resource>> for Snapshot {
    fn from(records: Vec<Resource>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

/// Sole owner of the resource collection
///
/// Every operation takes `&self`; mutations are serialized behind a write lock
/// and copy the collection on write, so snapshots already handed out never
/// observe a later change. Share across threads with `Arc<ResourceStore>`.
///
/// Lock order is records, then activities.
#[derive(Debug)]
pub struct ResourceStore {
    records: RwLock<Arc<Vec<Resource>>>,
    activities: Mutex<ActivityLog>,
    options: StoreOptions,
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::with_options(StoreOptions::default())
    }
}

impl ResourceStore {
    /// Create an empty store with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            records: RwLock::default(),
            activities: Mutex::new(ActivityLog::with_capacity(options.activity_capacity)),
            options,
        }
    }

    /// Seed a store with existing records, keeping their ids, timestamps and order
    pub fn from_records<I>(records: I, options: StoreOptions) -> Result<Self>
    where
        I: IntoIterator<Item = Resource>,
    {
        let store = Self::with_options(options);
        let mut seen = HashSet::new();
        let mut loaded = Vec::new();

        for record in records {
            Self::validate_id(&record.id)?;
            store.validate(&record)?;
            if !seen.insert(record.id.clone()) {
                return Err(Error::Validation(format!("Duplicate resource id: {}", record.id)));
            }
            loaded.push(record);
        }

        info!(count = loaded.len(), "Seeded resource store");
        *store.write() = Arc::new(loaded);
        Ok(store)
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// Create a new record from a draft, assigning its id and timestamp
    pub fn add(&self, draft: ResourceDraft) -> Result<Resource> {
        let resource = draft.into_resource(Uuid::now_v7().to_string(), now());
        self.validate(&resource)?;

        Arc::make_mut(&mut *self.write()).push(resource.clone());

        debug!(id = %resource.id, name = %resource.name, "add: created resource");
        Ok(resource)
    }

    /// Get a record by ID
    pub fn get_by_id(&self, id: &str) -> Result<Resource> {
        self.read()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Merge a patch onto an existing record
    pub fn update(&self, id: &str, patch: ResourcePatch) -> Result<Resource> {
        self.modify(id, |resource| {
            patch.apply_to(resource);
            Ok(())
        })
    }

    /// Delete a record
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut guard = self.write();
        let index = Self::position(&guard, id)?;
        Arc::make_mut(&mut *guard).remove(index);

        debug!(id, remaining = guard.len(), "delete: removed resource");
        Ok(())
    }

    /// Take `quantity` units out of stock, logging the movement against `user`
    pub fn check_out(&self, id: &str, quantity: u32, user: Option<&str>) -> Result<Resource> {
        self.move_stock(id, quantity, ActivityKind::CheckOut, user, |resource| {
            if resource.available_quantity < quantity {
                return Err(Error::InsufficientStock {
                    id: resource.id.clone(),
                    requested: quantity,
                    available: resource.available_quantity,
                });
            }
            resource.available_quantity -= quantity;
            Ok(())
        })
    }

    /// Return `quantity` units to stock, logging the movement against `user`
    pub fn check_in(&self, id: &str, quantity: u32, user: Option<&str>) -> Result<Resource> {
        self.move_stock(id, quantity, ActivityKind::CheckIn, user, |resource| {
            let restored = resource.available_quantity.saturating_add(quantity);
            if restored > resource.total_quantity {
                return Err(Error::Validation(format!(
                    "Check-in of {} would exceed total quantity {} of {}",
                    quantity, resource.total_quantity, resource.id
                )));
            }
            resource.available_quantity = restored;
            Ok(())
        })
    }

    /// Point-in-time copy of the whole collection
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: Arc::clone(&*self.read()),
        }
    }

    /// Run a query against a fresh snapshot
    pub fn query(&self, params: &QueryParams) -> Page {
        query::execute(&self.snapshot(), params)
    }

    /// Up to `n` committed stock movements, newest first
    pub fn recent_activities(&self, n: usize) -> Vec<Activity> {
        self.activities().recent(n)
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn read(&self) -> RwLockReadGuard<'_, Arc<Vec<Resource>>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Vec<Resource>>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn activities(&self) -> MutexGuard<'_, ActivityLog> {
        self.activities.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn position(records: &[Resource], id: &str) -> Result<usize> {
        records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Apply `change` to a copy of the record; commit only if it validates
    fn modify<F>(&self, id: &str, change: F) -> Result<Resource>
    where
        F: FnOnce(&mut Resource) -> Result<()>,
    {
        self.modify_locked(&mut *self.write(), id, change)
    }

    fn modify_locked<F>(&self, guard: &mut Arc<Vec<Resource>>, id: &str, change: F) -> Result<Resource>
    where
        F: FnOnce(&mut Resource) -> Result<()>,
    {
        let index = Self::position(guard.as_slice(), id)?;

        let mut updated = guard[index].clone();
        change(&mut updated)?;
        updated.last_updated = now();
        self.validate(&updated)?;

        Arc::make_mut(guard)[index] = updated.clone();

        debug!(id, status = %updated.status, available = updated.available_quantity, "modify: updated resource");
        Ok(updated)
    }

    /// Commit a stock change and log it while the write lock is still held,
    /// so the log order matches the commit order
    fn move_stock<F>(
        &self,
        id: &str,
        quantity: u32,
        kind: ActivityKind,
        user: Option<&str>,
        change: F,
    ) -> Result<Resource>
    where
        F: FnOnce(&mut Resource) -> Result<()>,
    {
        Self::validate_movement(quantity)?;

        let mut guard = self.write();
        let updated = self.modify_locked(&mut *guard, id, change)?;
        self.activities().record(Activity {
            kind,
            resource_id: updated.id.clone(),
            item: updated.name.clone(),
            quantity,
            user: user.map(str::to_string),
            time: updated.last_updated,
        });

        info!(id, %kind, quantity, user = user.unwrap_or("-"), "Stock moved");
        Ok(updated)
    }

    fn validate(&self, resource: &Resource) -> Result<()> {
        if resource.name.trim().is_empty() {
            return Err(Error::Validation("Resource name cannot be empty".to_string()));
        }
        if resource.resource_type.trim().is_empty() {
            return Err(Error::Validation("Resource type cannot be empty".to_string()));
        }
        if self.options.strict_quantities && resource.available_quantity > resource.total_quantity {
            return Err(Error::Validation(format!(
                "Available quantity {} exceeds total quantity {}",
                resource.available_quantity, resource.total_quantity
            )));
        }
        Ok(())
    }

    fn validate_id(id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::Validation("Resource ID cannot be empty or whitespace-only".to_string()));
        }
        if id.len() > 256 {
            return Err(Error::Validation(format!("Resource ID too long: {} chars (max 256)", id.len())));
        }
        Ok(())
    }

    fn validate_movement(quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(Error::Validation("Stock movement quantity must be positive".to_string()));
        }
        Ok(())
    }
}
