//! Example 01: Basic CRUD Operations
//!
//! This example demonstrates the fundamental add, read, update, and delete
//! operations with ResourceStore.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use resourcestore::{Error, ResourceDraft, ResourcePatch, ResourceStatus, ResourceStore};

fn main() -> Result<()> {
    println!("ResourceStore Basic CRUD Example");
    println!("================================\n");

    // The store lives exactly as long as this value does
    let store = ResourceStore::new();

    // ADD: Create a new resource
    println!("1. ADD - Adding a new resource...");
    let bus = store.add(ResourceDraft::new("Tour Bus A1", "Vehicle", 5, 3))?;
    println!("   Created resource with ID: {}\n", bus.id);

    // READ: Retrieve the resource
    println!("2. READ - Retrieving the resource...");
    let retrieved = store.get_by_id(&bus.id)?;
    println!("   Found resource:");
    println!("   - Name: {}", retrieved.name);
    println!("   - Type: {}", retrieved.resource_type);
    println!("   - Stock: {}/{}", retrieved.available_quantity, retrieved.total_quantity);
    println!("   - Last updated: {}\n", retrieved.last_updated);

    // UPDATE: Send the bus to maintenance
    println!("3. UPDATE - Sending the bus to maintenance...");
    let updated = store.update(
        &bus.id,
        ResourcePatch {
            status: Some(ResourceStatus::Maintenance),
            available_quantity: Some(0),
            ..Default::default()
        },
    )?;
    println!("   Status is now: {}", updated.status);
    println!("   Available: {}\n", updated.available_quantity);

    // STOCK: Check units back in
    println!("4. CHECK IN - Returning two buses to service...");
    let returned = store.check_in(&bus.id, 2, Some("Depot"))?;
    println!("   Available: {}/{}", returned.available_quantity, returned.total_quantity);
    for activity in store.recent_activities(5) {
        println!("   Logged: {} x{} of {}", activity.kind, activity.quantity, activity.item);
    }
    println!();

    // DELETE: Remove the resource
    println!("5. DELETE - Removing the resource...");
    store.delete(&bus.id)?;
    println!("   Resource deleted. Store size: {}\n", store.len());

    // A second delete reports NotFound rather than failing hard
    match store.delete(&bus.id) {
        Err(Error::NotFound(id)) => println!("   Second delete: {} not found (as expected)\n", id),
        other => println!("   Unexpected result: {:?}\n", other),
    }

    println!("Example complete!");
    Ok(())
}
