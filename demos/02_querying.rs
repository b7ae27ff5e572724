//! Example 02: Searching, Filtering, Sorting and Paging
//!
//! This example demonstrates the query engine over a store snapshot,
//! and a listing view that drops results from superseded queries.
//!
//! Run with: cargo run --example 02_querying

use eyre::Result;
use resourcestore::query;
use resourcestore::{
    Completion, QueryParams, ResourceDraft, ResourceStatus, ResourceStore, ResourceView, SortDirection, SortField,
};

fn main() -> Result<()> {
    println!("ResourceStore Querying Example");
    println!("==============================\n");

    let store = ResourceStore::new();

    println!("Creating sample resources...\n");
    let drafts = vec![
        ResourceDraft::new("Tour Bus A1", "Vehicle", 5, 3),
        ResourceDraft::new("Tour Bus B2", "Vehicle", 4, 0).with_status(ResourceStatus::Unavailable),
        ResourceDraft::new("Camera Set Pro", "Equipment", 10, 7),
        ResourceDraft::new("Guide Kit", "Equipment", 15, 12).with_status(ResourceStatus::Maintenance),
        ResourceDraft::new("Senior Guide", "Staff", 8, 5),
        ResourceDraft::new("Hotel Room Deluxe", "Facility", 20, 14),
    ];
    for draft in drafts {
        let resource = store.add(draft)?;
        println!("  - {} ({})", resource.name, resource.resource_type);
    }
    println!();

    // Query 1: Type filter with sorting
    println!("1. Equipment, sorted by name:");
    let params = QueryParams::new()
        .with_type("Equipment")
        .sorted(SortField::Name, SortDirection::Asc);
    let page = store.query(&params);
    for r in &page.items {
        println!("   - {}", r.name);
    }
    println!("   total = {}\n", page.total);

    // Query 2: Free-text search
    println!("2. Search \"tour\":");
    let page = store.query(&QueryParams::new().with_search("tour"));
    for r in &page.items {
        println!("   - {} [{}]", r.name, r.status);
    }
    println!();

    // Query 3: Sort by a field named at runtime
    println!("3. Sorted by \"availableQuantity\" descending:");
    let params = QueryParams::new().sorted_by_name("availableQuantity", SortDirection::Desc)?;
    for r in &store.query(&params).items {
        println!("   - {:<20} {}", r.name, r.available_quantity);
    }
    println!();

    // Unknown field names are rejected up front
    println!("4. Sorting by \"price\":");
    match QueryParams::new().sorted_by_name("price", SortDirection::Asc) {
        Ok(_) => println!("   unexpectedly accepted\n"),
        Err(e) => println!("   rejected: {}\n", e),
    }

    // Paging over one snapshot
    println!("5. Paging two at a time:");
    let snapshot = store.snapshot();
    let first = query::execute(&snapshot, &QueryParams::new().with_limit(2));
    for page_number in 1..=first.page_count() {
        let page = query::execute(&snapshot, &QueryParams::new().with_limit(2).with_page(page_number));
        let names: Vec<&str> = page.items.iter().map(|r| r.name.as_str()).collect();
        println!("   page {}: {:?}", page_number, names);
    }
    println!();

    // A listing view where a newer query wins
    println!("6. Listing view with a superseded query:");
    let mut view = ResourceView::new(10);
    view.set_search("hotel");
    let stale = view.begin();
    view.set_search("guide");
    let fresh = view.begin();

    let snapshot = store.snapshot();
    let applied = view.complete(&fresh, fresh.execute(&snapshot));
    let dropped = view.complete(&stale, stale.execute(&snapshot));
    println!("   fresh query: {:?}, stale query: {:?}", applied, dropped);
    assert_eq!(dropped, Completion::Superseded);
    if let Some(page) = view.page() {
        for r in &page.items {
            println!("   - {}", r.name);
        }
    }

    println!("\nExample complete!");
    Ok(())
}
