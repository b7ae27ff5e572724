// JSONL import/export for resource collections

use crate::record::Record;
use eyre::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Read all records from a JSONL file, returning the latest version per ID
///
/// Records come back in the order their id first appears. For duplicate ids,
/// the version with the newest `last_updated` wins; ties go to the later line.
pub fn read_jsonl_latest<T: Record>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        // File doesn't exist yet, return empty
        return Ok(Vec::new());
    }

    let file = File::open(path).with_context(|| format!("Failed to open JSONL file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut records: Vec<T> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (index, line) in reader.lines().enumerate() {
        let Some(record) = parse_line::<T>(path, index + 1, line) else {
            continue;
        };

        match positions.entry(record.id().to_string()) {
            Entry::Occupied(slot) => {
                let existing = &mut records[*slot.get()];
                if record.last_updated() >= existing.last_updated() {
                    *existing = record;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(records.len());
                records.push(record);
            }
        }
    }

    info!(
        file = ?path,
        count = records.len(),
        "Loaded latest records from JSONL"
    );

    Ok(records)
}

/// Decode one line; unreadable and malformed lines are logged and skipped
fn parse_line<T: Record>(path: &Path, line_num: usize, line: std::io::Result<String>) -> Option<T> {
    let line = line
        .inspect_err(|e| warn!(file = ?path, line = line_num, error = ?e, "Failed to read line, skipping"))
        .ok()?;
    if line.trim().is_empty() {
        return None;
    }
    serde_json::from_str(&line)
        .inspect_err(|e| warn!(file = ?path, line = line_num, error = ?e, "Failed to parse JSON, skipping"))
        .ok()
}

/// Write records to a JSONL file, one object per line, replacing its contents
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create JSONL file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let json = serde_json::to_string(record).context("Failed to serialize record")?;
        writeln!(writer, "{}", json)?;
    }

    writer.flush()?;
    writer.get_ref().sync_all()?; // Ensure data is flushed to disk

    info!(file = ?path, count = records.len(), "Wrote records to JSONL");
    Ok(())
}
