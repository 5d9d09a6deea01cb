//! Skill group dataset loader
//!
//! Expected CSV layout (header row required):
//! - Column 0: buff name
//! - Column 1: category (empty = unclassified, unknown = error)
//! - Column 2: damage type (unknown = any)
//! - Column 3: description
//! - Columns 4..: one column per skill group; a non-empty cell marks membership

use anyhow::{Context, Result};
use sg_core::{CatalogBuilder, Category, DamageType, Item};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Number of leading buff attribute columns before the group columns
pub const ATTRIBUTE_COLUMNS: usize = 4;

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub total_rows: u32,
    pub buffs: u32,
    pub skipped: u32,
    pub memberships: u32,
}

/// Parse a dataset from any reader
pub fn read_dataset<R: Read>(reader: R) -> Result<(CatalogBuilder, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read dataset header")?.clone();
    if headers.len() < ATTRIBUTE_COLUMNS {
        anyhow::bail!(
            "Dataset header has {} columns, expected at least {} (name, category, damage, description)",
            headers.len(),
            ATTRIBUTE_COLUMNS
        );
    }

    let group_names: Vec<String> = headers
        .iter()
        .skip(ATTRIBUTE_COLUMNS)
        .map(|name| name.trim().to_string())
        .collect();
    let group_count = group_names.len();
    let mut builder = CatalogBuilder::new(group_names);
    let mut stats = LoadStats::default();

    for result in reader.records() {
        stats.total_rows += 1;
        // header is line 1
        let line = stats.total_rows + 1;
        let record = result.with_context(|| format!("Line {line} - CSV parse error"))?;

        let name = record
            .get(0)
            .unwrap_or_default()
            .trim()
            .to_string();
        if name.is_empty() {
            stats.skipped += 1;
            warn!(line, "skipping row without a buff name");
            continue;
        }

        let raw_category = record.get(1).unwrap_or_default().trim();
        let category = if raw_category.is_empty() {
            None
        } else {
            Some(
                raw_category
                    .parse::<Category>()
                    .with_context(|| format!("Line {line} - buff {name:?}"))?,
            )
        };
        let damage = DamageType::parse_lenient(record.get(2).unwrap_or_default());
        let description = record.get(3).unwrap_or_default().trim().to_string();

        let memberships: Vec<usize> = record
            .iter()
            .skip(ATTRIBUTE_COLUMNS)
            .take(group_count)
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(group_idx, _)| group_idx)
            .collect();
        stats.memberships += memberships.len() as u32;

        let mut item = Item::new(name).with_damage(damage).with_description(description);
        item.category = category;

        builder
            .add_item(item, memberships)
            .with_context(|| format!("Line {line}"))?;
        stats.buffs += 1;
    }

    debug!(
        rows = stats.total_rows,
        buffs = stats.buffs,
        groups = group_count,
        memberships = stats.memberships,
        "dataset parsed"
    );

    Ok((builder, stats))
}

/// Parse a dataset CSV file
pub fn load_dataset(path: &Path) -> Result<(CatalogBuilder, LoadStats)> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;
    read_dataset(file).with_context(|| format!("Failed to load dataset: {}", path.display()))
}
