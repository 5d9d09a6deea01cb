//! Priority / score weighting file
//!
//! Two columns: buff name, value. Rows with an empty value are ignored.
//! A non-numeric value on the first row is taken as a header; anywhere else
//! it is an error.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use sg_core::{CatalogBuilder, CoreError, Weight};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// How values of a weighting file are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightKind {
    /// Values must be below `max_priority`
    Priority { max_priority: usize },
    Score,
}

/// Parsed weights by buff name
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    weights: FxHashMap<String, Weight>,
    pub skipped_header: bool,
}

impl WeightTable {
    pub fn get(&self, name: &str) -> Option<Weight> {
        self.weights.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Apply to every buff of `builder`; returns how many buffs were weighted.
    pub fn apply(&self, builder: &mut CatalogBuilder) -> usize {
        let mut applied = 0;
        for (name, weight) in &self.weights {
            if builder.set_weight(name, *weight) {
                applied += 1;
            } else {
                debug!(buff = %name, "weight given for unknown buff");
            }
        }
        applied
    }
}

fn parse_value(raw: &str, kind: WeightKind) -> std::result::Result<Weight, std::num::ParseIntError> {
    match kind {
        WeightKind::Priority { .. } => raw.parse::<u32>().map(Weight::Priority),
        WeightKind::Score => raw.parse::<u64>().map(Weight::Score),
    }
}

pub fn read_weights<R: Read>(reader: R, kind: WeightKind) -> Result<WeightTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = WeightTable::default();

    for (row_idx, result) in reader.records().enumerate() {
        let line = row_idx + 1;
        let record = result.with_context(|| format!("Line {line} - CSV parse error"))?;

        let raw = record.get(1).unwrap_or_default().trim();
        if raw.is_empty() {
            continue;
        }
        let name = record
            .get(0)
            .unwrap_or_default()
            .trim()
            .trim_start_matches('\u{feff}')
            .to_string();

        let weight = match parse_value(raw, kind) {
            Ok(weight) => weight,
            Err(_) if row_idx == 0 => {
                debug!(value = raw, "treating first weighting row as header");
                table.skipped_header = true;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Line {line} - invalid weighting value {raw:?} for buff {name:?}")
                });
            }
        };

        if let (WeightKind::Priority { max_priority }, Weight::Priority(priority)) = (kind, weight) {
            if priority as usize >= max_priority {
                return Err(CoreError::PriorityOutOfRange {
                    item: name,
                    priority,
                    max: max_priority,
                })
                .with_context(|| format!("Line {line}"));
            }
        }

        if table.weights.insert(name.clone(), weight).is_some() {
            warn!(buff = %name, line, "buff weighted twice, keeping the last value");
        }
    }

    Ok(table)
}

pub fn load_weights(path: &Path, kind: WeightKind) -> Result<WeightTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open weighting file: {}", path.display()))?;
    read_weights(file, kind).with_context(|| format!("Failed to load weights: {}", path.display()))
}
