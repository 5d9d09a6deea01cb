//! Skill group ranker: CSV front end
//!
//! Dataset CSV (+ optional weighting CSV) → Catalog → sg_core ranking → CSV rows

pub mod dataset;
pub mod weights;
pub mod writer;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sg_core::{rank_catalog, RankingMode, RankingReport, RunConfig};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use dataset::{load_dataset, read_dataset, LoadStats};
pub use weights::{load_weights, read_weights, WeightKind, WeightTable};
pub use writer::write_report;

/// Inputs of one ranking run
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub dataset: PathBuf,
    pub weights: Option<PathBuf>,
    /// Interpret the weighting file as scores instead of priorities
    pub score: bool,
    pub config: RunConfig,
}

/// Run summary written next to the CSV output on request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: RankingMode,
    pub buffs: u32,
    pub groups: usize,
    pub combinations: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// 생성 시각 (RFC3339)
    pub created_at: String,
}

/// Mode from config if forced, otherwise from whether weights were supplied
pub fn select_mode(config: &RunConfig, has_weights: bool, score: bool) -> RankingMode {
    if let Some(mode) = config.mode {
        return mode;
    }
    match (has_weights, score) {
        (false, _) => RankingMode::Count,
        (true, false) => RankingMode::Priority,
        (true, true) => RankingMode::Score,
    }
}

/// Load, filter, weight and rank from readers
pub fn rank_from_readers<D: Read, W: Read>(
    dataset: D,
    weights: Option<W>,
    score: bool,
    config: &RunConfig,
) -> Result<(RankingReport, RunSummary)> {
    let (mut builder, stats) = read_dataset(dataset)?;
    let mode = select_mode(config, weights.is_some(), score);

    if let Some(reader) = weights {
        let kind = match mode {
            RankingMode::Priority => Some(WeightKind::Priority {
                max_priority: config.max_priority,
            }),
            RankingMode::Score => Some(WeightKind::Score),
            RankingMode::Count => None,
        };
        match kind {
            Some(kind) => {
                let table = read_weights(reader, kind)?;
                let applied = table.apply(&mut builder);
                info!(weights = table.len(), applied, "weights applied");
            }
            None => warn!("weighting file ignored in count mode"),
        }
    } else if mode != RankingMode::Count {
        warn!(%mode, "no weighting file given, every buff is unweighted");
    }

    let catalog = builder.build(&config.filter);
    let report = rank_catalog(&catalog, mode, config)?;

    let summary = RunSummary {
        mode,
        buffs: stats.buffs,
        groups: catalog.groups().len(),
        combinations: report.len(),
        cache_hits: report.cache_stats.hits,
        cache_misses: report.cache_stats.misses,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    Ok((report, summary))
}

/// Load, filter, weight and rank from files
pub fn run(request: &RunRequest) -> Result<(RankingReport, RunSummary)> {
    let dataset = std::fs::File::open(&request.dataset)
        .with_context(|| format!("Failed to open dataset file: {}", request.dataset.display()))?;
    let weights = request
        .weights
        .as_ref()
        .map(|path| {
            std::fs::File::open(path)
                .with_context(|| format!("Failed to open weighting file: {}", path.display()))
        })
        .transpose()?;

    rank_from_readers(dataset, weights, request.score, &request.config)
}

/// Save a run summary as pretty JSON
pub fn save_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_select_mode() {
        let config = RunConfig::default();
        assert_eq!(select_mode(&config, false, false), RankingMode::Count);
        assert_eq!(select_mode(&config, false, true), RankingMode::Count);
        assert_eq!(select_mode(&config, true, false), RankingMode::Priority);
        assert_eq!(select_mode(&config, true, true), RankingMode::Score);

        let forced = RunConfig {
            mode: Some(RankingMode::Score),
            ..RunConfig::default()
        };
        assert_eq!(select_mode(&forced, false, false), RankingMode::Score);
    }

    #[test]
    fn test_save_summary() -> Result<()> {
        let summary = RunSummary {
            mode: RankingMode::Priority,
            buffs: 4,
            groups: 4,
            combinations: 4,
            cache_hits: 9,
            cache_misses: 4,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let file = NamedTempFile::new()?;
        save_summary(file.path(), &summary)?;

        let loaded: RunSummary = serde_json::from_str(&std::fs::read_to_string(file.path())?)?;
        assert_eq!(loaded.mode, RankingMode::Priority);
        assert_eq!(loaded.combinations, 4);
        Ok(())
    }
}
