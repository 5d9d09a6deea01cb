//! Report assembly: ranked combinations → rows of string fields

use crate::aggregate::CacheStats;
use crate::merge::MergedGroup;
use crate::model::Item;
use crate::ranking::RankingMode;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

pub const GROUP_HEADERS: [&str; 3] = ["Group Name 1", "Group Name 2", "Group Name 3"];
pub const BUFFS_HEADER: &str = "Buffs";

/// One ranked combination, ready for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCombination {
    pub sources: [String; 3],
    /// Count or score, when the ranking mode has a scalar metric
    pub aggregate: Option<u128>,
    /// Buff names in output order
    pub items: Vec<String>,
}

impl RankedCombination {
    pub fn new(group: &MergedGroup, aggregate: Option<u128>, mode: RankingMode) -> Self {
        Self {
            sources: group.sources().clone(),
            aggregate,
            items: ordered_item_names(group.items(), mode),
        }
    }

    pub fn name(&self) -> String {
        self.sources.join(crate::merge::NAME_SEPARATOR)
    }
}

/// Ranked output of one run
#[derive(Debug, Clone)]
pub struct RankingReport {
    pub mode: RankingMode,
    pub combinations: Vec<RankedCombination>,
    pub cache_stats: CacheStats,
    /// Header of the aggregate column, when one is emitted
    pub aggregate_column: Option<&'static str>,
}

impl RankingReport {
    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = GROUP_HEADERS.iter().map(|h| h.to_string()).collect();
        if let Some(column) = self.aggregate_column {
            header.push(column.to_string());
        }
        header.push(BUFFS_HEADER.to_string());
        header
    }

    /// `[group1, group2, group3, (aggregate), buff1, buff2, ...]`
    pub fn row(&self, combination: &RankedCombination) -> Vec<String> {
        let mut row = Vec::with_capacity(combination.items.len() + 4);
        row.extend(combination.sources.iter().cloned());
        if self.aggregate_column.is_some() {
            row.push(
                combination
                    .aggregate
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            );
        }
        row.extend(combination.items.iter().cloned());
        row
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.combinations.iter().map(|c| self.row(c))
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

/// Unranked (0) sorts after every ranked priority.
fn zero_as_max(priority: u32) -> u32 {
    if priority == 0 {
        u32::MAX
    } else {
        priority
    }
}

fn compare_by_priority_then_name(a: &Item, b: &Item) -> Ordering {
    zero_as_max(a.priority())
        .cmp(&zero_as_max(b.priority()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Priority mode lists the most important buffs first; other modes sort by name.
pub fn ordered_item_names(items: &[Arc<Item>], mode: RankingMode) -> Vec<String> {
    let mut sorted: Vec<&Item> = items.iter().map(|item| item.as_ref()).collect();
    match mode {
        RankingMode::Priority => sorted.sort_by(|a, b| compare_by_priority_then_name(a, b)),
        RankingMode::Count | RankingMode::Score => sorted.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    sorted.into_iter().map(|item| item.name.clone()).collect()
}
