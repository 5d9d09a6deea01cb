//! Ranking strategies over merged groups
//!
//! Each strategy is an [`Aggregate`] plus a three-way comparison of its
//! metric. "Better" combinations compare as `Less` so they sort first.
//! [`RankingMode`] picks the strategy once per run; [`rank_with`] is
//! monomorphized per strategy, so no per-comparison dispatch happens.

use crate::aggregate::{
    Aggregate, AggregateCalculator, CacheStats, Histogram, ItemCount, PriorityHistogram, ScoreSum,
};
use crate::merge::MergedGroup;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Ranking mode selected for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// Most distinct buffs first
    #[default]
    Count,
    /// Priority histogram, most high-priority buffs first
    Priority,
    /// Highest score sum first
    Score,
}

impl RankingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMode::Count => "count",
            RankingMode::Priority => "priority",
            RankingMode::Score => "score",
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(RankingMode::Count),
            "priority" | "histogram" => Ok(RankingMode::Priority),
            "score" => Ok(RankingMode::Score),
            other => Err(format!("unknown ranking mode: {other}")),
        }
    }
}

/// An aggregate with a total order on its metric
pub trait RankingStrategy: Aggregate {
    const MODE: RankingMode;

    /// `Less` means `a` ranks ahead of `b`.
    fn compare(&self, a: &Self::Metric, b: &Self::Metric) -> Ordering;

    /// Scalar value exposed in reports, if the metric has one.
    fn reported_value(&self, metric: &Self::Metric) -> Option<u128>;
}

impl RankingStrategy for ItemCount {
    const MODE: RankingMode = RankingMode::Count;

    fn compare(&self, a: &usize, b: &usize) -> Ordering {
        b.cmp(a)
    }

    fn reported_value(&self, metric: &usize) -> Option<u128> {
        Some(*metric as u128)
    }
}

impl RankingStrategy for PriorityHistogram {
    const MODE: RankingMode = RankingMode::Priority;

    fn compare(&self, a: &Histogram, b: &Histogram) -> Ordering {
        compare_histograms(a, b)
    }

    fn reported_value(&self, _metric: &Histogram) -> Option<u128> {
        None
    }
}

impl RankingStrategy for ScoreSum {
    const MODE: RankingMode = RankingMode::Score;

    fn compare(&self, a: &u128, b: &u128) -> Ordering {
        b.cmp(a)
    }

    fn reported_value(&self, metric: &u128) -> Option<u128> {
        Some(*metric)
    }
}

/// Compare priority levels 1.. first (more buffs at the first differing
/// level wins), then the unranked count at index 0, also descending.
pub fn compare_histograms(a: &[u32], b: &[u32]) -> Ordering {
    a.iter()
        .zip(b)
        .skip(1)
        .map(|(a_count, b_count)| b_count.cmp(a_count))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| b.first().cmp(&a.first()))
}

/// Merged groups in ranked order together with their metrics
#[derive(Debug, Clone)]
pub struct Ranked<M> {
    pub groups: Vec<(MergedGroup, M)>,
    pub cache_stats: CacheStats,
}

/// Stable sort of `groups` under `strategy`, memoizing metrics by name.
pub fn rank_with<S: RankingStrategy>(strategy: S, mut groups: Vec<MergedGroup>) -> Ranked<S::Metric> {
    let mut calculator = AggregateCalculator::new(strategy);

    groups.sort_by(|a, b| {
        let a_metric = calculator.compute_aggregate(a);
        let b_metric = calculator.compute_aggregate(b);
        calculator.aggregate().compare(&a_metric, &b_metric)
    });

    let groups: Vec<(MergedGroup, S::Metric)> = groups
        .into_iter()
        .map(|group| {
            let metric = calculator.compute_aggregate(&group);
            (group, metric)
        })
        .collect();

    let cache_stats = calculator.cache().stats();
    debug!(
        mode = %S::MODE,
        hits = cache_stats.hits,
        misses = cache_stats.misses,
        "ranked combinations"
    );

    Ranked {
        groups,
        cache_stats,
    }
}
