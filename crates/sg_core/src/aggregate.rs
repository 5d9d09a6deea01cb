//! Aggregate metrics over merged groups, memoized by merged-group name

use crate::merge::MergedGroup;
use crate::model::MAX_PRIORITY;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Per-priority buff counts; index 0 holds unranked buffs
pub type Histogram = Arc<[u32]>;

/// A metric computed from the buffs of a merged group
///
/// `compute` must be a pure function of the group's buffs so a cached value
/// is always identical to a fresh one.
pub trait Aggregate {
    type Metric: Clone + PartialEq + std::fmt::Debug;

    fn compute(&self, group: &MergedGroup) -> Self::Metric;
}

/// Number of distinct buffs
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemCount;

impl Aggregate for ItemCount {
    type Metric = usize;

    fn compute(&self, group: &MergedGroup) -> usize {
        group.len()
    }
}

/// Histogram of buff priorities
#[derive(Debug, Clone, Copy)]
pub struct PriorityHistogram {
    pub max_priority: usize,
}

impl PriorityHistogram {
    pub fn new(max_priority: usize) -> Self {
        Self { max_priority }
    }
}

impl Default for PriorityHistogram {
    fn default() -> Self {
        Self::new(MAX_PRIORITY)
    }
}

impl Aggregate for PriorityHistogram {
    type Metric = Histogram;

    /// Every buff priority must be below `max_priority`
    /// (see [`Catalog::check_priorities`](crate::model::Catalog::check_priorities));
    /// `rank_catalog` checks this before ranking. Out-of-range buffs are not counted.
    fn compute(&self, group: &MergedGroup) -> Histogram {
        let mut counts = vec![0u32; self.max_priority];
        for item in group.items() {
            let priority = item.priority() as usize;
            debug_assert!(
                priority < self.max_priority,
                "priority {priority} of buff {:?} does not fit a histogram of {}",
                item.name,
                self.max_priority
            );
            if let Some(slot) = counts.get_mut(priority) {
                *slot += 1;
            }
        }
        counts.into()
    }
}

/// Sum of buff scores
///
/// Summed as `u128` so any number of `u64` scores adds up without wrapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreSum;

impl Aggregate for ScoreSum {
    type Metric = u128;

    fn compute(&self, group: &MergedGroup) -> u128 {
        group.items().iter().map(|item| u128::from(item.score())).sum()
    }
}

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Read-through memo of metrics keyed by merged-group name
///
/// There is no invalidation; create a fresh cache per run.
#[derive(Debug, Clone)]
pub struct AggregateCache<M> {
    entries: FxHashMap<String, M>,
    stats: CacheStats,
}

impl<M: Clone> AggregateCache<M> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            stats: CacheStats::default(),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_compute(&mut self, key: &str, compute: impl FnOnce() -> M) -> M {
        if let Some(value) = self.entries.get(key) {
            self.stats.hits += 1;
            return value.clone();
        }
        self.stats.misses += 1;
        let value = compute();
        self.entries.insert(key.to_string(), value.clone());
        value
    }

    pub fn get(&self, key: &str) -> Option<&M> {
        self.entries.get(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: Clone> Default for AggregateCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// An [`Aggregate`] paired with its own cache
#[derive(Debug, Clone)]
pub struct AggregateCalculator<A: Aggregate> {
    aggregate: A,
    cache: AggregateCache<A::Metric>,
}

impl<A: Aggregate> AggregateCalculator<A> {
    pub fn new(aggregate: A) -> Self {
        Self {
            aggregate,
            cache: AggregateCache::new(),
        }
    }

    pub fn aggregate(&self) -> &A {
        &self.aggregate
    }

    pub fn compute_aggregate(&mut self, group: &MergedGroup) -> A::Metric {
        let aggregate = &self.aggregate;
        self.cache
            .get_or_compute(&group.name, || aggregate.compute(group))
    }

    pub fn cache(&self) -> &AggregateCache<A::Metric> {
        &self.cache
    }
}
