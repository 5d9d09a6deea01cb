//! Merging three skill groups into one combination

use crate::combination::{triple_count, Triples};
use crate::error::Result;
use crate::model::{Group, Item};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::debug;

/// Separator between source group names in a merged name
pub const NAME_SEPARATOR: &str = ",";

/// Union of exactly three source groups
///
/// `name` is the cache key for aggregate metrics.
#[derive(Debug, Clone)]
pub struct MergedGroup {
    pub name: String,
    sources: [String; 3],
    items: Vec<Arc<Item>>,
}

impl MergedGroup {
    /// Source group names in generator order
    pub fn sources(&self) -> &[String; 3] {
        &self.sources
    }

    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Alphabetically sorted buff names
    pub fn sorted_item_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.items.iter().map(|item| item.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Union of three groups; duplicate buffs are kept once (first seen wins).
pub fn merge_three(a: &Group, b: &Group, c: &Group) -> MergedGroup {
    let sources = [a.name.clone(), b.name.clone(), c.name.clone()];
    let name = sources.join(NAME_SEPARATOR);

    let capacity = a.len() + b.len() + c.len();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    seen.reserve(capacity);
    let mut items = Vec::with_capacity(capacity);

    for group in [a, b, c] {
        for item in group.items() {
            if seen.insert(item.name.as_str()) {
                items.push(Arc::clone(item));
            }
        }
    }

    MergedGroup {
        name,
        sources,
        items,
    }
}

/// Merge every triple of `groups`, in generator order.
///
/// Triples are independent, so they are merged in parallel; the output
/// order still follows the generator.
pub fn merge_all(groups: &[Group]) -> Result<Vec<MergedGroup>> {
    let triples: Vec<[usize; 3]> = Triples::new(groups.len())?.collect();
    debug!(
        groups = groups.len(),
        triples = triple_count(groups.len()),
        "merging skill group triples"
    );

    Ok(triples
        .par_iter()
        .map(|&[i, j, k]| merge_three(&groups[i], &groups[j], &groups[k]))
        .collect())
}
