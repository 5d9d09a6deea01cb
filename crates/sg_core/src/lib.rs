//! # sg_core - Skill Group Combination Ranking Engine
//!
//! Ranks every combination of three skill groups by how well the buffs they
//! contain complement each other.
//!
//! ## Pipeline
//! - Combination generator: all C(N, 3) group triples, lexicographic order
//! - Merger: deduplicated buff union per triple, named `g1,g2,g3`
//! - Aggregate calculator: count / priority histogram / score sum, memoized
//!   by merged-group name
//! - Ranking: stable sort under the selected strategy
//! - Report: rows of string fields for CSV output
//!
//! The crate does no file I/O except reading an optional YAML config.

pub mod aggregate;
pub mod combination;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod merge;
pub mod model;
pub mod ranking;
pub mod report;

pub use aggregate::{
    Aggregate, AggregateCache, AggregateCalculator, CacheStats, Histogram, ItemCount,
    PriorityHistogram, ScoreSum,
};
pub use combination::{combinations_of_three, triple_count, Triples};
pub use config::RunConfig;
pub use engine::rank_catalog;
pub use error::{CoreError, Result};
pub use filter::ItemFilter;
pub use merge::{merge_all, merge_three, MergedGroup};
pub use model::{Catalog, CatalogBuilder, Category, DamageType, Group, Item, Weight, MAX_PRIORITY};
pub use ranking::{compare_histograms, rank_with, RankingMode, RankingStrategy};
pub use report::{RankedCombination, RankingReport};
