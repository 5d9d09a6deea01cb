//! Pipeline entry point: generate → merge → rank → assemble

use crate::aggregate::{ItemCount, PriorityHistogram, ScoreSum};
use crate::combination::triple_count;
use crate::config::RunConfig;
use crate::error::Result;
use crate::merge::{merge_all, MergedGroup};
use crate::model::Catalog;
use crate::ranking::{rank_with, RankingMode, RankingStrategy};
use crate::report::{RankedCombination, RankingReport};
use tracing::{info, warn};

/// Rank every triple of the catalog's groups under `mode`.
///
/// Fails before any work is done if fewer than three groups exist or a
/// priority does not fit the configured histogram.
pub fn rank_catalog(catalog: &Catalog, mode: RankingMode, config: &RunConfig) -> Result<RankingReport> {
    config.validate()?;
    catalog.check_priorities(config.max_priority)?;

    let triples = triple_count(catalog.groups().len());
    if triples > config.cubic_warning_threshold {
        warn!(
            groups = catalog.groups().len(),
            triples,
            threshold = config.cubic_warning_threshold,
            "combination count grows cubically with the number of groups"
        );
    }

    let merged = merge_all(catalog.groups())?;

    let report = match mode {
        RankingMode::Count => assemble(
            ItemCount,
            merged,
            config.show_count.then_some("Count"),
        ),
        RankingMode::Priority => {
            assemble(PriorityHistogram::new(config.max_priority), merged, None)
        }
        RankingMode::Score => assemble(ScoreSum, merged, Some("Score")),
    };

    info!(
        mode = %mode,
        combinations = report.len(),
        cache_hits = report.cache_stats.hits,
        cache_misses = report.cache_stats.misses,
        "ranking complete"
    );

    Ok(report)
}

fn assemble<S: RankingStrategy + Clone>(
    strategy: S,
    merged: Vec<MergedGroup>,
    aggregate_column: Option<&'static str>,
) -> RankingReport {
    let ranked = rank_with(strategy.clone(), merged);
    let combinations = ranked
        .groups
        .iter()
        .map(|(group, metric)| {
            RankedCombination::new(group, strategy.reported_value(metric), S::MODE)
        })
        .collect();

    RankingReport {
        mode: S::MODE,
        combinations,
        cache_stats: ranked.cache_stats,
        aggregate_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::filter::ItemFilter;
    use crate::model::{CatalogBuilder, Item, Weight};

    fn catalog(groups: &[&str], items: &[(&str, Vec<usize>)]) -> CatalogBuilder {
        let mut builder = CatalogBuilder::new(groups.iter().map(|g| g.to_string()).collect());
        for (name, memberships) in items {
            builder.add_item(Item::new(*name), memberships.clone()).unwrap();
        }
        builder
    }

    #[test]
    fn test_count_mode_scenario() {
        let catalog = catalog(
            &["A", "B", "C", "D"],
            &[("x", vec![0, 3]), ("y", vec![0, 1]), ("z", vec![1, 2]), ("w", vec![2, 3])],
        )
        .build(&ItemFilter::default());

        let report = rank_catalog(&catalog, RankingMode::Count, &RunConfig::default()).unwrap();
        assert_eq!(report.len(), 4);
        assert_eq!(report.aggregate_column, None);

        let first = &report.combinations[0];
        assert_eq!(first.name(), "A,B,C");
        assert_eq!(first.aggregate, Some(4));
        assert_eq!(first.items, vec!["w", "x", "y", "z"]);
    }

    #[test]
    fn test_show_count_column() {
        let catalog = catalog(&["A", "B", "C"], &[("x", vec![0])]).build(&ItemFilter::default());
        let config = RunConfig {
            show_count: true,
            ..RunConfig::default()
        };
        let report = rank_catalog(&catalog, RankingMode::Count, &config).unwrap();
        assert_eq!(report.header()[3], "Count");
        assert_eq!(report.row(&report.combinations[0]), vec!["A", "B", "C", "1", "x"]);
    }

    #[test]
    fn test_score_mode_scenario() {
        let mut builder = catalog(
            &["A", "B", "C"],
            &[("p", vec![0]), ("q", vec![0]), ("r", vec![1])],
        );
        builder.set_weight("p", Weight::Score(5));
        builder.set_weight("q", Weight::Score(3));
        builder.set_weight("r", Weight::Score(10));
        let catalog = builder.build(&ItemFilter::default());

        let report = rank_catalog(&catalog, RankingMode::Score, &RunConfig::default()).unwrap();
        assert_eq!(report.header()[3], "Score");
        assert_eq!(report.combinations[0].aggregate, Some(18));
        assert_eq!(
            report.row(&report.combinations[0]),
            vec!["A", "B", "C", "18", "p", "q", "r"]
        );
    }

    #[test]
    fn test_priority_mode_orders_buffs() {
        let mut builder = catalog(
            &["A", "B", "C", "D"],
            &[("a", vec![0]), ("b", vec![1]), ("c", vec![2]), ("d", vec![3])],
        );
        builder.set_weight("a", Weight::Priority(3));
        builder.set_weight("b", Weight::Priority(1));
        builder.set_weight("d", Weight::Priority(1));
        let catalog = builder.build(&ItemFilter::default());

        let report =
            rank_catalog(&catalog, RankingMode::Priority, &RunConfig::default()).unwrap();
        assert_eq!(report.combinations[0].name(), "A,B,D");
        assert_eq!(report.combinations[0].items, vec!["b", "d", "a"]);
        assert_eq!(report.combinations[0].aggregate, None);
        assert_eq!(report.combinations[1].name(), "B,C,D");
        // identical histograms keep generator order
        assert_eq!(report.combinations[2].name(), "A,B,C");
        assert_eq!(report.combinations[3].name(), "A,C,D");
    }

    #[test]
    fn test_not_enough_groups() {
        let catalog = catalog(&["A", "B"], &[("x", vec![0, 1])]).build(&ItemFilter::default());
        let err = rank_catalog(&catalog, RankingMode::Count, &RunConfig::default()).unwrap_err();
        assert!(err.is_precondition());
        assert!(matches!(err, CoreError::NotEnoughGroups { found: 2, required: 3 }));
    }

    #[test]
    fn test_priority_out_of_range() {
        let mut builder = catalog(&["A", "B", "C"], &[("x", vec![0])]);
        builder.set_weight("x", Weight::Priority(12));
        let catalog = builder.build(&ItemFilter::default());
        let config = RunConfig {
            max_priority: 10,
            ..RunConfig::default()
        };
        let err = rank_catalog(&catalog, RankingMode::Priority, &config).unwrap_err();
        assert!(matches!(err, CoreError::PriorityOutOfRange { .. }));
    }
}
