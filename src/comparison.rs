//! Comparison pipeline
//!
//! Runs classification, pairing, eligibility, trimming, normalization and
//! aggregation over two result sets and collects everything a report
//! renderer needs into one [`Comparison`].

use crate::error::Result;
use crate::filter::InstanceFilter;
use crate::normalize::{
    best_solution, can_be_normalized, normalize_pair, AggregateCurve, CompareConfig,
    NormalizedPair,
};
use crate::pairing::{classify, pair_results, unmatched, validate_unique_names, Pair};
use crate::record::{ErrorRun, NormalRun, RunRecord};
use serde::Serialize;

/// One named collection of run records (one solver configuration)
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub name: String,
    pub records: Vec<RunRecord>,
}

impl ResultSet {
    pub fn new(name: impl Into<String>, records: Vec<RunRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

/// History-free view of one run for the summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub duration_seconds: f64,
    pub objective: Option<f64>,
    pub lower_bound: Option<f64>,
    pub nb_solutions: Option<u64>,
    pub solver: Option<String>,
}

impl From<&NormalRun> for RunSummary {
    fn from(run: &NormalRun) -> Self {
        Self {
            duration_seconds: run.duration_seconds,
            objective: run.final_objective(),
            lower_bound: run.final_lower_bound(),
            nb_solutions: run.nb_solutions,
            solver: run.solver.clone(),
        }
    }
}

/// Summary table row for one paired instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSummary {
    pub instance_name: String,
    pub normalizable: bool,
    pub best_solution: Option<f64>,
    pub a: RunSummary,
    pub b: RunSummary,
}

/// Full pair plus its normalized series, if the pair is eligible
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDetail {
    pub pair: Pair,
    pub normalized: Option<NormalizedPair>,
}

/// Everything a report renderer consumes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub title: String,
    pub name_a: String,
    pub name_b: String,
    pub config: CompareConfig,
    pub summary: Vec<PairSummary>,
    pub details: Vec<PairDetail>,
    pub aggregate: AggregateCurve,
    pub errors_a: Vec<ErrorRun>,
    pub errors_b: Vec<ErrorRun>,
    pub unmatched_a: Vec<String>,
    pub unmatched_b: Vec<String>,
}

impl Comparison {
    /// Number of pairs that took part in the aggregate
    pub fn normalizable_count(&self) -> usize {
        self.details
            .iter()
            .filter(|d| d.normalized.is_some())
            .count()
    }
}

/// Compare two result sets
///
/// # Example
/// ```
/// use cotejo::comparison::{compare, ResultSet};
/// use cotejo::filter::InstanceFilter;
/// use cotejo::normalize::CompareConfig;
/// use cotejo::record::{HistoryPoint, NormalRun, RunRecord};
///
/// let run = |v: f64| {
///     RunRecord::Normal(NormalRun::new("demo", 5.0, vec![HistoryPoint::measured(v, 2.0)], vec![]))
/// };
/// let comparison = compare(
///     "demo",
///     ResultSet::new("v1", vec![run(8.0)]),
///     ResultSet::new("v2", vec![run(7.0)]),
///     &InstanceFilter::all(),
///     &CompareConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(comparison.summary[0].best_solution, Some(7.0));
/// ```
pub fn compare(
    title: &str,
    set_a: ResultSet,
    set_b: ResultSet,
    filter: &InstanceFilter,
    config: &CompareConfig,
) -> Result<Comparison> {
    config.validate()?;

    let records_a = filter.apply(set_a.records);
    let records_b = filter.apply(set_b.records);
    validate_unique_names(&set_a.name, &records_a)?;
    validate_unique_names(&set_b.name, &records_b)?;

    let (normal_a, errors_a) = classify(records_a);
    let (normal_b, errors_b) = classify(records_b);
    tracing::debug!(
        "{}: {} normal, {} errors; {}: {} normal, {} errors",
        set_a.name,
        normal_a.len(),
        errors_a.len(),
        set_b.name,
        normal_b.len(),
        errors_b.len()
    );

    let pairs = pair_results(&normal_a, &normal_b);
    let (unmatched_a, unmatched_b) = unmatched(&normal_a, &normal_b);
    if !unmatched_a.is_empty() || !unmatched_b.is_empty() {
        tracing::warn!(
            "{} instances only in {}, {} only in {}",
            unmatched_a.len(),
            set_a.name,
            unmatched_b.len(),
            set_b.name
        );
    }

    let mut summary = Vec::with_capacity(pairs.len());
    let mut details = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let normalized = if can_be_normalized(&pair) {
            Some(normalize_pair(&pair, config)?)
        } else {
            tracing::warn!(
                "Instance {} cannot be normalized; excluded from the aggregate",
                pair.instance_name
            );
            None
        };

        summary.push(PairSummary {
            instance_name: pair.instance_name.clone(),
            normalizable: normalized.is_some(),
            best_solution: normalized
                .as_ref()
                .map(|n| n.best_solution)
                .or_else(|| best_solution(&pair, config.objective_sense)),
            a: RunSummary::from(&pair.a),
            b: RunSummary::from(&pair.b),
        });
        details.push(PairDetail { pair, normalized });
    }

    let eligible: Vec<NormalizedPair> = details
        .iter()
        .filter_map(|d| d.normalized.clone())
        .collect();
    let aggregate = AggregateCurve::from_pairs(&eligible, config);

    tracing::info!(
        "Compared {} pairs ({} normalizable)",
        details.len(),
        eligible.len()
    );

    Ok(Comparison {
        title: title.to_string(),
        name_a: set_a.name,
        name_b: set_b.name,
        config: config.clone(),
        summary,
        details,
        aggregate,
        errors_a,
        errors_b,
        unmatched_a,
        unmatched_b,
    })
}
