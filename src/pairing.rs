//! Splitting result sets into normal and failed runs, and matching runs
//! of the two compared configurations by instance name.

use crate::error::{CompareError, Result};
use crate::record::{ErrorRun, NormalRun, RunRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// The two runs (one per configuration) for the same instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub instance_name: String,
    pub a: NormalRun,
    pub b: NormalRun,
}

/// Split a result set into finished runs and solver failures, keeping input order
pub fn classify(records: Vec<RunRecord>) -> (Vec<NormalRun>, Vec<ErrorRun>) {
    let mut normal = Vec::new();
    let mut errors = Vec::new();
    for record in records {
        match record {
            RunRecord::Normal(run) => normal.push(run),
            RunRecord::Error(run) => errors.push(run),
        }
    }
    (normal, errors)
}

/// Reject result sets that mention the same instance more than once
///
/// Failed and finished runs share one namespace: an instance that both
/// failed and finished in the same set is a duplicate as well.
pub fn validate_unique_names(set_name: &str, records: &[RunRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.instance_name()) {
            return Err(CompareError::DuplicateInstance {
                set: set_name.to_string(),
                instance: record.instance_name().to_string(),
            });
        }
    }
    Ok(())
}

/// Inner join of two sets of finished runs on instance name
///
/// Output follows the order of `a`. Runs of `a` without a counterpart in `b`
/// are dropped; see [`unmatched`] for listing them.
pub fn pair_results(a: &[NormalRun], b: &[NormalRun]) -> Vec<Pair> {
    let lookup: HashMap<&str, &NormalRun> = b
        .iter()
        .map(|run| (run.instance_name.as_str(), run))
        .collect();

    a.iter()
        .filter_map(|run_a| {
            lookup.get(run_a.instance_name.as_str()).map(|run_b| Pair {
                instance_name: run_a.instance_name.clone(),
                a: run_a.clone(),
                b: (*run_b).clone(),
            })
        })
        .collect()
}

/// Instance names present on only one side, each list in input order
pub fn unmatched(a: &[NormalRun], b: &[NormalRun]) -> (Vec<String>, Vec<String>) {
    let names_a: HashSet<&str> = a.iter().map(|r| r.instance_name.as_str()).collect();
    let names_b: HashSet<&str> = b.iter().map(|r| r.instance_name.as_str()).collect();

    let only_a = a
        .iter()
        .filter(|r| !names_b.contains(r.instance_name.as_str()))
        .map(|r| r.instance_name.clone())
        .collect();
    let only_b = b
        .iter()
        .filter(|r| !names_a.contains(r.instance_name.as_str()))
        .map(|r| r.instance_name.clone())
        .collect();

    (only_a, only_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HistoryPoint;

    fn run(name: &str, final_objective: f64) -> NormalRun {
        NormalRun::new(
            name,
            10.0,
            vec![HistoryPoint::measured(final_objective, 1.0)],
            vec![],
        )
    }

    fn failed(name: &str) -> ErrorRun {
        ErrorRun {
            instance_name: name.to_string(),
            reason: "solver crashed".to_string(),
            duration_seconds: None,
            solver: None,
        }
    }

    #[test]
    fn test_classify_routes_by_error_marker() {
        let records = vec![
            RunRecord::Normal(run("a", 1.0)),
            RunRecord::Error(failed("b")),
            RunRecord::Normal(run("c", 2.0)),
            RunRecord::Error(failed("d")),
        ];
        let (normal, errors) = classify(records);
        let normal_names: Vec<_> = normal.iter().map(|r| r.instance_name.as_str()).collect();
        let error_names: Vec<_> = errors.iter().map(|r| r.instance_name.as_str()).collect();
        assert_eq!(normal_names, vec!["a", "c"]);
        assert_eq!(error_names, vec!["b", "d"]);
    }

    #[test]
    fn test_classify_empty() {
        let (normal, errors) = classify(vec![]);
        assert!(normal.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_pair_results_inner_join_in_a_order() {
        let a = vec![run("x", 1.0), run("y", 2.0), run("z", 3.0)];
        let b = vec![run("z", 30.0), run("x", 10.0)];

        let pairs = pair_results(&a, &b);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].instance_name, "x");
        assert_eq!(pairs[0].a.final_objective(), Some(1.0));
        assert_eq!(pairs[0].b.final_objective(), Some(10.0));
        assert_eq!(pairs[1].instance_name, "z");
        assert!(pairs
            .iter()
            .all(|p| p.a.instance_name == p.instance_name && p.b.instance_name == p.instance_name));
    }

    #[test]
    fn test_pair_results_is_repeatable() {
        let a = vec![run("x", 1.0), run("y", 2.0)];
        let b = vec![run("y", 20.0), run("x", 10.0)];
        assert_eq!(pair_results(&a, &b), pair_results(&a, &b));
    }

    #[test]
    fn test_unmatched_lists_both_sides() {
        let a = vec![run("x", 1.0), run("only_a", 2.0)];
        let b = vec![run("only_b", 3.0), run("x", 1.0)];
        let (only_a, only_b) = unmatched(&a, &b);
        assert_eq!(only_a, vec!["only_a"]);
        assert_eq!(only_b, vec!["only_b"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let records = vec![
            RunRecord::Normal(run("x", 1.0)),
            RunRecord::Normal(run("x", 2.0)),
        ];
        let err = validate_unique_names("v2", &records).unwrap_err();
        match err {
            CompareError::DuplicateInstance { set, instance } => {
                assert_eq!(set, "v2");
                assert_eq!(instance, "x");
            }
            other => panic!("Expected DuplicateInstance, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_across_error_and_normal_rejected() {
        let records = vec![RunRecord::Normal(run("x", 1.0)), RunRecord::Error(failed("x"))];
        assert!(validate_unique_names("v1", &records).is_err());
    }

    #[test]
    fn test_unique_names_accepted() {
        let records = vec![RunRecord::Normal(run("x", 1.0)), RunRecord::Error(failed("y"))];
        assert!(validate_unique_names("v1", &records).is_ok());
    }
}
