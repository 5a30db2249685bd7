// Per-pair rescaling by a shared best-known value
//
// Both runs of a pair are divided by the same number, the best final
// objective either of them reached, so a value of 1.0 means "as good as the
// best run of this instance" regardless of the instance's magnitude.

use crate::error::{CompareError, HistoryKind, Result};
use crate::normalize::config::{CompareConfig, ObjectiveSense};
use crate::normalize::trim::trim_history;
use crate::pairing::Pair;
use crate::record::{NormalRun, TimedValue};
use serde::Serialize;

/// A value divided by the pair's best-known value, at a time in seconds
pub type NormalizedPoint = TimedValue;

/// All four normalized series of one eligible pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPair {
    pub best_solution: f64,
    pub objective_a: Vec<NormalizedPoint>,
    pub objective_b: Vec<NormalizedPoint>,
    pub lower_bound_a: Vec<NormalizedPoint>,
    pub lower_bound_b: Vec<NormalizedPoint>,
}

/// Whether both runs carry purely numeric, non-empty objective histories
///
/// Lower bound histories must be numeric too but may be empty.
pub fn can_be_normalized(pair: &Pair) -> bool {
    pair.a.is_fully_measured()
        && pair.b.is_fully_measured()
        && !pair.a.objective_history.is_empty()
        && !pair.b.objective_history.is_empty()
}

fn final_value(run: &NormalRun) -> Option<f64> {
    run.objective_history.last().and_then(|p| p.value.as_f64())
}

/// The better of the two runs' final objectives
///
/// When only one side has a final objective, that value is used. Returns
/// `None` only when neither side has one.
pub fn best_solution(pair: &Pair, sense: ObjectiveSense) -> Option<f64> {
    match (final_value(&pair.a), final_value(&pair.b)) {
        (Some(a), Some(b)) => Some(sense.best(a, b)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Divide a history by `best_solution` and extend it to the run's end
///
/// A zero scale is replaced by 1. A trailing point repeating the last value
/// at `duration_seconds` is appended so the series covers the whole run; it
/// is never placed before the last real point. An empty history stays empty.
pub fn normalize_history(
    history: &[TimedValue],
    best_solution: f64,
    duration_seconds: f64,
) -> Vec<NormalizedPoint> {
    let scale = if best_solution == 0.0 {
        1.0
    } else {
        best_solution
    };

    let mut normalized: Vec<NormalizedPoint> = history
        .iter()
        .map(|p| NormalizedPoint::new(p.value / scale, p.at_seconds))
        .collect();

    if let Some(last) = normalized.last().copied() {
        normalized.push(NormalizedPoint::new(
            last.value,
            duration_seconds.max(last.at_seconds),
        ));
    }

    normalized
}

fn normalize_run_history(
    run: &NormalRun,
    kind: HistoryKind,
    best: f64,
    config: &CompareConfig,
) -> Result<Vec<NormalizedPoint>> {
    let raw = run.numeric_history(kind)?;
    let trimmed = trim_history(&raw, config.min_time_cutoff);

    if kind == HistoryKind::Objective && trimmed.is_empty() {
        return Err(CompareError::EmptyHistory {
            instance: run.instance_name.clone(),
            history: kind,
        });
    }

    Ok(normalize_history(&trimmed, best, run.duration_seconds))
}

/// Trim and normalize all four histories of an eligible pair
///
/// Fails when the pair is not eligible: a non-numeric entry or an empty
/// objective history is an invariant violation at this point.
pub fn normalize_pair(pair: &Pair, config: &CompareConfig) -> Result<NormalizedPair> {
    let best = best_solution(pair, config.objective_sense).ok_or_else(|| {
        CompareError::EmptyHistory {
            instance: pair.instance_name.clone(),
            history: HistoryKind::Objective,
        }
    })?;

    Ok(NormalizedPair {
        best_solution: best,
        objective_a: normalize_run_history(&pair.a, HistoryKind::Objective, best, config)?,
        objective_b: normalize_run_history(&pair.b, HistoryKind::Objective, best, config)?,
        lower_bound_a: normalize_run_history(&pair.a, HistoryKind::LowerBound, best, config)?,
        lower_bound_b: normalize_run_history(&pair.b, HistoryKind::LowerBound, best, config)?,
    })
}
