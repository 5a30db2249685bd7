// Sweep-line merge of normalized series into one mean curve
//
// Each series is turned into value-change events (time, delta). All events
// are sorted by time and folded into a running sum; after every event the
// current mean is emitted. Cost is O(E log E) for E events in total.

use crate::error::HistoryKind;
use crate::normalize::config::{CompareConfig, ObjectiveSense};
use crate::normalize::scale::{NormalizedPair, NormalizedPoint};
use serde::Serialize;

/// Mean normalized curves over all eligible pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCurve {
    pub objective_a: Vec<NormalizedPoint>,
    pub objective_b: Vec<NormalizedPoint>,
    pub lower_bound_a: Vec<NormalizedPoint>,
    pub lower_bound_b: Vec<NormalizedPoint>,
}

#[derive(Debug, Clone, Copy)]
struct ChangeEvent {
    at_seconds: f64,
    delta: f64,
}

/// Worst first value over a set of series; empty series are ignored
pub fn worst_leading_value(
    sequences: &[&[NormalizedPoint]],
    kind: HistoryKind,
    sense: ObjectiveSense,
) -> Option<f64> {
    sequences
        .iter()
        .filter_map(|seq| seq.first())
        .map(|p| p.value)
        .reduce(|x, y| sense.worst(kind, x, y))
}

/// Events of one series once it is prefixed with `(0, leading)`
fn change_events(
    sequence: &[NormalizedPoint],
    leading: f64,
) -> impl Iterator<Item = ChangeEvent> + '_ {
    let previous = std::iter::once(leading).chain(sequence.iter().map(|p| p.value));
    sequence
        .iter()
        .zip(previous)
        .map(|(current, prev)| ChangeEvent {
            at_seconds: current.at_seconds,
            delta: current.value - prev,
        })
}

/// Mean of all non-empty series over time
///
/// Every series starts from the shared `leading` value at time 0. Events
/// before `suppression_window` seconds update the running sum but are not
/// emitted. Events at equal times keep their input order.
///
/// # Example
/// ```
/// use cotejo::normalize::{aggregate_series, NormalizedPoint};
///
/// let first = vec![NormalizedPoint::new(2.0, 0.0), NormalizedPoint::new(1.0, 3.0)];
/// let second = vec![NormalizedPoint::new(2.0, 0.0), NormalizedPoint::new(1.5, 5.0)];
/// let curve = aggregate_series(&[&first[..], &second[..]], 2.0, 1.0);
/// assert_eq!(
///     curve,
///     vec![NormalizedPoint::new(1.5, 3.0), NormalizedPoint::new(1.25, 5.0)]
/// );
/// ```
pub fn aggregate_series(
    sequences: &[&[NormalizedPoint]],
    leading: f64,
    suppression_window: f64,
) -> Vec<NormalizedPoint> {
    let contributing: Vec<&[NormalizedPoint]> = sequences
        .iter()
        .copied()
        .filter(|seq| !seq.is_empty())
        .collect();

    if contributing.is_empty() {
        return Vec::new();
    }

    let count = contributing.len() as f64;
    let initial_sum: f64 = contributing.iter().map(|_| leading).sum();

    let mut events: Vec<ChangeEvent> = contributing
        .iter()
        .flat_map(|seq| change_events(seq, leading))
        .collect();
    // Vec::sort_by is stable
    events.sort_by(|x, y| x.at_seconds.total_cmp(&y.at_seconds));

    let (_, points) = events.iter().fold(
        (initial_sum, Vec::with_capacity(events.len())),
        |(sum, mut points), event| {
            let sum = sum + event.delta;
            if event.at_seconds >= suppression_window {
                points.push(NormalizedPoint::new(sum / count, event.at_seconds));
            }
            (sum, points)
        },
    );

    points
}

fn curve_for(
    series_a: &[&[NormalizedPoint]],
    series_b: &[&[NormalizedPoint]],
    kind: HistoryKind,
    config: &CompareConfig,
) -> (Vec<NormalizedPoint>, Vec<NormalizedPoint>) {
    // One leading value for both configurations so their curves start level
    let all: Vec<&[NormalizedPoint]> = series_a.iter().chain(series_b).copied().collect();
    let Some(leading) = worst_leading_value(&all, kind, config.objective_sense) else {
        return (Vec::new(), Vec::new());
    };

    (
        aggregate_series(series_a, leading, config.suppression_window),
        aggregate_series(series_b, leading, config.suppression_window),
    )
}

impl AggregateCurve {
    /// Aggregate the normalized series of all eligible pairs
    pub fn from_pairs(pairs: &[NormalizedPair], config: &CompareConfig) -> Self {
        let objective_a: Vec<&[NormalizedPoint]> =
            pairs.iter().map(|p| p.objective_a.as_slice()).collect();
        let objective_b: Vec<&[NormalizedPoint]> =
            pairs.iter().map(|p| p.objective_b.as_slice()).collect();
        let lower_bound_a: Vec<&[NormalizedPoint]> =
            pairs.iter().map(|p| p.lower_bound_a.as_slice()).collect();
        let lower_bound_b: Vec<&[NormalizedPoint]> =
            pairs.iter().map(|p| p.lower_bound_b.as_slice()).collect();

        let (objective_a, objective_b) =
            curve_for(&objective_a, &objective_b, HistoryKind::Objective, config);
        let (lower_bound_a, lower_bound_b) =
            curve_for(&lower_bound_a, &lower_bound_b, HistoryKind::LowerBound, config);

        tracing::debug!(
            "Aggregated {} pairs into {}/{} objective points",
            pairs.len(),
            objective_a.len(),
            objective_b.len()
        );

        Self {
            objective_a,
            objective_b,
            lower_bound_a,
            lower_bound_b,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.objective_a.is_empty()
            && self.objective_b.is_empty()
            && self.lower_bound_a.is_empty()
            && self.lower_bound_b.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn np(value: f64, at: f64) -> NormalizedPoint {
        NormalizedPoint::new(value, at)
    }

    #[test]
    fn test_mean_of_two_series() {
        let first = vec![np(2.0, 0.0), np(1.0, 3.0)];
        let second = vec![np(2.0, 0.0), np(1.5, 5.0)];
        let curve = aggregate_series(&[&first[..], &second[..]], 2.0, 1.0);
        assert_eq!(curve, vec![np(1.5, 3.0), np(1.25, 5.0)]);
    }

    #[test]
    fn test_events_before_window_are_not_emitted() {
        let only = vec![np(3.0, 0.5), np(2.0, 0.9), np(1.0, 2.0)];
        let curve = aggregate_series(&[&only[..]], 3.0, 1.0);
        assert_eq!(curve, vec![np(1.0, 2.0)]);
    }

    #[test]
    fn test_zero_window_emits_everything() {
        let only = vec![np(3.0, 0.0), np(2.0, 0.5)];
        let curve = aggregate_series(&[&only[..]], 4.0, 0.0);
        assert_eq!(curve, vec![np(3.0, 0.0), np(2.0, 0.5)]);
    }

    #[test]
    fn test_leading_value_applies_until_first_point() {
        // Second series starts late; until then it counts at the leading value
        let early = vec![np(1.0, 1.0), np(1.0, 4.0)];
        let late = vec![np(2.0, 2.0), np(2.0, 4.0)];
        let curve = aggregate_series(&[&early[..], &late[..]], 3.0, 1.0);
        assert_eq!(curve[0], np(2.0, 1.0));
        assert_eq!(curve[1], np(1.5, 2.0));
    }

    #[test]
    fn test_empty_series_are_skipped() {
        let only = vec![np(2.0, 0.0), np(1.0, 2.0)];
        let empty: Vec<NormalizedPoint> = vec![];
        let curve = aggregate_series(&[&only[..], &empty[..]], 2.0, 1.0);
        assert_eq!(curve, vec![np(1.0, 2.0)]);
    }

    #[test]
    fn test_no_series() {
        assert!(aggregate_series(&[], 1.0, 1.0).is_empty());
        let empty: Vec<NormalizedPoint> = vec![];
        assert!(aggregate_series(&[&empty[..]], 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_equal_times_keep_input_order() {
        let first = vec![np(1.0, 0.0), np(0.5, 2.0)];
        let second = vec![np(1.0, 0.0), np(0.75, 2.0)];
        let curve = aggregate_series(&[&first[..], &second[..]], 1.0, 1.0);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0], np(0.75, 2.0));
        assert_eq!(curve[1], np(0.625, 2.0));
    }

    #[test]
    fn test_worst_leading_value() {
        let a = vec![np(1.4, 0.5)];
        let b = vec![np(1.9, 1.0)];
        let empty: Vec<NormalizedPoint> = vec![];
        let series: Vec<&[NormalizedPoint]> = vec![&a[..], &empty[..], &b[..]];

        assert_eq!(
            worst_leading_value(&series, HistoryKind::Objective, ObjectiveSense::Minimize),
            Some(1.9)
        );
        assert_eq!(
            worst_leading_value(&series, HistoryKind::LowerBound, ObjectiveSense::Minimize),
            Some(1.4)
        );
        assert_eq!(
            worst_leading_value(&[], HistoryKind::Objective, ObjectiveSense::Minimize),
            None
        );
    }
}
