// History trimming before the warm-up cutoff
//
// Early solver output swings wildly (the first incumbent is often orders of
// magnitude off) and would dominate the mean curve. Everything reported
// before the cutoff is collapsed into the single value still in effect when
// the cutoff is reached.

use crate::record::TimedValue;

/// Drop history entries before `min_time_cutoff`, keeping the last of them
///
/// Entries before the cutoff are held back and only the most recent one
/// survives. It is emitted just before the first entry at or after the
/// cutoff, or at the end if no such entry exists. From the first entry at or
/// after the cutoff on, the input passes through unchanged.
///
/// # Example
/// ```
/// use cotejo::normalize::trim_history;
/// use cotejo::record::TimedValue;
///
/// let history = vec![
///     TimedValue::new(10.0, 0.0),
///     TimedValue::new(8.0, 0.7),
///     TimedValue::new(5.0, 2.0),
/// ];
/// let trimmed = trim_history(&history, 1.0);
/// assert_eq!(trimmed, vec![TimedValue::new(8.0, 0.7), TimedValue::new(5.0, 2.0)]);
/// ```
pub fn trim_history(history: &[TimedValue], min_time_cutoff: f64) -> Vec<TimedValue> {
    let mut trimmed = Vec::with_capacity(history.len());
    let mut held: Option<TimedValue> = None;
    let mut past_cutoff = false;

    for point in history {
        if !past_cutoff {
            if point.at_seconds < min_time_cutoff {
                held = Some(*point);
                continue;
            }
            past_cutoff = true;
            trimmed.extend(held.take());
        }
        trimmed.push(*point);
    }

    trimmed.extend(held);
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv(value: f64, at: f64) -> TimedValue {
        TimedValue::new(value, at)
    }

    #[test]
    fn test_collapse_before_cutoff() {
        let history = vec![tv(10.0, 0.0), tv(8.0, 0.7), tv(5.0, 2.0)];
        assert_eq!(
            trim_history(&history, 1.0),
            vec![tv(8.0, 0.7), tv(5.0, 2.0)]
        );
    }

    #[test]
    fn test_zero_cutoff_is_identity() {
        let history = vec![tv(10.0, 0.0), tv(8.0, 0.7), tv(5.0, 2.0)];
        assert_eq!(trim_history(&history, 0.0), history);
    }

    #[test]
    fn test_all_before_cutoff_keeps_last() {
        let history = vec![tv(10.0, 0.1), tv(9.0, 0.2), tv(7.0, 0.3)];
        assert_eq!(trim_history(&history, 1.0), vec![tv(7.0, 0.3)]);
    }

    #[test]
    fn test_all_after_cutoff_unchanged() {
        let history = vec![tv(10.0, 1.5), tv(9.0, 2.0)];
        assert_eq!(trim_history(&history, 1.0), history);
    }

    #[test]
    fn test_point_exactly_at_cutoff_is_kept() {
        let history = vec![tv(10.0, 0.0), tv(8.0, 1.0)];
        assert_eq!(trim_history(&history, 1.0), history);
    }

    #[test]
    fn test_empty_history() {
        assert!(trim_history(&[], 1.0).is_empty());
    }
}
