// Normalization and aggregation of solver run histories
//
// Raw histories of different instances live on wildly different scales
// (makespans in the tens vs. route lengths in the tens of thousands). This
// module brings every paired run onto a common scale and merges all pairs
// into a single mean curve per configuration:
//
// 1. trim:      collapse start-up noise before a warm-up cutoff into the
//               single value in effect at the cutoff
// 2. scale:     decide eligibility, pick the per-pair best value, divide
//               every value by it and extend the series to the run duration
// 3. aggregate: sweep over the time-sorted value changes of all series,
//               keeping a running sum, and emit the mean after every change
//
// Every stage takes the previous stage's output by reference and returns a
// fresh value; nothing is mutated in place.

mod aggregate;
mod config;
mod scale;
mod trim;

pub use aggregate::{aggregate_series, worst_leading_value, AggregateCurve};
pub use config::{CompareConfig, ObjectiveSense};
pub use scale::{
    best_solution, can_be_normalized, normalize_history, normalize_pair, NormalizedPair,
    NormalizedPoint,
};
pub use trim::trim_history;
