//! Solver run records as read from benchmark result files
//!
//! One result file is a JSON array of per-instance records. A record either
//! describes a finished run (objective and lower bound histories) or a solver
//! failure (an `error` marker in place of the histories).

use crate::error::{CompareError, HistoryKind, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A value slot in a history: either a number or anything else the solver wrote
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum HistoryValue {
    Measured(f64),
    #[default]
    Unmeasured,
}

impl From<Value> for HistoryValue {
    fn from(value: Value) -> Self {
        match value.as_f64() {
            Some(v) => HistoryValue::Measured(v),
            None => HistoryValue::Unmeasured,
        }
    }
}

impl Serialize for HistoryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            HistoryValue::Measured(v) => serializer.serialize_f64(*v),
            HistoryValue::Unmeasured => serializer.serialize_none(),
        }
    }
}

impl HistoryValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HistoryValue::Measured(v) => Some(*v),
            HistoryValue::Unmeasured => None,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, HistoryValue::Measured(_))
    }
}

/// A numeric value observed at a point in time (seconds since run start)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedValue {
    pub value: f64,
    pub at_seconds: f64,
}

impl TimedValue {
    pub fn new(value: f64, at_seconds: f64) -> Self {
        Self { value, at_seconds }
    }
}

/// One entry of an objective or lower bound history
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub value: HistoryValue,
    pub at_seconds: f64,
}

impl HistoryPoint {
    pub fn measured(value: f64, at_seconds: f64) -> Self {
        Self {
            value: HistoryValue::Measured(value),
            at_seconds,
        }
    }

    pub fn unmeasured(at_seconds: f64) -> Self {
        Self {
            value: HistoryValue::Unmeasured,
            at_seconds,
        }
    }
}

/// A run that finished without a solver error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalRun {
    pub instance_name: String,
    pub duration_seconds: f64,
    pub objective_history: Vec<HistoryPoint>,
    pub lower_bound_history: Vec<HistoryPoint>,
    /// Final objective as reported by the solver, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<HistoryValue>,
    /// Final lower bound as reported by the solver, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<HistoryValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_solutions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl NormalRun {
    /// Create a run with the given histories and no summary fields
    pub fn new(
        instance_name: impl Into<String>,
        duration_seconds: f64,
        objective_history: Vec<HistoryPoint>,
        lower_bound_history: Vec<HistoryPoint>,
    ) -> Self {
        Self {
            instance_name: instance_name.into(),
            duration_seconds,
            objective_history,
            lower_bound_history,
            objective: None,
            lower_bound: None,
            nb_solutions: None,
            solver: None,
            status: None,
        }
    }

    pub fn history(&self, kind: HistoryKind) -> &[HistoryPoint] {
        match kind {
            HistoryKind::Objective => &self.objective_history,
            HistoryKind::LowerBound => &self.lower_bound_history,
        }
    }

    /// True when every entry of both histories carries a number
    pub fn is_fully_measured(&self) -> bool {
        self.objective_history
            .iter()
            .chain(&self.lower_bound_history)
            .all(|p| p.value.is_measured())
    }

    /// Numeric view of a history
    ///
    /// Fails on the first non-numeric entry, and when a timestamp is earlier
    /// than the one before it.
    pub fn numeric_history(&self, kind: HistoryKind) -> Result<Vec<TimedValue>> {
        let values: Vec<TimedValue> = self
            .history(kind)
            .iter()
            .map(|p| match p.value {
                HistoryValue::Measured(v) => Ok(TimedValue::new(v, p.at_seconds)),
                HistoryValue::Unmeasured => Err(CompareError::NonNumericValue {
                    instance: self.instance_name.clone(),
                    history: kind,
                }),
            })
            .collect::<Result<_>>()?;

        if values.windows(2).any(|w| w[1].at_seconds < w[0].at_seconds) {
            return Err(CompareError::UnorderedHistory {
                instance: self.instance_name.clone(),
                history: kind,
            });
        }

        Ok(values)
    }

    /// Last objective value of the run: the history's tail, else the reported objective
    pub fn final_objective(&self) -> Option<f64> {
        self.objective_history
            .last()
            .and_then(|p| p.value.as_f64())
            .or_else(|| self.objective.and_then(|v| v.as_f64()))
    }

    /// Last lower bound of the run: the history's tail, else the reported bound
    pub fn final_lower_bound(&self) -> Option<f64> {
        self.lower_bound_history
            .last()
            .and_then(|p| p.value.as_f64())
            .or_else(|| self.lower_bound.and_then(|v| v.as_f64()))
    }
}

/// A run the solver reported as failed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRun {
    pub instance_name: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver: Option<String>,
}

/// Result of one solver execution against one instance
#[derive(Debug, Clone, PartialEq)]
pub enum RunRecord {
    Normal(NormalRun),
    Error(ErrorRun),
}

impl RunRecord {
    pub fn instance_name(&self) -> &str {
        match self {
            RunRecord::Normal(run) => &run.instance_name,
            RunRecord::Error(run) => &run.instance_name,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RunRecord::Error(_))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObjectivePoint {
    #[serde(default)]
    objective: HistoryValue,
    solve_time: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoundPoint {
    #[serde(default)]
    value: HistoryValue,
    solve_time: f64,
}

/// On-disk shape of a record
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRunRecord {
    model_name: String,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    objective_history: Vec<RawObjectivePoint>,
    #[serde(default)]
    lower_bound_history: Vec<RawBoundPoint>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    objective: Option<HistoryValue>,
    #[serde(default)]
    lower_bound: Option<HistoryValue>,
    #[serde(default)]
    nb_solutions: Option<u64>,
    #[serde(default)]
    solver: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<RawRunRecord> for RunRecord {
    fn from(raw: RawRunRecord) -> Self {
        if let Some(marker) = raw.error {
            let reason = match marker {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return RunRecord::Error(ErrorRun {
                instance_name: raw.model_name,
                reason,
                duration_seconds: raw.duration,
                solver: raw.solver,
            });
        }

        RunRecord::Normal(NormalRun {
            instance_name: raw.model_name,
            duration_seconds: raw.duration.unwrap_or(0.0),
            objective_history: raw
                .objective_history
                .into_iter()
                .map(|p| HistoryPoint {
                    value: p.objective,
                    at_seconds: p.solve_time,
                })
                .collect(),
            lower_bound_history: raw
                .lower_bound_history
                .into_iter()
                .map(|p| HistoryPoint {
                    value: p.value,
                    at_seconds: p.solve_time,
                })
                .collect(),
            objective: raw.objective,
            lower_bound: raw.lower_bound,
            nb_solutions: raw.nb_solutions,
            solver: raw.solver,
            status: raw.status,
        })
    }
}

impl<'de> Deserialize<'de> for RunRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        RawRunRecord::deserialize(deserializer).map(RunRecord::from)
    }
}
