//! Instance filtering for --filter expressions
//!
//! Restricts a comparison to instances whose name matches a regular
//! expression. The match is unanchored: `--filter jobshop` keeps
//! `jobshop_abz5` and `flexible-jobshop_mk01` alike.

use crate::error::Result;
use crate::record::RunRecord;
use regex::Regex;

/// Filter that determines which instances take part in the comparison
#[derive(Debug, Clone)]
pub struct InstanceFilter {
    /// Pattern instance names must match (None = all instances)
    pattern: Option<Regex>,
}

impl InstanceFilter {
    /// Create a filter that includes all instances
    pub fn all() -> Self {
        Self { pattern: None }
    }

    /// Compile a regular expression filter
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Some(Regex::new(pattern)?),
        })
    }

    /// Check if an instance should be compared
    pub fn should_include(&self, instance_name: &str) -> bool {
        match &self.pattern {
            None => true,
            Some(re) => re.is_match(instance_name),
        }
    }

    /// Keep only the records whose instance passes the filter, in input order
    pub fn apply(&self, records: Vec<RunRecord>) -> Vec<RunRecord> {
        if self.pattern.is_none() {
            return records;
        }
        records
            .into_iter()
            .filter(|r| self.should_include(r.instance_name()))
            .collect()
    }
}

impl Default for InstanceFilter {
    fn default() -> Self {
        Self::all()
    }
}
