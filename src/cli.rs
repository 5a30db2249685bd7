//! CLI argument parsing for Cotejo

use crate::normalize::{CompareConfig, ObjectiveSense};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Parse a non-negative number of seconds
fn parse_seconds(value: &str) -> std::result::Result<f64, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("must be a non-negative number, got {}", value));
    }
    Ok(seconds)
}

#[derive(Parser, Debug)]
#[command(name = "cotejo")]
#[command(version)]
#[command(
    about = "Compare two optimization-solver benchmark runs on a normalized, time-aligned scale",
    long_about = None
)]
pub struct Cli {
    /// Report title
    pub title: String,

    /// Name of the first configuration
    pub name_a: String,

    /// Result file of the first configuration (JSON array, optionally .gz)
    pub file_a: PathBuf,

    /// Name of the second configuration
    pub name_b: String,

    /// Result file of the second configuration (JSON array, optionally .gz)
    pub file_b: PathBuf,

    /// Directory the report is written to (created if missing)
    pub output_dir: PathBuf,

    /// Only compare instances whose name matches this regular expression
    #[arg(long = "filter", value_name = "REGEX")]
    pub filter: Option<String>,

    /// Collapse history before this many seconds into one point (default: 1, 0 disables)
    #[arg(
        long = "min-time-cutoff",
        alias = "minTimeCutoff",
        value_name = "SECONDS",
        value_parser = parse_seconds,
        allow_negative_numbers = true
    )]
    pub min_time_cutoff: Option<f64>,

    /// Objective direction (default: minimize)
    #[arg(long = "sense", value_enum)]
    pub sense: Option<ObjectiveSense>,

    /// Hide aggregate points before this many seconds (default: 1)
    #[arg(
        long = "suppression-window",
        value_name = "SECONDS",
        value_parser = parse_seconds,
        allow_negative_numbers = true
    )]
    pub suppression_window: Option<f64>,

    /// TOML file with comparison settings; flags override its values
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Merge defaults, the optional config file and explicit flags
    pub fn resolve_config(&self) -> Result<CompareConfig> {
        let mut config = match &self.config {
            Some(path) => CompareConfig::from_toml_file(path)?,
            None => CompareConfig::default(),
        };

        if let Some(cutoff) = self.min_time_cutoff {
            config.min_time_cutoff = cutoff;
        }
        if let Some(sense) = self.sense {
            config.objective_sense = sense;
        }
        if let Some(window) = self.suppression_window {
            config.suppression_window = window;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONAL: [&str; 7] = [
        "cotejo", "Nightly", "v1", "a.json", "v2", "b.json.gz", "out",
    ];

    fn parse(extra: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(POSITIONAL.iter().chain(extra))
    }

    #[test]
    fn test_cli_parses_positionals() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.title, "Nightly");
        assert_eq!(cli.name_a, "v1");
        assert_eq!(cli.file_a, PathBuf::from("a.json"));
        assert_eq!(cli.name_b, "v2");
        assert_eq!(cli.file_b, PathBuf::from("b.json.gz"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert!(cli.filter.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_wrong_positional_count() {
        assert!(Cli::try_parse_from(["cotejo", "Nightly", "v1", "a.json"]).is_err());
        assert!(parse(&["extra"]).is_err());
    }

    #[test]
    fn test_cli_min_time_cutoff() {
        let cli = parse(&["--min-time-cutoff", "2.5"]).unwrap();
        assert_eq!(cli.min_time_cutoff, Some(2.5));

        let cli = parse(&["--minTimeCutoff", "0"]).unwrap();
        assert_eq!(cli.min_time_cutoff, Some(0.0));
    }

    #[test]
    fn test_cli_rejects_negative_cutoff() {
        assert!(parse(&["--min-time-cutoff", "-1"]).is_err());
        assert!(parse(&["--min-time-cutoff", "abc"]).is_err());
    }

    #[test]
    fn test_cli_flag_missing_value() {
        assert!(parse(&["--filter"]).is_err());
    }

    #[test]
    fn test_cli_sense() {
        let cli = parse(&["--sense", "maximize"]).unwrap();
        assert_eq!(cli.sense, Some(ObjectiveSense::Maximize));
        assert!(parse(&["--sense", "sideways"]).is_err());
    }

    #[test]
    fn test_resolve_config_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.resolve_config().unwrap(), CompareConfig::default());
    }

    #[test]
    fn test_resolve_config_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotejo.toml");
        std::fs::write(&path, "min_time_cutoff = 5.0\nsuppression_window = 2.0\n").unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let cli = parse(&["--config", path_arg.as_str(), "--min-time-cutoff", "0"]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.min_time_cutoff, 0.0);
        assert_eq!(config.suppression_window, 2.0);
    }
}
