//! Loading benchmark result files
//!
//! A result file is a JSON array of run records. Files whose name ends in
//! `.gz` are decompressed on the fly.

use crate::record::RunRecord;
use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Whether a path names a gzip-compressed file
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Parse run records from any reader holding a JSON array
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<RunRecord>> {
    let records: Vec<RunRecord> =
        serde_json::from_reader(reader).context("Invalid benchmark result JSON")?;
    Ok(records)
}

/// Load all run records from a result file
pub fn load_results<P: AsRef<Path>>(path: P) -> Result<Vec<RunRecord>> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        bail!("Result file not found: {}", path_ref.display());
    }

    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open result file {}", path_ref.display()))?;

    let records = if is_gzip_path(path_ref) {
        parse_records(BufReader::new(GzDecoder::new(file)))
    } else {
        parse_records(BufReader::new(file))
    }
    .with_context(|| format!("Failed to read {}", path_ref.display()))?;

    tracing::debug!(
        "Loaded {} records from {}",
        records.len(),
        path_ref.display()
    );

    Ok(records)
}
