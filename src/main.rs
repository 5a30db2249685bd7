use anyhow::{Context, Result};
use clap::Parser;
use cotejo::cli::Cli;
use cotejo::comparison::{self, Comparison, ResultSet};
use cotejo::filter::InstanceFilter;
use cotejo::html_output::HtmlReport;
use cotejo::json_output::JsonOutput;
use cotejo::loader;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print a short summary of the comparison
fn print_summary(comparison: &Comparison, output_dir: &std::path::Path) {
    println!("=== {} ===", comparison.title);
    println!(
        "{} vs {}: {} paired instances, {} normalizable",
        comparison.name_a,
        comparison.name_b,
        comparison.summary.len(),
        comparison.normalizable_count()
    );
    if !comparison.errors_a.is_empty() || !comparison.errors_b.is_empty() {
        println!(
            "Errors: {} in {}, {} in {}",
            comparison.errors_a.len(),
            comparison.name_a,
            comparison.errors_b.len(),
            comparison.name_b
        );
    }
    if !comparison.unmatched_a.is_empty() || !comparison.unmatched_b.is_empty() {
        println!(
            "Unmatched: {} only in {}, {} only in {}",
            comparison.unmatched_a.len(),
            comparison.name_a,
            comparison.unmatched_b.len(),
            comparison.name_b
        );
    }
    println!("Report written to {}", output_dir.display());
}

fn main() -> Result<()> {
    // Usage errors exit with status 1; --help and --version exit with 0
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print()?;
            std::process::exit(code);
        }
    };

    init_tracing(args.debug);

    // Validate everything argument-related before any data is read
    let config = args.resolve_config()?;
    let filter = if let Some(expr) = &args.filter {
        InstanceFilter::from_pattern(expr)?
    } else {
        InstanceFilter::all()
    };

    let records_a = loader::load_results(&args.file_a)?;
    let records_b = loader::load_results(&args.file_b)?;

    let comparison = comparison::compare(
        &args.title,
        ResultSet::new(args.name_a, records_a),
        ResultSet::new(args.name_b, records_b),
        &filter,
        &config,
    )?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;
    JsonOutput::new(&comparison).write_to(&args.output_dir)?;
    HtmlReport::new(&comparison).write_to(&args.output_dir)?;

    print_summary(&comparison, &args.output_dir);

    Ok(())
}
