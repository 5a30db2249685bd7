//! HTML output format for comparison reports
//!
//! Static pages with styled tables and embedded CSS: an `index.html` with the
//! summary table and aggregate curve, and one page per paired instance under
//! `instances/`.

use crate::comparison::{Comparison, PairDetail, RunSummary};
use crate::normalize::NormalizedPoint;
use crate::record::{ErrorRun, HistoryPoint};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Directory (inside the output directory) holding per-instance pages
pub const INSTANCES_DIR: &str = "instances";

/// HTML report formatter
#[derive(Debug)]
pub struct HtmlReport<'a> {
    comparison: &'a Comparison,
    /// Detail page file name of each pair, in `details` order
    page_names: Vec<String>,
}

/// File name for an instance's detail page
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_`.
pub fn instance_file_name(instance_name: &str) -> String {
    let stem: String = instance_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.html", stem)
}

/// Unique detail page file names for a list of instance names
///
/// Names that sanitize to an already used file name (compared without case,
/// for case-insensitive file systems) get a `-2`, `-3`, ... suffix.
pub fn unique_file_names<'n>(instance_names: impl IntoIterator<Item = &'n str>) -> Vec<String> {
    let mut used = HashSet::new();
    instance_names
        .into_iter()
        .map(|name| {
            let base = instance_file_name(name);
            let stem = base.trim_end_matches(".html");
            let mut candidate = base.clone();
            let mut n = 2;
            while !used.insert(candidate.to_lowercase()) {
                candidate = format!("{}-{}.html", stem, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

impl<'a> HtmlReport<'a> {
    /// Create a new HTML report formatter
    pub fn new(comparison: &'a Comparison) -> Self {
        let page_names = unique_file_names(
            comparison
                .details
                .iter()
                .map(|d| d.pair.instance_name.as_str()),
        );
        Self {
            comparison,
            page_names,
        }
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 6px 10px;
            text-align: right;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        td.instance {
            text-align: left;
            font-family: monospace;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .not-normalizable {
            color: #cc0000;
        }
        .errors th {
            background-color: #d9534f;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    fn document(title: &str, body: &str) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("    <title>{}</title>\n", Self::escape_html(title)));
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");
        html.push_str("<body>\n");
        html.push_str(body);
        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by Cotejo - Solver Run Comparison\n");
        html.push_str("    </div>\n");
        html.push_str("</body>\n");
        html.push_str("</html>\n");
        html
    }

    fn summary_cells(run: &RunSummary) -> String {
        format!(
            "<td>{}</td><td>{}</td><td>{}</td>",
            format_value(run.objective),
            format_value(run.lower_bound),
            run.duration_seconds
        )
    }

    fn render_summary(&self) -> String {
        let c = self.comparison;
        let mut html = String::new();

        html.push_str("    <h2>Instances</h2>\n");
        html.push_str("    <table>\n");
        html.push_str(&format!(
            "        <tr><th rowspan=\"2\">Instance</th><th colspan=\"3\">{}</th><th colspan=\"3\">{}</th><th rowspan=\"2\">Best</th></tr>\n",
            Self::escape_html(&c.name_a),
            Self::escape_html(&c.name_b)
        ));
        html.push_str("        <tr><th>Objective</th><th>Bound</th><th>Time</th><th>Objective</th><th>Bound</th><th>Time</th></tr>\n");

        for (row, page) in c.summary.iter().zip(&self.page_names) {
            let class = if row.normalizable {
                "instance"
            } else {
                "instance not-normalizable"
            };
            html.push_str(&format!(
                "        <tr><td class=\"{}\"><a href=\"{}/{}\">{}</a></td>{}{}<td>{}</td></tr>\n",
                class,
                INSTANCES_DIR,
                page,
                Self::escape_html(&row.instance_name),
                Self::summary_cells(&row.a),
                Self::summary_cells(&row.b),
                format_value(row.best_solution)
            ));
        }

        html.push_str("    </table>\n");
        html
    }

    fn render_series(heading: &str, series: &[(&str, &[NormalizedPoint])]) -> String {
        let mut html = String::new();
        html.push_str(&format!("    <h2>{}</h2>\n", Self::escape_html(heading)));

        for (label, points) in series {
            html.push_str(&format!("    <h3>{}</h3>\n", Self::escape_html(label)));
            if points.is_empty() {
                html.push_str("    <p>No data</p>\n");
                continue;
            }
            html.push_str("    <table>\n");
            html.push_str("        <tr><th>Time (s)</th><th>Value</th></tr>\n");
            for point in points.iter() {
                html.push_str(&format!(
                    "        <tr><td>{}</td><td>{:.6}</td></tr>\n",
                    point.at_seconds, point.value
                ));
            }
            html.push_str("    </table>\n");
        }

        html
    }

    fn render_errors(name: &str, errors: &[ErrorRun]) -> String {
        if errors.is_empty() {
            return String::new();
        }
        let mut html = String::new();
        html.push_str(&format!(
            "    <h2>Errors in {} ({})</h2>\n",
            Self::escape_html(name),
            errors.len()
        ));
        html.push_str("    <table class=\"errors\">\n");
        html.push_str("        <tr><th>Instance</th><th>Error</th></tr>\n");
        for error in errors {
            html.push_str(&format!(
                "        <tr><td class=\"instance\">{}</td><td class=\"instance\">{}</td></tr>\n",
                Self::escape_html(&error.instance_name),
                Self::escape_html(&error.reason)
            ));
        }
        html.push_str("    </table>\n");
        html
    }

    fn render_unmatched(name: &str, instances: &[String]) -> String {
        if instances.is_empty() {
            return String::new();
        }
        let items: Vec<String> = instances
            .iter()
            .map(|i| format!("<li>{}</li>", Self::escape_html(i)))
            .collect();
        format!(
            "    <h2>Only in {} ({})</h2>\n    <ul>{}</ul>\n",
            Self::escape_html(name),
            instances.len(),
            items.join("")
        )
    }

    /// Generate the aggregate page
    pub fn to_index_html(&self) -> String {
        let c = self.comparison;
        let mut body = String::new();

        body.push_str(&format!("    <h1>{}</h1>\n", Self::escape_html(&c.title)));
        body.push_str(&format!(
            "    <p>{} paired instances, {} normalizable</p>\n",
            c.summary.len(),
            c.normalizable_count()
        ));
        body.push_str(&self.render_summary());
        body.push_str(&Self::render_series(
            "Average relative objective",
            &[
                (c.name_a.as_str(), c.aggregate.objective_a.as_slice()),
                (c.name_b.as_str(), c.aggregate.objective_b.as_slice()),
            ],
        ));
        body.push_str(&Self::render_series(
            "Average relative lower bound",
            &[
                (c.name_a.as_str(), c.aggregate.lower_bound_a.as_slice()),
                (c.name_b.as_str(), c.aggregate.lower_bound_b.as_slice()),
            ],
        ));
        body.push_str(&Self::render_errors(&c.name_a, &c.errors_a));
        body.push_str(&Self::render_errors(&c.name_b, &c.errors_b));
        body.push_str(&Self::render_unmatched(&c.name_a, &c.unmatched_a));
        body.push_str(&Self::render_unmatched(&c.name_b, &c.unmatched_b));

        Self::document(&c.title, &body)
    }

    fn history_table(points: &[HistoryPoint]) -> String {
        if points.is_empty() {
            return "    <p>No data</p>\n".to_string();
        }
        let mut html = String::from("    <table>\n        <tr><th>Time (s)</th><th>Value</th></tr>\n");
        for point in points {
            html.push_str(&format!(
                "        <tr><td>{}</td><td>{}</td></tr>\n",
                point.at_seconds,
                format_value(point.value.as_f64())
            ));
        }
        html.push_str("    </table>\n");
        html
    }

    /// Generate the detail page of one paired instance
    pub fn to_detail_html(&self, detail: &PairDetail) -> String {
        let c = self.comparison;
        let pair = &detail.pair;
        let mut body = String::new();

        body.push_str(&format!(
            "    <h1>{}</h1>\n",
            Self::escape_html(&pair.instance_name)
        ));
        body.push_str("    <p><a href=\"../index.html\">Back to summary</a></p>\n");

        for (name, run) in [(&c.name_a, &pair.a), (&c.name_b, &pair.b)] {
            body.push_str(&format!(
                "    <h2>{} ({} s)</h2>\n",
                Self::escape_html(name),
                run.duration_seconds
            ));
            body.push_str("    <h3>Objective history</h3>\n");
            body.push_str(&Self::history_table(&run.objective_history));
            body.push_str("    <h3>Lower bound history</h3>\n");
            body.push_str(&Self::history_table(&run.lower_bound_history));
        }

        match &detail.normalized {
            Some(n) => {
                body.push_str(&format!(
                    "    <p>Normalized by best objective {}</p>\n",
                    n.best_solution
                ));
                body.push_str(&Self::render_series(
                    "Relative objective",
                    &[
                        (c.name_a.as_str(), n.objective_a.as_slice()),
                        (c.name_b.as_str(), n.objective_b.as_slice()),
                    ],
                ));
                body.push_str(&Self::render_series(
                    "Relative lower bound",
                    &[
                        (c.name_a.as_str(), n.lower_bound_a.as_slice()),
                        (c.name_b.as_str(), n.lower_bound_b.as_slice()),
                    ],
                ));
            }
            None => body.push_str(
                "    <p class=\"not-normalizable\">Histories cannot be normalized for this instance</p>\n",
            ),
        }

        Self::document(&pair.instance_name, &body)
    }

    /// Write `index.html` and all detail pages into `dir`
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let index = dir.join("index.html");
        std::fs::write(&index, self.to_index_html())
            .with_context(|| format!("Failed to write {}", index.display()))?;

        let instances = dir.join(INSTANCES_DIR);
        std::fs::create_dir_all(&instances)
            .with_context(|| format!("Failed to create {}", instances.display()))?;

        for (detail, page) in self.comparison.details.iter().zip(&self.page_names) {
            let path = instances.join(page);
            std::fs::write(&path, self.to_detail_html(detail))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        tracing::debug!(
            "Wrote {} detail pages to {}",
            self.comparison.details.len(),
            instances.display()
        );

        Ok(())
    }
}
