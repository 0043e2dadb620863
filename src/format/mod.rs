//! Output formatting for candidates, run reports and state (table, JSON).

use crate::commands::RunReport;
use crate::config::{OutputFormat, Source};
use crate::shop::ProductCandidate;
use crate::store::SeenSet;
use serde::Serialize;

/// Formats command output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats extracted candidates with their facets.
    pub fn format_candidates(&self, candidates: &[ProductCandidate]) -> String {
        match self.format {
            OutputFormat::Json => Self::json(candidates, "[]"),
            OutputFormat::Table if candidates.is_empty() => "No candidates found.".to_string(),
            OutputFormat::Table => self.table_candidates(candidates),
        }
    }

    /// Formats a run summary followed by the new items.
    pub fn format_report(&self, report: &RunReport) -> String {
        match self.format {
            OutputFormat::Json => Self::json(report, "{}"),
            OutputFormat::Table => self.table_report(report),
        }
    }

    /// Formats configured sources with their resolved templates.
    pub fn format_sources(&self, sources: &[Source]) -> String {
        let rows: Vec<SourceRow> = sources.iter().map(SourceRow::from).collect();

        match self.format {
            OutputFormat::Json => Self::json(&rows, "[]"),
            OutputFormat::Table if rows.is_empty() => "No sources configured.".to_string(),
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("{:<10}  {:<16}  {}", "Template", "Breadcrumb", "URL"),
                    format!("{:-<10}  {:-<16}  {:-<50}", "", "", ""),
                ];
                for row in &rows {
                    lines.push(format!(
                        "{:<10}  {:<16}  {}",
                        row.template,
                        row.breadcrumb.as_deref().unwrap_or("-"),
                        row.url
                    ));
                }
                lines.join("\n")
            }
        }
    }

    /// Formats the persisted seen-set.
    pub fn format_seen(&self, seen: &SeenSet) -> String {
        match self.format {
            OutputFormat::Json => Self::json(seen, "[]"),
            OutputFormat::Table => {
                let mut lines = vec![format!("{} seen URLs", seen.len())];
                lines.extend(seen.iter().map(|url| format!("  {}", url)));
                lines.join("\n")
            }
        }
    }

    fn json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
    }

    fn table_candidates(&self, candidates: &[ProductCandidate]) -> String {
        let price_width = 9;
        let flag_width = 8;
        let title_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<price_width$}  {:<flag_width$}  {:<flag_width$}  {:<title_width$}  {}",
            "Price", "Audience", "Excluded", "Title", "URL"
        ));
        lines.push(format!(
            "{:-<price_width$}  {:-<flag_width$}  {:-<flag_width$}  {:-<title_width$}  {:-<20}",
            "", "", "", "", ""
        ));

        for candidate in candidates {
            lines.push(format!(
                "{:>price_width$}  {:<flag_width$}  {:<flag_width$}  {:<title_width$}  {}",
                format!("{:.2}", candidate.price),
                yes_no(candidate.is_target_audience),
                yes_no(candidate.is_accessory),
                truncate(&candidate.title, title_width),
                candidate.url
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} candidates", candidates.len()));

        lines.join("\n")
    }

    fn table_report(&self, report: &RunReport) -> String {
        let mut lines = vec![format!(
            "Sources: {} ({} failed)  Scraped: {}  Matches: {}  New: {}",
            report.sources_attempted,
            report.failures.len(),
            report.scraped,
            report.matches,
            report.new_items.len()
        )];

        for failure in &report.failures {
            lines.push(format!("  failed: {} ({})", failure.url, failure.message));
        }

        if report.is_idle() {
            lines.push("No new matches.".to_string());
            return lines.join("\n");
        }

        lines.push(format!(
            "Notified: {}  State saved: {}",
            yes_no(report.notified),
            yes_no(report.persisted)
        ));
        lines.push(String::new());
        lines.push(self.table_candidates(&report.new_items));

        lines.join("\n")
    }
}

/// Flattened source row for listings.
#[derive(Debug, Serialize)]
struct SourceRow {
    url: String,
    template: String,
    breadcrumb: Option<String>,
}

impl From<&Source> for SourceRow {
    fn from(source: &Source) -> Self {
        let template = match source.parsed_url() {
            Ok(url) => source.resolved_template(&url).to_string(),
            Err(_) => "invalid".to_string(),
        };

        Self { url: source.url.clone(), template, breadcrumb: source.breadcrumb.clone() }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Shortens to `width` characters, ending in an ellipsis.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
