use crate::aggregator::UrlStats;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Placeholder in the HTML template that receives the JSON table.
const TABLE_JSON_PLACEHOLDER: &str = "$table_json";

/// Report file path for the given log date: `report-YYYY.MM.DD.html`.
pub fn report_path(report_dir: &Path, date: NaiveDate) -> PathBuf {
    report_dir.join(format!("report-{}.html", date.format("%Y.%m.%d")))
}

/// Render the ranked rows into the HTML template, keeping the first
/// `report_size` entries.
pub fn render(template_path: &Path, rows: &[UrlStats], report_size: usize) -> Result<String> {
    let template = fs::read_to_string(template_path)
        .with_context(|| format!("Failed to read report template {}", template_path.display()))?;

    let rows = &rows[..rows.len().min(report_size)];
    let table_json = serde_json::to_string(rows).context("Failed to serialize report rows")?;

    Ok(template.replace(TABLE_JSON_PLACEHOLDER, &table_json))
}

pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write report {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(url: &str, time_sum: f64) -> UrlStats {
        UrlStats {
            url: url.to_string(),
            count: 1,
            count_perc: 100.0,
            time_sum,
            time_perc: 100.0,
            time_avg: time_sum,
            time_max: time_sum,
            time_med: time_sum,
        }
    }

    #[test]
    fn report_path_embeds_the_log_date() {
        let date = NaiveDate::from_ymd_opt(2017, 6, 30).unwrap();
        assert_eq!(
            report_path(Path::new("reports"), date),
            Path::new("reports").join("report-2017.06.30.html")
        );
    }

    #[test]
    fn render_substitutes_the_placeholder_only() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("report.html");
        fs::write(&template, "<html>$table_json</html>").unwrap();

        let rendered = render(&template, &[stats("/a", 1.0)], 10).unwrap();

        assert!(rendered.starts_with("<html>["));
        assert!(rendered.ends_with("]</html>"));
        assert!(rendered.contains("\"url\":\"/a\""));
        assert!(rendered.contains("\"count\":1"));
    }

    #[test]
    fn render_truncates_to_report_size() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("report.html");
        fs::write(&template, "$table_json").unwrap();

        let rows = vec![stats("/a", 3.0), stats("/b", 2.0), stats("/c", 1.0)];
        let rendered = render(&template, &rows, 2).unwrap();

        assert!(rendered.contains("/a"));
        assert!(rendered.contains("/b"));
        assert!(!rendered.contains("/c"));
    }

    #[test]
    fn missing_template_is_an_error() {
        let missing = Path::new("this_template_does_not_exist.html");
        assert!(render(missing, &[], 10).is_err());
    }
}
