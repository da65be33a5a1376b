// ============================================================
// DASHBOARD METRICS EXTRACTOR
// ============================================================
// Single pass over harmonized rows: expiry cohorts, escape flags,
// nationality and status breakdowns, drill-down lists

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::dashboard::{bump, DashboardMetrics};
use crate::domain::harmonized::{Row, DATE_COLUMN_MARKER};
use crate::domain::metrics_config::MetricsConfig;
use crate::infrastructure::cells::parse_display_date;

/// Dashboard metrics use case
pub struct MetricsExtractor {
    config: MetricsConfig,
    escape_marker: String,
    nationality_keyword: String,
    status_keywords: Vec<String>,
}

impl MetricsExtractor {
    pub fn new(config: MetricsConfig) -> Self {
        let escape_marker = config.escape_marker.to_lowercase();
        let nationality_keyword = config.nationality_keyword.to_lowercase();
        let status_keywords = config
            .status_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();

        Self {
            config,
            escape_marker,
            nationality_keyword,
            status_keywords,
        }
    }

    /// Compute metrics for `rows` as of `today`. A date equal to `today` is
    /// still active.
    pub fn extract<'a>(&self, rows: &'a [Row], today: NaiveDate) -> DashboardMetrics<'a> {
        let mut metrics = DashboardMetrics {
            total: rows.len(),
            ..Default::default()
        };

        for row in rows {
            self.accumulate(&mut metrics, row, today);
        }

        debug!(
            total = metrics.total,
            escapes = metrics.escape_count,
            expired = metrics.expired_card_count,
            active = metrics.active_count,
            upcoming = metrics.upcoming_renewals,
            "Extracted dashboard metrics"
        );

        metrics
    }

    fn accumulate<'a>(&self, metrics: &mut DashboardMetrics<'a>, row: &'a Row, today: NaiveDate) {
        let nationality = self.nationality_of(row);
        bump(&mut metrics.nationality_data, &nationality);

        let escaped = self.has_escape_marker(row);
        if escaped {
            metrics.escape_count += 1;
            metrics.escape_records.push(row);
            bump(&mut metrics.nationality_escape_data, &nationality);
        }

        if let Some(expiry) = expiry_date(row) {
            let month_label = format!("{}-{:02}", expiry.year(), expiry.month());
            bump(&mut metrics.monthly_renewals, &month_label);
            if escaped {
                bump(&mut metrics.monthly_escapes, &month_label);
            }

            if expiry < today {
                metrics.expired_card_count += 1;
                metrics.expired_records.push(row);
                bump(&mut metrics.nationality_expired_data, &nationality);
            } else {
                metrics.active_count += 1;
                if expiry.year() == today.year() && expiry.month() == today.month() {
                    metrics.upcoming_renewals += 1;
                    metrics.upcoming_records.push(row);
                }
            }
        }

        if let Some(status) = self.status_of(row) {
            bump(&mut metrics.status_data, &status);
        }
    }

    fn nationality_of(&self, row: &Row) -> String {
        row.find_key(|k| k.to_lowercase().contains(&self.nationality_keyword))
            .map(|key| row.value(key).trimmed())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.config.unspecified_nationality.clone())
    }

    fn has_escape_marker(&self, row: &Row) -> bool {
        row.values()
            .any(|value| value.to_text().to_lowercase().contains(&self.escape_marker))
    }

    fn status_of(&self, row: &Row) -> Option<String> {
        let key = row.find_key(|k| {
            let lower = k.to_lowercase();
            self.status_keywords.iter().any(|kw| lower.contains(kw))
        })?;

        let status = row.value(key).trimmed();
        if status.is_empty() {
            Some(self.config.unknown_status.clone())
        } else {
            Some(status)
        }
    }
}

impl Default for MetricsExtractor {
    fn default() -> Self {
        Self::new(MetricsConfig::default())
    }
}

/// Expiry date of a row: the first column whose name carries the `(Date)`
/// marker, read as `DD/MM/YYYY`. Later date columns are not consulted.
pub fn expiry_date(row: &Row) -> Option<NaiveDate> {
    let key = row.find_key(|k| k.contains(DATE_COLUMN_MARKER))?;
    parse_display_date(&row.value(key).to_text())
}

/// Extract metrics with the default conventions
pub fn extract_dashboard_metrics(rows: &[Row], today: NaiveDate) -> DashboardMetrics<'_> {
    MetricsExtractor::default().extract(rows, today)
}
