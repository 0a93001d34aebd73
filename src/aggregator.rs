use crate::{error::AggregateError, parser::LogEntry, stats};
use indexmap::IndexMap;
use serde::Serialize;
use std::{cmp::Ordering, io};
use tracing::{debug, error};

/// Finalized statistics for one URL, in report-table key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlStats {
    pub url: String,
    pub count: u64,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}

/// Per-URL state while the stream is being consumed. `durations` is never
/// empty once the URL exists in the map.
#[derive(Debug, Default)]
struct UrlAccumulator {
    count: u64,
    durations: Vec<f64>,
}

/// Fold parsed rows into per-URL statistics, ranked by total duration.
///
/// Every row counts toward the error-rate denominator; rows that failed to
/// parse count toward the numerator as well and contribute nothing else.
/// The threshold check runs once after the stream ends: an error rate
/// strictly above `error_limit_percentage` fails the whole pass before any
/// entry is finalized, so no partial result ever escapes. An error rate
/// exactly equal to the limit passes.
///
/// The result is sorted by `time_sum` descending; the sort is stable, so
/// URLs with exactly equal totals keep their first-appearance order.
pub fn aggregate(
    rows: impl Iterator<Item = io::Result<Option<LogEntry>>>,
    error_limit_percentage: f64,
) -> Result<Vec<UrlStats>, AggregateError> {
    let mut total: u64 = 0;
    let mut errors: u64 = 0;
    let mut grand_total_duration: f64 = 0.0;
    let mut by_url: IndexMap<String, UrlAccumulator> = IndexMap::new();

    for row in rows {
        total += 1;
        match row? {
            Some(entry) => {
                grand_total_duration += entry.duration;
                let acc = by_url.entry(entry.url).or_default();
                acc.count += 1;
                acc.durations.push(entry.duration);
            }
            None => errors += 1,
        }
    }

    let error_rate = if total == 0 {
        0.0
    } else {
        stats::percentage(errors as f64, total as f64)
    };
    if error_rate > error_limit_percentage {
        error!("error rate {error_rate:.2}% is over the allowed {error_limit_percentage:.2}%");
        return Err(AggregateError::ThresholdExceeded {
            limit: error_limit_percentage,
            actual: error_rate,
        });
    }

    debug!(
        "aggregated {} urls from {total} lines ({errors} unparsable)",
        by_url.len()
    );

    let mut entries: Vec<UrlStats> = by_url
        .into_iter()
        .map(|(url, acc)| finalize(url, &acc, total, grand_total_duration))
        .collect();

    entries.sort_by(|a, b| {
        b.time_sum
            .partial_cmp(&a.time_sum)
            .unwrap_or(Ordering::Equal)
    });

    Ok(entries)
}

fn finalize(url: String, acc: &UrlAccumulator, total: u64, grand_total_duration: f64) -> UrlStats {
    let time_sum: f64 = acc.durations.iter().sum();
    let time_perc = if grand_total_duration == 0.0 {
        0.0
    } else {
        stats::percentage(time_sum, grand_total_duration)
    };

    UrlStats {
        count: acc.count,
        count_perc: stats::percentage(acc.count as f64, total as f64),
        time_sum,
        time_perc,
        time_avg: time_sum / acc.count as f64,
        time_max: acc
            .durations
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max),
        time_med: stats::median(&acc.durations),
        url,
    }
}
