use tracing::error;

/// One successfully parsed access-log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub url: String,
    pub duration: f64,
}

/// Position of the request path in the whitespace-split line, after remote
/// addr, remote user, auth user, timestamp (two tokens) and the quoted method.
const URL_FIELD_INDEX: usize = 6;

/// Parse one raw log line into a URL and a request duration.
///
/// The line is split on whitespace runs; the URL is the seventh field and
/// the duration is the last field parsed as a float. A line with fewer
/// fields, or a non-numeric last field, is a parse failure: the offending
/// line is logged and `None` is returned. A negative duration literal is
/// numerically valid and forwarded unchanged; the upstream log format does
/// not produce one.
pub fn parse_line(line: &str) -> Option<LogEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let parsed = match (fields.get(URL_FIELD_INDEX), fields.last()) {
        (Some(url), Some(last)) => last.parse::<f64>().ok().map(|duration| LogEntry {
            url: (*url).to_string(),
            duration,
        }),
        _ => None,
    };

    if parsed.is_none() {
        error!("cannot parse fields from line {:?}", line.trim_end());
    }

    parsed
}
