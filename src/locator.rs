use crate::error::LocateError;
use chrono::NaiveDate;
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use tracing::warn;

/// Names that qualify as rotated access logs: an eight-digit date with an
/// optional `.gz` suffix. Any other trailing extension disqualifies the file.
static LOGFILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^nginx-access-ui\.log-(\d{8})(\.gz)?$").unwrap_or_else(|_| unreachable!())
});

const LOGFILE_DATE_FORMAT: &str = "%Y%m%d";

/// A discovered log file. Created once per run by [`find_latest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub date: NaiveDate,
    /// Suffix following the embedded date: `".gz"` or `""`. Only used to
    /// pick the decompression strategy.
    pub ext: String,
}

impl LogFile {
    pub fn is_gzip(&self) -> bool {
        self.ext == ".gz"
    }
}

/// Scan `log_dir` and return the log file with the latest embedded date,
/// or `None` when nothing matches the naming convention.
///
/// Only regular files are considered. A name whose eight digits do not form
/// a valid calendar date is logged and excluded, never a crash. On an exact
/// date tie the entry listed later wins; listing order is whatever the
/// filesystem yields.
pub fn find_latest(log_dir: &Path) -> Result<Option<LogFile>, LocateError> {
    let mut latest: Option<LogFile> = None;

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(captures) = LOGFILE_NAME_RE.captures(name) else {
            continue;
        };

        let date_str = &captures[1];
        let date = match NaiveDate::parse_from_str(date_str, LOGFILE_DATE_FORMAT) {
            Ok(date) => date,
            Err(err) => {
                warn!("cannot parse date {date_str} from log file {name}: {err}");
                continue;
            }
        };

        if latest.as_ref().is_none_or(|current| date >= current.date) {
            let ext = captures
                .get(2)
                .map(|m| m.as_str())
                .unwrap_or_default()
                .to_string();
            latest = Some(LogFile {
                path: entry.path(),
                date,
                ext,
            });
        }
    }

    Ok(latest)
}
