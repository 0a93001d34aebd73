use crate::{
    locator::LogFile,
    parser::{self, LogEntry},
};
use flate2::read::GzDecoder;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};

/// Open the selected log file and lazily map each line through the parser.
///
/// One forward pass, line by line; the file is never buffered whole and the
/// iterator is not restartable. Items are `Err` for I/O failures mid-stream
/// and `Ok(None)` for lines that failed to parse. The file handle closes
/// when the iterator is dropped, on every exit path.
pub fn open_rows(
    logfile: &LogFile,
) -> io::Result<impl Iterator<Item = io::Result<Option<LogEntry>>> + use<>> {
    let file = File::open(&logfile.path)?;
    let reader: Box<dyn BufRead> = if logfile.is_gzip() {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader
        .lines()
        .map(|line| line.map(|line| parser::parse_line(&line))))
}
