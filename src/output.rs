//! Appending to the raw ping/pong log.

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::engine::types::RawRecord;

const LOG_HEADER: &str = "ping,pong\n";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Appends one validated record as a `ping,pong` line to the log at `path`.
///
/// Creates the file with its header if it does not already exist. The header
/// (when needed) and the record go out in a single write, so a reader racing
/// with this append never observes a partial line.
pub fn append_record(path: impl AsRef<Path>, record: &RawRecord) -> Result<()> {
    let path = path.as_ref();
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending log record");

    let mut file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut line = String::new();
    if !file_exists {
        line.push_str(LOG_HEADER);
    }
    line.push_str(&format!(
        "{},{}\n",
        record.ping.format(TIMESTAMP_FORMAT),
        record.pong.format(TIMESTAMP_FORMAT)
    ));

    file.write_all(line.as_bytes())?;
    Ok(())
}
