//! Reader for the append-only raw ping/pong log.
//!
//! One record per line, two comma-separated ISO-8601 timestamps, optionally
//! quoted. A `ping,pong` header line is skipped if present. Parse failures
//! stop here; the engine only ever sees well-typed records.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::engine::types::RawRecord;

/// Reads all raw records from the log file at `path`.
///
/// A missing file is an empty log, not an error.
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "Log file missing, treating as empty");
        return Ok(Vec::new());
    }

    let file =
        File::open(path).with_context(|| format!("failed to open log {}", path.display()))?;
    parse_log(file)
}

/// Parses raw records from any reader of log-formatted text, preserving
/// line order.
///
/// # Errors
///
/// Returns an error on a line that does not hold exactly two parseable
/// timestamps.
pub fn parse_log(reader: impl Read) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for (idx, row) in rdr.records().enumerate() {
        let row = row.with_context(|| format!("malformed log line {}", idx + 1))?;

        if row.len() != 2 {
            bail!("log line {} has {} fields, expected 2", idx + 1, row.len());
        }
        if &row[0] == "ping" && &row[1] == "pong" {
            continue;
        }

        let ping = parse_timestamp(&row[0])
            .with_context(|| format!("bad ping on log line {}", idx + 1))?;
        let pong = parse_timestamp(&row[1])
            .with_context(|| format!("bad pong on log line {}", idx + 1))?;
        records.push(RawRecord { ping, pong });
    }

    debug!(records = records.len(), "Log parsed");
    Ok(records)
}

/// Parses an ISO-8601 timestamp, with or without a UTC offset.
///
/// An offset is dropped and the local clock reading kept: the charts plot
/// wall-clock time of day at the venue.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_local());
    }
    value
        .parse::<NaiveDateTime>()
        .with_context(|| format!("invalid timestamp {:?}", value))
}
