use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single entry in the request history log
/// (`~/.opsdeck/request-log.jsonl`).
///
/// One entry per completed backend request, success or failure. This is
/// the uniform failure record the controllers themselves don't keep:
/// which endpoint, what status, how long.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub timestamp: String,
    /// Endpoint path plus query string, without the base URL.
    pub endpoint: String,
    /// HTTP status, absent on transport failures.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
    pub duration_ms: u64,
    pub ok: bool,
    /// Failure description, only set when `ok` is false.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Append an entry to the request log. Best-effort: logging must never
/// fail the request that produced it.
pub fn append(entry: &RequestLogEntry) {
    let _ = append_entry(entry);
}

fn append_entry(entry: &RequestLogEntry) -> Result<()> {
    let Some(path) = request_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read the most recent `limit` entries, newest last.
///
/// Silently skips malformed lines. Returns an empty vec if the file does
/// not exist or cannot be read.
pub fn read_recent(limit: usize) -> Vec<RequestLogEntry> {
    let Some(path) = request_log_path() else {
        return Vec::new();
    };

    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    let entries: Vec<RequestLogEntry> = reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<RequestLogEntry>(&line).ok())
        .collect();

    let skip = entries.len().saturating_sub(limit);
    entries.into_iter().skip(skip).collect()
}

/// Return the path to the request log file.
pub fn request_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".opsdeck").join("request-log.jsonl"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_round_trips_through_jsonl() {
        let entry = RequestLogEntry {
            timestamp: "2026-08-27T12:00:00+00:00".to_string(),
            endpoint: "api/users?size=100&page=0".to_string(),
            status: Some(200),
            duration_ms: 12,
            ok: true,
            error: None,
        };
        let line = serde_json::to_string(&entry).unwrap();
        let back: RequestLogEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.endpoint, entry.endpoint);
        assert_eq!(back.status, Some(200));
        assert!(back.ok);
    }

    #[test]
    fn failure_entry_omits_status_and_keeps_error() {
        let entry = RequestLogEntry {
            timestamp: "2026-08-27T12:00:00+00:00".to_string(),
            endpoint: "api/service?command=start".to_string(),
            status: None,
            duration_ms: 5,
            ok: false,
            error: Some("connection refused".to_string()),
        };
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains("\"status\""));
        let back: RequestLogEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.error.as_deref(), Some("connection refused"));
    }
}
