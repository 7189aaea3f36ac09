//! Line codec for the event stream
//!
//! Events travel as newline-delimited JSON: one complete record per line,
//! flushed as soon as it is produced. The decoder is tolerant on purpose. A
//! line that fails to parse is surfaced as a raw fragment so a single bad
//! record never tears down the whole stream.

use super::MintEvent;

/// Encode an event as one NDJSON line, newline included
pub fn encode_line(event: &MintEvent) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(event)?;
    line.push('\n');
    Ok(line)
}

/// One decoded line of the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRecord {
    /// A well-formed event record
    Event(MintEvent),
    /// A line that did not parse as an event, kept verbatim
    Raw(String),
}

/// Decode a single line
///
/// Returns `None` for blank lines, which occur at the end of a complete
/// stream split on `\n`.
pub fn decode_line(line: &str) -> Option<DecodedRecord> {
    let trimmed = line.trim_end_matches('\r');
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<MintEvent>(trimmed) {
        Ok(event) => Some(DecodedRecord::Event(event)),
        Err(_) => Some(DecodedRecord::Raw(trimmed.to_string())),
    }
}

/// Decode a buffered stream body into its records
pub fn decode_stream(input: &str) -> Vec<DecodedRecord> {
    input.split('\n').filter_map(decode_line).collect()
}
