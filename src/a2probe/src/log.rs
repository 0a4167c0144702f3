//! Extraction of probe input from the meter's debug log.
//!
//! When skill-code inference fails, the meter logs the fields it did
//! manage to decode together with the raw record, e.g.:
//!
//! ```text
//! Failed to infer skill code: 123456 (target 1203, actor 77, damage 5400) payload=AC 02 4D 00 ...
//! ```
//!
//! This module picks those lines out of a log stream and turns them into
//! byte payloads plus the known field values the prober needs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::num::ParseIntError;

/// Matches the known fields and hex payload of a failed-inference line.
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"target (?P<target>\d+), actor (?P<actor>\d+), damage (?P<damage>\d+).*payload=(?P<payload>[0-9A-Fa-f ]+)",
    )
    .unwrap()
});

/// Errors from a line that matched the payload pattern but carried
/// malformed content.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid payload hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("numeric field out of range: {0}")]
    FieldOutOfRange(#[from] ParseIntError),
}

/// One damage record extracted from a log line: the two values any valid
/// layout must reproduce, the damage the meter reported, and the raw
/// payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadRecord {
    pub target: u64,
    pub actor: u64,
    pub damage: u64,
    pub payload: Vec<u8>,
}

/// Decode whitespace-insensitive, case-insensitive hex pairs into bytes.
pub fn decode_hex_payload(text: &str) -> Result<Vec<u8>, PayloadError> {
    let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(hex::decode(cleaned)?)
}

/// Try to extract a damage record from one log line.
///
/// `None` means the line is not a payload line at all. `Some(Err(..))`
/// means the line matched but its payload hex or numeric fields are
/// malformed.
pub fn parse_line(line: &str) -> Option<Result<PayloadRecord, PayloadError>> {
    let caps = LINE_PATTERN.captures(line)?;
    Some(parse_captures(&caps))
}

fn parse_captures(caps: &regex::Captures<'_>) -> Result<PayloadRecord, PayloadError> {
    Ok(PayloadRecord {
        target: caps["target"].parse()?,
        actor: caps["actor"].parse()?,
        damage: caps["damage"].parse()?,
        payload: decode_hex_payload(&caps["payload"])?,
    })
}

/// Extract every damage record from a stream of log lines.
///
/// Non-matching lines are skipped silently; matching lines with malformed
/// content surface as errors in extraction order.
pub fn extract_records<'a, I>(lines: I) -> Vec<Result<PayloadRecord, PayloadError>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(parse_line).collect()
}
