//! JSON rendering of decoded records

use chrono::{SecondsFormat, TimeZone, Utc};
use ctlog_types::{MerkleTreeLeaf, ParsedLogEntry, SignedCertificateTimestamp};
use serde::Serialize;
use serde_json::Value;

/// Format a CT timestamp (milliseconds since the epoch) as RFC 3339
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_timestamp(millis: u64) -> Option<String> {
    let millis = i64::try_from(millis).ok()?;
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn render_sct(sct: &SignedCertificateTimestamp) -> serde_json::Result<String> {
    render_with_time(sct, sct.timestamp)
}

pub fn render_leaf(leaf: &MerkleTreeLeaf) -> serde_json::Result<String> {
    render_with_time(leaf, leaf.timestamped_entry.timestamp)
}

pub fn render_entry(entry: &ParsedLogEntry) -> serde_json::Result<String> {
    render_with_time(entry, entry.merkle_tree_leaf().timestamped_entry.timestamp)
}

pub fn render<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn render_with_time<T: Serialize>(value: &T, millis: u64) -> serde_json::Result<String> {
    let mut json = serde_json::to_value(value)?;
    if let (Value::Object(map), Some(time)) = (&mut json, format_timestamp(millis)) {
        map.insert("time".to_string(), Value::String(time));
    }
    serde_json::to_string_pretty(&json)
}
