//! Flat-text encodings for the persisted preference records.
//!
//! The store keeps four independent keys in the settings backend. Three of
//! them carry delimiter-joined text whose exact shape predates this crate and
//! must be preserved for backward compatibility with previously persisted
//! data:
//!
//! - `pinned_apps`: identifiers joined by `,`
//! - `custom_names`: repeated `id:name` pairs joined by `,`
//! - `app_usage`: repeated `id:count:timestamp` triples joined by `,`
//!
//! There is no escaping of `,` or `:` inside values. A name containing `:`
//! is silently truncated at the first extra separator on the next decode —
//! a known limitation of the format, not something this module may fix.
//!
//! Decoding never fails: malformed text makes the affected key decode as
//! empty so startup always proceeds.

use std::collections::{HashMap, HashSet};

use crate::storage::models::UsageStat;

/// Backend key holding the pinned identifier set.
pub const PINNED_KEY: &str = "pinned_apps";

/// Backend key holding the custom display-name overrides.
pub const CUSTOM_NAMES_KEY: &str = "custom_names";

/// Backend key holding per-entry usage statistics.
pub const USAGE_KEY: &str = "app_usage";

/// Backend key holding the dark-theme flag.
pub const DARK_THEME_KEY: &str = "dark_theme";

/// Encodes the pinned set as comma-joined identifiers.
///
/// Identifiers are written in sorted order so repeated saves of the same set
/// produce identical text.
#[must_use]
pub fn encode_pinned(pinned: &HashSet<String>) -> String {
    let mut ids: Vec<&str> = pinned.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids.join(",")
}

/// Decodes a comma-joined identifier list into a set.
///
/// Empty chunks (including the whole-empty string) are ignored.
#[must_use]
pub fn decode_pinned(text: &str) -> HashSet<String> {
    text.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// Encodes the custom-name map as `id:name` pairs joined by `,`.
///
/// Pairs are written in sorted key order for deterministic output. Values are
/// written as-is; see the module docs for the escaping caveat.
#[must_use]
pub fn encode_names(names: &HashMap<String, String>) -> String {
    let mut pairs: Vec<(&str, &str)> = names
        .iter()
        .map(|(id, name)| (id.as_str(), name.as_str()))
        .collect();
    pairs.sort_unstable();
    pairs
        .iter()
        .map(|(id, name)| format!("{id}:{name}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes `id:name` pairs joined by `,` into the custom-name map.
///
/// Chunks without a `:` are skipped; of chunks with more than one `:` only
/// the segment between the first two separators becomes the name. Later
/// occurrences of an id overwrite earlier ones.
#[must_use]
pub fn decode_names(text: &str) -> HashMap<String, String> {
    let mut names = HashMap::new();

    for chunk in text.split(',') {
        if !chunk.contains(':') {
            continue;
        }
        let parts: Vec<&str> = chunk.split(':').collect();
        names.insert(parts[0].trim().to_string(), parts[1].trim().to_string());
    }

    names
}

/// Encodes the usage map as `id:count:timestamp` triples joined by `,`.
#[must_use]
pub fn encode_usage(usage: &HashMap<String, UsageStat>) -> String {
    let mut triples: Vec<(&str, UsageStat)> = usage
        .iter()
        .map(|(id, stat)| (id.as_str(), *stat))
        .collect();
    triples.sort_unstable_by_key(|(id, _)| *id);
    triples
        .iter()
        .map(|(id, stat)| format!("{id}:{}:{}", stat.count, stat.last_used))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes `id:count:timestamp` triples joined by `,` into the usage map.
///
/// Chunks without a `:` are skipped. A chunk with a `:` but fewer than three
/// segments yields a zeroed stat for its id. Any unparsable count or
/// timestamp makes the whole key decode as empty — recovery is per key, not
/// per chunk, matching how previously persisted data was read.
#[must_use]
pub fn decode_usage(text: &str) -> HashMap<String, UsageStat> {
    let mut usage = HashMap::new();

    for chunk in text.split(',') {
        if !chunk.contains(':') {
            continue;
        }
        let parts: Vec<&str> = chunk.split(':').collect();
        if parts.len() >= 3 {
            let count = match parts[1].trim().parse::<u32>() {
                Ok(count) => count,
                Err(_) => {
                    tracing::debug!(chunk = %chunk, "unparsable usage count, dropping key");
                    return HashMap::new();
                }
            };
            let last_used = match parts[2].trim().parse::<i64>() {
                Ok(ts) => ts,
                Err(_) => {
                    tracing::debug!(chunk = %chunk, "unparsable usage timestamp, dropping key");
                    return HashMap::new();
                }
            };
            usage.insert(parts[0].trim().to_string(), UsageStat::new(count, last_used));
        } else {
            usage.insert(parts[0].trim().to_string(), UsageStat::default());
        }
    }

    usage
}
