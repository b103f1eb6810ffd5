//! Metadata block extraction from video descriptions.
//!
//! Uploaders embed a `===`-delimited key/value block in the description:
//!
//! ```text
//! ===
//! track: Buttonwillow
//! configuration: CW13
//! date: 06/03/2025
//! car: hyperion
//! time: 1:12.123
//! driver: driver@example.com
//! ===
//! ```

use std::collections::HashMap;

const BLOCK_MARKER: &str = "===";

/// Extract the first `===`-delimited metadata block from a description.
///
/// Lines between the markers are parsed as `key: value` pairs; lines without
/// a colon are ignored, keys and values are trimmed, and duplicate keys keep
/// the last occurrence. Returns an empty map when no block is present —
/// callers treat that as "no metadata, skip", not as an error.
pub fn extract_metadata(description: &str) -> HashMap<String, String> {
    let Some(block) = delimited_block(description) else {
        return HashMap::new();
    };

    let mut metadata = HashMap::new();
    for line in block.lines() {
        if let Some((key, value)) = line.split_once(':') {
            metadata.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    metadata
}

/// Content between the first pair of `===` markers, if both are present.
fn delimited_block(text: &str) -> Option<&str> {
    let open = text.find(BLOCK_MARKER)? + BLOCK_MARKER.len();
    let close = text[open..].find(BLOCK_MARKER)?;
    Some(text[open..open + close].trim())
}
