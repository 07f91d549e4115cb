//! Heuristic detection of Fernet tokens inside JSON values.
//!
//! The scan is a heuristic, not a parse: a candidate must look like
//! base64url, be longer than [`MIN_TOKEN_CHARS`], and start with
//! [`TOKEN_PREFIX`]. False negatives (a real token under an unexpected
//! version byte) and false positives (a coincidental base64url blob) are
//! both possible and accepted; a false positive simply fails decryption
//! downstream and is left unchanged.

use std::collections::BTreeSet;

use serde_json::Value;

/// Every token emitted by this cipher starts with `gAAAAA`: the version
/// byte 0x80 followed by the zero high bytes of any timestamp before 2106.
pub const TOKEN_PREFIX: &str = "gAAAAA";

/// Candidates must be strictly longer than this. The shortest well-formed
/// token (57 bytes) encodes to 76 characters, so this bound only exists to
/// reject short look-alikes cheaply.
pub const MIN_TOKEN_CHARS: usize = 50;

/// Whether a string looks like a Fernet token.
///
/// Checks the `[A-Za-z0-9_-]` body alphabet with at most two trailing `=`,
/// the minimum length, and the version prefix.
#[must_use]
pub fn looks_like_token(s: &str) -> bool {
    if s.len() <= MIN_TOKEN_CHARS || !s.starts_with(TOKEN_PREFIX) {
        return false;
    }

    let body = s.trim_end_matches('=');
    if s.len() - body.len() > 2 {
        return false;
    }
    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Collect every token-looking string in a JSON value.
///
/// Walks object values (keys are never scanned), array elements, and
/// scalars. `serde_json::Value` trees are acyclic by construction, so the
/// walk always terminates. The result is deduplicated and ordered, which
/// keeps batched remote requests deterministic.
#[must_use]
pub fn collect_tokens(value: &Value) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    collect_into(value, &mut found);
    found
}

fn collect_into(value: &Value, found: &mut BTreeSet<String>) {
    match value {
        Value::String(s) => {
            if looks_like_token(s) {
                found.insert(s.clone());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_into(item, found);
            }
        }
        Value::Object(entries) => {
            for item in entries.values() {
                collect_into(item, found);
            }
        }
        _ => {}
    }
}
