//! Share-token codec
//!
//! A token is five dash-separated fields:
//!
//! ```text
//! <variant key>-<health>-<ap>-<start unix secs>-<end unix secs>
//! ```
//!
//! The four numbers are base-36. The attempt's id and name are not encoded.

use crate::attempt::Attempt;
use crate::catalog::Catalog;
use crate::time::Timestamp;

const SEPARATOR: char = '-';
const FIELD_COUNT: usize = 5;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encode an attempt as a share token
///
/// Health and AP are rounded up to whole numbers. A missing start encodes as
/// the end time. Returns None when the attempt has no variant, a non-finite or
/// negative quantity, or a time before the Unix epoch.
pub fn encode(attempt: &Attempt) -> Option<String> {
    let variant = attempt.variant.as_ref()?;
    let start = attempt.start_time.unwrap_or(attempt.end_time);

    let fields = [
        variant.key.to_string(),
        to_base36(whole(attempt.health)?),
        to_base36(whole(attempt.ap)?),
        to_base36(u64::try_from(start.unix()).ok()?),
        to_base36(u64::try_from(attempt.end_time.unix()).ok()?),
    ];
    Some(fields.join(&SEPARATOR.to_string()))
}

/// Decode a share token against a catalog
///
/// Returns None for anything that is not a complete, valid token.
pub fn decode(token: &str, catalog: &Catalog) -> Option<Attempt> {
    let parts: Vec<&str> = token.trim().split(SEPARATOR).collect();
    if parts.len() != FIELD_COUNT {
        return None;
    }

    let variant = catalog.get(parts[0])?;
    let health = from_base36(parts[1])?;
    let ap = from_base36(parts[2])?;
    let start = Timestamp::from_unix(i64::try_from(from_base36(parts[3])?).ok()?)?;
    let end = Timestamp::from_unix(i64::try_from(from_base36(parts[4])?).ok()?)?;

    let attempt = Attempt::new(health as f64, ap as f64, end)
        .with_variant(variant.clone())
        .with_start(start);
    attempt.validate().ok()?;
    Some(attempt)
}

fn whole(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 || value > u64::MAX as f64 {
        return None;
    }
    Some(value.ceil() as u64)
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn from_base36(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    u64::from_str_radix(s, 36).ok()
}
