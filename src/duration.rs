use chrono::TimeDelta;
use itertools::Itertools;

const UNITS: [(u64, char); 4] = [(86_400, 'd'), (3_600, 'h'), (60, 'm'), (1, 's')];

fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    bytes
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk))
        .join(",")
}

/// Renders whole seconds as the two most significant non-zero units, e.g. `1h1m`.
///
/// Zero renders as `0s`. Negative intervals get a leading `-`.
pub fn humanize_seconds(total_seconds: i64) -> String {
    let sign = if total_seconds < 0 { "-" } else { "" };
    let mut remainder = total_seconds.unsigned_abs();

    let mut parts: Vec<String> = Vec::new();
    for (size, unit) in UNITS {
        let amount = remainder / size;
        remainder %= size;
        if amount != 0 || (unit == 's' && parts.is_empty()) {
            parts.push(format!("{}{unit}", with_thousands(amount)));
        }
    }

    format!("{sign}{}", parts.iter().take(2).join(""))
}

/// Humanizes a delta, truncating sub-second precision toward zero.
pub fn humanize(delta: TimeDelta) -> String {
    humanize_seconds(delta.num_seconds())
}
