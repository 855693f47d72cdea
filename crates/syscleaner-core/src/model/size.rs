//! Byte-size formatting and parsing.
//!
//! All internal sizes are `u64` bytes. Floating point is only used
//! at the display boundary. Units are binary (1 KB = 1024 B) but carry the
//! short labels users expect from a disk tool.

const UNITS: [(&str, u64); 4] = [
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
];

/// Format a byte count into a human-readable string with an appropriate unit.
pub fn format_size(bytes: u64) -> String {
    for (label, scale) in UNITS {
        if bytes >= scale {
            let value = bytes as f64 / scale as f64;
            // GB and TB get two decimals; smaller units one.
            return if scale >= 1 << 30 {
                format!("{value:.2} {label}")
            } else {
                format!("{value:.1} {label}")
            };
        }
    }
    format!("{bytes} B")
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse a size such as `"500"`, `"10MB"`, `"1.5 GB"` or `"64k"` into bytes.
///
/// A bare number is bytes. Suffixes are case-insensitive and the trailing
/// `B` is optional. Returns `None` for anything unparseable or negative.
pub fn parse_size(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(split);
    let number: f64 = number.trim().parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }

    let suffix = suffix.trim().to_ascii_uppercase();
    let suffix = suffix.strip_suffix('B').unwrap_or(&suffix);
    let multiplier: u64 = match suffix {
        "" => 1,
        "K" => 1 << 10,
        "M" => 1 << 20,
        "G" => 1 << 30,
        "T" => 1 << 40,
        _ => return None,
    };
    Some((number * multiplier as f64) as u64)
}
