//! Bonus value parsing
//!
//! Catalog values arrive as formatted text ("+12%", "1,200", "+1 Pip").
//! Parsing is lenient: anything that does not read as a number counts as `0`.

/// How a raw bonus string is cleaned before parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueFormat {
    /// Strip `+`, `%` and `,`
    #[default]
    Standard,
    /// Additionally strip whitespace and ASCII letters ("+1 Pip" -> "1")
    StripLetters,
}

impl ValueFormat {
    /// Parse a raw value according to this format
    pub fn parse(self, raw: &str) -> f64 {
        match self {
            ValueFormat::Standard => normalize(raw),
            ValueFormat::StripLetters => normalize_stripping_letters(raw),
        }
    }
}

/// Parse a formatted bonus value, returning `0.0` when it has no numeric reading
pub fn normalize(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '+' | '%' | ','))
        .collect();
    parse_leading_decimal(cleaned.trim()).unwrap_or(0.0)
}

/// Parse a value that may carry a descriptive suffix, such as pip and
/// archmastery bonuses
pub fn normalize_stripping_letters(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| {
            !matches!(c, '+' | '%' | ',') && !c.is_whitespace() && !c.is_ascii_alphabetic()
        })
        .collect();
    parse_leading_decimal(&cleaned).unwrap_or(0.0)
}

/// Read the longest prefix of `text` (after leading whitespace) that forms a
/// decimal number: optional sign, digits, optional fraction, optional exponent.
///
/// Returns `None` when no digits are found or the value overflows to infinity.
pub fn parse_leading_decimal(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the longest prefix of `text` that forms an integer (optional sign,
/// digits), the way a typed level or socket count is read.
pub fn parse_leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digit_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digit_start {
        return None;
    }

    text[..end].parse::<i64>().ok()
}
