//! Canonical numeric text.
//!
//! Every `NUMBER` leaf carries its value as fixed-point text with exactly six
//! fractional digits (`2` becomes `"2.000000"`, `-1.1` becomes `"-1.100000"`).
//! Values are parsed as 64-bit floats.

/// Number of digits kept after the decimal point.
pub const FRACTION_DIGITS: usize = 6;

/// Formats a float as canonical numeric text.
pub fn format_number(value: f64) -> String {
    format!("{:.*}", FRACTION_DIGITS, value)
}

/// Parses numeric text as a finite 64-bit float.
///
/// Returns `None` for text that is not a number, or that names an infinity or
/// NaN.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Rewrites numeric text in canonical form.
///
/// Idempotent: canonical input comes back unchanged.
///
/// # Examples
///
/// ```
/// use infa_expr::numeric::canonicalize;
///
/// assert_eq!(canonicalize("2").as_deref(), Some("2.000000"));
/// assert_eq!(canonicalize("2.000000").as_deref(), Some("2.000000"));
/// assert_eq!(canonicalize("abc"), None);
/// ```
pub fn canonicalize(text: &str) -> Option<String> {
    parse_number(text).map(format_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_forms() {
        assert_eq!(canonicalize("2").unwrap(), "2.000000");
        assert_eq!(canonicalize("-1.1").unwrap(), "-1.100000");
        assert_eq!(canonicalize("250").unwrap(), "250.000000");
        assert_eq!(canonicalize("0.1234567").unwrap(), "0.123457");
        assert_eq!(canonicalize("100.99").unwrap(), "100.990000");
    }

    #[test]
    fn test_idempotent() {
        for input in ["2", "-1.1", "3.14159265", "1e3", "0", "123456789.5"] {
            let once = canonicalize(input).unwrap();
            assert_eq!(canonicalize(&once).unwrap(), once, "input: {}", input);
        }
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert_eq!(canonicalize(""), None);
        assert_eq!(canonicalize("1.2.3"), None);
        assert_eq!(canonicalize("inf"), None);
        assert_eq!(canonicalize("NaN"), None);
    }
}
