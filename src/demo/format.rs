// Number parsing and USD formatting for the demo components
//
// Parsing is prefix-based: "12.5abc" reads as 12.5, "abc" reads as nothing.

/// Leading decimal number of `s`, ignoring leading whitespace
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        frac_digits = frac_end - frac_start;
        if int_digits + frac_digits > 0 {
            end = frac_end;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    // Normalize "5." / ".5" before handing to the std parser
    let mut literal = String::with_capacity(end + 2);
    let number = &s[..end];
    let (sign, unsigned) = match number.as_bytes().first() {
        Some(b'+' | b'-') => number.split_at(1),
        _ => ("", number),
    };
    literal.push_str(sign);
    if unsigned.starts_with('.') {
        literal.push('0');
    }
    literal.push_str(unsigned);
    if let Some(stripped) = literal.strip_suffix('.') {
        literal = stripped.to_string();
    } else if literal.contains(".e") || literal.contains(".E") {
        literal = literal.replacen(".e", "e", 1).replacen(".E", "E", 1);
    }
    literal.parse().ok()
}

/// Leading integer of `s`, ignoring leading whitespace
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// en-US currency formatting: `$1,234.50`, `-$3.00`
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "$∞".to_string()
        } else {
            "-$∞".to_string()
        };
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let (dollars, cents) = (cents / 100, cents % 100);

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && (dollars > 0 || cents > 0) {
        "-"
    } else {
        ""
    };
    format!("{}${}.{:02}", sign, grouped, cents)
}

/// Inverse of [`format_usd`]: drop `$` and `,`, then parse
pub fn parse_usd(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    parse_float(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefixes() {
        assert_eq!(parse_float("12.5"), Some(12.5));
        assert_eq!(parse_float("  25"), Some(25.0));
        assert_eq!(parse_float("10abc"), Some(10.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("5."), Some(5.0));
        assert_eq!(parse_float("-3.25e2x"), Some(-325.0));
        assert_eq!(parse_float("1e"), Some(1.0));
        assert_eq!(parse_float("2.e3"), Some(2000.0));
        assert_eq!(parse_float("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_float_rejects_non_numbers() {
        for s in ["", "   ", "abc", ".", "-", "+.", "$5"] {
            assert_eq!(parse_float(s), None, "{:?}", s);
        }
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("3"), Some(3));
        assert_eq!(parse_int(" 42px"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("1.9"), Some(1));
        assert_eq!(parse_int("x1"), None);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(12.5), "$12.50");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_usd(-3.0), "-$3.00");
        assert_eq!(format_usd(0.005), "$0.01");
    }

    #[test]
    fn test_parse_usd_reads_formatted_values() {
        assert_eq!(parse_usd("$1,234.50"), Some(1234.5));
        assert_eq!(parse_usd(&format_usd(37.5)), Some(37.5));
        assert_eq!(parse_usd("NaN"), None);
    }
}
