//! Number parsing and display helpers for monetary values coming from the UI.
//!
//! Values arrive as free-form strings ("12.5", " 3e2", "12.5 USD") and are
//! displayed with a fixed number of decimals. Parsing takes the longest
//! numeric prefix and rounding breaks exact ties away from zero.

/// Largest number of decimal digits [`to_fixed`] accepts
pub const MAX_FRACTION_DIGITS: u8 = 100;

/// Enough digits to print any finite `f64` below 1e21 exactly
const EXACT_DIGITS: usize = 1100;

/// Length of the longest prefix of `s` that reads as a decimal literal
fn numeric_prefix_len(s: &[u8]) -> usize {
    let mut i = 0;
    if matches!(s.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < s.len() && s[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < s.len() && s[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < s.len() && s[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }

    if i < s.len() && (s[i] == b'e' || s[i] == b'E') {
        let mut j = i + 1;
        if j < s.len() && (s[j] == b'+' || s[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < s.len() && s[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// Parse the leading number of `value`, ignoring leading whitespace and any
/// trailing text. Returns NaN when there is no leading number.
pub fn parse_float(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned.starts_with("Infinity") && trimmed.len() - unsigned.len() <= 1 {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let len = numeric_prefix_len(trimmed.as_bytes());
    if len == 0 {
        return f64::NAN;
    }
    trimmed[..len].parse::<f64>().unwrap_or(f64::NAN)
}

/// Format `value` with exactly `digits` decimals.
///
/// Rounds on the exact binary value, picking the larger magnitude on a tie.
/// Non-finite values print as `NaN`, `Infinity`, `-Infinity`; magnitudes of
/// 1e21 and above print in exponent form.
pub fn to_fixed(value: f64, digits: u8) -> String {
    let digits = digits.min(MAX_FRACTION_DIGITS) as usize;
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let negative = value < 0.0;
    let magnitude = value.abs();
    if magnitude >= 1e21 {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
            _ => exp,
        };
    }

    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(digits)).collect();
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5');
    let mut int_len = int_part.len();

    if round_up {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(kept.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(std::str::from_utf8(&kept[..int_len]).unwrap_or("0"));
    if digits > 0 {
        out.push('.');
        out.push_str(std::str::from_utf8(&kept[int_len..]).unwrap_or(""));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("12.5 USD"), 12.5);
        assert_eq!(parse_float("  42"), 42.0);
        assert_eq!(parse_float("-3.25abc"), -3.25);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e3x"), 1000.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("2e+"), 2.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_float("1e400"), f64::INFINITY);
    }

    #[test]
    fn test_parse_float_without_number() {
        assert!(parse_float("ten").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("inf").is_nan());
    }

    #[test]
    fn test_to_fixed_ties_round_away_from_zero() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(12.5, 0), "13");
    }

    #[test]
    fn test_to_fixed_uses_exact_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.1, 20), "0.10000000000000000555");
    }

    #[test]
    fn test_to_fixed_carry() {
        assert_eq!(to_fixed(9.995, 2), "9.99");
        assert_eq!(to_fixed(9.9951, 2), "10.00");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(10.0, 2), "10.00");
    }

    #[test]
    fn test_to_fixed_special_values() {
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 0), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 2), "-Infinity");
        assert_eq!(to_fixed(1e21, 2), "1e+21");
    }

    #[test]
    fn test_to_fixed_large_precision() {
        let formatted = to_fixed(1.0, MAX_FRACTION_DIGITS);
        assert_eq!(formatted.len(), 2 + MAX_FRACTION_DIGITS as usize);
        assert!(formatted.starts_with("1.000"));
    }
}
