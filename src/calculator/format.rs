//! Number formatting for calculator results.

/// Default number of fractional digits kept in a displayed result.
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Format a number for display using en-US conventions.
///
/// Groups the integer part with `,`, keeps at most ten fractional digits and
/// drops trailing zeros: `1234567.5` becomes `1,234,567.5`.
pub fn format_number(value: f64) -> String {
    format_number_with(value, MAX_FRACTION_DIGITS)
}

/// Format a number with a custom fractional digit limit.
pub fn format_number_with(value: f64, max_fraction_digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let symbol = if value.is_sign_positive() { "∞" } else { "-∞" };
        return symbol.to_string();
    }

    let (int_part, frac_part) = round_half_up(value.abs(), max_fraction_digits);
    let int_part = int_part.as_str();
    let frac_part = frac_part.trim_end_matches('0');

    let mut result = String::new();
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        result.push('-');
    }
    result.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        result.push('.');
        result.push_str(frac_part);
    }
    result
}

/// Decimal digits of every finite `f64` end within this many fractional places.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Round a non-negative value to `digits` fractional places, ties away from zero.
///
/// Returns the integer and fractional digit strings. The fractional part is
/// exactly `digits` long.
fn round_half_up(value: f64, digits: usize) -> (String, String) {
    // Wide enough that `{:.N}` does no rounding of its own.
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS.max(digits + 1), value);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5');

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
        }
    }

    let frac = kept.split_off(kept.len() - digits);
    // Only ASCII digits were pushed.
    let to_string = |bytes: Vec<u8>| bytes.into_iter().map(char::from).collect::<String>();
    (to_string(kept), to_string(frac))
}

/// Insert `,` between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1_000_000.0), "1,000,000");
        assert_eq!(format_number(-1234.0), "-1,234");
    }

    #[test]
    fn test_fractions_trimmed() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666667");
        assert_eq!(format_number(1234.25), "1,234.25");
        assert_eq!(format_number(-0.125), "-0.125");
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-1e-12), "0");
    }

    #[test]
    fn test_large_values_keep_all_digits() {
        assert_eq!(format_number(2f64.powi(70)), "1,180,591,620,717,411,303,424");
        assert_eq!(format_number(1e21), "1,000,000,000,000,000,000,000");
    }

    #[test]
    fn test_custom_precision() {
        assert_eq!(format_number_with(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_number_with(2.75, 0), "3");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_number(0.00048828125), "0.0004882813");
        assert_eq!(format_number(-0.00048828125), "-0.0004882813");
        assert_eq!(format_number_with(2.5, 0), "3");
        assert_eq!(format_number_with(0.5, 0), "1");
        assert_eq!(format_number_with(-2.5, 0), "-3");
        assert_eq!(format_number_with(0.125, 2), "0.13");
    }

    #[test]
    fn test_rounding_carries_into_integer_part() {
        assert_eq!(format_number_with(9.96, 1), "10");
        assert_eq!(format_number_with(999.9996, 3), "1,000");
        assert_eq!(format_number_with(0.0004, 3), "0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }
}
