//! Coercion of raw form input into sheet values.
//!
//! Numeric inputs take the leading number of the typed text and fall back
//! when there is none. A zero result also falls back, so with a fallback of
//! 0 this is invisible, but with a fallback of 1 an input of "0" becomes 1.

/// Leading-integer parse: whitespace, optional sign, then digits.
/// Trailing text is ignored ("12abc" -> 12, "3.9" -> 3).
pub fn parse_leading_int(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let run = digits.bytes().take_while(u8::is_ascii_digit).count();
    if run == 0 {
        return None;
    }

    let magnitude = digits[..run]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    let value = if negative { -magnitude } else { magnitude };

    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Leading-decimal parse: whitespace, optional sign, digits with an optional
/// fraction and exponent ("1.5kg" -> 1.5, ".5" -> 0.5).
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }

    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer input with a fallback for unparseable or zero input.
pub fn int_or(input: &str, fallback: i32) -> i32 {
    parse_leading_int(input)
        .filter(|v| *v != 0)
        .unwrap_or(fallback)
}

/// Fractional input with a fallback for unparseable or zero input.
pub fn float_or(input: &str, fallback: f64) -> f64 {
    parse_leading_float(input)
        .filter(|v| *v != 0.0)
        .unwrap_or(fallback)
}

/// Split a comma-separated tag string, trimming each piece.
///
/// Empty pieces are kept so a trailing comma survives while the user types.
pub fn split_tags(input: &str) -> Vec<String> {
    input.split(',').map(|s| s.trim().to_string()).collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
