//! Lenient numeric parsing for beatmap fields.
//!
//! Beatmap files in the wild carry trailing junk after numbers (`9.5 ; old`)
//! and the format has always accepted the longest numeric prefix of a
//! field. These helpers reproduce that behaviour instead of `str::parse`,
//! which rejects the whole field.

/// Parse the longest leading decimal literal of `s` as `f64`.
///
/// Leading whitespace is skipped. Returns `None` when no digit is found.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
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
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
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

    s[..end].parse().ok()
}

/// Like [`parse_float_prefix`], rejecting values that overflow to infinity
pub fn parse_finite_prefix(s: &str) -> Option<f64> {
    parse_float_prefix(s).filter(|value| value.is_finite())
}

/// Parse the longest leading base-10 integer of `s`.
///
/// Values outside the `i32` range are rejected.
pub fn parse_int_prefix(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if end == digits_start {
        return None;
    }

    s[..end].parse().ok()
}
