// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lenient numeric coercion for text typed into set rows.
//!
//! Both parsers read the longest numeric prefix (so `"12 reps"` is 12), ignore leading
//! whitespace, and coerce anything unparseable, negative or non-finite to zero. Neither
//! ever fails.

/// Reps are whole numbers; a fractional part is truncated.
pub fn parse_reps(raw: &str) -> u32 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut idx = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            idx = 1;
            true
        }
        Some(b'+') => {
            idx = 1;
            false
        }
        _ => false,
    };

    let mut value: u32 = 0;
    let mut saw_digit = false;
    while let Some(digit) = bytes.get(idx).filter(|b| b.is_ascii_digit()) {
        saw_digit = true;
        value = value.saturating_mul(10).saturating_add(u32::from(digit - b'0'));
        idx += 1;
    }

    if !saw_digit || negative {
        return 0;
    }
    value
}

pub fn parse_weight(raw: &str) -> f64 {
    let prefix = float_prefix(raw.trim_start());
    if prefix.is_empty() {
        return 0.0;
    }
    prefix.parse::<f64>().map_or(0.0, normalize_weight)
}

/// Clamps a typed weight into the plan's domain: non-finite or negative becomes zero.
pub fn normalize_weight(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Longest prefix of `s` that forms a decimal float literal (`[+-]digits[.digits][e[+-]digits]`).
fn float_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end = digits_from(end);
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - end - 1;
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{normalize_weight, parse_reps, parse_weight};

    #[rstest]
    #[case("12", 12)]
    #[case("  8", 8)]
    #[case("12.9", 12)]
    #[case("10 reps", 10)]
    #[case("+6", 6)]
    #[case("", 0)]
    #[case("abc", 0)]
    #[case("-3", 0)]
    #[case("99999999999999", u32::MAX)]
    fn reps_follow_integer_prefix_rules(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_reps(raw), expected);
    }

    #[rstest]
    #[case("55", 55.0)]
    #[case("22.5", 22.5)]
    #[case(" 7.25kg", 7.25)]
    #[case(".5", 0.5)]
    #[case("5.", 5.0)]
    #[case("1e2", 100.0)]
    #[case("3e", 3.0)]
    #[case("2,5", 2.0)]
    #[case("", 0.0)]
    #[case(".", 0.0)]
    #[case("-", 0.0)]
    #[case("NaN", 0.0)]
    #[case("-10", 0.0)]
    #[case("1e999", 0.0)]
    fn weight_follows_float_prefix_rules(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_weight(raw), expected);
    }

    #[rstest]
    #[case(62.5, 62.5)]
    #[case(0.0, 0.0)]
    #[case(-0.0, 0.0)]
    #[case(-20.0, 0.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(f64::NEG_INFINITY, 0.0)]
    fn weight_values_are_clamped_to_plan_domain(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(normalize_weight(value), expected);
    }
}
