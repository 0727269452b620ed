use crate::normalize::is_space;

/// Numeric-string coercion for count fields. A missing field is NaN, a blank
/// one is zero, and anything unparsable is NaN so the row gets rejected.
pub(super) fn coerce_number(field: Option<&str>) -> f64 {
    let Some(raw) = field else {
        return f64::NAN;
    };

    let trimmed = raw.trim_matches(is_space);
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(value) = parse_prefixed_integer(trimmed) {
        return value;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let mut chars = text.chars();
    if chars.next() != Some('0') {
        return None;
    }

    let radix = match chars.next()? {
        'x' | 'X' => 16,
        'o' | 'O' => 8,
        'b' | 'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.starts_with(['+', '-']) {
        return Some(f64::NAN);
    }
    Some(
        u128::from_str_radix(digits, radix)
            .map(|value| value as f64)
            .unwrap_or(f64::NAN),
    )
}
