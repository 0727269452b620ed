//! Number rendering in the fi-FI convention: no-break space between digit
//! groups, decimal comma, U+2212 for negative values.

pub const PLACEHOLDER: &str = "–";

const GROUP_SEPARATOR: char = '\u{A0}';
const DECIMAL_SEPARATOR: char = ',';
const MINUS_SIGN: char = '\u{2212}';
const MAX_INTEGER_FRACTION_DIGITS: usize = 3;

/// Grouped count; non-integral input keeps up to three fraction digits.
pub fn format_integer(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let fixed = fixed_digits(value.abs(), MAX_INTEGER_FRACTION_DIGITS);
    let (whole, fraction) = split_fixed(&fixed);
    localize(value < 0.0, whole, fraction.trim_end_matches('0'))
}

/// One fraction digit followed by `" %"`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let fixed = fixed_digits(value.abs(), 1);
    let (whole, fraction) = split_fixed(&fixed);
    format!("{} %", localize(value < 0.0, whole, fraction))
}

/// `value` rounded to `digits` decimals, ties away from zero. Rounding works
/// on the shortest decimal that round-trips to `value`, so `0.15` rounds to
/// `0.2` even though the nearest double sits just below it.
fn fixed_digits(value: f64, digits: usize) -> String {
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let significand: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|digit| digit - b'0')
        .collect();

    // Significand digits down to and including the last kept decimal place.
    let keep = exponent + 1 + digits as i64;
    let mut units: Vec<u8> = (0..keep.max(0) as usize)
        .map(|index| significand.get(index).copied().unwrap_or(0))
        .collect();
    let next = usize::try_from(keep)
        .ok()
        .and_then(|index| significand.get(index).copied())
        .unwrap_or(0);
    if next >= 5 {
        increment(&mut units);
    }

    if units.len() <= digits {
        let mut padded = vec![0; digits + 1 - units.len()];
        padded.append(&mut units);
        units = padded;
    }

    let (whole, fraction) = units.split_at(units.len() - digits);
    if fraction.is_empty() {
        digit_text(whole)
    } else {
        format!("{}.{}", digit_text(whole), digit_text(fraction))
    }
}

fn digit_text(units: &[u8]) -> String {
    units.iter().map(|unit| char::from(b'0' + unit)).collect()
}

fn increment(units: &mut Vec<u8>) {
    for digit in units.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    units.insert(0, 1);
}

fn split_fixed(fixed: &str) -> (&str, &str) {
    fixed.split_once('.').unwrap_or((fixed, ""))
}

fn localize(negative: bool, whole: &str, fraction: &str) -> String {
    let mut out = String::with_capacity(whole.len() + fraction.len() + 8);
    if negative {
        out.push(MINUS_SIGN);
    }

    let len = whole.len();
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(digit);
    }

    if !fraction.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }
    out
}
