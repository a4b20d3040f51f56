//! Numeric literal parsers.
//!
//! Both parsers look only at the front of their input and report how many
//! bytes they consumed, which is what the matching engine needs to advance
//! its cursor:
//!
//! - [`parse_int_seq`]: a signed integer in radix 2 to 36, or radix 0 for
//!   C-style auto-detection, accumulated exactly in a [`BigInt`]
//! - [`parse_float_seq`]: a signed decimal or hexadecimal floating literal,
//!   `inf`/`infinity`, or `nan` with an optional `(payload)`
//!
//! ## Examples
//!
//! ```rust
//! use scanf_sim::number::{parse_float_seq, parse_int_seq};
//! use scanf_sim::FloatLiteral;
//! use num_bigint::BigInt;
//!
//! assert_eq!(parse_int_seq("0x1Azz", 0), Some((BigInt::from(26), 4)));
//! assert_eq!(parse_float_seq("-2.5e1!"), Some((FloatLiteral::Finite(-25.0), 6)));
//! ```

use crate::decl::FloatLiteral;
use crate::hexfloat;
use num_bigint::BigInt;

fn consume_sign(data: &[u8]) -> (bool, usize) {
    match data.first() {
        Some(b'+') => (false, 1),
        Some(b'-') => (true, 1),
        _ => (false, 0),
    }
}

fn has_hex_prefix(data: &[u8]) -> bool {
    matches!(data.get(0..2), Some(b"0x") | Some(b"0X"))
        && data.get(2).is_some_and(u8::is_ascii_hexdigit)
}

fn digit_value(b: u8, base: u32) -> Option<u32> {
    (b as char).to_digit(base)
}

/// Parses an optionally signed integer from the front of `text`.
///
/// `base` is 2 to 36 (digits `0-9a-z`, either case), or 0 to detect the base
/// the way `strtol` does: `0x`/`0X` followed by a hex digit selects base 16,
/// any other leading `0` selects base 8, and everything else is decimal.
/// Base 16 also accepts the `0x` prefix. Returns `None` when no digit
/// follows the sign, or when `base` is out of range.
///
/// # Examples
///
/// ```rust
/// use scanf_sim::number::parse_int_seq;
/// use num_bigint::BigInt;
///
/// assert_eq!(parse_int_seq("-017", 0), Some((BigInt::from(-15), 4)));
/// assert_eq!(parse_int_seq("zz", 36), Some((BigInt::from(1295), 2)));
/// assert_eq!(parse_int_seq("+", 10), None);
/// ```
#[must_use]
pub fn parse_int_seq(text: &str, base: u32) -> Option<(BigInt, usize)> {
    if base == 1 || base > 36 {
        return None;
    }
    let data = text.as_bytes();
    let (negative, mut pos) = consume_sign(data);

    let base = match base {
        0 if has_hex_prefix(&data[pos..]) => {
            pos += 2;
            16
        }
        0 if data.get(pos) == Some(&b'0') => 8,
        0 => 10,
        16 if has_hex_prefix(&data[pos..]) => {
            pos += 2;
            16
        }
        other => other,
    };

    let start = pos;
    let mut value = BigInt::from(0u32);
    while let Some(digit) = data.get(pos).and_then(|&b| digit_value(b, base)) {
        value = value * base + digit;
        pos += 1;
    }
    if pos == start {
        return None;
    }

    Some((if negative { -value } else { value }, pos))
}

fn starts_with_ignore_case(data: &[u8], word: &[u8]) -> bool {
    data.len() >= word.len() && data[..word.len()].eq_ignore_ascii_case(word)
}

/// Length of `digits ['.' digits] [('e'|'E') [sign] digits]`, requiring at
/// least one mantissa digit. The exponent is only taken when it has digits.
fn decimal_literal_len(data: &[u8]) -> Option<usize> {
    let int_len = data.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut pos = int_len;
    let mut frac_len = 0;
    if data.get(pos) == Some(&b'.') {
        frac_len = data[pos + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_len > 0 || frac_len > 0 {
            pos += 1 + frac_len;
        }
    }
    if int_len == 0 && frac_len == 0 {
        return None;
    }

    if matches!(data.get(pos), Some(b'e') | Some(b'E')) {
        let (_, sign_len) = consume_sign(&data[pos + 1..]);
        let exp_start = pos + 1 + sign_len;
        let exp_len = data[exp_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_len > 0 {
            pos = exp_start + exp_len;
        }
    }
    Some(pos)
}

fn nan_payload_len(data: &[u8]) -> Option<usize> {
    if data.first() != Some(&b'(') {
        return None;
    }
    let body = data[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    (data.get(1 + body) == Some(&b')')).then_some(body)
}

/// Parses an optionally signed floating literal from the front of `text`.
///
/// Forms are tried in this order, all case-insensitive: hexadecimal
/// (`0x1.8p3`), decimal (`1.5e-3`), `infinity`/`inf`, and `nan` with an
/// optional `(n-char-sequence)` payload. A payload without its closing
/// parenthesis is not consumed.
///
/// # Examples
///
/// ```rust
/// use scanf_sim::number::parse_float_seq;
/// use scanf_sim::FloatLiteral;
///
/// assert_eq!(parse_float_seq("0x1.8p3"), Some((FloatLiteral::Finite(12.0), 7)));
/// assert_eq!(
///     parse_float_seq("nan(123)"),
///     Some((FloatLiteral::NaN { negative: false, payload: Some("123".into()) }, 8))
/// );
/// assert_eq!(parse_float_seq("-INF"), Some((FloatLiteral::Infinity { negative: true }, 4)));
/// assert_eq!(parse_float_seq("e5"), None);
/// ```
#[must_use]
pub fn parse_float_seq(text: &str) -> Option<(FloatLiteral, usize)> {
    let data = text.as_bytes();
    let (negative, sign_len) = consume_sign(data);
    let rest = &text[sign_len..];
    let body = rest.as_bytes();

    let (magnitude, len) = if let Some((literal, len)) = hexfloat::parse_prefix(rest) {
        (FloatLiteral::from_f64(literal.to_f64()), len)
    } else if let Some(len) = decimal_literal_len(body) {
        let value = rest[..len].parse::<f64>().ok()?;
        (FloatLiteral::from_f64(value), len)
    } else if starts_with_ignore_case(body, b"infinity") {
        (FloatLiteral::Infinity { negative: false }, 8)
    } else if starts_with_ignore_case(body, b"inf") {
        (FloatLiteral::Infinity { negative: false }, 3)
    } else if starts_with_ignore_case(body, b"nan") {
        match nan_payload_len(&body[3..]) {
            Some(payload_len) => (
                FloatLiteral::NaN {
                    negative: false,
                    payload: Some(rest[4..4 + payload_len].to_string()),
                },
                5 + payload_len,
            ),
            None => (
                FloatLiteral::NaN {
                    negative: false,
                    payload: None,
                },
                3,
            ),
        }
    } else {
        return None;
    };

    let literal = if negative { magnitude.negate() } else { magnitude };
    Some((literal, sign_len + len))
}
