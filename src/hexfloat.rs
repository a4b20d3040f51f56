//! Hexadecimal floating literals (`0x1.8p3`).
//!
//! [`parse_prefix`] recognizes the longest hexadecimal floating literal at the
//! front of a string, and [`HexFloat::to_f64`] turns it into the nearest
//! `f64`, rounding half to even. This includes subnormal results.

use num_bigint::BigUint;

/// Bits in an `f64` significand, including the implicit leading bit.
const SIGNIFICAND_BITS: i64 = f64::MANTISSA_DIGITS as i64;

/// Binary exponent of the smallest subnormal `f64` (2^-1074).
const MIN_SUBNORMAL_EXP: i64 = f64::MIN_EXP as i64 - SIGNIFICAND_BITS;

/// Larger exponents saturate to infinity or zero regardless of digit count.
const EXPONENT_LIMIT: i64 = 1 << 40;

fn hex_digit_to_int(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// A hexadecimal floating literal split into digit values and exponent.
///
/// The value is `digits * 16^-frac_len * 2^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexFloat {
    pub digits: Vec<u8>,
    pub frac_len: usize,
    pub exponent: i64,
}

impl HexFloat {
    /// Returns the nearest `f64` to this literal's magnitude.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scanf_sim::hexfloat::parse_prefix;
    ///
    /// let (literal, len) = parse_prefix("0x1.8p3").unwrap();
    /// assert_eq!(len, 7);
    /// assert_eq!(literal.to_f64(), 12.0);
    /// ```
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let mut mantissa = BigUint::from(0u32);
        for digit in &self.digits {
            mantissa = (mantissa << 4u32) + u32::from(*digit);
        }
        if mantissa.bits() == 0 {
            return 0.0;
        }

        let frac_bits = i64::try_from(self.frac_len)
            .unwrap_or(EXPONENT_LIMIT)
            .saturating_mul(4);
        round_to_f64(&mantissa, self.exponent.saturating_sub(frac_bits))
    }
}

/// Rounds `mantissa * 2^exp` to the nearest `f64`, ties to even.
fn round_to_f64(mantissa: &BigUint, exp: i64) -> f64 {
    let bits = i64::try_from(mantissa.bits()).unwrap_or(i64::MAX);
    if exp.saturating_add(bits) > i64::from(f64::MAX_EXP) {
        return f64::INFINITY;
    }

    let shift = (bits - SIGNIFICAND_BITS).max(MIN_SUBNORMAL_EXP.saturating_sub(exp));
    if shift <= 0 {
        return ldexp(to_u64(mantissa) as f64, exp);
    }
    if shift > bits {
        return 0.0;
    }

    let shift_bits = shift as u64;
    let mut truncated: BigUint = mantissa >> shift_bits;
    let half = mantissa.bit(shift_bits - 1);
    let sticky = mantissa
        .trailing_zeros()
        .is_some_and(|zeros| zeros < shift_bits - 1);
    if half && (sticky || truncated.bit(0)) {
        truncated += 1u32;
    }
    ldexp(to_u64(&truncated) as f64, exp + shift)
}

// At most 54 significant bits reach this point.
fn to_u64(value: &BigUint) -> u64 {
    value.to_u64_digits().first().copied().unwrap_or(0)
}

fn pow2(exp: i64) -> f64 {
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// `value * 2^exp`, exact whenever the result is representable.
fn ldexp(mut value: f64, mut exp: i64) -> f64 {
    while exp > 1023 {
        value *= pow2(1023);
        exp -= 1023;
        if value.is_infinite() {
            return value;
        }
    }
    while exp < -1022 {
        value *= pow2(-1022);
        exp += 1022;
        if value == 0.0 {
            return value;
        }
    }
    value * pow2(exp)
}

fn consume_hex_digits(data: &[u8]) -> (Vec<u8>, usize) {
    let digits: Vec<u8> = data.iter().map_while(|&b| hex_digit_to_int(b)).collect();
    let len = digits.len();
    (digits, len)
}

/// Recognizes an unsigned hexadecimal floating literal at the front of `text`.
///
/// Grammar: `0x` or `0X`, then hex digits with an optional `.` fraction (at
/// least one digit on one side of it), then optionally `p`/`P` and a signed
/// decimal exponent. An exponent marker with no digits after it is left
/// unconsumed. Returns the literal and the number of bytes consumed.
#[must_use]
pub fn parse_prefix(text: &str) -> Option<(HexFloat, usize)> {
    let data = text.as_bytes();
    match data.get(0..2) {
        Some(b"0x") | Some(b"0X") => {}
        _ => return None,
    }
    let mut pos = 2;

    let (mut digits, int_len) = consume_hex_digits(&data[pos..]);
    pos += int_len;

    let mut frac_len = 0;
    if data.get(pos) == Some(&b'.') {
        let (frac, len) = consume_hex_digits(&data[pos + 1..]);
        if int_len > 0 || len > 0 {
            pos += 1 + len;
            frac_len = len;
            digits.extend(frac);
        }
    }
    if digits.is_empty() {
        return None;
    }

    let (exponent, exp_len) = parse_binary_exponent(&data[pos..]);
    pos += exp_len;

    Some((
        HexFloat {
            digits,
            frac_len,
            exponent,
        },
        pos,
    ))
}

fn parse_binary_exponent(data: &[u8]) -> (i64, usize) {
    if !matches!(data.first(), Some(b'p') | Some(b'P')) {
        return (0, 0);
    }
    let (negative, sign_len) = match data.get(1) {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let start = 1 + sign_len;
    let mut value: i64 = 0;
    let mut len = 0;
    for &b in data[start..].iter().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + i64::from(b - b'0')).min(EXPONENT_LIMIT);
        len += 1;
    }
    if len == 0 {
        return (0, 0);
    }
    (if negative { -value } else { value }, start + len)
}
