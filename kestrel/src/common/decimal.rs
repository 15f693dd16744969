use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

const MAX_SCALE: u8 = 38;

/// An exact decimal number stored as `coefficient * 10^-scale`.
///
/// Decimals compare by numeric value: `Decimal::new(150, 2)` (1.50) is
/// equal to `Decimal::new(15, 1)` (1.5). Scales above 38 are clamped
/// because no `i128` coefficient needs more digits than that.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimal {
    coefficient: i128,
    scale: u8,
}

impl Decimal {
    pub fn new(coefficient: i128, scale: u8) -> Self {
        Decimal {
            coefficient,
            scale: scale.min(MAX_SCALE),
        }
    }

    pub fn coefficient(&self) -> i128 {
        self.coefficient
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// Approximates the value as a double.
    pub fn to_f64(&self) -> f64 {
        self.coefficient as f64 / 10f64.powi(self.scale as i32)
    }

    /// Compares against another decimal by value, exactly.
    pub fn cmp_decimal(&self, other: &Decimal) -> Ordering {
        let (a, b) = (self.coefficient, other.coefficient);
        if self.scale == other.scale {
            return a.cmp(&b);
        }

        let sign = a.signum().cmp(&b.signum());
        if sign != Ordering::Equal || a == 0 {
            return sign;
        }

        // |a| * 10^scale_b against |b| * 10^scale_a, both below 2^254
        let left = widening_mul(a.unsigned_abs(), pow10(other.scale));
        let right = widening_mul(b.unsigned_abs(), pow10(self.scale));
        if a < 0 {
            right.cmp(&left)
        } else {
            left.cmp(&right)
        }
    }

    /// Compares against a double by exact value. `NaN` sorts below every
    /// decimal and the infinities bound them.
    pub fn cmp_f64(&self, other: f64) -> Ordering {
        if other.is_nan() {
            return Ordering::Greater;
        }
        if other.is_infinite() {
            return if other > 0.0 {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let sign = self.coefficient.signum().cmp(&sign_of(other));
        if sign != Ordering::Equal || self.coefficient == 0 {
            return sign;
        }

        let magnitude = cmp_magnitude(self.coefficient.unsigned_abs(), self.scale, other.abs());
        if self.coefficient < 0 {
            magnitude.reverse()
        } else {
            magnitude
        }
    }

    /// Compares against an integer by value.
    pub fn cmp_i64(&self, other: i64) -> Ordering {
        match rescale(other as i128, self.scale) {
            Some(other) => self.coefficient.cmp(&other),
            // the integer does not fit at this scale, so its magnitude wins
            None if other < 0 => Ordering::Greater,
            None => Ordering::Less,
        }
    }
}

fn rescale(value: i128, by: u8) -> Option<i128> {
    10i128
        .checked_pow(by as u32)
        .and_then(|factor| value.checked_mul(factor))
}

fn pow10(scale: u8) -> u128 {
    10u128.pow(scale as u32)
}

fn sign_of(value: f64) -> i128 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Compares `digits / 10^scale` against a finite, non-negative double.
fn cmp_magnitude(digits: u128, scale: u8, value: f64) -> Ordering {
    const TWO_POW_127: f64 = (1u128 << 127) as f64;

    // no decimal exceeds 2^127 in magnitude
    if value > TWO_POW_127 {
        return Ordering::Less;
    }

    let factor = pow10(scale);
    let whole = value.trunc();
    match (digits / factor).cmp(&(whole as u128)) {
        Ordering::Equal => cmp_fraction(digits % factor, factor, value - whole),
        ordering => ordering,
    }
}

/// Compares `numerator / denominator` against a double in `[0, 1)`.
fn cmp_fraction(numerator: u128, denominator: u128, fraction: f64) -> Ordering {
    if fraction == 0.0 {
        return numerator.cmp(&0);
    }

    let bits = fraction.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as u32;
    let mantissa = (bits & ((1u64 << 52) - 1)) as u128;
    // fraction == significand / 2^shift, with shift >= 53 below one
    let (significand, shift) = if exponent == 0 {
        (mantissa, 1074)
    } else {
        (mantissa | (1u128 << 52), 1075 - exponent)
    };

    match shl_wide(numerator, shift) {
        Some(left) => left.cmp(&widening_mul(significand, denominator)),
        None => Ordering::Greater,
    }
}

/// Full 256 bit product as `(high, low)`.
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const LOW: u128 = u64::MAX as u128;

    let (a0, a1) = (a & LOW, a >> 64);
    let (b0, b1) = (b & LOW, b >> 64);
    let (p00, p01, p10, p11) = (a0 * b0, a0 * b1, a1 * b0, a1 * b1);

    let middle = (p00 >> 64) + (p01 & LOW) + (p10 & LOW);
    let low = (p00 & LOW) | (middle << 64);
    let high = p11 + (p01 >> 64) + (p10 >> 64) + (middle >> 64);
    (high, low)
}

/// `value << shift` as `(high, low)`, or `None` past 256 bits.
fn shl_wide(value: u128, shift: u32) -> Option<(u128, u128)> {
    if value == 0 {
        return Some((0, 0));
    }
    let bits = 128 - value.leading_zeros();
    if bits + shift > 256 {
        return None;
    }

    Some(match shift {
        0 => (0, value),
        1..=127 => (value >> (128 - shift), value << shift),
        _ => (value << (shift - 128), 0),
    })
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_decimal(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_decimal(other)
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.coefficient);
        }

        let digits = self.coefficient.unsigned_abs().to_string();
        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        let sign = if self.coefficient < 0 { "-" } else { "" };
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}
