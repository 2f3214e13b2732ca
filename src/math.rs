//! Unit math helpers
//!
//! Fixed-precision rounding, 16-bit integer assembly from register byte pairs and
//! the integer averaging used by the sample pipeline. All functions are pure.

/// Round `value` to `digits` significant digits.
///
/// Matches the rounding of JavaScript's `Number.prototype.toPrecision` for the
/// magnitudes sensors produce: `to_precision(29.2215, 2) == 29.0`,
/// `to_precision(127.0, 4) == 127.0`. Zero and non-finite values pass through.
#[must_use]
pub fn to_precision(value: f64, digits: u8) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }

    let magnitude = libm::floor(libm::log10(libm::fabs(value)));
    let exponent = f64::from(digits) - 1.0 - magnitude;

    // Scale so the kept digits sit left of the decimal point
    if exponent >= 0.0 {
        let factor = libm::pow(10.0, exponent);
        round_half_away(value * factor) / factor
    } else {
        let factor = libm::pow(10.0, -exponent);
        round_half_away(value / factor) * factor
    }
}

/// Round half away from zero (decimal-string rounding of `toPrecision`).
#[must_use]
pub fn round_half_away(value: f64) -> f64 {
    libm::round(value)
}

/// Round half up, towards positive infinity (`Math.round`).
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    libm::floor(value + 0.5)
}

/// Truncate towards zero and convert to an integer (`value | 0`).
///
/// Saturates at the `i32` bounds; NaN maps to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn truncate(value: f64) -> i32 {
    libm::trunc(value) as i32
}

/// Signed 16-bit value from a big-endian byte pair.
#[must_use]
pub const fn int16(msb: u8, lsb: u8) -> i16 {
    i16::from_be_bytes([msb, lsb])
}

/// Signed 16-bit value from a little-endian byte pair (low byte first on the bus).
#[must_use]
pub const fn int16_le(lsb: u8, msb: u8) -> i16 {
    i16::from_le_bytes([lsb, msb])
}

/// Sum of a slice of samples, widened so 100+ samples of 16-bit data cannot overflow.
#[must_use]
pub fn sum(values: &[i32]) -> i64 {
    values.iter().map(|&v| i64::from(v)).sum()
}

/// Floor division of an accumulated sum by a sample count.
///
/// Returns 0 for an empty count. Results outside `i32` saturate.
#[must_use]
pub fn floor_average(total: i64, count: u32) -> i32 {
    if count == 0 {
        return 0;
    }
    let average = total.div_euclid(i64::from(count));
    i32::try_from(average).unwrap_or(if average < 0 { i32::MIN } else { i32::MAX })
}
