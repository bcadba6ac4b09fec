//! Bit-exact conversions between the reduced-precision float formats used by
//! the accelerator and the `f64` scratch space the handlers compute in.
//!
//! Every format funnels through [`encode_minifloat`]/[`decode_minifloat`],
//! parameterized by exponent width, mantissa width, and bias; the five
//! public format structs just supply those parameters. Rounding is
//! round-to-nearest-even throughout, matching the source's FP8 packing rule
//! generalized to every width.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive as _;

/// IEEE rounding mode read from the `xmfrm` CSR. Only [`RoundingMode::Rne`]
/// is actually honored by the converters below; the others are real,
/// round-trippable encodings so the CSR and assembler stay faithful, but
/// they currently fall back to RNE arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum RoundingMode {
    Rne = 0,
    Rtz = 1,
    Rdn = 2,
    Rup = 3,
    Rmm = 4,
}

/// A reduced-precision float format: total bit width plus the IEEE-754-style
/// (exponent bits, mantissa bits, bias, has-infinity) quadruple.
pub trait Format {
    const WIDTH: u32;
    const EXP_BITS: u32;
    const MANT_BITS: u32;
    const BIAS: i32;
    const HAS_INF: bool;

    fn to_bits(x: f64) -> u32 {
        encode_minifloat(x, Self::EXP_BITS, Self::MANT_BITS, Self::BIAS, Self::HAS_INF)
    }

    fn from_bits(bits: u32) -> f64 {
        decode_minifloat(bits, Self::EXP_BITS, Self::MANT_BITS, Self::BIAS, Self::HAS_INF)
    }
}

/// Round a value `x` to the representable set of format `F` and back,
/// simulating a register read/write through that precision.
pub fn quantize<F: Format>(x: f64) -> f64 {
    F::from_bits(F::to_bits(x))
}

/// Resolve an `xmfrm` CSR value to a [`RoundingMode`], defaulting to RNE for
/// any value the CSR holds outside 0..=4 (writes to it aren't validated).
pub fn rounding_mode_from_csr(xmfrm: u32) -> RoundingMode {
    RoundingMode::from_u32(xmfrm).unwrap_or(RoundingMode::Rne)
}

/// Round-trip `x` through a format's `to_bits`/`from_bits` pair, honoring
/// `xmfrm`. This is the one branch point where rounding mode is actually
/// consulted: every non-RNE mode falls back to RNE arithmetic here, rather
/// than each call site silently assuming RNE on its own.
pub fn round_trip_with_mode(x: f64, to_bits: fn(f64) -> u32, from_bits: fn(u32) -> f64, xmfrm: u32) -> f64 {
    match rounding_mode_from_csr(xmfrm) {
        RoundingMode::Rne => from_bits(to_bits(x)),
        RoundingMode::Rtz | RoundingMode::Rdn | RoundingMode::Rup | RoundingMode::Rmm => from_bits(to_bits(x)),
    }
}

pub struct Fp32;
impl Format for Fp32 {
    const WIDTH: u32 = 32;
    const EXP_BITS: u32 = 8;
    const MANT_BITS: u32 = 23;
    const BIAS: i32 = 127;
    const HAS_INF: bool = true;

    fn to_bits(x: f64) -> u32 {
        (x as f32).to_bits()
    }

    fn from_bits(bits: u32) -> f64 {
        f32::from_bits(bits) as f64
    }
}

pub struct Fp16;
impl Format for Fp16 {
    const WIDTH: u32 = 16;
    const EXP_BITS: u32 = 5;
    const MANT_BITS: u32 = 10;
    const BIAS: i32 = 15;
    const HAS_INF: bool = true;
}

pub struct Bf16;
impl Format for Bf16 {
    const WIDTH: u32 = 16;
    const EXP_BITS: u32 = 8;
    const MANT_BITS: u32 = 7;
    const BIAS: i32 = 127;
    const HAS_INF: bool = true;
}

pub struct Fp8E4M3;
impl Format for Fp8E4M3 {
    const WIDTH: u32 = 8;
    const EXP_BITS: u32 = 4;
    const MANT_BITS: u32 = 3;
    const BIAS: i32 = 7;
    const HAS_INF: bool = false;
}

pub struct Fp8E5M2;
impl Format for Fp8E5M2 {
    const WIDTH: u32 = 8;
    const EXP_BITS: u32 = 5;
    const MANT_BITS: u32 = 2;
    const BIAS: i32 = 15;
    const HAS_INF: bool = true;
}

/// Convenience wrappers matching the source's naming, used directly by the
/// handlers instead of spelling out `Fp16::to_bits` everywhere.
pub fn float_to_bits32(x: f64) -> u32 {
    Fp32::to_bits(x)
}
pub fn bits_to_float32(b: u32) -> f64 {
    Fp32::from_bits(b)
}
pub fn float_to_bits16(x: f64) -> u32 {
    Fp16::to_bits(x)
}
pub fn bits_to_float16(b: u32) -> f64 {
    Fp16::from_bits(b)
}
pub fn float_to_bfloat16(x: f64) -> u32 {
    Bf16::to_bits(x)
}
pub fn bfloat16_to_float(b: u32) -> f64 {
    Bf16::from_bits(b)
}
pub fn float_to_bits8_e4m3(x: f64) -> u32 {
    Fp8E4M3::to_bits(x)
}
pub fn bits_to_float8_e4m3(b: u32) -> f64 {
    Fp8E4M3::from_bits(b)
}
pub fn float_to_bits8_e5m2(x: f64) -> u32 {
    Fp8E5M2::to_bits(x)
}
pub fn bits_to_float8_e5m2(b: u32) -> f64 {
    Fp8E5M2::from_bits(b)
}

/// Sign-extend a stored INT8 lane (as a byte) into a 32-bit value.
pub fn sign_extend_i8(v: u8) -> i32 {
    if v & 0x80 != 0 {
        (v as i32) | (0xFFFFFF00u32 as i32)
    } else {
        v as i32
    }
}

fn round_to_nearest_even(value: u64, shift: u32) -> u64 {
    if shift == 0 {
        return value;
    }
    if shift >= 64 {
        return 0;
    }
    let half = 1u64 << (shift - 1);
    let mask = (1u64 << shift) - 1;
    let lower = value & mask;
    let mut result = value >> shift;
    if lower > half || (lower == half && (result & 1) == 1) {
        result += 1;
    }
    result
}

fn encode_minifloat(x: f64, exp_bits: u32, mant_bits: u32, bias: i32, has_inf: bool) -> u32 {
    let width = exp_bits + mant_bits + 1;
    let sign_bit = (x.to_bits() >> 63) as u32 & 1;
    let max_exp = (1u32 << exp_bits) - 1;

    if x.is_nan() {
        let nan_mant = 1u32 << (mant_bits - 1);
        return (sign_bit << (width - 1)) | (max_exp << mant_bits) | nan_mant;
    }
    if x == 0.0 {
        return sign_bit << (width - 1);
    }
    if x.is_infinite() {
        return if has_inf {
            (sign_bit << (width - 1)) | (max_exp << mant_bits)
        } else {
            let max_mant = (1u32 << mant_bits) - 1;
            (sign_bit << (width - 1)) | ((max_exp - 1) << mant_bits) | max_mant
        };
    }

    let bits = x.abs().to_bits();
    let raw_exp = ((bits >> 52) & 0x7FF) as i32 - 1023;
    let mantissa = (1u64 << 52) | (bits & 0xF_FFFF_FFFF_FFFF);
    let shift = 52 - mant_bits as i32;

    let mut new_exp = raw_exp + bias;

    if new_exp <= 0 {
        let extra = 1 - new_exp;
        let total_shift = shift + extra;
        if total_shift >= 53 + 11 {
            return sign_bit << (width - 1);
        }
        let rounded = round_to_nearest_even(mantissa, total_shift.max(0) as u32);
        if rounded == 0 {
            return sign_bit << (width - 1);
        }
        if rounded >= (1u64 << mant_bits) {
            return (sign_bit << (width - 1)) | (1u32 << mant_bits);
        }
        return (sign_bit << (width - 1)) | (rounded as u32);
    }

    let mut rounded = round_to_nearest_even(mantissa, shift as u32);
    if rounded >= (2u64 << mant_bits) {
        rounded >>= 1;
        new_exp += 1;
    }
    let out_mant = (rounded & ((1u64 << mant_bits) - 1)) as u32;

    if new_exp >= max_exp as i32 {
        return if has_inf {
            (sign_bit << (width - 1)) | (max_exp << mant_bits)
        } else {
            let max_mant = (1u32 << mant_bits) - 1;
            (sign_bit << (width - 1)) | ((max_exp - 1) << mant_bits) | max_mant
        };
    }

    (sign_bit << (width - 1)) | ((new_exp as u32) << mant_bits) | out_mant
}

fn decode_minifloat(bits: u32, exp_bits: u32, mant_bits: u32, bias: i32, has_inf: bool) -> f64 {
    let width = exp_bits + mant_bits + 1;
    let sign = (bits >> (width - 1)) & 1;
    let exp_raw = (bits >> mant_bits) & ((1 << exp_bits) - 1);
    let mant_raw = bits & ((1 << mant_bits) - 1);
    let max_exp = (1u32 << exp_bits) - 1;
    let sign_mul = if sign == 1 { -1.0 } else { 1.0 };

    if has_inf && exp_raw == max_exp {
        return if mant_raw == 0 {
            sign_mul * f64::INFINITY
        } else {
            f64::NAN
        };
    }

    if exp_raw == 0 {
        if mant_raw == 0 {
            return sign_mul * 0.0;
        }
        let frac = mant_raw as f64 / (1u64 << mant_bits) as f64;
        return sign_mul * frac * 2f64.powi(1 - bias);
    }

    let frac = 1.0 + mant_raw as f64 / (1u64 << mant_bits) as f64;
    sign_mul * frac * 2f64.powi(exp_raw as i32 - bias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fp32_round_trips_exactly() {
        for x in [1.0f64, -2.5, 3.25, 0.0, -0.0, 123456.75] {
            assert_eq!(bits_to_float32(float_to_bits32(x)), x);
        }
    }

    #[test]
    fn fp16_round_trips_representable_values() {
        assert_eq!(bits_to_float16(float_to_bits16(1.0)), 1.0);
        assert_eq!(bits_to_float16(float_to_bits16(-2.0)), -2.0);
        assert_eq!(bits_to_float16(float_to_bits16(0.5)), 0.5);
    }

    #[test]
    fn bf16_truncates_fp32_mantissa() {
        let x = 1.0f64 + 1.0 / 128.0;
        let bits = float_to_bfloat16(x);
        let expected_top16 = ((x as f32).to_bits() >> 16) as u32;
        assert_eq!(bits, expected_top16);
    }

    #[test]
    fn fp8_e4m3_saturates_rather_than_infinity() {
        let bits = float_to_bits8_e4m3(1.0e9);
        assert_eq!(bits & 0x7F, 0x7F);
    }

    #[test]
    fn int8_sign_extends() {
        assert_eq!(sign_extend_i8(0x01), 1);
        assert_eq!(sign_extend_i8(0xFF), -1);
        assert_eq!(sign_extend_i8(0x80), -128);
    }

    #[test]
    fn rounding_mode_from_csr_defaults_to_rne_out_of_range() {
        assert_eq!(rounding_mode_from_csr(0), RoundingMode::Rne);
        assert_eq!(rounding_mode_from_csr(3), RoundingMode::Rup);
        assert_eq!(rounding_mode_from_csr(99), RoundingMode::Rne);
    }

    #[test]
    fn round_trip_with_mode_matches_quantize_for_every_mode() {
        let x = 1.0 + 1.0 / 1024.0;
        for xmfrm in 0..=4u32 {
            assert_eq!(
                round_trip_with_mode(x, float_to_bits16, bits_to_float16, xmfrm),
                quantize::<Fp16>(x)
            );
        }
    }

    #[test]
    fn zero_round_trips_in_every_format() {
        assert_eq!(bits_to_float32(float_to_bits32(0.0)), 0.0);
        assert_eq!(bits_to_float16(float_to_bits16(0.0)), 0.0);
        assert_eq!(bfloat16_to_float(float_to_bfloat16(0.0)), 0.0);
        assert_eq!(bits_to_float8_e4m3(float_to_bits8_e4m3(0.0)), 0.0);
        assert_eq!(bits_to_float8_e5m2(float_to_bits8_e5m2(0.0)), 0.0);
    }
}
