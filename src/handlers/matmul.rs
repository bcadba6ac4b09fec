//! MATMUL group: multi-precision tile multiply-accumulate.
//!
//! Grounded in `logic_matmul.py`'s `execute_matmul`: the `(func4, s_size,
//! d_size, size_sup)` quadruple selects one of ten supported precision
//! combinations (five float, four standard int8×int8→int32 sign
//! combinations... actually four total across both groups); everything
//! else is an explicit, named rejection. `ms1`/`ms2` index the tile bank
//! directly (`tr{idx}`); `md` indexes the accumulator bank directly
//! (`acc{idx}`) — both 0..3, unlike the load/store handler's 0..7 split.
//!
//! Two precision quirks are ported verbatim because the source computes
//! them, not just encodes them:
//! - `mfmacc.bf16.e5`/`mfmacc.bf16.e4` read their FP8 operands out of the
//!   **integer** view of the tile (FP8 values arrive via an int8 load) and
//!   reinterpret the low byte through the matching FP8 decoder.
//! - `mfmacc.s.bf16` re-decodes its FP16-interpreted operand bits as BF16,
//!   because the load path that feeds it only knows how to stage FP16.

use crate::convert::{
    bfloat16_to_float, bits_to_float16, bits_to_float32, bits_to_float8_e4m3, bits_to_float8_e5m2,
    float_to_bits16, float_to_bits32,
};
use crate::decode::MatmulFields;
use crate::error::SimError;
use crate::state::{Csr, RegisterFile};

type ToBits = fn(f64) -> u32;
type FromBits = fn(u32) -> f64;

struct FloatVariant {
    name: &'static str,
    source_to_bits: ToBits,
    source_from_bits: FromBits,
    dest_to_bits: ToBits,
    dest_from_bits: FromBits,
    source_bits: u32,
    dest_bits: u32,
    fp8_via_int: Option<FromBits>,
    bf16_reinterpret_quirk: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntVariant {
    UnsignedUnsigned,
    UnsignedSigned,
    SignedUnsigned,
    SignedSigned,
}

enum Variant {
    Float(FloatVariant),
    Int(IntVariant),
}

fn reject(reason: &'static str) -> SimError {
    SimError::UnsupportedInstruction { pc: 0, word: 0, reason }
}

fn classify(f: &MatmulFields) -> Result<Variant, SimError> {
    match f.func4 {
        0b0000 => classify_float(f),
        0b0001 => classify_int(f),
        0b0010 => Err(reject("bit-packed matmul (mmacc.w.bp) is not supported")),
        _ => Err(reject("unrecognized matmul func4")),
    }
}

fn classify_float(f: &MatmulFields) -> Result<Variant, SimError> {
    match (f.s_size, f.d_size) {
        (0b00, 0b01) => match f.size_sup {
            0b100 => Ok(Variant::Float(FloatVariant {
                name: "mfmacc.bf16.e5",
                source_to_bits: float_to_bits32, // unused on the int-view path
                source_from_bits: bits_to_float32,
                dest_to_bits: float_to_bits16,
                dest_from_bits: bits_to_float16,
                source_bits: 8,
                dest_bits: 16,
                fp8_via_int: Some(bits_to_float8_e5m2),
                bf16_reinterpret_quirk: false,
            })),
            0b101 => Ok(Variant::Float(FloatVariant {
                name: "mfmacc.bf16.e4",
                source_to_bits: float_to_bits32,
                source_from_bits: bits_to_float32,
                dest_to_bits: float_to_bits16,
                dest_from_bits: bits_to_float16,
                source_bits: 8,
                dest_bits: 16,
                fp8_via_int: Some(bits_to_float8_e4m3),
                bf16_reinterpret_quirk: false,
            })),
            _ => Err(reject("mfmacc.h.e5/e4 are not supported (encoding conflict); use mfmacc.bf16.e5/e4")),
        },
        (0b00, 0b10) => Err(reject("mfmacc.s.e5/e4 are not supported (encoding conflict)")),
        (0b01, 0b01) => {
            if f.size_sup == 0b000 {
                Ok(Variant::Float(FloatVariant {
                    name: "mfmacc.h",
                    source_to_bits: float_to_bits16,
                    source_from_bits: bits_to_float16,
                    dest_to_bits: float_to_bits16,
                    dest_from_bits: bits_to_float16,
                    source_bits: 16,
                    dest_bits: 16,
                    fp8_via_int: None,
                    bf16_reinterpret_quirk: false,
                }))
            } else {
                Err(reject("only mfmacc.h (size_sup=000) is supported for FP16->FP16"))
            }
        }
        (0b01, 0b10) => match f.size_sup {
            0b000 => Ok(Variant::Float(FloatVariant {
                name: "mfmacc.s.h",
                source_to_bits: float_to_bits16,
                source_from_bits: bits_to_float16,
                dest_to_bits: float_to_bits32,
                dest_from_bits: bits_to_float32,
                source_bits: 16,
                dest_bits: 32,
                fp8_via_int: None,
                bf16_reinterpret_quirk: false,
            })),
            0b001 => Ok(Variant::Float(FloatVariant {
                name: "mfmacc.s.bf16",
                source_to_bits: float_to_bits16,
                source_from_bits: bfloat16_to_float,
                dest_to_bits: float_to_bits32,
                dest_from_bits: bits_to_float32,
                source_bits: 16,
                dest_bits: 32,
                fp8_via_int: None,
                bf16_reinterpret_quirk: true,
            })),
            _ => Err(reject("only mfmacc.s.h and mfmacc.s.bf16 are supported")),
        },
        (0b10, 0b10) => {
            if f.size_sup == 0b000 {
                Ok(Variant::Float(FloatVariant {
                    name: "mfmacc.s",
                    source_to_bits: float_to_bits32,
                    source_from_bits: bits_to_float32,
                    dest_to_bits: float_to_bits32,
                    dest_from_bits: bits_to_float32,
                    source_bits: 32,
                    dest_bits: 32,
                    fp8_via_int: None,
                    bf16_reinterpret_quirk: false,
                }))
            } else {
                Err(reject("mfmacc.s.tf32 is not supported (TensorFloat-32 not implemented)"))
            }
        }
        (_, 0b11) => Err(reject("FP64 matmul (mfmacc.d.s/mfmacc.d) is not supported")),
        _ => Err(reject("unknown or unsupported float matmul encoding")),
    }
}

fn classify_int(f: &MatmulFields) -> Result<Variant, SimError> {
    match (f.s_size, f.d_size) {
        (0b00, 0b10) => match f.size_sup {
            0b000 => Ok(Variant::Int(IntVariant::UnsignedUnsigned)),
            0b001 => Ok(Variant::Int(IntVariant::UnsignedSigned)),
            0b010 => Ok(Variant::Int(IntVariant::SignedUnsigned)),
            0b011 => Ok(Variant::Int(IntVariant::SignedSigned)),
            _ => Err(reject("packed integer matmul variants (pmmacc.*) are not supported")),
        },
        (0b01, 0b11) => Err(reject("INT16->INT64 matmul (mmacc.d.h) is not supported")),
        _ => Err(reject("unknown or unsupported integer matmul encoding")),
    }
}

pub fn execute(fields: &MatmulFields, csr: &mut Csr, regs: &mut RegisterFile) -> Result<(), SimError> {
    let variant = classify(fields)?;

    let m = csr.mtilem as usize;
    let n = csr.mtilen as usize;
    let k = csr.mtilek as usize;
    if m == 0 || n == 0 || k == 0 {
        return Ok(());
    }

    let a_idx = fields.ms1 + 4;
    let b_idx = fields.ms2 + 4;
    let c_idx = fields.md;

    match variant {
        Variant::Float(v) => {
            regs.acc_dest_bits_float[c_idx as usize] = v.dest_bits;

            let mut a = vec![vec![0.0f64; k]; m];
            let mut b = vec![vec![0.0f64; n]; k];
            if let Some(decode_fp8) = v.fp8_via_int {
                let a_grid = regs.grid(a_idx);
                let b_grid = regs.grid(b_idx);
                for i in 0..m {
                    for j in 0..k {
                        a[i][j] = decode_fp8((a_grid.int[i][j] & 0xFF) as u32);
                    }
                }
                for i in 0..k {
                    for j in 0..n {
                        b[i][j] = decode_fp8((b_grid.int[i][j] & 0xFF) as u32);
                    }
                }
            } else {
                let a_grid = regs.grid(a_idx);
                let b_grid = regs.grid(b_idx);
                for i in 0..m {
                    for j in 0..k {
                        a[i][j] = a_grid.float[i][j];
                    }
                }
                for i in 0..k {
                    for j in 0..n {
                        b[i][j] = b_grid.float[i][j];
                    }
                }
                if v.bf16_reinterpret_quirk {
                    for row in a.iter_mut() {
                        for val in row.iter_mut() {
                            *val = bfloat16_to_float(float_to_bits16(*val));
                        }
                    }
                    for row in b.iter_mut() {
                        for val in row.iter_mut() {
                            *val = bfloat16_to_float(float_to_bits16(*val));
                        }
                    }
                }
            }

            let c_grid = regs.grid(c_idx);
            for m_i in 0..m {
                for n_i in 0..n {
                    let c_old = (v.dest_from_bits)((v.dest_to_bits)(c_grid.float[m_i][n_i]));
                    let mut dot = 0.0f64;
                    for k_i in 0..k {
                        let aq = (v.source_from_bits)((v.source_to_bits)(a[m_i][k_i]));
                        let bq = (v.source_from_bits)((v.source_to_bits)(b[k_i][n_i]));
                        dot += aq * bq;
                    }
                    let new = (v.dest_from_bits)((v.dest_to_bits)(c_old + dot));
                    regs.grid_mut(c_idx).float[m_i][n_i] = new;
                }
            }
            let _ = v.name;
        }
        Variant::Int(kind) => {
            regs.acc_dest_bits_int[c_idx as usize] = 32;

            let a_grid = regs.grid(a_idx);
            let b_grid = regs.grid(b_idx);
            let mut a = vec![vec![0i32; k]; m];
            let mut b = vec![vec![0i32; n]; k];
            for i in 0..m {
                for j in 0..k {
                    a[i][j] = a_grid.int[i][j] & 0xFF;
                }
            }
            for i in 0..k {
                for j in 0..n {
                    b[i][j] = b_grid.int[i][j] & 0xFF;
                }
            }

            for m_i in 0..m {
                for n_i in 0..n {
                    let c_old = regs.grid(c_idx).int[m_i][n_i];
                    let mut dot: i64 = 0;
                    for k_i in 0..k {
                        let a_raw = a[m_i][k_i];
                        let b_raw = b[k_i][n_i];
                        let a_val = match kind {
                            IntVariant::UnsignedUnsigned | IntVariant::UnsignedSigned => a_raw,
                            IntVariant::SignedUnsigned | IntVariant::SignedSigned => {
                                if a_raw > 127 {
                                    a_raw - 256
                                } else {
                                    a_raw
                                }
                            }
                        };
                        let b_val = match kind {
                            IntVariant::UnsignedUnsigned | IntVariant::SignedUnsigned => b_raw,
                            IntVariant::UnsignedSigned | IntVariant::SignedSigned => {
                                if b_raw > 127 {
                                    b_raw - 256
                                } else {
                                    b_raw
                                }
                            }
                        };
                        dot += (a_val as i64) * (b_val as i64);
                    }
                    let mut res = c_old as i64 + dot;
                    if csr.xmsaten == 1 {
                        if res > i32::MAX as i64 {
                            res = i32::MAX as i64;
                            csr.xmsat = 1;
                        } else if res < i32::MIN as i64 {
                            res = i32::MIN as i64;
                            csr.xmsat = 1;
                        }
                    }
                    regs.grid_mut(c_idx).int[m_i][n_i] = res as i32;
                }
            }
        }
    }

    Ok(())
}
