//! ELEMENT-WISE group: per-element int/float arithmetic, each as either a
//! matrix-matrix or a matrix-vector broadcast (`ctrl` selects a single row
//! of `ms1` to broadcast across every row of `ms2` when `ctrl != 0b111`).
//!
//! Grounded in `logic_elementwise.py`'s `execute_element_wise`,
//! `_execute_ew_integer`, and `_execute_ew_float`. `_get_register_storage`'s
//! aliasing rule (`reg_idx < 4` → accumulator bank, `>= 4` → tile bank minus
//! 4) is exactly [`RegisterFile::grid`]'s resolution, so every operand here
//! is read through that one accessor unchanged.
//!
//! Semantics throughout are `md = ms2 OP ms1` (`res = val2 op val1`), not
//! `ms1 OP ms2` — getting this backwards silently flips subtraction and
//! shift results.

use crate::convert::{bits_to_float16, bits_to_float32, float_to_bits16, float_to_bits32};
use crate::decode::ElementWiseFields;
use crate::error::SimError;
use crate::state::{Csr, RegisterFile, ROWNUM};

const SUPPORTED_INT_FUNC4: [u8; 10] = [
    0b0000, 0b0001, 0b0010, 0b0100, 0b0101, 0b0110, 0b0111, 0b1000, 0b1001, 0b1010,
];
const SUPPORTED_FLOAT_FUNC4: [u8; 5] = [0b0000, 0b0001, 0b0010, 0b0011, 0b0100];

fn reject(reason: &'static str) -> SimError {
    SimError::UnsupportedInstruction { pc: 0, word: 0, reason }
}

pub fn execute(fields: &ElementWiseFields, csr: &mut Csr, regs: &mut RegisterFile) -> Result<(), SimError> {
    if fields.s_size == 0b11 || fields.d_size == 0b11 {
        return Err(reject("64-bit element-wise operations are not supported (ELEN=32)"));
    }

    match fields.uop {
        0b01 => {
            if !SUPPORTED_INT_FUNC4.contains(&fields.func4) {
                return Err(reject("unsupported/ambiguous EW-Integer func4"));
            }
            execute_int(fields, csr, regs)
        }
        0b10 => {
            if !SUPPORTED_FLOAT_FUNC4.contains(&fields.func4) {
                return Err(reject("unsupported/ambiguous EW-Float func4"));
            }
            execute_float(fields, csr, regs)
        }
        _ => Err(reject("unknown element-wise uop")),
    }
}

fn operand1_row(is_matrix_matrix: bool, ctrl: u8, i: usize) -> usize {
    if is_matrix_matrix {
        i
    } else {
        ctrl as usize % ROWNUM
    }
}

fn execute_int(fields: &ElementWiseFields, csr: &mut Csr, regs: &mut RegisterFile) -> Result<(), SimError> {
    let m = csr.mtilem as usize;
    let n = csr.mtilen as usize;
    let saturation_enabled = csr.xmsaten == 1;
    let is_matrix_matrix = fields.ctrl == 0b111;

    for i in 0..m {
        for j in 0..n {
            let val2 = regs.grid(fields.ms2).int[i][j] as i64;
            let row1 = operand1_row(is_matrix_matrix, fields.ctrl, i);
            let val1 = regs.grid(fields.ms1).int[row1][j] as i64;

            let res: i64 = match fields.func4 {
                0b0000 => val2 + val1,
                0b0001 => val2 - val1,
                0b0010 => val2 * val1,
                0b0100 => val1.max(val2),
                0b0101 => {
                    let u1 = val1 as u32 as u64;
                    let u2 = val2 as u32 as u64;
                    if u1 > u2 { u1 as i64 } else { u2 as i64 }
                }
                0b0110 => val1.min(val2),
                0b0111 => {
                    let u1 = val1 as u32 as u64;
                    let u2 = val2 as u32 as u64;
                    if u1 < u2 { u1 as i64 } else { u2 as i64 }
                }
                0b1000 => {
                    let shift = (val1 as u32) & 0x1F;
                    ((val2 as u32) >> shift) as i64
                }
                0b1001 => {
                    let shift = (val1 as u32) & 0x1F;
                    ((val2 as i32) << shift) as i64
                }
                0b1010 => {
                    let shift = (val1 as u32) & 0x1F;
                    ((val2 as i32) >> shift) as i64
                }
                _ => unreachable!("filtered by SUPPORTED_INT_FUNC4"),
            };

            let mut res = res;
            if saturation_enabled {
                if res > i32::MAX as i64 {
                    res = i32::MAX as i64;
                    csr.xmsat = 1;
                } else if res < i32::MIN as i64 {
                    res = i32::MIN as i64;
                    csr.xmsat = 1;
                }
            }

            regs.grid_mut(fields.md).int[i][j] = res as i32;
        }
    }
    Ok(())
}

fn execute_float(fields: &ElementWiseFields, csr: &Csr, regs: &mut RegisterFile) -> Result<(), SimError> {
    let (to_bits, from_bits): (fn(f64) -> u32, fn(u32) -> f64) = match fields.s_size {
        0b01 => (float_to_bits16, bits_to_float16),
        0b10 => (float_to_bits32, bits_to_float32),
        _ => return Err(reject("invalid s_size/d_size for EW-Float")),
    };
    let quantize = |x: f64| crate::convert::round_trip_with_mode(x, to_bits, from_bits, csr.xmfrm);

    let m = csr.mtilem as usize;
    let n = csr.mtilen as usize;
    let is_matrix_matrix = fields.ctrl == 0b111;

    for i in 0..m {
        for j in 0..n {
            let val2 = quantize(regs.grid(fields.ms2).float[i][j]);
            let row1 = operand1_row(is_matrix_matrix, fields.ctrl, i);
            let val1 = quantize(regs.grid(fields.ms1).float[row1][j]);

            let res = match fields.func4 {
                0b0000 => val2 + val1,
                0b0001 => val2 - val1,
                0b0010 => val2 * val1,
                0b0011 => val2.max(val1),
                0b0100 => val2.min(val1),
                _ => unreachable!("filtered by SUPPORTED_FLOAT_FUNC4"),
            };

            regs.grid_mut(fields.md).float[i][j] = quantize(res);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(func4: u8, uop: u8, ctrl: u8, ms2: u8, s_size: u8, ms1: u8, d_size: u8, md: u8) -> ElementWiseFields {
        ElementWiseFields { func4, uop, ctrl, ms2, s_size, ms1, d_size, md }
    }

    #[test]
    fn madd_w_matrix_matrix() {
        let mut csr = Csr::default();
        csr.mtilem = 1;
        csr.mtilen = 1;
        let mut regs = RegisterFile::new();
        regs.grid_mut(5).int[0][0] = 10; // tr1, code 5 (tile bank, idx 5-4=1)
        regs.grid_mut(6).int[0][0] = 3; // tr2, code 6

        let f = fields(0b0000, 0b01, 0b111, 5, 0b00, 6, 0b00, 0);
        execute(&f, &mut csr, &mut regs).unwrap();

        assert_eq!(regs.grid(0).int[0][0], 13);
    }

    #[test]
    fn mfmul_s_broadcasts_a_vector_row() {
        let mut csr = Csr::default();
        csr.mtilem = 2;
        csr.mtilen = 1;
        let mut regs = RegisterFile::new();
        regs.grid_mut(0).float[0][0] = 2.0; // acc0 (ms2), row 0
        regs.grid_mut(0).float[1][0] = 4.0; // acc0 (ms2), row 1
        regs.grid_mut(1).float[0][0] = 3.0; // acc1 (ms1), broadcast row 0

        // ctrl=0b000 selects broadcast row 0 of ms1 for every row of ms2.
        let f = fields(0b0010, 0b10, 0b000, 0, 0b10, 1, 0b10, 2);
        execute(&f, &mut csr, &mut regs).unwrap();

        assert_eq!(regs.grid(2).float[0][0], 6.0);
        assert_eq!(regs.grid(2).float[1][0], 12.0);
    }

    #[test]
    fn rejects_64_bit_sizes() {
        let mut csr = Csr::default();
        let mut regs = RegisterFile::new();
        let f = fields(0b0000, 0b01, 0b111, 0, 0b11, 0, 0b00, 0);
        assert!(execute(&f, &mut csr, &mut regs).is_err());
    }
}
