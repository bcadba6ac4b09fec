//! LOAD/STORE group: strided load/store of the A, B, and C tiles, with an
//! optional transposed addressing mode.
//!
//! Grounded in `logic_loadstore.py`'s `execute_load_store`: `d_size == 11`
//! (64-bit) and `func4 == 0011` (whole-register) are rejected up front;
//! the remaining six `func4` values each pick a tile (A/B live in the tile
//! bank, C lives in the accumulator bank), a row/column extent from the
//! CSR tile dimensions, and a row-major or column-major address formula.
//!
//! The source addresses A/B tiles directly by a 0..3 `tr` index and C tiles
//! by a 4..7 index offset by `-4` into a separate accumulator array. This
//! translates onto [`RegisterFile::grid`] by adding 4 for A/B (landing in
//! the tile bank) and leaving C's index alone (landing in the accumulator
//! bank) — same two banks, same split, just expressed through the one
//! shared accessor every other handler also uses.

use crate::convert::{bits_to_float16, bits_to_float32, float_to_bits16, float_to_bits32, sign_extend_i8};
use crate::decode::LoadStoreFields;
use crate::error::SimError;
use crate::state::{Csr, Gpr, Memory, RegisterFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Eew {
    Int8,
    Fp16,
    Fp32,
}

fn eew(d_size: u8) -> Result<(Eew, usize), SimError> {
    match d_size {
        0b00 => Ok((Eew::Int8, 1)),
        0b01 => Ok((Eew::Fp16, 2)),
        0b10 => Ok((Eew::Fp32, 4)),
        _ => Err(SimError::UnsupportedInstruction {
            pc: 0,
            word: 0,
            reason: "64-bit load/store elements are not supported (ELEN=32)",
        }),
    }
}

fn read_element(mem: &Memory, addr: u32, format: Eew) -> Result<(i32, f64), SimError> {
    match format {
        Eew::Int8 => {
            let b = mem.read(addr, 1)?[0];
            let v = sign_extend_i8(b);
            Ok((v, v as f64))
        }
        Eew::Fp16 => {
            let bytes = mem.read(addr, 2)?;
            let bits = u16::from_le_bytes([bytes[0], bytes[1]]) as u32;
            Ok((0, bits_to_float16(bits)))
        }
        Eew::Fp32 => {
            let bytes = mem.read(addr, 4)?;
            let bits = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            Ok((0, bits_to_float32(bits)))
        }
    }
}

fn write_element(mem: &mut Memory, addr: u32, format: Eew, int_v: i32, float_v: f64) -> Result<(), SimError> {
    match format {
        Eew::Int8 => mem.write(addr, &[(int_v as i8) as u8]),
        Eew::Fp16 => {
            let bits = float_to_bits16(float_v) as u16;
            mem.write(addr, &bits.to_le_bytes())
        }
        Eew::Fp32 => {
            let bits = float_to_bits32(float_v);
            mem.write(addr, &bits.to_le_bytes())
        }
    }
}

/// Which region of the tile grid this `func4` addresses: tile bank (A/B)
/// with direct `tr` index or accumulator bank (C) with `acc` index.
struct Family {
    rows_is_m: bool,
    cols_is_k: bool,
    transposed: bool,
    is_acc: bool,
}

fn family(func4: u8) -> Result<Family, SimError> {
    match func4 {
        0b0000 => Ok(Family { rows_is_m: true, cols_is_k: true, transposed: false, is_acc: false }),
        0b0001 => Ok(Family { rows_is_m: false, cols_is_k: true, transposed: false, is_acc: false }),
        0b0010 => Ok(Family { rows_is_m: true, cols_is_k: false, transposed: false, is_acc: true }),
        0b0011 => Err(SimError::UnsupportedInstruction {
            pc: 0,
            word: 0,
            reason: "whole-register load/store (mlme*/msme*) is not supported",
        }),
        0b0100 => Ok(Family { rows_is_m: true, cols_is_k: true, transposed: true, is_acc: false }),
        0b0101 => Ok(Family { rows_is_m: false, cols_is_k: true, transposed: true, is_acc: false }),
        0b0110 => Ok(Family { rows_is_m: true, cols_is_k: false, transposed: true, is_acc: true }),
        _ => Err(SimError::UnsupportedInstruction {
            pc: 0,
            word: 0,
            reason: "unrecognized load/store func4",
        }),
    }
}

pub fn execute(
    fields: &LoadStoreFields,
    gpr: &Gpr,
    csr: &Csr,
    regs: &mut RegisterFile,
    mem: &mut Memory,
) -> Result<(), SimError> {
    let (format, num_bytes) = eew(fields.d_size)?;
    let fam = family(fields.func4)?;

    if fields.md > 3 {
        return Err(SimError::EncodingError {
            line: 0,
            token: format!("md={}", fields.md),
            reason: "load/store register field must name tr0-tr3/acc0-acc3 (codes 0-3)",
        });
    }

    // C tiles (accumulators) and A/B tiles are independent banks that happen
    // to share encoding 0-3; the grid file keeps accumulators at slots 0-3
    // and the four independent tiles at slots 4-7 (matching matmul.rs's
    // c_idx/a_idx+4/b_idx+4 convention).
    let grid_idx = if fam.is_acc { fields.md } else { fields.md + 4 };

    let base_addr = gpr.read(fields.rs1);
    let row_stride = gpr.read(fields.rs2);

    let rows = if fam.rows_is_m { csr.mtilem } else { csr.mtilen };
    let cols = if fam.cols_is_k { csr.mtilek } else { csr.mtilen };

    for i in 0..rows as usize {
        for j in 0..cols as usize {
            let addr = if fam.transposed {
                base_addr + (j as u32) * row_stride + (i as u32) * num_bytes as u32
            } else if fam.is_acc {
                // C (non-transposed) iterates column-major in the source.
                base_addr + (j as u32) * row_stride + (i as u32) * num_bytes as u32
            } else {
                base_addr + (i as u32) * row_stride + (j as u32) * num_bytes as u32
            };

            if fields.is_store {
                let grid = regs.grid(grid_idx);
                let (int_v, float_v) = (grid.int[i][j], grid.float[i][j]);
                write_element(mem, addr, format, int_v, float_v)?;
            } else {
                let (int_v, float_v) = read_element(mem, addr, format)?;
                let grid = regs.grid_mut(grid_idx);
                grid.int[i][j] = int_v;
                grid.float[i][j] = float_v;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Memory;

    fn fields(func4: u8, is_store: bool, d_size: u8, md: u8, rs2: u8, rs1: u8) -> LoadStoreFields {
        LoadStoreFields { func4, is_store, d_size, md, rs2, rs1 }
    }

    #[test]
    fn rejects_64_bit_elements() {
        let gpr = Gpr::default();
        let csr = Csr::default();
        let mut regs = RegisterFile::new();
        let mut mem = Memory::default();
        let f = fields(0b0000, false, 0b11, 0, 2, 1);
        assert!(execute(&f, &gpr, &csr, &mut regs, &mut mem).is_err());
    }

    #[test]
    fn rejects_whole_register_family() {
        let gpr = Gpr::default();
        let csr = Csr::default();
        let mut regs = RegisterFile::new();
        let mut mem = Memory::default();
        let f = fields(0b0011, false, 0b00, 0, 2, 1);
        assert!(execute(&f, &gpr, &csr, &mut regs, &mut mem).is_err());
    }

    #[test]
    fn loads_tile_a_row_major_int8() {
        let mut gpr = Gpr::default();
        gpr.write(1, 0); // base addr
        gpr.write(2, 4); // row stride
        let mut csr = Csr::default();
        csr.mtilem = 2;
        csr.mtilek = 2;
        let mut regs = RegisterFile::new();
        let mut mem = Memory::default();
        mem.write(0, &[1, 2, 3, 4]).unwrap();
        mem.write(4, &[5, 6, 7, 8]).unwrap();

        let f = fields(0b0000, false, 0b00, 0, 2, 1);
        execute(&f, &gpr, &csr, &mut regs, &mut mem).unwrap();

        let grid = regs.grid(4); // tr0
        assert_eq!(grid.int[0][0], 1);
        assert_eq!(grid.int[0][1], 2);
        assert_eq!(grid.int[1][0], 5);
        assert_eq!(grid.int[1][1], 6);
    }

    #[test]
    fn stores_accumulator_tile_c() {
        let mut gpr = Gpr::default();
        gpr.write(1, 0);
        gpr.write(2, 8);
        let mut csr = Csr::default();
        csr.mtilem = 1;
        csr.mtilen = 1;
        let mut regs = RegisterFile::new();
        regs.grid_mut(0).int[0][0] = 42; // acc0
        let mut mem = Memory::default();

        let f = fields(0b0010, true, 0b00, 0, 2, 1);
        execute(&f, &gpr, &csr, &mut regs, &mut mem).unwrap();

        assert_eq!(mem.read(0, 1).unwrap()[0], 42);
    }

    #[test]
    fn rejects_out_of_range_register_code() {
        let gpr = Gpr::default();
        let csr = Csr::default();
        let mut regs = RegisterFile::new();
        let mut mem = Memory::default();
        // md must be an encoded tr/acc code 0-3; 5 is out of range.
        let f = fields(0b0000, false, 0b00, 5, 2, 1);
        assert!(execute(&f, &gpr, &csr, &mut regs, &mut mem).is_err());
    }
}
