//! MISC group: zero/move/duplicate/slide. Seven supported instructions out
//! of the much larger encoding space `func4`/`uop` could name.
//!
//! Grounded in `logic_misc.py`'s `execute_misc` and its `_exec_*` helpers.
//! `_get_reg_array_by_idx`'s aliasing rule (index `< 4` → accumulator,
//! `>= 4` → tile bank `- 4`) is [`RegisterFile::grid`] exactly, same as the
//! element-wise handler.

use crate::convert::{bits_to_float32, float_to_bits32};
use crate::decode::MiscFields;
use crate::error::SimError;
use crate::state::{Gpr, RegisterFile};

fn reject(reason: &'static str) -> SimError {
    SimError::UnsupportedInstruction { pc: 0, word: 0, reason }
}

pub fn execute(fields: &MiscFields, gpr: &mut Gpr, regs: &mut RegisterFile) -> Result<(), SimError> {
    match fields.func4 {
        0b0000 => exec_mzero(fields, regs),
        0b0001 => exec_mmov_mm(fields, regs),
        0b0010 => exec_mmovw_x_m(fields, gpr, regs),
        0b0011 => exec_mmovw_m_x_or_mdup(fields, gpr, regs),
        0b0101 => exec_slide_row(fields, regs),
        0b0111 => exec_slide_col(fields, regs),
        0b0100 => Err(reject("pack operations (mpack*) are not supported")),
        0b0110 | 0b1000 | 0b1001 | 0b1010 => Err(reject("broadcast/slide-up variants are not supported; use mdupw.m.x or mrslidedown/mcslidedown.w")),
        _ => Err(reject("unknown or unsupported MISC instruction")),
    }
}

fn exec_mzero(fields: &MiscFields, regs: &mut RegisterFile) -> Result<(), SimError> {
    if fields.ctrl != 0b000 {
        return Err(reject("only mzero (ctrl=000) is supported; mzero2r/4r/8r are not"));
    }
    regs.grid_mut(fields.md).zero();
    Ok(())
}

fn exec_mmov_mm(fields: &MiscFields, regs: &mut RegisterFile) -> Result<(), SimError> {
    let src = *regs.grid(fields.ms1);
    *regs.grid_mut(fields.md) = src;
    Ok(())
}

fn exec_mmovw_x_m(fields: &MiscFields, gpr: &mut Gpr, regs: &RegisterFile) -> Result<(), SimError> {
    let ctrl_size = fields.ctrl & 0b11;
    if ctrl_size != 0b10 {
        return Err(reject("only mmovw.x.m (32-bit) is supported"));
    }
    let grid = regs.grid(fields.ms2);
    let rs1 = fields.gpr_rs1 as usize;
    let row = rs1 / 4;
    let col = rs1 % 4;
    if row >= 4 {
        return Err(reject("mmovw.x.m index out of bounds"));
    }
    gpr.write(fields.gpr_rd, float_to_bits32(grid.float[row][col]));
    Ok(())
}

fn exec_mmovw_m_x_or_mdup(fields: &MiscFields, gpr: &Gpr, regs: &mut RegisterFile) -> Result<(), SimError> {
    if fields.d_size != 0b10 {
        return Err(reject("only FP32 (d_size=10) is supported for mmov.m.x/mdup.m.x"));
    }
    let rs2_val = gpr.read(fields.gpr_rs2);
    let is_single_element = (fields.ctrl & 0b100) != 0;
    let grid = regs.grid_mut(fields.md);

    if is_single_element {
        let rs1 = fields.gpr_rs1 as usize;
        let row = rs1 / 4;
        let col = rs1 % 4;
        if row >= 4 {
            return Err(reject("mmovw.m.x index out of bounds"));
        }
        grid.float[row][col] = bits_to_float32(rs2_val);
    } else {
        let val = bits_to_float32(rs2_val);
        for row in grid.float.iter_mut() {
            for cell in row.iter_mut() {
                *cell = val;
            }
        }
    }
    Ok(())
}

fn exec_slide_row(fields: &MiscFields, regs: &mut RegisterFile) -> Result<(), SimError> {
    if fields.s_size != 0b00 || fields.d_size != 0b00 {
        return Err(reject("only mrslidedown (s_size=00, d_size=00) is supported; mrslideup is not"));
    }
    slide(fields, regs, true)
}

fn exec_slide_col(fields: &MiscFields, regs: &mut RegisterFile) -> Result<(), SimError> {
    if fields.s_size != 0b10 || fields.d_size != 0b10 {
        return Err(reject("only mcslidedown.w (FP32) is supported"));
    }
    slide(fields, regs, false)
}

fn slide(fields: &MiscFields, regs: &mut RegisterFile, row_down: bool) -> Result<(), SimError> {
    let src = *regs.grid(fields.ms1);
    let imm3 = fields.ctrl as usize;
    let dest = regs.grid_mut(fields.md);
    let rows = 4usize;
    let cols = 4usize;

    if row_down {
        for i in 0..rows {
            let src_row = (i + rows - (imm3 % rows)) % rows;
            for j in 0..cols {
                dest.float[i][j] = src.float[src_row][j];
                dest.int[i][j] = src.int[src_row][j];
            }
        }
    } else {
        for i in 0..rows {
            for j in 0..cols {
                let src_col = (j + cols - (imm3 % cols)) % cols;
                dest.float[i][j] = src.float[i][src_col];
                dest.int[i][j] = src.int[i][src_col];
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(func4: u8, ctrl: u8, ms2: u8, s_size: u8, ms1: u8, d_size: u8, md: u8) -> MiscFields {
        MiscFields {
            func4,
            uop: 0b11,
            ctrl,
            ms2,
            s_size,
            ms1,
            d_size,
            md,
            gpr_rs1: 0,
            gpr_rs2: 0,
            gpr_rd: 0,
        }
    }

    #[test]
    fn mzero_clears_both_views() {
        let mut gpr = Gpr::default();
        let mut regs = RegisterFile::new();
        regs.grid_mut(0).int[1][1] = 99;
        regs.grid_mut(0).float[1][1] = 1.5;
        let f = fields(0b0000, 0, 0, 0, 0, 0, 0);
        execute(&f, &mut gpr, &mut regs).unwrap();
        assert_eq!(regs.grid(0).int[1][1], 0);
        assert_eq!(regs.grid(0).float[1][1], 0.0);
    }

    #[test]
    fn mmov_mm_copies_both_views() {
        let mut gpr = Gpr::default();
        let mut regs = RegisterFile::new();
        regs.grid_mut(1).int[0][0] = 7;
        regs.grid_mut(1).float[0][0] = 2.5;
        let f = fields(0b0001, 0, 0, 0, 1, 0, 2);
        execute(&f, &mut gpr, &mut regs).unwrap();
        assert_eq!(regs.grid(2).int[0][0], 7);
        assert_eq!(regs.grid(2).float[0][0], 2.5);
    }

    #[test]
    fn mrslidedown_shifts_rows() {
        let mut gpr = Gpr::default();
        let mut regs = RegisterFile::new();
        for j in 0..4 {
            regs.grid_mut(1).int[0][j] = 10;
            regs.grid_mut(1).int[1][j] = 20;
        }
        let f = fields(0b0101, 0b001, 0, 0b00, 1, 0b00, 2);
        execute(&f, &mut gpr, &mut regs).unwrap();
        // Row 1 slides down into row 0's old slot becomes row (0 - 1) mod 4 = row 3 source.
        assert_eq!(regs.grid(2).int[1][0], 10);
    }

    #[test]
    fn rejects_mzero_variants() {
        let mut gpr = Gpr::default();
        let mut regs = RegisterFile::new();
        let f = fields(0b0000, 0b001, 0, 0, 0, 0, 0);
        assert!(execute(&f, &mut gpr, &mut regs).is_err());
    }
}
