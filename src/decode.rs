//! Instruction decoding: split a 32-bit word into its matrix-extension
//! fields and classify it into one of the five dispatch groups.
//!
//! Field positions are transcribed directly from `iss.py`'s
//! `decode_and_execute` (MSB-first bit layout, major opcode `0b0101011` for
//! every matrix instruction). The decoder never consults [`crate::isa`] —
//! it extracts fields purely from bit position, exactly as the hardware
//! would.

use crate::error::SimError;

pub const MATRIX_OPCODE: u32 = 0b0101011;

/// The five func3-keyed dispatch groups, each carrying the fields its
/// handler needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Config(ConfigFields),
    LoadStore(LoadStoreFields),
    Matmul(MatmulFields),
    ElementWise(ElementWiseFields),
    Misc(MiscFields),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigFields {
    pub func4: u8,
    pub use_register: bool,
    pub imm10: u16,
    pub rs1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStoreFields {
    pub func4: u8,
    pub is_store: bool,
    pub d_size: u8,
    pub md: u8,
    pub rs2: u8,
    pub rs1: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatmulFields {
    pub func4: u8,
    pub size_sup: u8,
    pub ms2: u8,
    pub s_size: u8,
    pub ms1: u8,
    pub d_size: u8,
    pub md: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementWiseFields {
    pub func4: u8,
    pub uop: u8,
    pub ctrl: u8,
    pub ms2: u8,
    pub s_size: u8,
    pub ms1: u8,
    pub d_size: u8,
    pub md: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiscFields {
    pub func4: u8,
    pub uop: u8,
    pub ctrl: u8,
    pub ms2: u8,
    pub s_size: u8,
    pub ms1: u8,
    pub d_size: u8,
    pub md: u8,
    /// bits 19..15: overloads `s_size`/`ms1` as a 5-bit GPR index for the
    /// `mmov*.m.x`/`mmov*.x.m` family.
    pub gpr_rs1: u8,
    /// bits 24..20: overloads the low two `ctrl` bits and `ms2` as a 5-bit
    /// GPR index.
    pub gpr_rs2: u8,
    /// bits 11..7: overloads `d_size`/`md` as a 5-bit GPR destination index.
    pub gpr_rd: u8,
}

/// Decode one 32-bit instruction word.
///
/// Dispatch is keyed first on `func3`, then on `uop`: `func3 = 000` selects
/// among Config/Load-Store/Matmul/Misc by `uop` (00/01/10/11); `func3 = 001`
/// selects Element-Wise for `uop` 01 (integer) or 10 (float). Any other
/// combination is [`SimError::EncodingError`] (line/token carry the raw word
/// as a placeholder — callers decoding from memory rather than source text
/// should rewrap with real line context).
pub fn decode(word: u32) -> Result<Instruction, SimError> {
    let opcode = word & 0x7F;
    if opcode != MATRIX_OPCODE {
        return Err(SimError::EncodingError {
            line: 0,
            token: format!("0x{word:08x}"),
            reason: "not a matrix-extension instruction (opcode mismatch)",
        });
    }

    let func4 = ((word >> 28) & 0xF) as u8;
    let uop = ((word >> 26) & 0x3) as u8;
    let ctrl = ((word >> 23) & 0x7) as u8;
    let ms2 = ((word >> 20) & 0x7) as u8;
    let s_size = ((word >> 18) & 0x3) as u8;
    let ms1 = ((word >> 15) & 0x7) as u8;
    let func3 = ((word >> 12) & 0x7) as u8;
    let d_size = ((word >> 10) & 0x3) as u8;
    let md = ((word >> 7) & 0x7) as u8;

    match (func3, uop) {
        (0b000, 0b00) => Ok(Instruction::Config(ConfigFields {
            func4,
            use_register: (ctrl & 0b100) != 0,
            imm10: ((word >> 15) & 0x3FF) as u16,
            rs1: ((word >> 15) & 0x1F) as u8,
        })),
        (0b000, 0b01) => {
            let is_store = (ctrl & 0b100) != 0;
            // rs1/rs2 are full 5-bit GPR indices packed across what other
            // groups split into ms1/s_size and ms2/ctrl (mirrors the
            // encoder's `rs1 << 15`/`rs2 << 20`, which pack the whole value).
            let rs1 = ((word >> 15) & 0x1F) as u8;
            let rs2 = ((word >> 20) & 0x1F) as u8;
            Ok(Instruction::LoadStore(LoadStoreFields {
                func4,
                is_store,
                d_size,
                md,
                rs2,
                rs1,
            }))
        }
        (0b000, 0b10) => Ok(Instruction::Matmul(MatmulFields {
            func4,
            size_sup: ctrl,
            ms2,
            s_size,
            ms1,
            d_size,
            md,
        })),
        (0b000, 0b11) => Ok(Instruction::Misc(MiscFields {
            func4,
            uop,
            ctrl,
            ms2,
            s_size,
            ms1,
            d_size,
            md,
            gpr_rs1: ((word >> 15) & 0x1F) as u8,
            gpr_rs2: ((word >> 20) & 0x1F) as u8,
            gpr_rd: ((word >> 7) & 0x1F) as u8,
        })),
        (0b001, 0b01) | (0b001, 0b10) => Ok(Instruction::ElementWise(ElementWiseFields {
            func4,
            uop,
            ctrl,
            ms2,
            s_size,
            ms1,
            d_size,
            md,
        })),
        _ => Err(SimError::EncodingError {
            line: 0,
            token: format!("0x{word:08x}"),
            reason: "unrecognized (func3, uop) dispatch pair",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(func4: u8, uop: u8, ctrl: u8, ms2: u8, s_size: u8, ms1: u8, func3: u8, d_size: u8, md: u8) -> u32 {
        ((func4 as u32) << 28)
            | ((uop as u32) << 26)
            | ((ctrl as u32) << 23)
            | ((ms2 as u32) << 20)
            | ((s_size as u32) << 18)
            | ((ms1 as u32) << 15)
            | ((func3 as u32) << 12)
            | ((d_size as u32) << 10)
            | ((md as u32) << 7)
            | MATRIX_OPCODE
    }

    #[test]
    fn rejects_non_matrix_opcode() {
        assert!(decode(0x0000_0013).is_err());
    }

    #[test]
    fn decodes_config_group() {
        let w = word(0b0001, 0, 0, 0, 0, 5, 0b000, 0, 0);
        match decode(w).unwrap() {
            Instruction::Config(f) => {
                assert_eq!(f.func4, 0b0001);
                assert!(!f.use_register);
            }
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn decodes_loadstore_group_with_wide_rs_fields() {
        // ctrl=0b111 (is_store=1, rs2's high 2 bits=0b11), ms2=0b011,
        // s_size=0b10 (rs1's high 2 bits), ms1=0b101: rs2=0b11011=27 and
        // rs1=0b10101=21, both >= x8, so a naive 3-bit-only extraction
        // would silently truncate them to 3 and 5.
        let w = word(0b0000, 0b01, 0b111, 0b011, 0b10, 0b101, 0b000, 0b10, 2);
        match decode(w).unwrap() {
            Instruction::LoadStore(f) => {
                assert!(f.is_store);
                assert_eq!(f.d_size, 0b10);
                assert_eq!(f.md, 2);
                assert_eq!(f.rs2, 27);
                assert_eq!(f.rs1, 21);
            }
            other => panic!("expected LoadStore, got {other:?}"),
        }
    }

    #[test]
    fn decodes_matmul_group() {
        let w = word(0b0000, 0b10, 0b000, 1, 0b10, 2, 0b000, 0b10, 3);
        match decode(w).unwrap() {
            Instruction::Matmul(f) => {
                assert_eq!(f.ms2, 1);
                assert_eq!(f.ms1, 2);
                assert_eq!(f.md, 3);
            }
            other => panic!("expected Matmul, got {other:?}"),
        }
    }

    #[test]
    fn distinguishes_elementwise_from_misc_by_uop() {
        let ew = word(0b0000, 0b01, 0b111, 1, 0b10, 2, 0b001, 0b10, 3);
        assert!(matches!(decode(ew).unwrap(), Instruction::ElementWise(_)));

        let misc = word(0b0001, 0b11, 0, 0, 0, 1, 0b000, 0, 2);
        assert!(matches!(decode(misc).unwrap(), Instruction::Misc(_)));
    }
}
