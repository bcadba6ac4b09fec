//! CONFIG group: `mrelease`, `msettilem/n/k[i]`.
//!
//! Grounded directly in `logic_config.py`'s `execute_config`: four `func4`
//! values, each reading either a 10-bit immediate or a GPR depending on
//! `ctrl` bit 25.

use crate::decode::ConfigFields;
use crate::error::SimError;
use crate::state::{Csr, Gpr};

pub fn execute(fields: &ConfigFields, gpr: &Gpr, csr: &mut Csr) -> Result<(), SimError> {
    match fields.func4 {
        0b0000 => {
            csr.mstatus_ms = 1;
            Ok(())
        }
        0b0001 => {
            csr.mtilek = operand(fields, gpr);
            Ok(())
        }
        0b0010 => {
            csr.mtilem = operand(fields, gpr);
            Ok(())
        }
        0b0011 => {
            csr.mtilen = operand(fields, gpr);
            Ok(())
        }
        other => Err(SimError::UnsupportedInstruction {
            pc: 0,
            word: 0,
            reason: unsupported_reason(other),
        }),
    }
}

fn operand(fields: &ConfigFields, gpr: &Gpr) -> u32 {
    if fields.use_register {
        gpr.read(fields.rs1)
    } else {
        fields.imm10 as u32
    }
}

fn unsupported_reason(func4: u8) -> &'static str {
    let _ = func4;
    "unknown configuration instruction func4"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ConfigFields;

    #[test]
    fn mrelease_sets_mstatus_ms() {
        let gpr = Gpr::default();
        let mut csr = Csr::default();
        let f = ConfigFields {
            func4: 0b0000,
            use_register: false,
            imm10: 0,
            rs1: 0,
        };
        execute(&f, &gpr, &mut csr).unwrap();
        assert_eq!(csr.mstatus_ms, 1);
    }

    #[test]
    fn msettileki_uses_immediate() {
        let gpr = Gpr::default();
        let mut csr = Csr::default();
        let f = ConfigFields {
            func4: 0b0001,
            use_register: false,
            imm10: 16,
            rs1: 0,
        };
        execute(&f, &gpr, &mut csr).unwrap();
        assert_eq!(csr.mtilek, 16);
    }

    #[test]
    fn msettilem_reads_from_gpr() {
        let mut gpr = Gpr::default();
        gpr.write(5, 8);
        let mut csr = Csr::default();
        let f = ConfigFields {
            func4: 0b0010,
            use_register: true,
            imm10: 0,
            rs1: 5,
        };
        execute(&f, &gpr, &mut csr).unwrap();
        assert_eq!(csr.mtilem, 8);
    }

    #[test]
    fn unknown_func4_is_rejected() {
        let gpr = Gpr::default();
        let mut csr = Csr::default();
        let f = ConfigFields {
            func4: 0b1111,
            use_register: false,
            imm10: 0,
            rs1: 0,
        };
        assert!(execute(&f, &gpr, &mut csr).is_err());
    }
}
