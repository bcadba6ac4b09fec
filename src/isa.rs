//! Static instruction and register-name tables.
//!
//! Mirrors the teacher's `phf_map!`-backed static lookup pattern (there used
//! for ELF machine names), applied here to mnemonic and register-name
//! resolution. The assembler looks mnemonics up by name; the decoder never
//! consults this table (it decodes purely from bit fields), but uses it to
//! name an instruction in diagnostics.

use phf::phf_map;

/// Which of the five encoder/handler groups an instruction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrType {
    Config,
    Misc,
    Multiply,
    LoadStore,
    Ew,
}

/// How a CONFIG instruction's operand is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOperand {
    None,
    Immediate,
    Register,
}

/// Field-packing shape for a MISC instruction, matching the source's
/// `variant` tag. Most of these name rejected encodings (see §4.8); they
/// still need a packing shape so the assembler can emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscVariant {
    /// `mzero` and its 2r/4r/8r siblings: `md` only, `ctrl` picks the width.
    Zero,
    /// `mmov.mm md, ms1`.
    MdMs1,
    /// `m{mov,dup}{b,h,w,d}.m.x md, rs1, rs2`.
    MdRs2Rs1,
    /// `m{mov}{b,h,w,d}.x.m rd, ms2, rs1`.
    RdMs2Rs1,
    /// `mbce8`/`mrbc.mv.i`/`mcbce8.mv.i` style: `md, ms1, imm3`.
    MdMs1Imm3,
    /// `mrslidedown`/`mcslidedown.*` style: `md, ms1, imm3` packed directly
    /// into the `ctrl`/`imm3` field rather than via a side table.
    MdMs1Imm3Direct,
    /// `mpack*`: `md, ms2, ms1`.
    MdMs2Ms1,
}

/// Field-packing shape for an EW instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EwVariant {
    /// Matrix-matrix form: `md, ms2, ms1` with `ctrl = 0b111`.
    MdMs2Ms1,
    /// Matrix-vector broadcast form: `md, ms2, ms1` with `ctrl` carrying the
    /// broadcast row index (0..7, `!= 0b111`).
    MdMs2Ms1Broadcast,
    /// Unary format-conversion form: `md, ms1`. Assembles; never executes
    /// (see SPEC_FULL.md §4.3 and DESIGN.md decision 6).
    MdMs1,
}

/// One row of the combined instruction table: the encoding fields needed to
/// pack or name a mnemonic.
#[derive(Debug, Clone, Copy)]
pub struct InstrDef {
    pub instr_type: InstrType,
    pub func4: u8,
    pub uop: u8,
    pub func3: u8,
    pub ctrl: u8,
    pub s_size: u8,
    pub d_size: u8,
    pub size_sup: u8,
    pub ls: u8,
    pub config_operand: ConfigOperand,
    pub misc_variant: Option<MiscVariant>,
    pub ew_variant: Option<EwVariant>,
}

const fn base(instr_type: InstrType, func4: u8, uop: u8) -> InstrDef {
    InstrDef {
        instr_type,
        func4,
        uop,
        func3: 0,
        ctrl: 0,
        s_size: 0,
        d_size: 0,
        size_sup: 0,
        ls: 0,
        config_operand: ConfigOperand::None,
        misc_variant: None,
        ew_variant: None,
    }
}

const fn config(func4: u8, ctrl: u8, operand: ConfigOperand) -> InstrDef {
    InstrDef {
        ctrl,
        config_operand: operand,
        ..base(InstrType::Config, func4, 0b00)
    }
}

const fn misc(func4: u8, ctrl: u8, d_size: u8, variant: MiscVariant) -> InstrDef {
    InstrDef {
        ctrl,
        d_size,
        misc_variant: Some(variant),
        ..base(InstrType::Misc, func4, 0b11)
    }
}

const fn multiply(func4: u8, size_sup: u8, s_size: u8, d_size: u8) -> InstrDef {
    InstrDef {
        size_sup,
        s_size,
        d_size,
        ..base(InstrType::Multiply, func4, 0b10)
    }
}

const fn loadstore(func4: u8, ls: u8, d_size: u8) -> InstrDef {
    InstrDef {
        ls,
        d_size,
        func3: 0b000,
        ..base(InstrType::LoadStore, func4, 0b01)
    }
}

const fn ew_int(func4: u8, variant: EwVariant) -> InstrDef {
    InstrDef {
        func3: 0b001,
        s_size: 0b10,
        d_size: 0b10,
        ew_variant: Some(variant),
        ..base(InstrType::Ew, func4, 0b01)
    }
}

const fn ew_float(func4: u8, s_size: u8, d_size: u8, variant: EwVariant) -> InstrDef {
    InstrDef {
        func3: 0b001,
        s_size,
        d_size,
        ew_variant: Some(variant),
        ..base(InstrType::Ew, func4, 0b10)
    }
}

const fn ew_cvt(func4: u8, uop: u8, ctrl: u8, s_size: u8, d_size: u8) -> InstrDef {
    InstrDef {
        func3: 0b001,
        ctrl,
        s_size,
        d_size,
        ew_variant: Some(EwVariant::MdMs1),
        ..base(InstrType::Ew, func4, uop)
    }
}

/// The combined mnemonic table: every mnemonic the assembler can emit and
/// the decoder can name in diagnostics.
///
/// LOADSTORE and CONFIG are transcribed in full from the source's
/// instruction tables. MISC and MULTIPLY are transcribed in full as well
/// (both tables are short and every entry — supported or deliberately
/// rejected — is useful for diagnostics). EW carries the spec's 10 required
/// operations under both their matrix-matrix and broadcast-immediate forms,
/// plus a representative sample of the source's much larger format-conversion
/// family (these assemble and decode by name but are never executed; see
/// DESIGN.md decision 6) rather than the full ~40-entry conversion table.
pub static INSTRUCTIONS: phf::Map<&'static str, InstrDef> = phf_map! {
    // --- CONFIG ---
    "mrelease" => config(0b0000, 0, ConfigOperand::None),
    "msettileki" => config(0b0001, 0, ConfigOperand::Immediate),
    "msettilek" => config(0b0001, 1, ConfigOperand::Register),
    "msettilemi" => config(0b0010, 0, ConfigOperand::Immediate),
    "msettilem" => config(0b0010, 1, ConfigOperand::Register),
    "msettileni" => config(0b0011, 0, ConfigOperand::Immediate),
    "msettilen" => config(0b0011, 1, ConfigOperand::Register),

    // --- MISC (supported) ---
    "mzero" => misc(0b0000, 0b000, 0b00, MiscVariant::Zero),
    "mzero2r" => misc(0b0000, 0b001, 0b00, MiscVariant::Zero),
    "mzero4r" => misc(0b0000, 0b011, 0b00, MiscVariant::Zero),
    "mzero8r" => misc(0b0000, 0b111, 0b00, MiscVariant::Zero),
    "mmov.mm" => misc(0b0001, 0b000, 0b00, MiscVariant::MdMs1),
    "mmovw.x.m" => misc(0b0010, 0b000, 0b10, MiscVariant::RdMs2Rs1),
    "mmovw.m.x" => misc(0b0011, 0b000, 0b10, MiscVariant::MdRs2Rs1),
    "mdupw.m.x" => misc(0b0011, 0b000, 0b10, MiscVariant::MdRs2Rs1),
    "mrslidedown" => misc(0b0101, 0b000, 0b00, MiscVariant::MdMs1Imm3Direct),
    "mcslidedown.w" => misc(0b0111, 0b000, 0b10, MiscVariant::MdMs1Imm3Direct),

    // --- MISC (deliberately rejected at execution, kept for assembly/naming) ---
    "mmovb.m.x" => misc(0b0011, 0b000, 0b00, MiscVariant::MdRs2Rs1),
    "mmovh.m.x" => misc(0b0011, 0b000, 0b01, MiscVariant::MdRs2Rs1),
    "mmovd.m.x" => misc(0b0011, 0b000, 0b11, MiscVariant::MdRs2Rs1),
    "mdupb.m.x" => misc(0b0011, 0b000, 0b00, MiscVariant::MdRs2Rs1),
    "mduph.m.x" => misc(0b0011, 0b000, 0b01, MiscVariant::MdRs2Rs1),
    "mdupd.m.x" => misc(0b0011, 0b000, 0b11, MiscVariant::MdRs2Rs1),
    "mmovb.x.m" => misc(0b0010, 0b000, 0b00, MiscVariant::RdMs2Rs1),
    "mmovh.x.m" => misc(0b0010, 0b000, 0b01, MiscVariant::RdMs2Rs1),
    "mmovd.x.m" => misc(0b0010, 0b000, 0b11, MiscVariant::RdMs2Rs1),
    "mbce8" => misc(0b0101, 0b000, 0b00, MiscVariant::MdMs1Imm3),
    "mrbc.mv.i" => misc(0b0110, 0b000, 0b00, MiscVariant::MdMs1Imm3),
    "mcbce8.mv.i" => misc(0b0111, 0b000, 0b00, MiscVariant::MdMs1Imm3),
    "mrslideup" => misc(0b0110, 0b000, 0b00, MiscVariant::MdMs1Imm3Direct),
    "mcslidedown.b" => misc(0b0111, 0b000, 0b00, MiscVariant::MdMs1Imm3Direct),
    "mcslidedown.h" => misc(0b0111, 0b000, 0b01, MiscVariant::MdMs1Imm3Direct),
    "mcslidedown.d" => misc(0b0111, 0b000, 0b11, MiscVariant::MdMs1Imm3Direct),
    "mcslideup.b" => misc(0b1000, 0b000, 0b00, MiscVariant::MdMs1Imm3Direct),
    "mcslideup.h" => misc(0b1000, 0b000, 0b01, MiscVariant::MdMs1Imm3Direct),
    "mcslideup.w" => misc(0b1000, 0b000, 0b10, MiscVariant::MdMs1Imm3Direct),
    "mcslideup.d" => misc(0b1000, 0b000, 0b11, MiscVariant::MdMs1Imm3Direct),
    "mrbca.mv.i" => misc(0b1001, 0b000, 0b00, MiscVariant::MdMs1Imm3Direct),
    "mcbcab.mv.i" => misc(0b1010, 0b000, 0b00, MiscVariant::MdMs1Imm3Direct),
    "mcbcah.mv.i" => misc(0b1010, 0b000, 0b01, MiscVariant::MdMs1Imm3Direct),
    "mcbcaw.mv.i" => misc(0b1010, 0b000, 0b10, MiscVariant::MdMs1Imm3Direct),
    "mcbcad.mv.i" => misc(0b1010, 0b000, 0b11, MiscVariant::MdMs1Imm3Direct),
    "mpack" => misc(0b0100, 0b000, 0b00, MiscVariant::MdMs2Ms1),
    "mpackhl" => misc(0b0100, 0b000, 0b00, MiscVariant::MdMs2Ms1),
    "mpackhh" => misc(0b0100, 0b000, 0b00, MiscVariant::MdMs2Ms1),

    // --- MULTIPLY (supported) ---
    "mfmacc.s" => multiply(0b0000, 0b000, 0b10, 0b10),
    "mfmacc.h" => multiply(0b0000, 0b000, 0b01, 0b01),
    "mfmacc.s.h" => multiply(0b0000, 0b000, 0b01, 0b10),
    "mfmacc.s.bf16" => multiply(0b0000, 0b001, 0b01, 0b10),
    "mfmacc.bf16.e5" => multiply(0b0000, 0b100, 0b00, 0b01),
    "mfmacc.bf16.e4" => multiply(0b0000, 0b101, 0b00, 0b01),
    "mmacc.w.b" => multiply(0b0001, 0b011, 0b00, 0b10),
    "mmaccu.w.b" => multiply(0b0001, 0b000, 0b00, 0b10),
    "mmaccus.w.b" => multiply(0b0001, 0b001, 0b00, 0b10),
    "mmaccsu.w.b" => multiply(0b0001, 0b010, 0b00, 0b10),

    // --- MULTIPLY (deliberately rejected at execution) ---
    "mfmacc.h.e5" => multiply(0b0000, 0b000, 0b00, 0b01),
    "mfmacc.h.e4" => multiply(0b0000, 0b001, 0b00, 0b01),
    "mfmacc.s.e4" => multiply(0b0000, 0b001, 0b00, 0b10),
    "mfmacc.s.e5" => multiply(0b0000, 0b000, 0b00, 0b10),
    "mfmacc.s.tf32" => multiply(0b0000, 0b001, 0b10, 0b10),
    "mfmacc.d.s" => multiply(0b0000, 0b000, 0b10, 0b11),
    "mfmacc.d" => multiply(0b0000, 0b000, 0b11, 0b11),
    "pmmacc.w.b" => multiply(0b0001, 0b111, 0b00, 0b10),
    "pmmaccu.w.b" => multiply(0b0001, 0b100, 0b00, 0b10),
    "mmacc.d.h" => multiply(0b0001, 0b011, 0b01, 0b11),
    "mmacc.w.bp" => multiply(0b0010, 0b011, 0b00, 0b10),

    // --- LOADSTORE (supported families: func4 0,1,2 row/col-major, 4,5,6 transposed) ---
    "mlae8" => loadstore(0b0000, 0, 0b00),
    "mlae16" => loadstore(0b0000, 0, 0b01),
    "mlae32" => loadstore(0b0000, 0, 0b10),
    "mlae64" => loadstore(0b0000, 0, 0b11),
    "msae8" => loadstore(0b0000, 1, 0b00),
    "msae16" => loadstore(0b0000, 1, 0b01),
    "msae32" => loadstore(0b0000, 1, 0b10),
    "msae64" => loadstore(0b0000, 1, 0b11),
    "mlbe8" => loadstore(0b0001, 0, 0b00),
    "mlbe16" => loadstore(0b0001, 0, 0b01),
    "mlbe32" => loadstore(0b0001, 0, 0b10),
    "mlbe64" => loadstore(0b0001, 0, 0b11),
    "msbe8" => loadstore(0b0001, 1, 0b00),
    "msbe16" => loadstore(0b0001, 1, 0b01),
    "msbe32" => loadstore(0b0001, 1, 0b10),
    "msbe64" => loadstore(0b0001, 1, 0b11),
    "mlce8" => loadstore(0b0010, 0, 0b00),
    "mlce16" => loadstore(0b0010, 0, 0b01),
    "mlce32" => loadstore(0b0010, 0, 0b10),
    "mlce64" => loadstore(0b0010, 0, 0b11),
    "msce8" => loadstore(0b0010, 1, 0b00),
    "msce16" => loadstore(0b0010, 1, 0b01),
    "msce32" => loadstore(0b0010, 1, 0b10),
    "msce64" => loadstore(0b0010, 1, 0b11),
    "mlate8" => loadstore(0b0100, 0, 0b00),
    "mlate16" => loadstore(0b0100, 0, 0b01),
    "mlate32" => loadstore(0b0100, 0, 0b10),
    "mlate64" => loadstore(0b0100, 0, 0b11),
    "msate8" => loadstore(0b0100, 1, 0b00),
    "msate16" => loadstore(0b0100, 1, 0b01),
    "msate32" => loadstore(0b0100, 1, 0b10),
    "msate64" => loadstore(0b0100, 1, 0b11),
    "mlbte8" => loadstore(0b0101, 0, 0b00),
    "mlbte16" => loadstore(0b0101, 0, 0b01),
    "mlbte32" => loadstore(0b0101, 0, 0b10),
    "mlbte64" => loadstore(0b0101, 0, 0b11),
    "msbte8" => loadstore(0b0101, 1, 0b00),
    "msbte16" => loadstore(0b0101, 1, 0b01),
    "msbte32" => loadstore(0b0101, 1, 0b10),
    "msbte64" => loadstore(0b0101, 1, 0b11),
    "mlcte8" => loadstore(0b0110, 0, 0b00),
    "mlcte16" => loadstore(0b0110, 0, 0b01),
    "mlcte32" => loadstore(0b0110, 0, 0b10),
    "mlcte64" => loadstore(0b0110, 0, 0b11),
    "mscte8" => loadstore(0b0110, 1, 0b00),
    "mscte16" => loadstore(0b0110, 1, 0b01),
    "mscte32" => loadstore(0b0110, 1, 0b10),
    "mscte64" => loadstore(0b0110, 1, 0b11),

    // --- LOADSTORE (whole-register, deliberately rejected: func4 = 0011) ---
    "mlme8" => loadstore(0b0011, 0, 0b00),
    "mlme16" => loadstore(0b0011, 0, 0b01),
    "mlme32" => loadstore(0b0011, 0, 0b10),
    "mlme64" => loadstore(0b0011, 0, 0b11),
    "msme8" => loadstore(0b0011, 1, 0b00),
    "msme16" => loadstore(0b0011, 1, 0b01),
    "msme32" => loadstore(0b0011, 1, 0b10),
    "msme64" => loadstore(0b0011, 1, 0b11),

    // --- EW integer (matrix-matrix, ctrl=0b111) ---
    "madd.w" => ew_int(0b0000, EwVariant::MdMs2Ms1),
    "msub.w" => ew_int(0b0001, EwVariant::MdMs2Ms1),
    "mmul.w" => ew_int(0b0010, EwVariant::MdMs2Ms1),
    "mmax.w" => ew_int(0b0100, EwVariant::MdMs2Ms1),
    "mumax.w" => ew_int(0b0101, EwVariant::MdMs2Ms1),
    "mmin.w" => ew_int(0b0110, EwVariant::MdMs2Ms1),
    "mumin.w" => ew_int(0b0111, EwVariant::MdMs2Ms1),
    "msrl.w" => ew_int(0b1000, EwVariant::MdMs2Ms1),
    "msll.w" => ew_int(0b1001, EwVariant::MdMs2Ms1),
    "msra.w" => ew_int(0b1010, EwVariant::MdMs2Ms1),

    // --- EW integer (matrix-vector broadcast immediate) ---
    "madd.w.mv.i" => ew_int(0b0000, EwVariant::MdMs2Ms1Broadcast),
    "msub.w.mv.i" => ew_int(0b0001, EwVariant::MdMs2Ms1Broadcast),
    "mmul.w.mv.i" => ew_int(0b0010, EwVariant::MdMs2Ms1Broadcast),
    "mmax.w.mv.i" => ew_int(0b0100, EwVariant::MdMs2Ms1Broadcast),
    "mumax.w.mv.i" => ew_int(0b0101, EwVariant::MdMs2Ms1Broadcast),
    "mmin.w.mv.i" => ew_int(0b0110, EwVariant::MdMs2Ms1Broadcast),
    "mumin.w.mv.i" => ew_int(0b0111, EwVariant::MdMs2Ms1Broadcast),
    "msrl.w.mv.i" => ew_int(0b1000, EwVariant::MdMs2Ms1Broadcast),
    "msll.w.mv.i" => ew_int(0b1001, EwVariant::MdMs2Ms1Broadcast),
    "msra.w.mv.i" => ew_int(0b1010, EwVariant::MdMs2Ms1Broadcast),

    // --- EW float, FP32 (matrix-matrix and broadcast) ---
    "mfadd.s" => ew_float(0b0000, 0b10, 0b10, EwVariant::MdMs2Ms1),
    "mfsub.s" => ew_float(0b0001, 0b10, 0b10, EwVariant::MdMs2Ms1),
    "mfmul.s" => ew_float(0b0010, 0b10, 0b10, EwVariant::MdMs2Ms1),
    "mfmax.s" => ew_float(0b0011, 0b10, 0b10, EwVariant::MdMs2Ms1),
    "mfmin.s" => ew_float(0b0100, 0b10, 0b10, EwVariant::MdMs2Ms1),
    "mfadd.s.mv.i" => ew_float(0b0000, 0b10, 0b10, EwVariant::MdMs2Ms1Broadcast),
    "mfsub.s.mv.i" => ew_float(0b0001, 0b10, 0b10, EwVariant::MdMs2Ms1Broadcast),
    "mfmul.s.mv.i" => ew_float(0b0010, 0b10, 0b10, EwVariant::MdMs2Ms1Broadcast),
    "mfmax.s.mv.i" => ew_float(0b0011, 0b10, 0b10, EwVariant::MdMs2Ms1Broadcast),
    "mfmin.s.mv.i" => ew_float(0b0100, 0b10, 0b10, EwVariant::MdMs2Ms1Broadcast),

    // --- EW float, FP16 (matrix-matrix and broadcast) ---
    "mfadd.h" => ew_float(0b0000, 0b01, 0b01, EwVariant::MdMs2Ms1),
    "mfsub.h" => ew_float(0b0001, 0b01, 0b01, EwVariant::MdMs2Ms1),
    "mfmul.h" => ew_float(0b0010, 0b01, 0b01, EwVariant::MdMs2Ms1),
    "mfmax.h" => ew_float(0b0011, 0b01, 0b01, EwVariant::MdMs2Ms1),
    "mfmin.h" => ew_float(0b0100, 0b01, 0b01, EwVariant::MdMs2Ms1),
    "mfadd.h.mv.i" => ew_float(0b0000, 0b01, 0b01, EwVariant::MdMs2Ms1Broadcast),
    "mfsub.h.mv.i" => ew_float(0b0001, 0b01, 0b01, EwVariant::MdMs2Ms1Broadcast),
    "mfmul.h.mv.i" => ew_float(0b0010, 0b01, 0b01, EwVariant::MdMs2Ms1Broadcast),
    "mfmax.h.mv.i" => ew_float(0b0011, 0b01, 0b01, EwVariant::MdMs2Ms1Broadcast),
    "mfmin.h.mv.i" => ew_float(0b0100, 0b01, 0b01, EwVariant::MdMs2Ms1Broadcast),

    // --- EW format conversion (representative sample; table-only, never executed) ---
    "mfcvtl.h.s" => ew_cvt(0b0000, 0b00, 0b000, 0b10, 0b01),
    "mfcvth.h.s" => ew_cvt(0b0000, 0b00, 0b010, 0b10, 0b01),
    "mfcvtl.s.h" => ew_cvt(0b0000, 0b00, 0b000, 0b01, 0b10),
    "mfcvt.tf32.s" => ew_cvt(0b0000, 0b00, 0b110, 0b10, 0b10),
    "mfcvt.s.tf32" => ew_cvt(0b0000, 0b00, 0b001, 0b10, 0b10),
    "mfcvtl.bf16.s" => ew_cvt(0b0000, 0b00, 0b100, 0b10, 0b01),
    "mufcvt.s.w" => ew_cvt(0b0001, 0b00, 0b000, 0b10, 0b10),
    "mfscvt.w.s" => ew_cvt(0b0001, 0b00, 0b101, 0b10, 0b10),
};

/// GPR name -> 5-bit register index: `x0..x31` plus the ABI aliases.
pub static GPR_NAMES: phf::Map<&'static str, u8> = phf_map! {
    "x0" => 0, "x1" => 1, "x2" => 2, "x3" => 3, "x4" => 4, "x5" => 5, "x6" => 6, "x7" => 7,
    "x8" => 8, "x9" => 9, "x10" => 10, "x11" => 11, "x12" => 12, "x13" => 13, "x14" => 14, "x15" => 15,
    "x16" => 16, "x17" => 17, "x18" => 18, "x19" => 19, "x20" => 20, "x21" => 21, "x22" => 22, "x23" => 23,
    "x24" => 24, "x25" => 25, "x26" => 26, "x27" => 27, "x28" => 28, "x29" => 29, "x30" => 30, "x31" => 31,
    "zero" => 0, "ra" => 1, "sp" => 2, "gp" => 3, "tp" => 4,
    "t0" => 5, "t1" => 6, "t2" => 7,
    "s0" => 8, "fp" => 8, "s1" => 9,
    "a0" => 10, "a1" => 11, "a2" => 12, "a3" => 13, "a4" => 14, "a5" => 15, "a6" => 16, "a7" => 17,
    "s2" => 18, "s3" => 19, "s4" => 20, "s5" => 21, "s6" => 22, "s7" => 23,
    "s8" => 24, "s9" => 25, "s10" => 26, "s11" => 27,
    "t3" => 28, "t4" => 29, "t5" => 30, "t6" => 31,
};

/// Matrix-register name -> 3-bit code. `tr0..tr3` and `acc0..acc3` share
/// numeric codes by design (see the aliasing rule in `state.rs`); `tr4..tr7`
/// occupy the remaining codes.
pub static MATRIX_REG_NAMES: phf::Map<&'static str, u8> = phf_map! {
    "tr0" => 0, "tr1" => 1, "tr2" => 2, "tr3" => 3,
    "acc0" => 0, "acc1" => 1, "acc2" => 2, "acc3" => 3,
    "tr4" => 4, "tr5" => 5, "tr6" => 6, "tr7" => 7,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpr_aliases_resolve_to_same_index() {
        assert_eq!(GPR_NAMES["zero"], GPR_NAMES["x0"]);
        assert_eq!(GPR_NAMES["fp"], GPR_NAMES["s0"]);
        assert_eq!(GPR_NAMES["s0"], 8);
    }

    #[test]
    fn matrix_register_aliasing_matches_state_module() {
        assert_eq!(MATRIX_REG_NAMES["tr0"], MATRIX_REG_NAMES["acc0"]);
        assert_eq!(MATRIX_REG_NAMES["tr4"], 4);
    }

    #[test]
    fn instruction_table_has_every_required_mnemonic() {
        for m in [
            "mrelease",
            "msettilemi",
            "mfmacc.s",
            "mmacc.w.b",
            "mlae32",
            "msae32",
            "mzero",
            "mmov.mm",
            "mrslidedown",
            "mcslidedown.w",
            "mfadd.s",
            "mfmul.s",
        ] {
            assert!(INSTRUCTIONS.get(m).is_some(), "missing mnemonic {m}");
        }
    }
}
