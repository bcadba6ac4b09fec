use thiserror::Error;

/// Errors produced while assembling, decoding, or executing a program.
///
/// `UnsupportedInstruction` and `DimensionError` are recoverable: the
/// simulator loop logs them and advances past the offending instruction.
/// `MemoryError` and `EncodingError` end the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("line {line}: {reason} (token: {token:?})")]
    EncodingError {
        line: usize,
        token: String,
        reason: &'static str,
    },

    #[error("pc=0x{pc:08x} word=0x{word:08x}: unsupported instruction ({reason})")]
    UnsupportedInstruction {
        pc: u32,
        word: u32,
        reason: &'static str,
    },

    #[error("memory access out of range: addr=0x{addr:08x} len={len}")]
    MemoryError { addr: u32, len: usize },

    #[error("tile dimensions not set: {reason}")]
    DimensionError { reason: &'static str },
}
