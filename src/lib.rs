//! rvmx is a library for assembling, decoding, and simulating the RISC-V
//! custom-1 matrix-extension instruction set: a single 32-bit-word encoding
//! covering tile configuration, strided tile/accumulator load-store,
//! matrix-multiply-accumulate, element-wise arithmetic, and register
//! housekeeping.
//!
//! # Examples
//!
//! Assemble a short program and run it to completion:
//!
//! ```
//! use rvmx::assembler::assemble;
//! use rvmx::sim::Simulator;
//!
//! let words = assemble("msettilemi 4\nmsettileni 4\nmsettileki 4\n").unwrap();
//! let mut sim = Simulator::new();
//! assert!(sim.run(&words));
//! assert_eq!(sim.csr.mtilem, 4);
//! ```
//!
//! See [`assembler`], [`sim`], and [`snapshot`] for the assembler, the
//! simulator driver, and the on-disk state format, respectively.

#![warn(missing_docs)]

pub mod assembler;
pub mod convert;
pub mod decode;
pub mod error;
pub mod handlers;
pub mod isa;
pub mod sim;
pub mod snapshot;
pub mod state;

#[doc(inline)]
pub use error::SimError;
#[doc(inline)]
pub use sim::Simulator;
#[doc(inline)]
pub use snapshot::SnapshotError;
