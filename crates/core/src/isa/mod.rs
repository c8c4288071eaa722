//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the raw opcode bytes, the decoded [`Opcode`] enumeration, and a
//! disassembler for turning program images back into mnemonics.
//!
//! # Encoding
//!
//! Every instruction is a single opcode byte. `PUSH`, `BR_IF`, and `JUMP` are
//! followed by a 4-byte little-endian immediate. There is no header and no
//! alignment requirement.

/// Program disassembler for listings and trace diagnostics.
pub mod disasm;

/// Decoded opcode enumeration and instruction classes.
pub mod instruction;

/// Raw opcode byte values.
pub mod opcodes;

pub use instruction::{InstructionClass, Opcode, read_imm32};
