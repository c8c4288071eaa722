//! Two-stack instruction-set simulator library.
//!
//! This crate implements an instruction-level simulator for a small 32-bit stack machine with the following:
//! 1. **Core:** The fetch/decode/execute loop over a data stack and a return stack.
//! 2. **ISA:** Opcode constants, exhaustive opcode decoding, and a program disassembler.
//! 3. **Simulation:** Binary loading, run summaries, and termination reasons.
//! 4. **Support:** Configuration and per-run execution statistics.

/// Common types and constants (error taxonomy, operand widths, defaults).
pub mod common;
/// Simulator configuration (defaults, JSON deserialization).
pub mod config;
/// Machine core (stacks, execution engine, observation hooks).
pub mod core;
/// Instruction set (opcode bytes, decoded opcodes, disassembler).
pub mod isa;
/// Binary loader and run summaries.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main machine type; holds program, program counter, both stacks, and output.
pub use crate::core::Machine;
/// Fatal simulation error.
pub use crate::common::SimError;
/// Decoded opcode.
pub use crate::isa::Opcode;
/// Final report of a `Machine::run` call, or of the state it faulted in.
pub use crate::sim::{FaultReport, RunSummary, Termination};
