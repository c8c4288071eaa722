//! Simulator-wide constants.

/// Width in bytes of an immediate operand (PUSH, BR_IF, JUMP).
pub const OPERAND_BYTES: usize = 4;

/// Width in bytes of an opcode.
pub const OPCODE_BYTES: usize = 1;

/// Step budget used when the caller does not supply one.
///
/// Large enough for the usual test programs, small enough that a
/// `JUMP`-to-self terminates promptly.
pub const DEFAULT_MAX_STEPS: u64 = 1000;
