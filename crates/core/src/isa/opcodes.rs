//! Opcode byte values.
//!
//! Gaps in the numbering (0x06, 0x07, 0x0B-0x0D, 0x10, 0x11, 0x15-0x2F, ...)
//! are unassigned and decode as unknown opcodes.

/// Push a 32-bit immediate.
pub const PUSH: u8 = 0x01;

/// Wrapping addition.
pub const ADD: u8 = 0x02;

/// Wrapping subtraction.
pub const SUB: u8 = 0x03;

/// Wrapping multiplication.
pub const MUL: u8 = 0x04;

/// Discard the top of the data stack.
pub const DROP: u8 = 0x05;

/// Pop a value and emit its low byte as a character.
pub const PRINT: u8 = 0x08;

/// Equality test.
pub const EQ: u8 = 0x09;

/// Signed less-than.
pub const LT_S: u8 = 0x0A;

/// Branch to an immediate target if the popped condition is non-zero.
pub const BR_IF: u8 = 0x0E;

/// Unconditional jump to an immediate target.
pub const JUMP: u8 = 0x0F;

/// Duplicate the top of the data stack.
pub const DUP: u8 = 0x12;

/// Exchange the top two data-stack values.
pub const SWAP: u8 = 0x13;

/// Copy the second-from-top value to the top.
pub const OVER: u8 = 0x14;

/// Move a value from the data stack to the return stack (`>R`).
pub const TO_R: u8 = 0x30;

/// Move a value from the return stack to the data stack (`R>`).
pub const FROM_R: u8 = 0x31;

/// Copy the top of the return stack to the data stack (`R@`).
pub const R_FETCH: u8 = 0x32;

/// Push the data-stack depth.
pub const DEPTH: u8 = 0x33;

/// Push the return-stack depth.
pub const RDEPTH: u8 = 0x34;

/// Stop the machine.
pub const HALT: u8 = 0xFF;
