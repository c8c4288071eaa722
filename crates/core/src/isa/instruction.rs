//! Decoded opcodes.
//!
//! This module turns raw opcode bytes into the closed [`Opcode`] enumeration. It provides:
//! 1. **Decoding:** `Opcode::try_from(u8)`, failing with [`DecodeError::UnknownOpcode`].
//! 2. **Metadata:** Mnemonics, operand presence, encoded width, and instruction class.
//!
//! Execution matches on `Opcode` exhaustively, so adding a variant without
//! giving it semantics is a compile error rather than a silent fallthrough.

use std::fmt;

use serde::Serialize;

use super::opcodes as op;
use crate::common::constants::{OPCODE_BYTES, OPERAND_BYTES};
use crate::common::error::DecodeError;

/// A recognised instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Opcode {
    /// `PUSH imm32`
    Push = op::PUSH,
    /// `ADD`
    Add = op::ADD,
    /// `SUB`
    Sub = op::SUB,
    /// `MUL`
    Mul = op::MUL,
    /// `DROP`
    Drop = op::DROP,
    /// `PRINT`
    Print = op::PRINT,
    /// `EQ`
    Eq = op::EQ,
    /// `LT_S`
    LtS = op::LT_S,
    /// `BR_IF imm32`
    BrIf = op::BR_IF,
    /// `JUMP imm32`
    Jump = op::JUMP,
    /// `DUP`
    Dup = op::DUP,
    /// `SWAP`
    Swap = op::SWAP,
    /// `OVER`
    Over = op::OVER,
    /// `>R`
    ToR = op::TO_R,
    /// `R>`
    FromR = op::FROM_R,
    /// `R@`
    RFetch = op::R_FETCH,
    /// `DEPTH`
    Depth = op::DEPTH,
    /// `RDEPTH`
    RDepth = op::RDEPTH,
    /// `HALT`
    Halt = op::HALT,
}

/// Coarse grouping of opcodes, used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionClass {
    /// PUSH, DROP, DUP, SWAP, OVER, DEPTH.
    Stack,
    /// ADD, SUB, MUL.
    Arithmetic,
    /// EQ, LT_S.
    Compare,
    /// BR_IF, JUMP.
    Control,
    /// >R, R>, R@, RDEPTH.
    ReturnStack,
    /// PRINT.
    Io,
    /// HALT.
    System,
}

impl Opcode {
    /// Every opcode, in encoding order.
    pub const ALL: [Self; 19] = [
        Self::Push,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Drop,
        Self::Print,
        Self::Eq,
        Self::LtS,
        Self::BrIf,
        Self::Jump,
        Self::Dup,
        Self::Swap,
        Self::Over,
        Self::ToR,
        Self::FromR,
        Self::RFetch,
        Self::Depth,
        Self::RDepth,
        Self::Halt,
    ];

    /// Returns the encoded opcode byte.
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Drop => "drop",
            Self::Print => "print",
            Self::Eq => "eq",
            Self::LtS => "lt_s",
            Self::BrIf => "br_if",
            Self::Jump => "jump",
            Self::Dup => "dup",
            Self::Swap => "swap",
            Self::Over => "over",
            Self::ToR => ">r",
            Self::FromR => "r>",
            Self::RFetch => "r@",
            Self::Depth => "depth",
            Self::RDepth => "rdepth",
            Self::Halt => "halt",
        }
    }

    /// Returns `true` if the opcode is followed by a 32-bit immediate.
    #[inline]
    pub const fn has_operand(self) -> bool {
        matches!(self, Self::Push | Self::BrIf | Self::Jump)
    }

    /// Returns the encoded size of the instruction in bytes.
    #[inline]
    pub const fn width(self) -> usize {
        if self.has_operand() {
            OPCODE_BYTES + OPERAND_BYTES
        } else {
            OPCODE_BYTES
        }
    }

    /// Returns the statistics class of the opcode.
    pub const fn class(self) -> InstructionClass {
        match self {
            Self::Push | Self::Drop | Self::Dup | Self::Swap | Self::Over | Self::Depth => {
                InstructionClass::Stack
            }
            Self::Add | Self::Sub | Self::Mul => InstructionClass::Arithmetic,
            Self::Eq | Self::LtS => InstructionClass::Compare,
            Self::BrIf | Self::Jump => InstructionClass::Control,
            Self::ToR | Self::FromR | Self::RFetch | Self::RDepth => InstructionClass::ReturnStack,
            Self::Print => InstructionClass::Io,
            Self::Halt => InstructionClass::System,
        }
    }
}

/// Reads a little-endian 32-bit immediate starting at `at`.
///
/// Returns `None` if fewer than four bytes remain.
#[inline]
pub fn read_imm32(program: &[u8], at: usize) -> Option<u32> {
    let end = at.checked_add(OPERAND_BYTES)?;
    let bytes: [u8; OPERAND_BYTES] = program.get(at..end)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            op::PUSH => Self::Push,
            op::ADD => Self::Add,
            op::SUB => Self::Sub,
            op::MUL => Self::Mul,
            op::DROP => Self::Drop,
            op::PRINT => Self::Print,
            op::EQ => Self::Eq,
            op::LT_S => Self::LtS,
            op::BR_IF => Self::BrIf,
            op::JUMP => Self::Jump,
            op::DUP => Self::Dup,
            op::SWAP => Self::Swap,
            op::OVER => Self::Over,
            op::TO_R => Self::ToR,
            op::FROM_R => Self::FromR,
            op::R_FETCH => Self::RFetch,
            op::DEPTH => Self::Depth,
            op::RDEPTH => Self::RDepth,
            op::HALT => Self::Halt,
            opcode => return Err(DecodeError::UnknownOpcode { opcode }),
        })
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> Self {
        op.byte()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
