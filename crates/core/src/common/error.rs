//! Error definitions.
//!
//! This module defines the failure modes of the simulator. It provides:
//! 1. **Execution Errors:** Fatal conditions raised while stepping a program (`SimError`).
//! 2. **Decode Errors:** Bytes that do not name an instruction (`DecodeError`).
//! 3. **Load and Configuration Errors:** Failures reading program or config files.
//!
//! An unknown opcode is deliberately *not* a `SimError`: the machine reports it as a
//! termination reason, the same way it reports `HALT`.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Fatal execution errors.
///
/// Every variant carries the fetch address of the opcode that faulted, never the
/// program counter after the opcode or its operand was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimError {
    /// A pop or peek found the data stack empty (or too shallow for `OVER`).
    #[error("stack underflow at PC={pc}")]
    StackUnderflow {
        /// Fetch address of the faulting opcode.
        pc: usize,
    },

    /// A pop or peek found the return stack empty.
    #[error("return stack underflow at PC={pc}")]
    ReturnStackUnderflow {
        /// Fetch address of the faulting opcode.
        pc: usize,
    },

    /// An immediate operand runs past the end of the program.
    #[error("truncated program: operand of instruction at PC={pc} runs past end of program")]
    TruncatedProgram {
        /// Fetch address of the opcode whose operand is incomplete.
        pc: usize,
    },
}

impl SimError {
    /// Returns the fetch address of the faulting instruction.
    pub const fn pc(&self) -> usize {
        match *self {
            Self::StackUnderflow { pc }
            | Self::ReturnStackUnderflow { pc }
            | Self::TruncatedProgram { pc } => pc,
        }
    }
}

/// Raised when a byte does not correspond to any instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The byte is not an assigned opcode.
    #[error("unknown opcode {opcode:#04x}")]
    UnknownOpcode {
        /// The offending byte.
        opcode: u8,
    },
}

/// Failures while reading a program image from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read program '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file exists but contains no bytes.
    #[error("program '{}' is empty", .path.display())]
    Empty {
        /// Path of the empty file.
        path: PathBuf,
    },
}

/// Failures while reading or parsing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid JSON for [`crate::Config`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
