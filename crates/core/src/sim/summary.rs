//! Run summaries.
//!
//! A [`RunSummary`] is what `Machine::run` hands back when it stops without a
//! fatal error. The [`Termination`] inside it tells the caller *why* it stopped.
//! A [`FaultReport`] captures the machine after a fatal error instead.

use std::fmt;

use serde::Serialize;

use crate::common::error::SimError;

/// Why a run stopped.
///
/// None of these are errors; fatal conditions are reported as
/// [`SimError`](crate::SimError) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Termination {
    /// A `HALT` instruction executed (or the machine was already halted).
    Halted,
    /// The program counter left the program (ran off the end or jumped past it).
    EndOfProgram {
        /// Program counter at the time of the stop.
        pc: usize,
    },
    /// An unassigned opcode byte was fetched.
    UnknownOpcode {
        /// Fetch address of the byte.
        pc: usize,
        /// The byte itself.
        opcode: u8,
    },
    /// The step budget ran out with instructions still to execute.
    StepBudgetExhausted {
        /// The budget that was exhausted.
        max_steps: u64,
    },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Halted => write!(f, "halted"),
            Self::EndOfProgram { pc } => write!(f, "end of program (PC={pc})"),
            Self::UnknownOpcode { pc, opcode } => {
                write!(f, "unknown opcode 0x{opcode:02x} at PC={pc}")
            }
            Self::StepBudgetExhausted { max_steps } => {
                write!(f, "step budget of {max_steps} exhausted")
            }
        }
    }
}

/// Final state of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Steps executed by this `run` call.
    pub steps: u64,
    /// Everything `PRINT` emitted over the machine's lifetime.
    pub output: String,
    /// Data stack, bottom to top.
    pub data_stack: Vec<u32>,
    /// Return stack, bottom to top.
    pub return_stack: Vec<u32>,
    /// Why the run stopped.
    pub termination: Termination,
}

impl RunSummary {
    /// Returns `true` if the run ended on `HALT`.
    pub const fn halted(&self) -> bool {
        matches!(self.termination, Termination::Halted)
    }
}

/// Machine state at the point a run stopped on a [`SimError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultReport {
    /// The fatal error.
    pub error: SimError,
    /// Program counter after the faulting fetch.
    pub pc: usize,
    /// Everything `PRINT` emitted before the fault.
    pub output: String,
    /// Data stack as left by the faulting instruction.
    pub data_stack: Vec<u32>,
    /// Return stack as left by the faulting instruction.
    pub return_stack: Vec<u32>,
}
