//! Machine core.
//!
//! This module contains the execution engine and the state it owns:
//! 1. **Stacks:** The 32-bit LIFO used for both the data and return stacks.
//! 2. **Machine:** Program, program counter, halted flag, output, and the step/run loop.
//! 3. **Observation:** Hooks through which a reporter sees every executed step.

/// Fetch/decode/execute engine.
pub mod machine;

/// Step and print observation hooks.
pub mod observer;

/// 32-bit value stack.
pub mod stack;

pub use machine::{Machine, StepOutcome};
pub use observer::{NullObserver, Observer, PrintEvent, StepSnapshot, TraceEvent, TraceRecorder};
pub use stack::Stack;
