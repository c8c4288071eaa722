//! Fetch/decode/execute engine.
//!
//! The [`Machine`] owns all simulation state and advances it one instruction at a time. It performs:
//! 1. **Fetch:** Reads the opcode byte at PC and, for `PUSH`/`BR_IF`/`JUMP`, a little-endian imm32.
//! 2. **Decode:** Maps the byte to an [`Opcode`]; unassigned bytes stop the run without an error.
//! 3. **Execute:** Applies the opcode to the data stack, return stack, PC, output, or halted flag.
//! 4. **Run control:** Repeats steps until halt, unknown opcode, end of program, or step budget.
//!
//! Fatal errors leave the machine exactly as it stood when the fault was detected, so
//! callers can inspect stacks, PC, and output afterwards.

use tracing::{debug, trace, warn};

use super::observer::{NullObserver, Observer, PrintEvent, StepSnapshot};
use super::stack::Stack;
use crate::common::OPERAND_BYTES;
use crate::common::error::SimError;
use crate::isa::{Opcode, read_imm32};
use crate::sim::summary::{FaultReport, RunSummary, Termination};
use crate::stats::SimStats;

/// Result of a single [`Machine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction executed and the machine can keep going.
    Continue,
    /// `HALT` executed.
    Halted,
    /// An unassigned opcode byte was fetched at `pc`.
    UnknownOpcode {
        /// Fetch address of the byte.
        pc: usize,
        /// The byte itself.
        opcode: u8,
    },
    /// Nothing executed: the machine is halted or PC is outside the program.
    NoInstruction,
}

impl StepOutcome {
    /// Returns `true` if another step should be attempted.
    #[inline]
    pub const fn should_continue(self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Returns `true` if an instruction was fetched and counted as a step.
    #[inline]
    pub const fn executed(self) -> bool {
        !matches!(self, Self::NoInstruction)
    }
}

/// A two-stack machine executing one program.
///
/// There is no reset; build a fresh machine for every execution.
#[derive(Debug)]
pub struct Machine<O = NullObserver> {
    program: Vec<u8>,
    pc: usize,
    data: Stack,
    rstack: Stack,
    halted: bool,
    output: String,
    stats: SimStats,
    observer: O,
}

impl Machine<NullObserver> {
    /// Creates a machine for `program` with no observer attached.
    pub fn new(program: impl Into<Vec<u8>>) -> Self {
        Self::with_observer(program, NullObserver)
    }
}

impl<O: Observer> Machine<O> {
    /// Creates a machine for `program` that reports to `observer`.
    ///
    /// PC starts at 0, both stacks are empty, and the output buffer is empty.
    pub fn with_observer(program: impl Into<Vec<u8>>, observer: O) -> Self {
        Self {
            program: program.into(),
            pc: 0,
            data: Stack::new(),
            rstack: Stack::new(),
            halted: false,
            output: String::new(),
            stats: SimStats::default(),
            observer,
        }
    }

    /// Executes exactly one instruction.
    ///
    /// If the machine is halted or PC is outside the program, nothing changes
    /// and [`StepOutcome::NoInstruction`] is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`SimError`] carrying the opcode's fetch address on stack
    /// underflow or a truncated operand.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        if self.halted {
            return Ok(StepOutcome::NoInstruction);
        }
        let Some(&byte) = self.program.get(self.pc) else {
            return Ok(StepOutcome::NoInstruction);
        };
        let pc = self.pc;
        self.pc += 1;

        self.observer.on_step(&StepSnapshot {
            pc,
            opcode: byte,
            data_stack: self.data.as_slice(),
            return_stack: self.rstack.as_slice(),
        });

        let Ok(op) = Opcode::try_from(byte) else {
            warn!(pc, opcode = byte, "unknown opcode");
            self.stats.record_unknown();
            return Ok(StepOutcome::UnknownOpcode { pc, opcode: byte });
        };
        trace!(pc, op = op.mnemonic(), depth = self.data.len(), "step");
        self.stats.record(op);

        let outcome = self.execute(op, pc)?;
        self.stats.observe_depths(self.data.len(), self.rstack.len());
        Ok(outcome)
    }

    /// Steps until the machine stops or `max_steps` steps have executed.
    ///
    /// Running out of budget is a normal [`Termination`], reported only while
    /// there is still an instruction left to execute.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal [`SimError`]; the machine keeps the state it
    /// had at the fault.
    pub fn run(&mut self, max_steps: u64) -> Result<RunSummary, SimError> {
        debug!(max_steps, program_len = self.program.len(), "run start");
        let mut steps = 0;
        let termination = loop {
            if steps >= max_steps && self.has_next() {
                break Termination::StepBudgetExhausted { max_steps };
            }
            let outcome = self.step()?;
            if outcome.executed() {
                steps += 1;
            }
            match outcome {
                StepOutcome::Continue => {}
                StepOutcome::Halted => break Termination::Halted,
                StepOutcome::UnknownOpcode { pc, opcode } => {
                    break Termination::UnknownOpcode { pc, opcode };
                }
                StepOutcome::NoInstruction => break self.idle_termination(),
            }
        };
        debug!(steps, %termination, "run finished");
        Ok(self.summary(steps, termination))
    }

    fn execute(&mut self, op: Opcode, pc: usize) -> Result<StepOutcome, SimError> {
        match op {
            Opcode::Push => {
                let val = self.fetch_imm32(pc)?;
                self.data.push(val);
            }
            Opcode::Add => self.binary(pc, u32::wrapping_add)?,
            Opcode::Sub => self.binary(pc, u32::wrapping_sub)?,
            Opcode::Mul => self.binary(pc, u32::wrapping_mul)?,
            Opcode::Drop => {
                let _ = self.pop(pc)?;
            }
            Opcode::Print => {
                let byte = self.pop(pc)? as u8;
                let character = char::from(byte);
                self.output.push(character);
                self.observer.on_print(&PrintEvent { character, byte });
            }
            Opcode::Eq => self.binary(pc, |a, b| u32::from(a == b))?,
            Opcode::LtS => self.binary(pc, |a, b| u32::from((a as i32) < (b as i32)))?,
            Opcode::BrIf => {
                // Target is not bounds-checked here; a bad target surfaces on the next fetch.
                let target = self.fetch_imm32(pc)?;
                let cond = self.pop(pc)?;
                let taken = cond != 0;
                if taken {
                    self.pc = target as usize;
                }
                self.stats.record_branch(taken);
            }
            Opcode::Jump => {
                let target = self.fetch_imm32(pc)?;
                self.pc = target as usize;
            }
            Opcode::Dup => {
                let val = self.data.peek().ok_or(SimError::StackUnderflow { pc })?;
                self.data.push(val);
            }
            Opcode::Swap => {
                let b = self.pop(pc)?;
                let a = self.pop(pc)?;
                self.data.push(b);
                self.data.push(a);
            }
            Opcode::Over => {
                let val = self.data.peek_at(1).ok_or(SimError::StackUnderflow { pc })?;
                self.data.push(val);
            }
            Opcode::ToR => {
                let val = self.pop(pc)?;
                self.rstack.push(val);
            }
            Opcode::FromR => {
                let val = self.rpop(pc)?;
                self.data.push(val);
            }
            Opcode::RFetch => {
                let val = self
                    .rstack
                    .peek()
                    .ok_or(SimError::ReturnStackUnderflow { pc })?;
                self.data.push(val);
            }
            Opcode::Depth => {
                let depth = self.data.depth_cell();
                self.data.push(depth);
            }
            Opcode::RDepth => {
                let depth = self.rstack.depth_cell();
                self.data.push(depth);
            }
            Opcode::Halt => {
                self.halted = true;
                return Ok(StepOutcome::Halted);
            }
        }
        Ok(StepOutcome::Continue)
    }

    /// Pops `b` then `a` and pushes `f(a, b)`.
    #[inline]
    fn binary(&mut self, pc: usize, f: impl FnOnce(u32, u32) -> u32) -> Result<(), SimError> {
        let b = self.pop(pc)?;
        let a = self.pop(pc)?;
        self.data.push(f(a, b));
        Ok(())
    }

    #[inline]
    fn pop(&mut self, pc: usize) -> Result<u32, SimError> {
        self.data.pop().ok_or(SimError::StackUnderflow { pc })
    }

    #[inline]
    fn rpop(&mut self, pc: usize) -> Result<u32, SimError> {
        self.rstack.pop().ok_or(SimError::ReturnStackUnderflow { pc })
    }

    /// Reads the imm32 at PC and advances PC past it.
    fn fetch_imm32(&mut self, pc: usize) -> Result<u32, SimError> {
        let val = read_imm32(&self.program, self.pc).ok_or(SimError::TruncatedProgram { pc })?;
        self.pc += OPERAND_BYTES;
        Ok(val)
    }

    fn has_next(&self) -> bool {
        !self.halted && self.pc < self.program.len()
    }

    fn idle_termination(&self) -> Termination {
        if self.halted {
            Termination::Halted
        } else {
            Termination::EndOfProgram { pc: self.pc }
        }
    }

    fn summary(&self, steps: u64, termination: Termination) -> RunSummary {
        RunSummary {
            steps,
            output: self.output.clone(),
            data_stack: self.data.as_slice().to_vec(),
            return_stack: self.rstack.as_slice().to_vec(),
            termination,
        }
    }
}

impl<O> Machine<O> {
    /// Current program counter.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// The loaded program image.
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /// Data stack, bottom to top.
    pub fn data_stack(&self) -> &[u32] {
        self.data.as_slice()
    }

    /// Return stack, bottom to top.
    pub fn return_stack(&self) -> &[u32] {
        self.rstack.as_slice()
    }

    /// Characters emitted by `PRINT` so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns `true` once `HALT` has executed.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Lifetime statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The attached observer.
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the attached observer.
    pub const fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the machine and returns its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Captures the current state alongside `error`, for reporting a fatal run.
    pub fn fault_report(&self, error: SimError) -> FaultReport {
        FaultReport {
            error,
            pc: self.pc,
            output: self.output.clone(),
            data_stack: self.data.as_slice().to_vec(),
            return_stack: self.rstack.as_slice().to_vec(),
        }
    }

    /// Dumps PC, flags, and both stacks to stdout.
    pub fn dump_state(&self) {
        println!("PC = {} / {}", self.pc, self.program.len());
        println!("halted = {}", self.halted);
        println!("stack  = {:?}", self.data.as_slice());
        println!("rstack = {:?}", self.rstack.as_slice());
        println!("output = {:?}", self.output);
    }
}
