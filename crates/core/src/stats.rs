//! Execution statistics collection and reporting.
//!
//! This module tracks what a machine did during its lifetime. It provides:
//! 1. **Step counts:** Total executed steps and unknown-opcode stops.
//! 2. **Instruction mix:** Counts by [`InstructionClass`].
//! 3. **Branches:** Taken and not-taken `BR_IF` outcomes.
//! 4. **Stack pressure:** Peak data- and return-stack depth.

use std::time::Instant;

use crate::isa::{InstructionClass, Opcode};

/// Statistics for one machine.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Executed steps, including the one that halted or hit an unknown opcode.
    pub steps: u64,

    /// PUSH, DROP, DUP, SWAP, OVER, DEPTH executed.
    pub inst_stack: u64,
    /// ADD, SUB, MUL executed.
    pub inst_arith: u64,
    /// EQ, LT_S executed.
    pub inst_compare: u64,
    /// BR_IF, JUMP executed.
    pub inst_control: u64,
    /// >R, R>, R@, RDEPTH executed.
    pub inst_return_stack: u64,
    /// PRINT executed.
    pub inst_io: u64,
    /// HALT executed.
    pub inst_system: u64,
    /// Steps that fetched an unassigned opcode byte.
    pub unknown_opcodes: u64,

    /// `BR_IF` with a non-zero condition.
    pub branches_taken: u64,
    /// `BR_IF` with a zero condition.
    pub branches_not_taken: u64,

    /// Deepest data stack seen after any step.
    pub max_data_depth: usize,
    /// Deepest return stack seen after any step.
    pub max_return_depth: usize,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            inst_stack: 0,
            inst_arith: 0,
            inst_compare: 0,
            inst_control: 0,
            inst_return_stack: 0,
            inst_io: 0,
            inst_system: 0,
            unknown_opcodes: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            max_data_depth: 0,
            max_return_depth: 0,
        }
    }
}

impl SimStats {
    /// Counts one executed step of a recognised opcode.
    pub const fn record(&mut self, op: Opcode) {
        self.steps += 1;
        match op.class() {
            InstructionClass::Stack => self.inst_stack += 1,
            InstructionClass::Arithmetic => self.inst_arith += 1,
            InstructionClass::Compare => self.inst_compare += 1,
            InstructionClass::Control => self.inst_control += 1,
            InstructionClass::ReturnStack => self.inst_return_stack += 1,
            InstructionClass::Io => self.inst_io += 1,
            InstructionClass::System => self.inst_system += 1,
        }
    }

    /// Counts one executed step that fetched an unassigned byte.
    pub const fn record_unknown(&mut self) {
        self.steps += 1;
        self.unknown_opcodes += 1;
    }

    /// Counts a `BR_IF` outcome.
    pub const fn record_branch(&mut self, taken: bool) {
        if taken {
            self.branches_taken += 1;
        } else {
            self.branches_not_taken += 1;
        }
    }

    /// Updates the peak stack depths.
    pub fn observe_depths(&mut self, data: usize, ret: usize) {
        self.max_data_depth = self.max_data_depth.max(data);
        self.max_return_depth = self.max_return_depth.max(ret);
    }

    /// Count of executed steps in the given class.
    pub const fn class_count(&self, class: InstructionClass) -> u64 {
        match class {
            InstructionClass::Stack => self.inst_stack,
            InstructionClass::Arithmetic => self.inst_arith,
            InstructionClass::Compare => self.inst_compare,
            InstructionClass::Control => self.inst_control,
            InstructionClass::ReturnStack => self.inst_return_stack,
            InstructionClass::Io => self.inst_io,
            InstructionClass::System => self.inst_system,
        }
    }

    /// Prints the statistics block to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let steps = self.steps.max(1) as f64;
        let pct = |n: u64| (n as f64 / steps) * 100.0;

        println!("\n==========================================================");
        println!("STACK MACHINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_steps                {}", self.steps);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        println!("  op.stack               {} ({:.2}%)", self.inst_stack, pct(self.inst_stack));
        println!("  op.arith               {} ({:.2}%)", self.inst_arith, pct(self.inst_arith));
        println!("  op.compare             {} ({:.2}%)", self.inst_compare, pct(self.inst_compare));
        println!("  op.control             {} ({:.2}%)", self.inst_control, pct(self.inst_control));
        println!(
            "  op.return_stack        {} ({:.2}%)",
            self.inst_return_stack,
            pct(self.inst_return_stack)
        );
        println!("  op.io                  {} ({:.2}%)", self.inst_io, pct(self.inst_io));
        println!("  op.system              {} ({:.2}%)", self.inst_system, pct(self.inst_system));
        println!("  op.unknown             {}", self.unknown_opcodes);
        println!("----------------------------------------------------------");
        println!("BRANCHES");
        println!("  br_if.taken            {}", self.branches_taken);
        println!("  br_if.not_taken        {}", self.branches_not_taken);
        println!("----------------------------------------------------------");
        println!("STACKS");
        println!("  data.max_depth         {}", self.max_data_depth);
        println!("  return.max_depth       {}", self.max_return_depth);
        println!("==========================================================");
    }
}
