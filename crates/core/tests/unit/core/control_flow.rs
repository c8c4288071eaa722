//! # Control Flow Tests
//!
//! BR_IF and JUMP set PC to an absolute address. Targets are validated lazily:
//! nothing happens at the jump, the next fetch decides.

use pretty_assertions::assert_eq;
use stacksim_core::core::StepOutcome;
use stacksim_core::{Opcode, SimError, Termination};

use crate::common::builder::ProgramBuilder;
use crate::common::harness::TestContext;

#[test]
fn test_br_if_taken_skips_code() {
    // 0: push 1; 5: br_if 16; 10: push 111; 15: halt; 16: push 222; 21: halt
    let program = ProgramBuilder::new()
        .push(1)
        .br_if(16)
        .push(111)
        .halt()
        .push(222)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let summary = ctx.run_ok();
    assert_eq!(summary.data_stack, vec![222]);
    assert_eq!(summary.termination, Termination::Halted);
    assert_eq!(ctx.trace().step_pcs(), vec![0, 5, 16, 21]);
}

#[test]
fn test_br_if_not_taken_falls_through() {
    let program = ProgramBuilder::new()
        .push(0)
        .br_if(16)
        .push(111)
        .halt()
        .push(222)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let summary = ctx.run_ok();
    assert_eq!(summary.data_stack, vec![111]);
    assert_eq!(ctx.trace().step_pcs(), vec![0, 5, 10, 15]);
}

#[test]
fn test_br_if_any_nonzero_is_true() {
    let program = ProgramBuilder::new()
        .push(0x8000_0000)
        .br_if(11)
        .halt()
        .push(7)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    assert_eq!(ctx.run_ok().data_stack, vec![7]);
}

#[test]
fn test_jump_is_unconditional_and_pops_nothing() {
    // 0: push 3; 5: jump 11; 10: halt; 11: push 4; 16: halt
    let program = ProgramBuilder::new()
        .push(3)
        .jump(11)
        .halt()
        .push(4)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    assert_eq!(ctx.run_ok().data_stack, vec![3, 4]);
}

#[test]
fn test_countdown_loop() {
    // Counts 3 down to 0, printing a '*' per iteration.
    //  0: push 3
    //  5: dup            <- loop
    //  6: push 42
    // 11: print
    // 12: push 1
    // 17: sub
    // 18: dup
    // 19: br_if 5
    // 24: halt
    let program = ProgramBuilder::new()
        .push(3)
        .op(Opcode::Dup)
        .push(42)
        .print()
        .push(1)
        .sub()
        .op(Opcode::Dup)
        .br_if(5)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let summary = ctx.run_ok();
    assert_eq!(summary.output, "***");
    // The first DUP's copy survives every iteration; the counter itself ends at 0.
    assert_eq!(summary.data_stack, vec![3, 2, 1, 0]);
    assert_eq!(summary.termination, Termination::Halted);
}

#[test]
fn test_jump_past_end_is_end_of_program() {
    let program = ProgramBuilder::new().jump(1000).build();
    let mut ctx = TestContext::new(program);
    let summary = ctx.run_ok();
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.termination, Termination::EndOfProgram { pc: 1000 });
    assert_eq!(ctx.machine.pc(), 1000);
}

#[test]
fn test_jump_target_not_checked_at_jump_time() {
    let program = ProgramBuilder::new().jump(0xFFFF_FFFF).build();
    let mut ctx = TestContext::new(program);
    assert_eq!(ctx.step_ok(), StepOutcome::Continue);
    assert_eq!(ctx.machine.pc(), 0xFFFF_FFFF);
    assert_eq!(ctx.step_ok(), StepOutcome::NoInstruction);
}

#[test]
fn test_jump_into_partial_operand_surfaces_truncation_on_next_fetch() {
    // 0: jump 6; 5: halt; 6: 0x01 0xAA (push with a 1-byte operand)
    let program = ProgramBuilder::new().jump(6).halt().raw(&[0x01, 0xAA]).build();
    let mut ctx = TestContext::new(program);
    assert_eq!(ctx.run_err(), SimError::TruncatedProgram { pc: 6 });
}

#[test]
fn test_truncated_jump_operand() {
    let mut ctx = TestContext::new(vec![0x0F, 0x00, 0x00]);
    assert_eq!(ctx.run_err(), SimError::TruncatedProgram { pc: 0 });
}

#[test]
fn test_truncated_br_if_operand_pops_nothing() {
    let program = ProgramBuilder::new().push(1).raw(&[0x0E, 0x01]).build();
    let mut ctx = TestContext::new(program);
    assert_eq!(ctx.run_err(), SimError::TruncatedProgram { pc: 5 });
    assert_eq!(ctx.data(), &[1]);
}

#[test]
fn test_br_if_with_empty_stack_underflows_after_operand_fetch() {
    let program = ProgramBuilder::new().br_if(0).build();
    let mut ctx = TestContext::new(program);
    assert_eq!(ctx.run_err(), SimError::StackUnderflow { pc: 0 });
    assert_eq!(ctx.machine.pc(), 5);
}
