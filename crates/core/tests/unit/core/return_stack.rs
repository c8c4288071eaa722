//! # Return Stack Tests

use pretty_assertions::assert_eq;
use stacksim_core::Opcode;

use crate::common::builder::ProgramBuilder;
use crate::common::harness::TestContext;

#[test]
fn test_to_r_and_back() {
    let program = ProgramBuilder::new()
        .push(0xDEAD_BEEF)
        .op(Opcode::ToR)
        .op(Opcode::FromR)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let summary = ctx.run_ok();
    assert_eq!(summary.data_stack, vec![0xDEAD_BEEF]);
    assert!(summary.return_stack.is_empty());
}

#[test]
fn test_to_r_moves_value() {
    let program = ProgramBuilder::new().push(1).push(2).op(Opcode::ToR).halt().build();
    let mut ctx = TestContext::new(program);
    let summary = ctx.run_ok();
    assert_eq!(summary.data_stack, vec![1]);
    assert_eq!(summary.return_stack, vec![2]);
}

#[test]
fn test_r_fetch_copies_without_popping() {
    let program = ProgramBuilder::new()
        .push(5)
        .op(Opcode::ToR)
        .op(Opcode::RFetch)
        .op(Opcode::RFetch)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let summary = ctx.run_ok();
    assert_eq!(summary.data_stack, vec![5, 5]);
    assert_eq!(summary.return_stack, vec![5]);
}

#[test]
fn test_rdepth_counts_before_push() {
    let program = ProgramBuilder::new()
        .op(Opcode::RDepth)
        .push(1)
        .op(Opcode::ToR)
        .push(2)
        .op(Opcode::ToR)
        .op(Opcode::RDepth)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let summary = ctx.run_ok();
    assert_eq!(summary.data_stack, vec![0, 2]);
    assert_eq!(summary.return_stack, vec![1, 2]);
}

#[test]
fn test_return_stack_is_lifo() {
    let program = ProgramBuilder::new()
        .push(1)
        .op(Opcode::ToR)
        .push(2)
        .op(Opcode::ToR)
        .op(Opcode::FromR)
        .op(Opcode::FromR)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    assert_eq!(ctx.run_ok().data_stack, vec![2, 1]);
}

#[test]
fn test_arithmetic_never_touches_return_stack() {
    let program = ProgramBuilder::new()
        .push(9)
        .op(Opcode::ToR)
        .push(1)
        .push(2)
        .add()
        .op(Opcode::Dup)
        .op(Opcode::Drop)
        .halt()
        .build();
    let mut ctx = TestContext::new(program);
    let _ = ctx.run_ok();
    assert_eq!(ctx.rdata(), &[9]);
    assert_eq!(ctx.data(), &[3]);
}
