//! # Arithmetic and Comparison Tests

use rstest::rstest;
use stacksim_core::Opcode;

use crate::common::builder::ProgramBuilder;
use crate::common::harness::final_stack;

fn binop(a: u32, b: u32, op: Opcode) -> Vec<u32> {
    final_stack(ProgramBuilder::new().push(a).push(b).op(op).halt().build())
}

#[rstest]
#[case(5, 3, 8)]
#[case(0, 0, 0)]
#[case(0xFFFF_FFFF, 1, 0)]
#[case(0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFE)]
#[case(0x8000_0000, 0x8000_0000, 0)]
fn test_add_wraps(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(binop(a, b, Opcode::Add), vec![expected]);
}

#[rstest]
#[case(5, 3, 2)]
#[case(3, 5, 0xFFFF_FFFE)]
#[case(0, 1, 0xFFFF_FFFF)]
#[case(0x8000_0000, 1, 0x7FFF_FFFF)]
fn test_sub_operand_order_and_wrap(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(binop(a, b, Opcode::Sub), vec![expected]);
}

#[rstest]
#[case(6, 7, 42)]
#[case(0x1_0000, 0x1_0000, 0)]
#[case(0xFFFF_FFFF, 0xFFFF_FFFF, 1)]
#[case(0x8000_0000, 2, 0)]
fn test_mul_wraps(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(binop(a, b, Opcode::Mul), vec![expected]);
}

#[rstest]
#[case(7, 7, 1)]
#[case(7, 8, 0)]
#[case(0, 0xFFFF_FFFF, 0)]
#[case(0xFFFF_FFFF, 0xFFFF_FFFF, 1)]
fn test_eq(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(binop(a, b, Opcode::Eq), vec![expected]);
}

#[rstest]
#[case(0x8000_0000, 0x7FFF_FFFF, 1)] // i32::MIN < i32::MAX
#[case(0x7FFF_FFFF, 0x8000_0000, 0)]
#[case(0xFFFF_FFFF, 0, 1)] // -1 < 0
#[case(0, 0xFFFF_FFFF, 0)]
#[case(1, 2, 1)]
#[case(2, 1, 0)]
#[case(5, 5, 0)]
#[case(0xFFFF_FFFE, 0xFFFF_FFFF, 1)] // -2 < -1
fn test_lt_s_is_signed(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(binop(a, b, Opcode::LtS), vec![expected]);
}

#[test]
fn test_binary_ops_leave_values_below_untouched() {
    let program = ProgramBuilder::new()
        .push(99)
        .push(10)
        .push(4)
        .sub()
        .halt()
        .build();
    assert_eq!(final_stack(program), vec![99, 6]);
}
