//! Program Disassembler.
//!
//! Converts a program image into a listing of addressed, human-readable
//! instructions for the CLI `disasm` command and for trace diagnostics.
//!
//! # Usage
//!
//! ```
//! use stacksim_core::isa::disasm::disassemble;
//! let listing = disassemble(&[0x01, 0x2A, 0x00, 0x00, 0x00, 0xFF]);
//! assert_eq!(listing[0].text, "push 42");
//! assert_eq!(listing[1].text, "halt");
//! ```

use std::fmt;

use super::instruction::{Opcode, read_imm32};

/// One disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisasmLine {
    /// Address of the opcode byte.
    pub addr: usize,
    /// Raw opcode byte.
    pub opcode: u8,
    /// Encoded bytes of the instruction (opcode plus any operand bytes present).
    pub bytes: Vec<u8>,
    /// Mnemonic and operand, e.g. `"push 42"` or `".byte 0x07"`.
    pub text: String,
}

impl fmt::Display for DisasmLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{b:02x}")).collect();
        write!(f, "{:4}: {:<15} {}", self.addr, hex.join(" "), self.text)
    }
}

/// Returns the mnemonic for an opcode byte, or `"???"` if it is unassigned.
pub fn mnemonic(byte: u8) -> &'static str {
    Opcode::try_from(byte).map_or("???", Opcode::mnemonic)
}

/// Disassembles the instruction at `addr`.
///
/// Returns the line and the address of the following instruction, or `None`
/// if `addr` is outside the program. A truncated operand yields a line
/// ending in `<truncated>` and a next address equal to the program length.
pub fn disassemble_at(program: &[u8], addr: usize) -> Option<(DisasmLine, usize)> {
    let &byte = program.get(addr)?;
    let Ok(op) = Opcode::try_from(byte) else {
        let line = DisasmLine {
            addr,
            opcode: byte,
            bytes: vec![byte],
            text: format!(".byte {byte:#04x}"),
        };
        return Some((line, addr + 1));
    };

    if !op.has_operand() {
        let line = DisasmLine {
            addr,
            opcode: byte,
            bytes: vec![byte],
            text: op.mnemonic().to_string(),
        };
        return Some((line, addr + 1));
    }

    let end = (addr + op.width()).min(program.len());
    let bytes = program[addr..end].to_vec();
    let (text, next) = match read_imm32(program, addr + 1) {
        Some(imm) => (format!("{} {imm}", op.mnemonic()), addr + op.width()),
        None => (format!("{} <truncated>", op.mnemonic()), program.len()),
    };
    let line = DisasmLine {
        addr,
        opcode: byte,
        bytes,
        text,
    };
    Some((line, next))
}

/// Disassembles a whole program image, walking it linearly from address 0.
pub fn disassemble(program: &[u8]) -> Vec<DisasmLine> {
    let mut lines = Vec::new();
    let mut addr = 0;
    while let Some((line, next)) = disassemble_at(program, addr) {
        lines.push(line);
        addr = next;
    }
    lines
}
