//! Unit tests for the instruction set: decoding and disassembly.
