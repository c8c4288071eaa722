//! Shared test infrastructure.


/// `TestContext` harness around a recording machine.
pub mod harness;
