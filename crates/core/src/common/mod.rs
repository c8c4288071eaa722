//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Constants:** Operand widths, value masks, and simulation defaults.
//! 2. **Error Handling:** Fatal execution errors plus decode, load, and configuration errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for execution, decoding, loading, and configuration.
pub mod error;

pub use constants::{DEFAULT_MAX_STEPS, OPERAND_BYTES};
pub use error::{ConfigError, DecodeError, LoadError, SimError};
