//! Execution observation hooks.
//!
//! The machine reports what it does through the [`Observer`] trait rather than
//! printing. It provides:
//! 1. **Step snapshots:** Emitted for every executed instruction, before its effect.
//! 2. **Print events:** Emitted by `PRINT`, after the value is popped.
//! 3. **Recorders:** [`NullObserver`] for silent runs and [`TraceRecorder`] to capture events.

use serde::Serialize;

/// Machine state at the start of an executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepSnapshot<'a> {
    /// Fetch address of the opcode.
    pub pc: usize,
    /// Raw opcode byte, recognised or not.
    pub opcode: u8,
    /// Data stack, bottom to top.
    pub data_stack: &'a [u32],
    /// Return stack, bottom to top.
    pub return_stack: &'a [u32],
}

/// A character appended to the output buffer by `PRINT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrintEvent {
    /// The emitted character (the byte read as a Latin-1 code point).
    pub character: char,
    /// Low 8 bits of the popped value.
    pub byte: u8,
}

/// Receiver of the machine's observation stream.
///
/// Both methods default to doing nothing, so implementors only override what they need.
pub trait Observer {
    /// Called once per executed step, before the instruction takes effect.
    fn on_step(&mut self, _snapshot: &StepSnapshot<'_>) {}

    /// Called when `PRINT` appends a character.
    fn on_print(&mut self, _event: &PrintEvent) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// An owned observation, as captured by [`TraceRecorder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// An executed step.
    Step {
        /// Fetch address of the opcode.
        pc: usize,
        /// Raw opcode byte.
        opcode: u8,
        /// Data stack before the instruction.
        data_stack: Vec<u32>,
        /// Return stack before the instruction.
        return_stack: Vec<u32>,
    },
    /// A `PRINT` output.
    Print(PrintEvent),
}

/// Observer that keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    /// Recorded events in emission order.
    pub events: Vec<TraceEvent>,
}

impl TraceRecorder {
    /// Creates an empty recorder.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Fetch addresses of every recorded step, in order.
    pub fn step_pcs(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Step { pc, .. } => Some(*pc),
                TraceEvent::Print(_) => None,
            })
            .collect()
    }
}

impl Observer for TraceRecorder {
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        self.events.push(TraceEvent::Step {
            pc: snapshot.pc,
            opcode: snapshot.opcode,
            data_stack: snapshot.data_stack.to_vec(),
            return_stack: snapshot.return_stack.to_vec(),
        });
    }

    fn on_print(&mut self, event: &PrintEvent) {
        self.events.push(TraceEvent::Print(*event));
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        (**self).on_step(snapshot);
    }

    fn on_print(&mut self, event: &PrintEvent) {
        (**self).on_print(event);
    }
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        (**self).on_step(snapshot);
    }

    fn on_print(&mut self, event: &PrintEvent) {
        (**self).on_print(event);
    }
}
