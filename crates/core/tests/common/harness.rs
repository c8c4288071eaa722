use stacksim_core::common::DEFAULT_MAX_STEPS;
use stacksim_core::core::{StepOutcome, TraceRecorder};
use stacksim_core::{Machine, RunSummary, SimError};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer `tracing` subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct TestContext {
    pub machine: Machine<TraceRecorder>,
}

impl TestContext {
    pub fn new(program: impl Into<Vec<u8>>) -> Self {
        init_tracing();
        Self {
            machine: Machine::with_observer(program, TraceRecorder::new()),
        }
    }

    pub fn run(&mut self, max_steps: u64) -> Result<RunSummary, SimError> {
        self.machine.run(max_steps)
    }

    /// Runs with the default budget and fails the test on a fatal error.
    pub fn run_ok(&mut self) -> RunSummary {
        match self.machine.run(DEFAULT_MAX_STEPS) {
            Ok(summary) => summary,
            Err(e) => panic!("unexpected fatal error: {e}"),
        }
    }

    /// Runs with the default budget and fails the test unless it faults.
    pub fn run_err(&mut self) -> SimError {
        match self.machine.run(DEFAULT_MAX_STEPS) {
            Ok(summary) => panic!("expected a fatal error, run ended with {summary:?}"),
            Err(e) => e,
        }
    }

    /// Executes one step and fails the test on a fatal error.
    pub fn step_ok(&mut self) -> StepOutcome {
        match self.machine.step() {
            Ok(outcome) => outcome,
            Err(e) => panic!("unexpected fatal error: {e}"),
        }
    }

    pub fn data(&self) -> &[u32] {
        self.machine.data_stack()
    }

    pub fn rdata(&self) -> &[u32] {
        self.machine.return_stack()
    }

    pub fn trace(&self) -> &TraceRecorder {
        self.machine.observer()
    }
}

/// Runs `program` to completion and returns the final data stack.
pub fn final_stack(program: Vec<u8>) -> Vec<u32> {
    let mut ctx = TestContext::new(program);
    ctx.run_ok().data_stack
}
