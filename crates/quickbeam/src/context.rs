//! Run configuration

use crate::environment::DEFAULT_MAX_DEPTH;

/// Settings for one interpreter run.
///
/// Owned by the [`Interpreter`](crate::Interpreter); fixed once the run
/// starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Deepest the binding stack may grow before `StackOverflow`
    pub max_call_depth: usize,

    /// Emit a trace event for every evaluated node
    pub trace: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_DEPTH,
            trace: false,
        }
    }
}

impl EvalContext {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the binding stack at `max_call_depth` frames.
    pub fn with_max_call_depth(max_call_depth: usize) -> Self {
        Self {
            max_call_depth,
            ..Self::default()
        }
    }

    /// Toggle per-node tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
