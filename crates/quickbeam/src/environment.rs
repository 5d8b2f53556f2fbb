//! Binding stack: one frame per class body or method call

mod frame;

pub use frame::FrameGuard;

use indexmap::IndexMap;

use crate::error::EvalError;
use crate::value::Value;

/// Default maximum number of frames.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// The active execution context: a receiver plus its local variables.
#[derive(Debug, Clone)]
pub struct Frame {
    self_value: Value,
    locals: IndexMap<String, Value>,
}

impl Frame {
    /// A fresh frame with no locals.
    pub fn new(self_value: Value) -> Self {
        Self {
            self_value,
            locals: IndexMap::new(),
        }
    }

    /// The receiver for this frame.
    pub fn self_value(&self) -> &Value {
        &self.self_value
    }

    /// Look up a local.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }

    /// Bind or rebind a local.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.locals.insert(name.into(), value);
    }

    /// Local names in binding order.
    pub fn names(&self) -> Vec<&str> {
        self.locals.keys().map(String::as_str).collect()
    }
}

/// Explicit call-frame stack.
///
/// The bottom frame belongs to the top-level receiver and is never popped,
/// so there is always a current frame. Only the top frame is visible to
/// evaluation; locals never leak between frames.
///
/// # Example
///
/// ```
/// use quickbeam::{BindingStack, Value};
///
/// let mut stack = BindingStack::new(Value::Nil);
/// stack.set_local("x", Value::Nil);
///
/// stack.push_frame(Value::Nil).unwrap();
/// assert!(stack.get_local("x").is_none()); // no dynamic scoping
///
/// stack.pop_frame();
/// assert!(stack.get_local("x").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct BindingStack {
    /// Top-level frame
    root: Frame,

    /// Frames pushed above the top level (most recent at end)
    frames: Vec<Frame>,

    /// Maximum allowed depth, counting the top-level frame
    max_depth: usize,
}

impl BindingStack {
    /// Create a stack whose top-level frame has `top_self` as receiver.
    pub fn new(top_self: Value) -> Self {
        Self::with_max_depth(top_self, DEFAULT_MAX_DEPTH)
    }

    /// Create a stack with a custom depth limit.
    pub fn with_max_depth(top_self: Value, max_depth: usize) -> Self {
        Self {
            root: Frame::new(top_self),
            frames: Vec::new(),
            max_depth,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frame Management
    // ═══════════════════════════════════════════════════════════════════

    /// Push a frame for `self_value`.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` when the stack is already at its limit.
    pub fn push_frame(&mut self, self_value: Value) -> Result<(), EvalError> {
        if self.depth() >= self.max_depth {
            return Err(EvalError::StackOverflow {
                depth: self.depth(),
                max: self.max_depth,
            });
        }
        self.frames.push(Frame::new(self_value));
        Ok(())
    }

    /// Pop the current frame. Does nothing at the top level.
    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Number of frames, including the top-level frame.
    pub fn depth(&self) -> usize {
        self.frames.len() + 1
    }

    /// Configured depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Check if we're at the top level.
    pub fn is_top_level(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame visible to evaluation.
    pub fn current(&self) -> &Frame {
        self.frames.last().unwrap_or(&self.root)
    }

    /// Mutable access to the frame visible to evaluation.
    pub fn current_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().unwrap_or(&mut self.root)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Current-Frame Shortcuts
    // ═══════════════════════════════════════════════════════════════════

    /// The current receiver.
    pub fn self_value(&self) -> &Value {
        self.current().self_value()
    }

    /// Look up a local in the current frame only.
    pub fn get_local(&self, name: &str) -> Option<&Value> {
        self.current().get(name)
    }

    /// Bind a local in the current frame.
    pub fn set_local(&mut self, name: impl Into<String>, value: Value) {
        self.current_mut().set(name, value);
    }
}
