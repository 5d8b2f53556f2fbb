//! # Quickbeam
//!
//! A tree-walking evaluator for a small dynamically-typed, single-inheritance
//! object language.
//!
//! Quickbeam takes a pre-parsed program tree, builds the object and class
//! model in memory, and executes the tree. The only observable effect is
//! text written to an [`OutputSink`] by the printing natives.
//!
//! ## Architecture
//!
//! - **Values**: `nil`, heap objects (optionally primitive-backed) and class references
//! - **Class graph**: an arena of classes rooted at `Object`, with the
//!   self-describing metaclass `Class`
//! - **Binding stack**: one frame per class body or method call
//! - **Dispatch**: per-class method tables searched up the superclass chain
//! - **Evaluator**: a recursive walk over [`Node`]
//!
//! ## Example
//!
//! ```
//! use quickbeam::{Interpreter, JsonFrontend, OutputSink};
//!
//! let source = r#"
//!   ["sequence",
//!     ["local-assign", "n", ["send", ["integer-literal", 1], "+", ["integer-literal", 2]]],
//!     ["send", null, "puts", ["interpolated-string", ["string-literal", "n = "], ["local-read", "n"]]]]
//! "#;
//!
//! let mut interp = Interpreter::with_output(OutputSink::buffer());
//! interp.run_source(&JsonFrontend::new(), source).unwrap();
//! assert_eq!(interp.output().captured(), Some("n = 3\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod classes;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod frontend;
pub mod interpreter;
pub mod output;
pub mod stack;
pub mod value;

// Re-export main types
pub use ast::{ConstRef, Node, Param, ParamSpec};
pub use classes::{ClassGraph, ClassId, ClassRecord};
pub use context::EvalContext;
pub use environment::{BindingStack, Frame, FrameGuard};
pub use error::{AstError, EvalError, QuickbeamError, Result};
pub use eval::{eval_node, Evaluate};
pub use frontend::{Frontend, JsonFrontend};
pub use interpreter::Interpreter;
pub use output::OutputSink;
pub use value::{Arity, Method, NativeFn, NativeFnPtr, Object, Primitive, Value};

/// Quickbeam version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
