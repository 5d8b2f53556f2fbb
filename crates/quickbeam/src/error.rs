//! Error types for Quickbeam decoding and evaluation

use thiserror::Error;

use crate::value::Arity;

/// Errors raised while evaluating a program.
///
/// Every variant is fatal to the current run: there is no in-language
/// rescue, so the first error aborts evaluation and is handed back to the
/// caller. Output already written to the sink stays written.
#[derive(Error, Debug)]
pub enum EvalError {
    /// A constant lookup missed in its namespace.
    #[error("uninitialized constant {namespace}::{name}")]
    UnresolvedConstant {
        /// The bare name that was looked up
        name: String,
        /// Name of the namespace class that was searched
        namespace: String,
    },

    /// Method lookup exhausted the superclass chain.
    #[error("undefined method `{method}' for {receiver}")]
    NoMethodError {
        /// The selector that was sent
        method: String,
        /// Human-readable description of the receiver
        receiver: String,
    },

    /// Argument count disagrees with the method's parameter spec.
    #[error("wrong number of arguments for `{method}' (given {got}, expected {expected})")]
    ArityMismatch {
        /// The method being invoked
        method: String,
        /// What the parameter spec accepts
        expected: Arity,
        /// How many arguments were supplied
        got: usize,
    },

    /// A value had the wrong shape for the operation.
    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        /// What the operation needed
        expected: String,
        /// What it received
        got: String,
    },

    /// Host integer arithmetic overflowed.
    #[error("integer overflow in `{op}'")]
    IntegerOverflow {
        /// The operator that overflowed
        op: String,
    },

    /// The binding stack grew past the configured limit.
    #[error("stack level too deep (depth {depth}, max {max})")]
    StackOverflow {
        /// Depth at the time of the failed push
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// The output sink failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors raised while turning the tagged-array encoding into a [`Node`](crate::ast::Node).
#[derive(Error, Debug)]
pub enum AstError {
    /// The node tag is not one the evaluator supports.
    #[error("unhandled node kind `{kind}`")]
    UnhandledNodeKind {
        /// The offending tag
        kind: String,
    },

    /// A node had the wrong children.
    #[error("malformed `{kind}` node: {message}")]
    Malformed {
        /// Tag of the node being decoded
        kind: String,
        /// What was wrong with it
        message: String,
    },

    /// The input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AstError {
    pub(crate) fn malformed(kind: &str, message: impl Into<String>) -> Self {
        AstError::Malformed {
            kind: kind.to_string(),
            message: message.into(),
        }
    }
}

/// Top-level error for a complete run: decode, then evaluate.
#[derive(Error, Debug)]
pub enum QuickbeamError {
    /// The program could not be decoded.
    #[error(transparent)]
    Ast(#[from] AstError),

    /// The program failed while running.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Result type alias for Quickbeam operations
pub type Result<T> = std::result::Result<T, QuickbeamError>;
