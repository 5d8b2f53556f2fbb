//! Node evaluation

pub mod class_def;
pub mod constant;
pub mod literal;
pub mod method_def;
pub mod send;
pub mod sequence;
pub mod variable;

use crate::ast::Node;
use crate::stack::ensure_sufficient_stack;
use crate::{EvalError, Interpreter, Value};

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter. The
/// interpreter carries every piece of run state, so it is the only
/// argument.
pub trait Evaluate {
    /// Evaluate this AST node against the interpreter's current frame.
    fn eval(&self, interp: &mut Interpreter) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Node Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Node {
    fn eval(&self, interp: &mut Interpreter) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| eval_dispatch(self, interp))
    }
}

fn eval_dispatch(node: &Node, interp: &mut Interpreter) -> Result<Value, EvalError> {
    if interp.context().trace {
        tracing::trace!(
            kind = node.kind_name(),
            depth = interp.bindings().depth(),
            "eval"
        );
    }

    match node {
        Node::Sequence(statements) => sequence::eval_sequence(statements, interp),

        Node::ClassDef {
            target,
            superclass,
            body,
        } => class_def::eval_class_def(target, superclass.as_deref(), body, interp),
        Node::MethodDef { name, params, body } => {
            method_def::eval_method_def(name, params, body, interp)
        }

        Node::LocalAssign { name, value } => variable::eval_local_assign(name, value, interp),
        Node::LocalRead(name) => Ok(variable::eval_local_read(name, interp)),
        Node::IvarAssign { name, value } => variable::eval_ivar_assign(name, value, interp),
        Node::IvarRead(name) => Ok(variable::eval_ivar_read(name, interp)),

        Node::Send {
            receiver,
            method,
            args,
        } => send::eval_send(receiver.as_deref(), method, args, interp),

        Node::ConstRef(cref) => constant::eval_const_ref(cref, interp),

        Node::StringLit(s) => Ok(interp.new_string(s.as_str())),
        Node::IntegerLit(n) => Ok(interp.new_integer(*n)),
        Node::Interpolated(parts) => literal::eval_interpolated(parts, interp),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate a node (convenience wrapper).
pub fn eval_node(node: &Node, interp: &mut Interpreter) -> Result<Value, EvalError> {
    node.eval(interp)
}
