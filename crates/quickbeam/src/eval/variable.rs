//! Local and instance variable access

use crate::ast::Node;
use crate::{EvalError, Interpreter, Value};

use super::Evaluate;

/// `name = value` in the current frame.
pub fn eval_local_assign(
    name: &str,
    value: &Node,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    let value = value.eval(interp)?;
    interp.bindings_mut().set_local(name, value.clone());
    Ok(value)
}

/// Read a local from the current frame only; unbound names read as `nil`.
pub fn eval_local_read(name: &str, interp: &Interpreter) -> Value {
    interp
        .bindings()
        .get_local(name)
        .cloned()
        .unwrap_or(Value::Nil)
}

/// `@name = value` on the current self, without dispatch.
pub fn eval_ivar_assign(
    name: &str,
    value: &Node,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    let value = value.eval(interp)?;
    let target = interp.bindings().self_value().clone();
    interp.ivar_set(&target, name, value.clone())?;
    Ok(value)
}

/// `@name` on the current self; unset reads as `nil`.
pub fn eval_ivar_read(name: &str, interp: &Interpreter) -> Value {
    interp.ivar_get(interp.bindings().self_value(), name)
}
