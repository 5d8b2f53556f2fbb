//! Constant resolution

use crate::ast::{ConstRef, Node};
use crate::classes::ClassId;
use crate::{EvalError, Interpreter, Value};

use super::Evaluate;

/// Resolve `Name` against the root namespace, or `Scope::Name` against
/// whatever class `Scope` evaluates to.
///
/// # Errors
///
/// Returns `UnresolvedConstant` when the name (or any qualifying
/// namespace) is unbound, and `TypeError` when a qualifier is not a class.
pub fn eval_const_ref(cref: &ConstRef, interp: &mut Interpreter) -> Result<Value, EvalError> {
    let namespace = resolve_namespace(cref.scope.as_deref(), interp)?;
    let record = interp.classes().get(namespace);
    record
        .constant(&cref.name)
        .cloned()
        .ok_or_else(|| EvalError::UnresolvedConstant {
            name: cref.name.clone(),
            namespace: record.name.clone(),
        })
}

/// The class a qualifier denotes; no qualifier means the root class.
pub fn resolve_namespace(
    scope: Option<&Node>,
    interp: &mut Interpreter,
) -> Result<ClassId, EvalError> {
    match scope {
        None => Ok(interp.classes().root()),
        Some(node) => {
            let value = node.eval(interp)?;
            interp.expect_class(&value)
        }
    }
}
