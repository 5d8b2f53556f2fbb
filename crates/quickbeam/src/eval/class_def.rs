//! Class definition evaluation

use crate::ast::{ConstRef, Node};
use crate::{EvalError, Interpreter, Value};

use super::constant::resolve_namespace;
use super::Evaluate;

/// Open (or reopen) a class and evaluate its body with the class as self.
///
/// # Errors
///
/// Returns `UnresolvedConstant` if a qualifying namespace is missing and
/// `TypeError` if the superclass expression is not a class.
pub fn eval_class_def(
    target: &ConstRef,
    superclass: Option<&Node>,
    body: &Node,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    let namespace = resolve_namespace(target.scope.as_deref(), interp)?;

    let superclass = match superclass {
        Some(node) => {
            let value = node.eval(interp)?;
            Some(interp.expect_class(&value)?)
        }
        None => None,
    };

    let class = interp
        .classes_mut()
        .open_class(namespace, &target.name, superclass)?;

    let mut frame = interp.enter_frame(Value::Class(class))?;
    body.eval(&mut *frame)
}
