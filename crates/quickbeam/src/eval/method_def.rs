//! Method definition evaluation

use std::rc::Rc;

use crate::ast::{Node, ParamSpec};
use crate::value::Method;
use crate::{EvalError, Interpreter, Value};

/// Register an interpreted method on the current self's method table.
///
/// Inside a class body self is the class itself; anywhere else the method
/// lands on self's class. Returns the method name.
pub fn eval_method_def(
    name: &str,
    params: &ParamSpec,
    body: &Rc<Node>,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    let self_value = interp.bindings().self_value();
    let target = match self_value {
        Value::Class(id) => *id,
        other => interp
            .classes()
            .class_of(other)
            .ok_or_else(|| EvalError::TypeError {
                expected: "a receiver that can hold methods".to_string(),
                got: "nil".to_string(),
            })?,
    };

    let method = Method::Interpreted {
        params: params.clone(),
        body: Rc::clone(body),
    };
    interp.classes_mut().define_method(target, name, method);
    Ok(interp.new_string(name))
}
