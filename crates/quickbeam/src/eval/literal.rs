//! Interpolated string evaluation

use crate::ast::Node;
use crate::{EvalError, Interpreter, Value};

use super::Evaluate;

/// Evaluate each part in order and concatenate their rendered forms.
pub fn eval_interpolated(parts: &[Node], interp: &mut Interpreter) -> Result<Value, EvalError> {
    let mut text = String::new();
    for part in parts {
        let value = part.eval(interp)?;
        text.push_str(&interp.render(&value)?);
    }
    Ok(interp.new_string(text))
}
