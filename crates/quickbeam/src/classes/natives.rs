//! Native method implementations
//!
//! Each handler runs with the call's frame already pushed; `this` is the
//! receiver and `args` have already passed the arity check.

use crate::error::EvalError;
use crate::value::{Arity, Value};
use crate::Interpreter;

type NativeResult = Result<Value, EvalError>;

// ═══════════════════════════════════════════════════════════════════════
// Object
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn object_puts(interp: &mut Interpreter, _this: &Value, args: &[Value]) -> NativeResult {
    if args.is_empty() {
        interp.write_output("\n")?;
        return Ok(Value::Nil);
    }
    for arg in args {
        let mut line = interp.render(arg)?;
        if !line.ends_with('\n') {
            line.push('\n');
        }
        interp.write_output(&line)?;
    }
    Ok(Value::Nil)
}

pub(super) fn object_print(interp: &mut Interpreter, _this: &Value, args: &[Value]) -> NativeResult {
    for arg in args {
        let text = interp.render(arg)?;
        interp.write_output(&text)?;
    }
    Ok(Value::Nil)
}

pub(super) fn object_to_s(interp: &mut Interpreter, this: &Value, _args: &[Value]) -> NativeResult {
    let class = class_of(interp, this)?;
    let text = format!("#<{}>", interp.classes().get(class).name);
    Ok(interp.new_string(text))
}

pub(super) fn object_class(interp: &mut Interpreter, this: &Value, _args: &[Value]) -> NativeResult {
    class_of(interp, this).map(Value::Class)
}

pub(super) fn object_initialize(_interp: &mut Interpreter, _this: &Value, _args: &[Value]) -> NativeResult {
    Ok(Value::Nil)
}

pub(super) fn identity(_interp: &mut Interpreter, this: &Value, _args: &[Value]) -> NativeResult {
    Ok(this.clone())
}

// ═══════════════════════════════════════════════════════════════════════
// Class
// ═══════════════════════════════════════════════════════════════════════

/// Allocate an instance, run `initialize` on it, and return the instance.
pub(super) fn class_new(interp: &mut Interpreter, this: &Value, args: &[Value]) -> NativeResult {
    let class = interp.expect_class(this)?;
    if class == interp.classes().metaclass() {
        return Err(EvalError::TypeError {
            expected: "an instantiable class".to_string(),
            got: "Class".to_string(),
        });
    }

    let object = interp.allocate(class);
    // The initializer's own result is discarded.
    interp.send(object.clone(), "initialize", args.to_vec())?;
    Ok(object)
}

pub(super) fn class_name(interp: &mut Interpreter, this: &Value, _args: &[Value]) -> NativeResult {
    let class = interp.expect_class(this)?;
    let name = interp.classes().get(class).name.clone();
    Ok(interp.new_string(name))
}

pub(super) fn class_superclass(interp: &mut Interpreter, this: &Value, _args: &[Value]) -> NativeResult {
    let class = interp.expect_class(this)?;
    Ok(interp
        .classes()
        .get(class)
        .superclass
        .map_or(Value::Nil, Value::Class))
}

// ═══════════════════════════════════════════════════════════════════════
// String
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn string_concat(interp: &mut Interpreter, this: &Value, args: &[Value]) -> NativeResult {
    let lhs = string_operand(interp, this)?;
    let rhs = string_operand(interp, one_arg("+", args)?)?;
    Ok(interp.new_string(format!("{}{}", lhs, rhs)))
}

pub(super) fn string_length(interp: &mut Interpreter, this: &Value, _args: &[Value]) -> NativeResult {
    let len = string_operand(interp, this)?.chars().count();
    let len = i64::try_from(len).map_err(|_| EvalError::IntegerOverflow {
        op: "length".to_string(),
    })?;
    Ok(interp.new_integer(len))
}

fn string_operand<'a>(interp: &Interpreter, value: &'a Value) -> Result<&'a str, EvalError> {
    value.as_str().ok_or_else(|| EvalError::TypeError {
        expected: "String".to_string(),
        got: interp.classes().describe(value),
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Integer
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn integer_add(interp: &mut Interpreter, this: &Value, args: &[Value]) -> NativeResult {
    integer_op(interp, this, args, "+", i64::checked_add)
}

pub(super) fn integer_sub(interp: &mut Interpreter, this: &Value, args: &[Value]) -> NativeResult {
    integer_op(interp, this, args, "-", i64::checked_sub)
}

pub(super) fn integer_mul(interp: &mut Interpreter, this: &Value, args: &[Value]) -> NativeResult {
    integer_op(interp, this, args, "*", i64::checked_mul)
}

pub(super) fn integer_to_s(interp: &mut Interpreter, this: &Value, _args: &[Value]) -> NativeResult {
    let n = integer_operand(interp, this)?;
    Ok(interp.new_string(n.to_string()))
}

fn integer_op(
    interp: &mut Interpreter,
    this: &Value,
    args: &[Value],
    op: &str,
    apply: fn(i64, i64) -> Option<i64>,
) -> NativeResult {
    let lhs = integer_operand(interp, this)?;
    let rhs = integer_operand(interp, one_arg(op, args)?)?;
    apply(lhs, rhs)
        .map(|n| interp.new_integer(n))
        .ok_or_else(|| EvalError::IntegerOverflow { op: op.to_string() })
}

fn integer_operand(interp: &Interpreter, value: &Value) -> Result<i64, EvalError> {
    value.as_integer().ok_or_else(|| EvalError::TypeError {
        expected: "Integer".to_string(),
        got: interp.classes().describe(value),
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Array
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn array_size(interp: &mut Interpreter, this: &Value, _args: &[Value]) -> NativeResult {
    let len = array_operand(interp, this)?.len();
    let len = i64::try_from(len).map_err(|_| EvalError::IntegerOverflow {
        op: "size".to_string(),
    })?;
    Ok(interp.new_integer(len))
}

/// `array[i]`; negative indices count from the end, misses yield `nil`.
pub(super) fn array_index(interp: &mut Interpreter, this: &Value, args: &[Value]) -> NativeResult {
    let items = array_operand(interp, this)?;
    let index = integer_operand(interp, one_arg("[]", args)?)?;
    let len = items.len() as i64;
    let index = if index < 0 { len + index } else { index };
    Ok(usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .unwrap_or(Value::Nil))
}

fn array_operand<'a>(interp: &Interpreter, value: &'a Value) -> Result<&'a [Value], EvalError> {
    value.as_array().ok_or_else(|| EvalError::TypeError {
        expected: "Array".to_string(),
        got: interp.classes().describe(value),
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════

fn one_arg<'a>(method: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EvalError::ArityMismatch {
            method: method.to_string(),
            expected: Arity::exact(1),
            got: args.len(),
        }),
    }
}

fn class_of(interp: &Interpreter, value: &Value) -> Result<crate::classes::ClassId, EvalError> {
    interp
        .classes()
        .class_of(value)
        .ok_or_else(|| EvalError::TypeError {
            expected: "an object".to_string(),
            got: "nil".to_string(),
        })
}
