//! Debug formatting for values
//!
//! This is for diagnostics only. Program-visible string conversion goes
//! through [`Interpreter::render`](crate::Interpreter::render), which can
//! dispatch to user-defined `to_s`.

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Class(id) => write!(f, "#<class {}>", id.index()),
            Value::Object(obj) => match obj.payload() {
                Some(payload) => write!(f, "{}", payload),
                None => write!(f, "#<object of class {}>", obj.class().index()),
            },
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::String(s) => write!(f, "{:?}", s),
            Primitive::Integer(n) => write!(f, "{}", n),
            Primitive::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
