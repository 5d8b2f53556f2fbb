//! Method definitions: interpreted bodies and native handlers

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::ast::{Node, ParamSpec};
use crate::{EvalError, Interpreter};

/// Type alias for native method handlers.
///
/// A handler receives the interpreter (with the call's frame already
/// pushed), the receiver, and the positional arguments.
pub type NativeFnPtr = Rc<dyn Fn(&mut Interpreter, &Value, &[Value]) -> Result<Value, EvalError>>;

/// How many positional arguments a method accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Arguments that must be present
    pub required: usize,
    /// Whether any number of extra arguments is accepted
    pub rest: bool,
}

impl Arity {
    /// Exactly `n` arguments.
    pub const fn exact(n: usize) -> Self {
        Self {
            required: n,
            rest: false,
        }
    }

    /// `n` or more arguments.
    pub const fn at_least(n: usize) -> Self {
        Self {
            required: n,
            rest: true,
        }
    }

    /// Whether `count` arguments satisfy this arity.
    pub fn accepts(&self, count: usize) -> bool {
        if self.rest {
            count >= self.required
        } else {
            count == self.required
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rest {
            write!(f, "{}+", self.required)
        } else {
            write!(f, "{}", self.required)
        }
    }
}

/// A method implemented by the host.
#[derive(Clone)]
pub struct NativeFn {
    /// Method name (for display/debugging)
    pub name: String,

    /// Accepted argument count
    pub arity: Arity,

    /// The handler
    pub func: NativeFnPtr,
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({}/{})", self.name, self.arity)
    }
}

/// An entry in a class's method table.
#[derive(Debug, Clone)]
pub enum Method {
    /// A method whose body is evaluated by the interpreter.
    Interpreted {
        /// Positional parameters
        params: ParamSpec,
        /// Body, shared with the defining AST
        body: Rc<Node>,
    },

    /// A method implemented by the host.
    Native(NativeFn),
}

impl Method {
    /// How many arguments the method accepts.
    pub fn arity(&self) -> Arity {
        match self {
            Method::Interpreted { params, .. } => params.arity(),
            Method::Native(native) => native.arity,
        }
    }

    /// Whether this is a host-implemented method.
    pub fn is_native(&self) -> bool {
        matches!(self, Method::Native(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::exact(2).accepts(2));
        assert!(!Arity::exact(2).accepts(3));
        assert!(Arity::at_least(1).accepts(1));
        assert!(Arity::at_least(1).accepts(9));
        assert!(!Arity::at_least(1).accepts(0));
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::exact(0).to_string(), "0");
        assert_eq!(Arity::at_least(2).to_string(), "2+");
    }

    #[test]
    fn test_interpreted_arity_follows_params() {
        let method = Method::Interpreted {
            params: ParamSpec::fixed(["a", "b"]),
            body: Rc::new(Node::Sequence(vec![])),
        };
        assert_eq!(method.arity(), Arity::exact(2));
        assert!(!method.is_native());
    }
}
