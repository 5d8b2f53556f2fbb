//! Value representation for runtime values

mod display;
mod method;
mod object;

pub use method::{Arity, Method, NativeFn, NativeFnPtr};
pub use object::{Object, Primitive};

use std::rc::Rc;

use crate::classes::ClassId;

/// A runtime value.
///
/// Ordinary and primitive-backed objects share one heap representation;
/// classes live in the [`ClassGraph`](crate::classes::ClassGraph) arena and
/// are referred to by id.
#[derive(Clone, Default)]
pub enum Value {
    /// The classless `nil` sentinel
    #[default]
    Nil,

    /// A heap object, possibly carrying a primitive payload
    Object(Rc<Object>),

    /// A class object
    Class(ClassId),
}

impl Value {
    /// Wrap a freshly allocated object.
    pub fn object(object: Object) -> Self {
        Value::Object(Rc::new(object))
    }

    /// Check if value is `nil`
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// The underlying object, if this is one.
    pub fn as_object(&self) -> Option<&Rc<Object>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The class id, if this value is a class.
    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            Value::Class(id) => Some(*id),
            _ => None,
        }
    }

    /// The primitive payload, if any.
    pub fn payload(&self) -> Option<&Primitive> {
        self.as_object().and_then(|obj| obj.payload())
    }

    /// Borrow a string payload.
    pub fn as_str(&self) -> Option<&str> {
        match self.payload() {
            Some(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Read an integer payload.
    pub fn as_integer(&self) -> Option<i64> {
        match self.payload() {
            Some(Primitive::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Borrow an array payload.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self.payload() {
            Some(Primitive::Array(items)) => Some(items),
            _ => None,
        }
    }

    /// Identity comparison: same allocation, or same class.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}
