//! Heap objects and their primitive payloads

use std::cell::RefCell;

use indexmap::IndexMap;

use super::Value;
use crate::classes::ClassId;

/// Host data carried by a primitive-backed object.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// `String` payload
    String(String),
    /// `Integer` payload
    Integer(i64),
    /// `Array` payload
    Array(Vec<Value>),
}

/// An instance: its class, its instance variables, and an optional payload.
///
/// Instance variables are interior-mutable so every holder of the same
/// allocation observes writes; the payload never changes after allocation.
#[derive(Debug)]
pub struct Object {
    class: ClassId,
    ivars: RefCell<IndexMap<String, Value>>,
    payload: Option<Primitive>,
}

impl Object {
    /// A plain object of `class`.
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            ivars: RefCell::new(IndexMap::new()),
            payload: None,
        }
    }

    /// A primitive-backed object of `class`.
    pub fn with_payload(class: ClassId, payload: Primitive) -> Self {
        Self {
            class,
            ivars: RefCell::new(IndexMap::new()),
            payload: Some(payload),
        }
    }

    /// The object's class.
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// The primitive payload, if any.
    pub fn payload(&self) -> Option<&Primitive> {
        self.payload.as_ref()
    }

    /// Read an instance variable; unset reads as `nil`.
    pub fn ivar(&self, name: &str) -> Value {
        self.ivars.borrow().get(name).cloned().unwrap_or(Value::Nil)
    }

    /// Write an instance variable.
    pub fn set_ivar(&self, name: impl Into<String>, value: Value) {
        self.ivars.borrow_mut().insert(name.into(), value);
    }

    /// Names of the instance variables set so far, in assignment order.
    pub fn ivar_names(&self) -> Vec<String> {
        self.ivars.borrow().keys().cloned().collect()
    }
}
