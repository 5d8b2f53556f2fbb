//! Class graph: an arena of class records addressed by [`ClassId`]
//!
//! The metaclass is its own class, so the graph is cyclic by construction.
//! Records refer to each other by index rather than by ownership, and the
//! self-reference is simply a record whose `class` equals its own id.

mod bootstrap;
mod natives;

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::EvalError;
use crate::value::{Arity, Method, NativeFn, NativeFnPtr, Value};

/// Stable index of a class record in the [`ClassGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl ClassId {
    /// Build an id from a raw arena index.
    pub(crate) const fn from_index(index: usize) -> Self {
        ClassId(index)
    }

    /// The raw arena index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A class object: name, links, method and constant tables, and its own ivars.
#[derive(Debug, Clone)]
pub struct ClassRecord {
    /// Display name; nested classes carry their qualified name
    pub name: String,

    /// The class of this class object
    pub class: ClassId,

    /// Superclass link; only the root class has none
    pub superclass: Option<ClassId>,

    methods: HashMap<String, Method>,
    constants: IndexMap<String, Value>,
    ivars: IndexMap<String, Value>,
}

impl ClassRecord {
    fn new(name: impl Into<String>, class: ClassId, superclass: Option<ClassId>) -> Self {
        Self {
            name: name.into(),
            class,
            superclass,
            methods: HashMap::new(),
            constants: IndexMap::new(),
            ivars: IndexMap::new(),
        }
    }

    /// Look up a method defined directly on this class.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Names of methods defined directly on this class, sorted.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a constant in this namespace.
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// Names of constants in this namespace, in definition order.
    pub fn constant_names(&self) -> impl Iterator<Item = &str> {
        self.constants.keys().map(String::as_str)
    }

    /// Read a class-level instance variable; unset reads as `nil`.
    pub fn ivar(&self, name: &str) -> Value {
        self.ivars.get(name).cloned().unwrap_or(Value::Nil)
    }
}

/// Every class in one interpreter run.
#[derive(Debug, Clone)]
pub struct ClassGraph {
    classes: Vec<ClassRecord>,
    metaclass: ClassId,
    root: ClassId,
    string: ClassId,
    integer: ClassId,
    array: ClassId,
}

impl ClassGraph {
    /// Get a class record.
    ///
    /// # Panics
    ///
    /// Panics if `id` was minted by a different graph and lies past the
    /// end of this one.
    pub fn get(&self, id: ClassId) -> &ClassRecord {
        &self.classes[id.0]
    }

    fn get_mut(&mut self, id: ClassId) -> &mut ClassRecord {
        &mut self.classes[id.0]
    }

    /// Number of classes allocated so far.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the graph holds no classes (never true after bootstrap).
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The metaclass `Class`, whose class is itself.
    pub fn metaclass(&self) -> ClassId {
        self.metaclass
    }

    /// The root class `Object`, which has no superclass.
    pub fn root(&self) -> ClassId {
        self.root
    }

    /// The string-backed class.
    pub fn string_class(&self) -> ClassId {
        self.string
    }

    /// The integer-backed class.
    pub fn integer_class(&self) -> ClassId {
        self.integer
    }

    /// The array-backed class.
    pub fn array_class(&self) -> ClassId {
        self.array
    }

    /// Class of a value; `nil` has none.
    pub fn class_of(&self, value: &Value) -> Option<ClassId> {
        match value {
            Value::Nil => None,
            Value::Object(obj) => Some(obj.class()),
            Value::Class(id) => Some(self.get(*id).class),
        }
    }

    /// `id` followed by each of its superclasses, ending at the root.
    pub fn ancestors(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        std::iter::successors(Some(id), move |current| self.get(*current).superclass)
    }

    /// Whether `id` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, id: ClassId, ancestor: ClassId) -> bool {
        self.ancestors(id).any(|c| c == ancestor)
    }

    /// Describe a value for error messages.
    pub fn describe(&self, value: &Value) -> String {
        match value {
            Value::Nil => "nil".to_string(),
            Value::Class(id) => format!("{}:Class", self.get(*id).name),
            Value::Object(obj) => format!("an instance of {}", self.get(obj.class()).name),
        }
    }

    fn alloc(&mut self, record: ClassRecord) -> ClassId {
        let id = ClassId(self.classes.len());
        self.classes.push(record);
        id
    }

    /// Open `name` inside `namespace`, creating it on first sight.
    ///
    /// Reopening returns the existing class unchanged, whatever superclass
    /// is given; later method definitions merge into the same table.
    pub fn open_class(
        &mut self,
        namespace: ClassId,
        name: &str,
        superclass: Option<ClassId>,
    ) -> Result<ClassId, EvalError> {
        if let Some(existing) = self.get(namespace).constant(name) {
            return match existing {
                Value::Class(id) => {
                    tracing::debug!(class = %self.get(*id).name, "reopened class");
                    Ok(*id)
                }
                other => Err(EvalError::TypeError {
                    expected: format!("`{}` to name a class", name),
                    got: self.describe(other),
                }),
            };
        }

        let qualified = if namespace == self.root {
            name.to_string()
        } else {
            format!("{}::{}", self.get(namespace).name, name)
        };
        let superclass = superclass.unwrap_or(self.root);
        let id = self.alloc(ClassRecord::new(qualified, self.metaclass, Some(superclass)));
        self.set_constant(namespace, name, Value::Class(id));
        tracing::debug!(
            class = %self.get(id).name,
            superclass = %self.get(superclass).name,
            "defined class"
        );
        Ok(id)
    }

    /// Bind a constant in `namespace`.
    pub fn set_constant(&mut self, namespace: ClassId, name: impl Into<String>, value: Value) {
        self.get_mut(namespace).constants.insert(name.into(), value);
    }

    /// Write a class-level instance variable.
    pub fn set_ivar(&mut self, class: ClassId, name: impl Into<String>, value: Value) {
        self.get_mut(class).ivars.insert(name.into(), value);
    }

    /// Store `method` under `name`, replacing any previous definition.
    pub fn define_method(&mut self, class: ClassId, name: impl Into<String>, method: Method) {
        let name = name.into();
        tracing::debug!(class = %self.get(class).name, method = %name, "defined method");
        self.get_mut(class).methods.insert(name, method);
    }

    /// Register a host-implemented method.
    pub fn define_native(&mut self, class: ClassId, name: &str, arity: Arity, func: NativeFnPtr) {
        let native = NativeFn {
            name: name.to_string(),
            arity,
            func,
        };
        self.define_method(class, name, Method::Native(native));
    }

    /// Walk from `start` up the superclass chain to the first class defining `name`.
    pub fn lookup(&self, start: ClassId, name: &str) -> Option<(ClassId, &Method)> {
        self.ancestors(start)
            .find_map(|id| self.get(id).method(name).map(|method| (id, method)))
    }

    /// Resolve `name` for `receiver`, starting at the receiver's class.
    ///
    /// # Errors
    ///
    /// Returns `NoMethodError` when no class on the chain defines `name`,
    /// including every send to `nil`.
    pub fn find_method(&self, receiver: &Value, name: &str) -> Result<Method, EvalError> {
        self.class_of(receiver)
            .and_then(|class| self.lookup(class, name))
            .map(|(_, method)| method.clone())
            .ok_or_else(|| EvalError::NoMethodError {
                method: name.to_string(),
                receiver: self.describe(receiver),
            })
    }
}
