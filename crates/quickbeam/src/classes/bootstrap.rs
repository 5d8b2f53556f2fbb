//! Construction of the foundational classes and their native methods

use std::rc::Rc;

use super::{natives, ClassGraph, ClassId, ClassRecord};
use crate::value::{Arity, Value};

impl ClassGraph {
    /// Build the graph every run starts from.
    ///
    /// `Class` is its own class and inherits from `Object`; `Object` is an
    /// instance of `Class` with no superclass. `String`, `Integer` and
    /// `Array` are subclasses of `Object`. All five are constants of `Object`.
    pub fn bootstrap() -> Self {
        let metaclass = ClassId(0);
        let root = ClassId(1);

        let mut graph = Self {
            classes: Vec::new(),
            metaclass,
            root,
            string: root,
            integer: root,
            array: root,
        };

        // The metaclass's own class is its own index; its superclass is
        // patched in once the root exists.
        graph.alloc(ClassRecord::new("Class", metaclass, None));
        graph.alloc(ClassRecord::new("Object", metaclass, None));
        graph.get_mut(metaclass).superclass = Some(root);
        graph.set_constant(root, "Class", Value::Class(metaclass));
        graph.set_constant(root, "Object", Value::Class(root));

        graph.string = graph.builtin_class("String");
        graph.integer = graph.builtin_class("Integer");
        graph.array = graph.builtin_class("Array");

        graph.load_natives();
        graph
    }

    fn builtin_class(&mut self, name: &str) -> ClassId {
        let id = self.alloc(ClassRecord::new(name, self.metaclass, Some(self.root)));
        self.set_constant(self.root, name, Value::Class(id));
        id
    }

    fn load_natives(&mut self) {
        let root = self.root;
        self.define_native(root, "puts", Arity::at_least(0), Rc::new(natives::object_puts));
        self.define_native(root, "print", Arity::at_least(0), Rc::new(natives::object_print));
        self.define_native(root, "to_s", Arity::exact(0), Rc::new(natives::object_to_s));
        self.define_native(root, "class", Arity::exact(0), Rc::new(natives::object_class));
        self.define_native(root, "initialize", Arity::exact(0), Rc::new(natives::object_initialize));

        let meta = self.metaclass;
        self.define_native(meta, "new", Arity::at_least(0), Rc::new(natives::class_new));
        self.define_native(meta, "name", Arity::exact(0), Rc::new(natives::class_name));
        self.define_native(meta, "to_s", Arity::exact(0), Rc::new(natives::class_name));
        self.define_native(meta, "superclass", Arity::exact(0), Rc::new(natives::class_superclass));

        let string = self.string;
        self.define_native(string, "+", Arity::exact(1), Rc::new(natives::string_concat));
        self.define_native(string, "to_s", Arity::exact(0), Rc::new(natives::identity));
        self.define_native(string, "length", Arity::exact(0), Rc::new(natives::string_length));

        let integer = self.integer;
        self.define_native(integer, "+", Arity::exact(1), Rc::new(natives::integer_add));
        self.define_native(integer, "-", Arity::exact(1), Rc::new(natives::integer_sub));
        self.define_native(integer, "*", Arity::exact(1), Rc::new(natives::integer_mul));
        self.define_native(integer, "to_s", Arity::exact(0), Rc::new(natives::integer_to_s));

        let array = self.array;
        self.define_native(array, "size", Arity::exact(0), Rc::new(natives::array_size));
        self.define_native(array, "[]", Arity::exact(1), Rc::new(natives::array_index));
    }
}
