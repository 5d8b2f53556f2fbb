//! The interpreter: all state for one program run
//!
//! One [`Interpreter`] owns the class graph, the binding stack, the output
//! sink and the evaluation context. It is created at the start of a run,
//! threaded through every evaluation and dispatch call, and dropped at the
//! end. Nothing is global.

use crate::ast::Node;
use crate::classes::{ClassGraph, ClassId};
use crate::context::EvalContext;
use crate::environment::BindingStack;
use crate::error::EvalError;
use crate::eval::Evaluate;
use crate::frontend::Frontend;
use crate::output::OutputSink;
use crate::value::{Object, Primitive, Value};

/// Interpreter state for one run.
///
/// # Example
///
/// ```
/// use quickbeam::{Interpreter, Node, OutputSink};
///
/// let program = Node::from_json_str(
///     r#"["send", null, "puts", ["string-literal", "hello"]]"#,
/// ).unwrap();
///
/// let mut interp = Interpreter::with_output(OutputSink::buffer());
/// interp.run(&program).unwrap();
/// assert_eq!(interp.output().captured(), Some("hello\n"));
/// ```
#[derive(Debug)]
pub struct Interpreter {
    classes: ClassGraph,
    bindings: BindingStack,
    output: OutputSink,
    ctx: EvalContext,
    main: Value,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter writing to stdout with default settings.
    pub fn new() -> Self {
        Self::with_context(EvalContext::default(), OutputSink::stdout())
    }

    /// An interpreter writing to `output` with default settings.
    pub fn with_output(output: OutputSink) -> Self {
        Self::with_context(EvalContext::default(), output)
    }

    /// An interpreter with explicit configuration.
    pub fn with_context(ctx: EvalContext, output: OutputSink) -> Self {
        let classes = ClassGraph::bootstrap();
        let main = Value::object(Object::new(classes.root()));
        let bindings = BindingStack::with_max_depth(main.clone(), ctx.max_call_depth);
        Self {
            classes,
            bindings,
            output,
            ctx,
            main,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Running Programs
    // ═══════════════════════════════════════════════════════════════════

    /// Evaluate a whole program at the top level.
    ///
    /// The first error aborts the run; output written before it stays.
    pub fn run(&mut self, program: &Node) -> Result<Value, EvalError> {
        match program.eval(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::debug!(error = %err, "run aborted");
                Err(err)
            }
        }
    }

    /// Parse `source` with `frontend`, then run it.
    pub fn run_source(&mut self, frontend: &dyn Frontend, source: &str) -> crate::Result<Value> {
        let program = frontend.parse(source)?;
        Ok(self.run(&program)?)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    /// The class graph.
    pub fn classes(&self) -> &ClassGraph {
        &self.classes
    }

    /// Mutable access to the class graph.
    pub fn classes_mut(&mut self) -> &mut ClassGraph {
        &mut self.classes
    }

    /// The binding stack.
    pub fn bindings(&self) -> &BindingStack {
        &self.bindings
    }

    /// Mutable access to the binding stack.
    pub fn bindings_mut(&mut self) -> &mut BindingStack {
        &mut self.bindings
    }

    /// The output sink.
    pub fn output(&self) -> &OutputSink {
        &self.output
    }

    /// Mutable access to the output sink.
    pub fn output_mut(&mut self) -> &mut OutputSink {
        &mut self.output
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// The top-level receiver.
    pub fn main_object(&self) -> &Value {
        &self.main
    }

    /// Look up a constant in the root namespace.
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.classes.get(self.classes.root()).constant(name)
    }

    /// Append text to the output sink.
    pub fn write_output(&mut self, text: &str) -> Result<(), EvalError> {
        Ok(self.output.write_str(text)?)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Allocation
    // ═══════════════════════════════════════════════════════════════════

    /// A new `String` object.
    pub fn new_string(&self, s: impl Into<String>) -> Value {
        Value::object(Object::with_payload(
            self.classes.string_class(),
            Primitive::String(s.into()),
        ))
    }

    /// A new `Integer` object.
    pub fn new_integer(&self, n: i64) -> Value {
        Value::object(Object::with_payload(
            self.classes.integer_class(),
            Primitive::Integer(n),
        ))
    }

    /// A new `Array` object.
    pub fn new_array(&self, items: Vec<Value>) -> Value {
        Value::object(Object::with_payload(
            self.classes.array_class(),
            Primitive::Array(items),
        ))
    }

    /// A new, uninitialized instance of `class`.
    ///
    /// Subclasses of the primitive classes get an empty payload of the
    /// matching kind.
    pub fn allocate(&self, class: ClassId) -> Value {
        let classes = &self.classes;
        let payload = if classes.is_subclass_of(class, classes.string_class()) {
            Some(Primitive::String(String::new()))
        } else if classes.is_subclass_of(class, classes.integer_class()) {
            Some(Primitive::Integer(0))
        } else if classes.is_subclass_of(class, classes.array_class()) {
            Some(Primitive::Array(Vec::new()))
        } else {
            None
        };

        match payload {
            Some(payload) => Value::object(Object::with_payload(class, payload)),
            None => Value::object(Object::new(class)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Instance Variables
    // ═══════════════════════════════════════════════════════════════════

    /// Read an instance variable of `target`; unset reads as `nil`.
    pub fn ivar_get(&self, target: &Value, name: &str) -> Value {
        match target {
            Value::Object(obj) => obj.ivar(name),
            Value::Class(id) => self.classes.get(*id).ivar(name),
            Value::Nil => Value::Nil,
        }
    }

    /// Write an instance variable of `target`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` when `target` is `nil`, which has no storage.
    pub fn ivar_set(
        &mut self,
        target: &Value,
        name: &str,
        value: Value,
    ) -> Result<(), EvalError> {
        match target {
            Value::Object(obj) => obj.set_ivar(name, value),
            Value::Class(id) => self.classes.set_ivar(*id, name, value),
            Value::Nil => {
                return Err(EvalError::TypeError {
                    expected: "an object with instance variables".to_string(),
                    got: "nil".to_string(),
                })
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Conversions
    // ═══════════════════════════════════════════════════════════════════

    /// The class a value denotes.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` when `value` is not a class.
    pub fn expect_class(&self, value: &Value) -> Result<ClassId, EvalError> {
        value.as_class().ok_or_else(|| EvalError::TypeError {
            expected: "a class".to_string(),
            got: self.classes.describe(value),
        })
    }

    /// Program-visible string form of `value`.
    ///
    /// Primitive payloads render directly and `nil` renders empty; any
    /// other value is asked for `to_s`, so user classes can override it.
    pub fn render(&mut self, value: &Value) -> Result<String, EvalError> {
        match value {
            Value::Nil => Ok(String::new()),
            Value::Object(obj) => match obj.payload() {
                Some(Primitive::String(s)) => Ok(s.clone()),
                Some(Primitive::Integer(n)) => Ok(n.to_string()),
                Some(Primitive::Array(items)) => {
                    let parts = items
                        .iter()
                        .map(|item| self.render(item))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(format!("[{}]", parts.join(", ")))
                }
                None => self.render_via_to_s(value),
            },
            Value::Class(_) => self.render_via_to_s(value),
        }
    }

    fn render_via_to_s(&mut self, value: &Value) -> Result<String, EvalError> {
        let rendered = self.send(value.clone(), "to_s", Vec::new())?;
        match rendered.as_str() {
            Some(s) => Ok(s.to_string()),
            None => Err(EvalError::TypeError {
                expected: "`to_s' to return a String".to_string(),
                got: self.classes.describe(&rendered),
            }),
        }
    }
}
