//! Abstract syntax tree consumed by the evaluator
//!
//! The tree arrives pre-parsed. Each supported construct is one variant of
//! [`Node`]; tags the evaluator does not understand are rejected while
//! decoding, so evaluation itself never meets an unknown kind.

mod decode;

pub use decode::decode;

use std::rc::Rc;

use crate::error::AstError;
use crate::value::Arity;

/// One syntactic construct.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Statements evaluated in order; the last value wins.
    Sequence(Vec<Node>),

    /// `class Target < Superclass; body; end`
    ClassDef {
        /// The (possibly qualified) name being opened
        target: ConstRef,
        /// Explicit superclass expression, if any
        superclass: Option<Box<Node>>,
        /// Class body, evaluated with the class as self
        body: Box<Node>,
    },

    /// `def name(params); body; end`
    MethodDef {
        /// Method name
        name: String,
        /// Positional parameter spec
        params: ParamSpec,
        /// Method body, shared with every class table that stores it
        body: Rc<Node>,
    },

    /// `name = value`
    LocalAssign {
        /// Local variable name
        name: String,
        /// Value expression
        value: Box<Node>,
    },

    /// `@name = value`
    IvarAssign {
        /// Instance variable name, including its sigil
        name: String,
        /// Value expression
        value: Box<Node>,
    },

    /// `@name`
    IvarRead(String),

    /// `name`
    LocalRead(String),

    /// `receiver.method(args)`; a missing receiver means implicit self.
    Send {
        /// Receiver expression
        receiver: Option<Box<Node>>,
        /// Selector
        method: String,
        /// Argument expressions, evaluated left to right
        args: Vec<Node>,
    },

    /// `Name` or `Scope::Name`
    ConstRef(ConstRef),

    /// String literal
    StringLit(String),

    /// Integer literal
    IntegerLit(i64),

    /// `"a #{b} c"`; parts are concatenated after rendering.
    Interpolated(Vec<Node>),
}

impl Node {
    /// The tag this node carries on the wire.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Sequence(_) => "sequence",
            Node::ClassDef { .. } => "class-def",
            Node::MethodDef { .. } => "method-def",
            Node::LocalAssign { .. } => "local-assign",
            Node::IvarAssign { .. } => "ivar-assign",
            Node::IvarRead(_) => "ivar-read",
            Node::LocalRead(_) => "local-read",
            Node::Send { .. } => "send",
            Node::ConstRef(_) => "const-ref",
            Node::StringLit(_) => "string-literal",
            Node::IntegerLit(_) => "integer-literal",
            Node::Interpolated(_) => "interpolated-string",
        }
    }

    /// Decode a node from its JSON text form.
    pub fn from_json_str(source: &str) -> Result<Node, AstError> {
        let raw: serde_json::Value = serde_json::from_str(source)?;
        decode(&raw)
    }
}

impl<'de> serde::Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        decode(&raw).map_err(serde::de::Error::custom)
    }
}

/// A constant reference, optionally scoped by another expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstRef {
    /// Namespace expression; `None` means the root namespace
    pub scope: Option<Box<Node>>,
    /// Bare constant name
    pub name: String,
}

impl ConstRef {
    /// An unqualified reference.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            scope: None,
            name: name.into(),
        }
    }

    /// A reference qualified by `scope`.
    pub fn scoped(scope: Node, name: impl Into<String>) -> Self {
        Self {
            scope: Some(Box::new(scope)),
            name: name.into(),
        }
    }
}

/// One formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Binds exactly one positional argument.
    Fixed(String),
    /// Collects every remaining positional argument.
    Rest(String),
}

impl Param {
    /// The local name this parameter binds.
    pub fn name(&self) -> &str {
        match self {
            Param::Fixed(name) | Param::Rest(name) => name,
        }
    }
}

/// Ordered parameter list with at most one trailing [`Param::Rest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSpec {
    params: Vec<Param>,
}

impl ParamSpec {
    /// Build a spec, rejecting a rest parameter anywhere but last.
    pub fn new(params: Vec<Param>) -> Result<Self, AstError> {
        let rest_count = params.iter().filter(|p| matches!(p, Param::Rest(_))).count();
        if rest_count > 1 {
            return Err(AstError::malformed("params", "more than one rest parameter"));
        }
        if rest_count == 1 && !matches!(params.last(), Some(Param::Rest(_))) {
            return Err(AstError::malformed("params", "rest parameter must be last"));
        }
        Ok(Self { params })
    }

    /// A spec of fixed parameters only.
    pub fn fixed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            params: names.into_iter().map(|n| Param::Fixed(n.into())).collect(),
        }
    }

    /// The empty spec.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// How many arguments this spec accepts.
    pub fn arity(&self) -> Arity {
        let required = self
            .params
            .iter()
            .filter(|p| matches!(p, Param::Fixed(_)))
            .count();
        if matches!(self.params.last(), Some(Param::Rest(_))) {
            Arity::at_least(required)
        } else {
            Arity::exact(required)
        }
    }
}
