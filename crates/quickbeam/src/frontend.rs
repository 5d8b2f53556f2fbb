//! Frontend boundary for Quickbeam
//!
//! Parsing source text is not the evaluator's job. A [`Frontend`] turns
//! text into a [`Node`] tree (or fails) and the interpreter core takes it
//! from there:
//!
//! ```text
//! Source → [Frontend] → Node → [Interpreter] → output + Value
//! ```

use crate::ast::Node;
use crate::error::AstError;

/// A source-to-AST translator.
pub trait Frontend {
    /// Get the frontend's name.
    fn name(&self) -> &str;

    /// File extension this frontend reads, without the dot.
    fn file_extension(&self) -> &str;

    /// Parse source text into a program tree.
    ///
    /// # Errors
    ///
    /// Returns an [`AstError`] when the text is not a valid program.
    fn parse(&self, source: &str) -> Result<Node, AstError>;
}

/// Reads the tagged-array AST encoding from JSON text.
///
/// # Example
///
/// ```
/// use quickbeam::{Frontend, JsonFrontend, Node};
///
/// let frontend = JsonFrontend::new();
/// let node = frontend.parse(r#"["integer-literal", 3]"#).unwrap();
/// assert_eq!(node, Node::IntegerLit(3));
/// assert_eq!(frontend.file_extension(), "json");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFrontend;

impl JsonFrontend {
    /// Create a new JSON frontend.
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for JsonFrontend {
    fn name(&self) -> &str {
        "JSON AST"
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn parse(&self, source: &str) -> Result<Node, AstError> {
        Node::from_json_str(source)
    }
}
