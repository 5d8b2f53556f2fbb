//! Statement sequences

use crate::ast::Node;
use crate::{EvalError, Interpreter, Value};

use super::Evaluate;

/// Evaluate statements in order; the result is the last value, or `nil`.
pub fn eval_sequence(statements: &[Node], interp: &mut Interpreter) -> Result<Value, EvalError> {
    let mut last_value = Value::Nil;

    for statement in statements {
        last_value = statement.eval(interp)?;
    }

    Ok(last_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputSink;

    #[test]
    fn test_empty_sequence_is_nil() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        assert!(eval_sequence(&[], &mut interp).unwrap().is_nil());
    }

    #[test]
    fn test_last_value_wins() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        let result = eval_sequence(
            &[Node::IntegerLit(1), Node::StringLit("two".into())],
            &mut interp,
        )
        .unwrap();
        assert_eq!(result.as_str(), Some("two"));
    }

    #[test]
    fn test_stops_at_first_error() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        let statements = [
            Node::LocalAssign {
                name: "a".into(),
                value: Box::new(Node::IntegerLit(1)),
            },
            Node::Send {
                receiver: Some(Box::new(Node::LocalRead("nothing".into()))),
                method: "boom".into(),
                args: vec![],
            },
            Node::LocalAssign {
                name: "b".into(),
                value: Box::new(Node::IntegerLit(2)),
            },
        ];
        assert!(eval_sequence(&statements, &mut interp).is_err());
        assert!(interp.bindings().get_local("a").is_some());
        assert!(interp.bindings().get_local("b").is_none());
    }
}
