//! Message sends and method invocation

use crate::ast::{Node, Param, ParamSpec};
use crate::value::Method;
use crate::{EvalError, Interpreter, Value};

use super::Evaluate;

/// Evaluate a message send.
///
/// A missing receiver means the current self. Arguments are evaluated
/// left to right after the receiver.
pub fn eval_send(
    receiver: Option<&Node>,
    method: &str,
    args: &[Node],
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    // Evaluate the receiver
    let receiver = match receiver {
        Some(node) => node.eval(interp)?,
        None => interp.bindings().self_value().clone(),
    };

    // Evaluate arguments
    let args: Vec<Value> = args
        .iter()
        .map(|arg| arg.eval(interp))
        .collect::<Result<Vec<_>, _>>()?;

    interp.send(receiver, method, args)
}

impl Interpreter {
    /// Look up `name` on the receiver's class chain and invoke it.
    ///
    /// # Errors
    ///
    /// Returns `NoMethodError` if no class on the chain defines `name`,
    /// plus anything the method itself raises.
    pub fn send(
        &mut self,
        receiver: Value,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, EvalError> {
        let method = self.classes().find_method(&receiver, name)?;
        self.call_method(receiver, name, &method, args)
    }

    /// Invoke `method` with `receiver` as self.
    ///
    /// A frame is pushed for the call and popped on every exit path,
    /// including errors raised by the body.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if `args` doesn't fit the method's
    /// parameters, and `StackOverflow` if the frame can't be pushed.
    #[tracing::instrument(level = "debug", skip_all, fields(method = name))]
    pub fn call_method(
        &mut self,
        receiver: Value,
        name: &str,
        method: &Method,
        args: Vec<Value>,
    ) -> Result<Value, EvalError> {
        let arity = method.arity();
        if !arity.accepts(args.len()) {
            return Err(EvalError::ArityMismatch {
                method: name.to_string(),
                expected: arity,
                got: args.len(),
            });
        }

        let mut frame = self.enter_frame(receiver.clone())?;
        match method {
            Method::Interpreted { params, body } => {
                bind_arguments(name, params, args, &mut *frame)?;
                body.eval(&mut *frame)
            }
            Method::Native(native) => (native.func)(&mut *frame, &receiver, &args),
        }
    }
}

/// Bind positional arguments to `params` in the current frame.
///
/// Fixed parameters take one argument each in order; a trailing rest
/// parameter takes whatever remains as an `Array`, empty if nothing does.
/// A missing or leftover argument is an `ArityMismatch`.
pub(crate) fn bind_arguments(
    method: &str,
    params: &ParamSpec,
    args: Vec<Value>,
    interp: &mut Interpreter,
) -> Result<(), EvalError> {
    let got = args.len();
    let mismatch = || EvalError::ArityMismatch {
        method: method.to_string(),
        expected: params.arity(),
        got,
    };

    let mut args = args.into_iter();
    for param in params.iter() {
        let value = match param {
            Param::Fixed(_) => args.next().ok_or_else(mismatch)?,
            Param::Rest(_) => interp.new_array(args.by_ref().collect()),
        };
        interp.bindings_mut().set_local(param.name(), value);
    }
    if args.next().is_some() {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Arity;
    use crate::OutputSink;

    fn ints(interp: &Interpreter, ns: &[i64]) -> Vec<Value> {
        ns.iter().map(|n| interp.new_integer(*n)).collect()
    }

    fn rest_spec() -> ParamSpec {
        ParamSpec::new(vec![
            Param::Fixed("a".into()),
            Param::Fixed("b".into()),
            Param::Rest("c".into()),
        ])
        .unwrap()
    }

    #[test]
    fn test_bind_rest_empty() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        let args = ints(&interp, &[1, 2]);
        bind_arguments("m", &rest_spec(), args, &mut interp).unwrap();

        let bindings = interp.bindings();
        assert_eq!(bindings.get_local("a").and_then(Value::as_integer), Some(1));
        assert_eq!(bindings.get_local("b").and_then(Value::as_integer), Some(2));
        let rest = bindings.get_local("c").and_then(Value::as_array);
        assert_eq!(rest.map(<[Value]>::len), Some(0));
    }

    #[test]
    fn test_bind_rest_collects_in_order() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        let args = ints(&interp, &[1, 2, 3, 4]);
        bind_arguments("m", &rest_spec(), args, &mut interp).unwrap();

        let rest: Vec<i64> = interp
            .bindings()
            .get_local("c")
            .and_then(Value::as_array)
            .unwrap()
            .iter()
            .filter_map(Value::as_integer)
            .collect();
        assert_eq!(rest, vec![3, 4]);
    }

    #[test]
    fn test_bind_too_few_is_arity_mismatch() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        let args = ints(&interp, &[1]);
        let err = bind_arguments("m", &rest_spec(), args, &mut interp).unwrap_err();
        match err {
            EvalError::ArityMismatch { method, expected, got } => {
                assert_eq!(method, "m");
                assert_eq!(expected, Arity::at_least(2));
                assert_eq!(got, 1);
            }
            other => panic!("expected ArityMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_too_many_is_arity_mismatch() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        let args = ints(&interp, &[1, 2]);
        let err = bind_arguments("m", &ParamSpec::fixed(["x"]), args, &mut interp).unwrap_err();
        assert!(matches!(err, EvalError::ArityMismatch { got: 2, .. }));
    }

    #[test]
    fn test_call_method_arity_mismatch_leaves_stack() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        let method = Method::Interpreted {
            params: ParamSpec::fixed(["x"]),
            body: std::rc::Rc::new(Node::Sequence(vec![])),
        };
        let depth = interp.bindings().depth();
        let main = interp.main_object().clone();
        let err = interp.call_method(main, "m", &method, vec![]).unwrap_err();
        assert!(matches!(err, EvalError::ArityMismatch { got: 0, .. }));
        assert_eq!(interp.bindings().depth(), depth);
    }

    #[test]
    fn test_call_method_pops_frame_after_body_error() {
        let mut interp = Interpreter::with_output(OutputSink::buffer());
        let method = Method::Interpreted {
            params: ParamSpec::empty(),
            body: std::rc::Rc::new(Node::Send {
                receiver: None,
                method: "undefined_thing".into(),
                args: vec![],
            }),
        };
        let depth = interp.bindings().depth();
        let main = interp.main_object().clone();
        let err = interp.call_method(main, "m", &method, vec![]).unwrap_err();
        assert!(matches!(err, EvalError::NoMethodError { .. }));
        assert_eq!(interp.bindings().depth(), depth);
    }
}
