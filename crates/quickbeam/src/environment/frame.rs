//! RAII frame guard for automatic frame cleanup

use crate::error::EvalError;
use crate::value::Value;
use crate::Interpreter;

/// RAII guard that pops the binding frame it pushed when dropped.
///
/// The guard dereferences to the [`Interpreter`], so evaluation continues
/// through it. Every exit path, including `?` on an error, releases the
/// frame.
///
/// # Example
///
/// ```
/// use quickbeam::{Interpreter, OutputSink, Value};
///
/// let mut interp = Interpreter::with_output(OutputSink::buffer());
/// let depth = interp.bindings().depth();
///
/// {
///     let mut frame = interp.enter_frame(Value::Nil).unwrap();
///     frame.bindings_mut().set_local("y", Value::Nil);
///     assert_eq!(frame.bindings().depth(), depth + 1);
/// }
/// // guard dropped, frame popped
/// assert_eq!(interp.bindings().depth(), depth);
/// assert!(interp.bindings().get_local("y").is_none());
/// ```
pub struct FrameGuard<'a> {
    interp: &'a mut Interpreter,
}

impl Interpreter {
    /// Push a frame for `self_value`; it is popped when the guard drops.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the binding stack is full.
    pub fn enter_frame(&mut self, self_value: Value) -> Result<FrameGuard<'_>, EvalError> {
        self.bindings_mut().push_frame(self_value)?;
        Ok(FrameGuard { interp: self })
    }
}

impl<'a> Drop for FrameGuard<'a> {
    fn drop(&mut self) {
        self.interp.bindings_mut().pop_frame();
    }
}

impl<'a> std::ops::Deref for FrameGuard<'a> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interp
    }
}

impl<'a> std::ops::DerefMut for FrameGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputSink;

    fn interp() -> Interpreter {
        Interpreter::with_output(OutputSink::buffer())
    }

    #[test]
    fn test_guard_pushes_and_pops() {
        let mut interp = interp();
        let initial = interp.bindings().depth();
        {
            let guard = interp.enter_frame(Value::Nil).unwrap();
            assert_eq!(guard.bindings().depth(), initial + 1);
            assert!(guard.bindings().self_value().is_nil());
        }
        assert_eq!(interp.bindings().depth(), initial);
    }

    #[test]
    fn test_guard_pops_on_error_path() {
        fn fails(interp: &mut Interpreter) -> Result<(), EvalError> {
            let _frame = interp.enter_frame(Value::Nil)?;
            Err(EvalError::TypeError {
                expected: "a class".into(),
                got: "nil".into(),
            })
        }

        let mut interp = interp();
        let initial = interp.bindings().depth();
        assert!(fails(&mut interp).is_err());
        assert_eq!(interp.bindings().depth(), initial);
    }

    #[test]
    fn test_nested_guards() {
        let mut interp = interp();
        let initial = interp.bindings().depth();
        {
            let mut outer = interp.enter_frame(Value::Nil).unwrap();
            outer.bindings_mut().set_local("a", Value::Nil);
            {
                let inner = outer.enter_frame(Value::Nil).unwrap();
                assert_eq!(inner.bindings().depth(), initial + 2);
                assert!(inner.bindings().get_local("a").is_none());
            }
            assert!(outer.bindings().get_local("a").is_some());
        }
        assert_eq!(interp.bindings().depth(), initial);
    }
}
