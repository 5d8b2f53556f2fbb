// End-to-end programs: output, error propagation, and stack hygiene
use pretty_assertions::assert_eq;
use quickbeam::environment::DEFAULT_MAX_DEPTH;
use quickbeam::*;
use serde_json::json;

fn interp() -> Interpreter {
    Interpreter::with_output(OutputSink::buffer())
}

fn run(program: serde_json::Value) -> (std::result::Result<Value, EvalError>, String) {
    let node = quickbeam::ast::decode(&program).expect("decode failed");
    let mut interp = interp();
    let result = interp.run(&node);
    let output = interp.output_mut().take();
    (result, output)
}

fn puts(text: &str) -> serde_json::Value {
    json!(["send", null, "puts", ["string-literal", text]])
}

// ═══════════════════════════════════════════════════════════════════════
// Birthday Program
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_birthday_program_output() {
    let source = include_str!("../../../demos/birthday.json");
    let mut interp = interp();
    interp
        .run_source(&JsonFrontend::new(), source)
        .expect("program failed");

    assert_eq!(
        interp.output().captured().unwrap(),
        "Sally was 73\n\
         But, it's their birthday!\n\
         So now Sally is 74\n\
         Happy birthday, Sally!\n"
    );
}

#[test]
fn test_birthday_program_leaves_only_top_frame() {
    let source = include_str!("../../../demos/birthday.json");
    let mut interp = interp();
    interp.run_source(&JsonFrontend::new(), source).unwrap();
    assert!(interp.bindings().is_top_level());
    assert!(interp.bindings().get_local("user").is_some());
}

// ═══════════════════════════════════════════════════════════════════════
// Display Output
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_display_calls_concatenate_in_order() {
    let (result, output) = run(json!([
        "sequence",
        ["local-assign", "greeting", ["string-literal", "hello"]],
        ["send", null, "puts", ["local-read", "greeting"]],
        puts("second"),
        ["local-assign", "n", ["integer-literal", 42]],
        ["send", null, "puts", ["local-read", "n"]]
    ]));
    assert!(result.unwrap().is_nil());
    assert_eq!(output, "hello\nsecond\n42\n");
}

#[test]
fn test_puts_does_not_double_newline() {
    let (_, output) = run(json!(["sequence", puts("line\n"), puts("")]));
    assert_eq!(output, "line\n\n");
}

#[test]
fn test_puts_without_arguments_and_with_many() {
    let (_, output) = run(json!([
        "sequence",
        ["send", null, "puts"],
        ["send", null, "puts", ["string-literal", "a"], ["integer-literal", 1]]
    ]));
    assert_eq!(output, "\na\n1\n");
}

#[test]
fn test_print_has_no_newline() {
    let (_, output) = run(json!([
        "sequence",
        ["send", null, "print", ["string-literal", "a"], ["string-literal", "b"]],
        puts("c")
    ]));
    assert_eq!(output, "abc\n");
}

// ═══════════════════════════════════════════════════════════════════════
// Fatal Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_no_method_error_halts_evaluation() {
    let (result, output) = run(json!([
        "sequence",
        puts("before"),
        ["send", ["string-literal", "x"], "shout"],
        puts("after")
    ]));
    match result.unwrap_err() {
        EvalError::NoMethodError { method, receiver } => {
            assert_eq!(method, "shout");
            assert_eq!(receiver, "an instance of String");
        }
        other => panic!("expected NoMethodError, got {:?}", other),
    }
    assert_eq!(output, "before\n");
}

#[test]
fn test_send_to_nil_is_no_method_error() {
    let (result, _) = run(json!(["send", ["local-read", "nothing"], "name"]));
    assert!(matches!(
        result,
        Err(EvalError::NoMethodError { receiver, .. }) if receiver == "nil"
    ));
}

#[test]
fn test_arity_mismatch_on_interpreted_method() {
    let (result, output) = run(json!([
        "sequence",
        ["method-def", "pair", ["params", ["fixed", "a"], ["fixed", "b"]], ["local-read", "a"]],
        ["send", null, "pair", ["integer-literal", 1], ["integer-literal", 2], ["integer-literal", 3]],
        puts("unreachable")
    ]));
    match result.unwrap_err() {
        EvalError::ArityMismatch {
            method,
            expected,
            got,
        } => {
            assert_eq!(method, "pair");
            assert_eq!(expected, Arity::exact(2));
            assert_eq!(got, 3);
        }
        other => panic!("expected ArityMismatch, got {:?}", other),
    }
    assert_eq!(output, "");
}

#[test]
fn test_too_few_arguments_for_rest_method() {
    let (result, _) = run(json!([
        "sequence",
        ["method-def", "log", ["params", ["fixed", "level"], ["rest", "parts"]], ["local-read", "parts"]],
        ["send", null, "log"]
    ]));
    assert!(matches!(
        result,
        Err(EvalError::ArityMismatch { got: 0, expected, .. }) if expected == Arity::at_least(1)
    ));
}

#[test]
fn test_frames_released_after_error_in_nested_call() {
    let program = quickbeam::ast::decode(&json!([
        "sequence",
        ["class-def", ["const-ref", null, "Widget"], null,
            ["sequence",
                ["method-def", "outer", ["params"], ["send", null, "inner"]],
                ["method-def", "inner", ["params"], ["send", null, "missing"]]]],
        ["send", ["send", ["const-ref", null, "Widget"], "new"], "outer"]
    ]))
    .unwrap();

    let mut interp = interp();
    let err = interp.run(&program).unwrap_err();
    assert!(matches!(err, EvalError::NoMethodError { .. }));
    assert_eq!(interp.bindings().depth(), 1);
    assert!(interp
        .bindings()
        .self_value()
        .same(interp.main_object()));
}

fn runaway_recursion() -> Node {
    quickbeam::ast::decode(&json!([
        "sequence",
        ["method-def", "down", ["params"], ["send", null, "down"]],
        ["send", null, "down"]
    ]))
    .unwrap()
}

#[test]
fn test_runaway_recursion_overflows() {
    let ctx = EvalContext::with_max_call_depth(50);
    let mut interp = Interpreter::with_context(ctx, OutputSink::buffer());
    let err = interp.run(&runaway_recursion()).unwrap_err();
    assert!(matches!(err, EvalError::StackOverflow { max: 50, .. }));
    assert_eq!(interp.bindings().depth(), 1);
}

#[test]
fn test_runaway_recursion_at_default_depth_is_an_error() {
    let mut interp = interp();
    let err = interp.run(&runaway_recursion()).unwrap_err();
    match err {
        EvalError::StackOverflow { depth, max } => {
            assert_eq!(max, DEFAULT_MAX_DEPTH);
            assert_eq!(depth, DEFAULT_MAX_DEPTH);
        }
        other => panic!("expected StackOverflow, got {:?}", other),
    }
    assert_eq!(interp.bindings().depth(), 1);
}

#[test]
fn test_deep_max_depth_on_small_thread() {
    // Far more frames than a 256KB host stack could hold unaided.
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| {
            let ctx = EvalContext::with_max_call_depth(10_000);
            let mut interp = Interpreter::with_context(ctx, OutputSink::buffer());
            let err = interp.run(&runaway_recursion()).unwrap_err();
            (err, interp.bindings().depth())
        })
        .unwrap();

    let (err, depth) = handle.join().unwrap();
    assert!(matches!(err, EvalError::StackOverflow { max: 10_000, .. }));
    assert_eq!(depth, 1);
}

#[test]
fn test_run_source_reports_unhandled_node_kind() {
    let mut interp = interp();
    let err = interp
        .run_source(&JsonFrontend::new(), r#"["sequence", ["rescue", ["sequence"]]]"#)
        .unwrap_err();
    match err {
        QuickbeamError::Ast(AstError::UnhandledNodeKind { kind }) => assert_eq!(kind, "rescue"),
        other => panic!("expected UnhandledNodeKind, got {:?}", other),
    }
}

#[test]
fn test_run_source_wraps_eval_errors() {
    let mut interp = interp();
    let err = interp
        .run_source(&JsonFrontend::new(), r#"["const-ref", null, "Nope"]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        QuickbeamError::Eval(EvalError::UnresolvedConstant { .. })
    ));
    assert_eq!(err.to_string(), "uninitialized constant Object::Nope");
}
