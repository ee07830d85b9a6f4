use indentlang::eval::Value;
use indentlang::results::LangError;
use indentlang::{run, Program};
use test_log::test;

fn ints(source: &str) -> Vec<i64> {
    run(source)
        .unwrap()
        .iter()
        .map(|v| v.as_int().expect("integer result"))
        .collect()
}

fn error(source: &str) -> LangError {
    match run(source) {
        Ok(values) => panic!("expected an error, got {:?}", values),
        Err(e) => e,
    }
}

#[test]
fn arithmetic() {
    let pairs = [(7, 2), (-7, 2), (7, -2), (0, 5), (123, 10), (3, 3), (2, 9)];
    for (a, b) in pairs {
        // negative literals are written as a subtraction from zero
        let lit = |v: i64| if v < 0 { format!("(0 - {})", -v) } else { v.to_string() };
        let source = format!(
            "a = {}\nb = {}\na + b\na - b\na * b\na / b\n",
            lit(a),
            lit(b)
        );
        assert_eq!(
            ints(&source),
            vec![a + b, a - b, a * b, (a as f64 / b as f64).floor() as i64],
            "{} {}",
            a,
            b
        );
    }
}

#[test]
fn precedence() {
    assert_eq!(ints("2 + 3 * 4"), vec![14]);
    assert_eq!(ints("(2 + 3) * 4"), vec![20]);
    assert_eq!(ints("10 - 3 - 2"), vec![5]);
    assert_eq!(ints("100 / 10 / 5"), vec![2]);
    assert_eq!(ints("x = 4\n20 - x - 1"), vec![15]);
    assert_eq!(ints("1 + 2 * 3 * 4 - 5"), vec![20]);
}

#[test]
fn end_to_end() {
    let source = "\
def add(a, b):
    return a + b
x = add(2, 3)
x * 10
";
    assert_eq!(ints(source), vec![50]);
}

#[test]
fn implicit_result_is_last_expression() {
    let source = "\
def f(a):
    b = a + 1
    b * 2
f(3)
";
    assert_eq!(ints(source), vec![8]);
}

#[test]
fn implicit_result_after_binding_is_null() {
    let source = "\
def f(a):
    b = a + 1
f(3)
";
    assert_eq!(run(source).unwrap(), vec![Value::Null]);
}

#[test]
fn bindings_inside_body_are_local() {
    let source = "\
def f(a):
    inside = a
    return inside
f(1)
inside
";
    match error(source) {
        LangError::UnboundVariable { name, .. } => assert_eq!(name, "inside"),
        e => panic!("unexpected {:?}", e),
    }
}

#[test]
fn arity_mismatch() {
    for args in ["1", "1, 2, 3"] {
        let source = format!("def add(a, b):\n    return a + b\nadd({})\n", args);
        match error(&source) {
            LangError::Arity {
                name,
                expected,
                found,
                ..
            } => {
                assert_eq!(name, "add");
                assert_eq!(expected, 2);
                assert_eq!(found, args.split(',').count());
            }
            e => panic!("unexpected {:?}", e),
        }
    }
}

#[test]
fn unbound_variable() {
    match error("x = 1\nx + y") {
        LangError::UnboundVariable { name, loc } => {
            assert_eq!(name, "y");
            assert_eq!((loc.row, loc.col_start), (2, 5));
        }
        e => panic!("unexpected {:?}", e),
    }
    assert!(matches!(error("nothing(1)"), LangError::UnboundVariable { .. }));
}

#[test]
fn results_before_an_error_are_produced() {
    let program = Program::parse("1\n2\nmissing\n3").unwrap();
    let results: Vec<_> = program.results().collect();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Ok(Value::Int(1)));
    assert_eq!(results[1], Ok(Value::Int(2)));
    assert!(results[2].is_err());
}

#[test]
fn indentation() {
    let less = "def f():\n    a = 1\n  a\n";
    assert!(matches!(error(less), LangError::Indentation { .. }));

    let same = "def f():\n    a = 1\n    b = a + 1\n    b\nf()\n";
    assert_eq!(ints(same), vec![2]);
}

#[test]
fn self_reference_is_unbound() {
    let source = "\
def loop(n):
    return loop(n)
loop(1)
";
    match error(source) {
        LangError::UnboundVariable { name, .. } => assert_eq!(name, "loop"),
        e => panic!("unexpected {:?}", e),
    }
}

#[test]
fn closures_capture_definition_environment() {
    let source = "\
k = 10
def addk(x):
    return x + k
k = 1000
addk(1)
";
    assert_eq!(ints(source), vec![11]);
}

#[test]
fn functions_are_values() {
    let source = "\
def double(x):
    return x * 2
def twice(f, x):
    return f(f(x))
twice(double, 3)
double
";
    let results = run(source).unwrap();
    assert_eq!(results[0], Value::Int(12));
    assert_eq!(results[1].to_string(), "<function double(x)>");
}

#[test]
fn repeated_calls_layer_parameters() {
    let source = "\
def pick(a, b):
    return a - b
pick(5, 1)
pick(10, 3)
";
    let program = Program::parse(source).unwrap();
    let mut results = program.results();
    assert_eq!(results.next(), Some(Ok(Value::Int(4))));
    assert_eq!(results.next(), Some(Ok(Value::Int(7))));
    assert!(results.next().is_none());

    let pick = results.env().resolve_value("pick").unwrap().clone();
    let closure = pick.as_closure().unwrap();
    let env = closure.env();
    // both calls' parameter frames are still on the chain, newest first
    assert_eq!(env.depth(), 4);
    assert_eq!(env.names().collect::<Vec<_>>(), vec!["b", "a", "b", "a"]);
    assert_eq!(env.resolve_value("a"), Some(&Value::Int(10)));
}

#[test]
fn runtime_errors() {
    assert!(matches!(error("1 / 0"), LangError::DivisionByZero));
    assert!(matches!(
        error("9223372036854775807 + 1"),
        LangError::Overflow { .. }
    ));
    assert!(matches!(error("x = 1\nx(2)"), LangError::NotCallable { .. }));
}

#[test]
fn long_operator_chains() {
    let source = format!("0{}", " + 1".repeat(10_000));
    assert_eq!(ints(&source), vec![10_000]);

    let source = format!("x = 3\n1{}", " * x / x".repeat(5_000));
    assert_eq!(ints(&source), vec![1]);

    let source = format!("1 + 2{}", " * 1".repeat(10_000));
    assert_eq!(ints(&source), vec![3]);
}

#[test]
fn deep_parentheses() {
    let source = format!("{}1{}", "(1 + ".repeat(150), ")".repeat(150));
    assert_eq!(ints(&source), vec![151]);

    let source = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    match error(&source) {
        LangError::Syntax { loc, .. } => assert_eq!((loc.row, loc.col_start), (1, 201)),
        e => panic!("unexpected {:?}", e),
    }
}

#[test]
fn demo_program() {
    let source = std::fs::read_to_string("demos/demo.p").unwrap();
    assert_eq!(ints(&source), vec![10, 80, 7, 7]);
}
