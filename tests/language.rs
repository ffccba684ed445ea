use std::fs;

use skit::{
    interpreter::{evaluator::core::Context, value::Value},
    run, stdlib,
};
use walkdir::WalkDir;

fn run_script(src: &str) -> Result<Context, Box<dyn std::error::Error>> {
    let mut context = Context::new();
    stdlib::install(&mut context);
    run(src, &mut context)?;

    Ok(context)
}

fn assert_success(src: &str) {
    if let Err(e) = run_script(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if run_script(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn script_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "skit")
                                     })
    {
        let path = entry.path();
        let script =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run_script(&script) {
            panic!("Script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("x = 1 + 2; assert(x == 3);");
    assert_success("x = 7 * 9; assert(x == 63);");
    assert_success("x = 8 - 5; assert(x == 3);");
    assert_success("x = 10 / 2; assert(x == 5);");
    assert_success("x = 7 / 2; assert(x == 3);");
    assert_success("x = 7.0 / 2.0; assert(x == 3.5);");
    assert_success("x = 1 + 0.5; assert(x == 1.5);");
}

#[test]
fn precedence() {
    assert_success("assert(1 + 2 * 3 == 7);");
    assert_success("assert((1 + 2) * 3 == 9);");
    assert_success("assert(2 * 3 + 1 == 7);");
    assert_success("assert(1 + 2 < 2 * 2);");
}

#[test]
fn division_by_zero_fails() {
    assert_failure("x = 1 / 0;");
    assert_failure("x = 1.0 / 0.0;");
}

#[test]
fn strict_equality() {
    assert_success("assert(1 == 1);");
    assert_success("assert(1 != 2);");
    assert_success("assert(\"a\" == \"a\");");
    assert_success("assert((\"a\" == \"b\") == 0);");
    // values of different kinds are unequal, not an error
    assert_success("assert((1 == \"1\") == 0);");
    assert_success("assert((1 == 1.0) == 0);");
    assert_success("assert(('a' == \"a\") == 0);");
}

#[test]
fn string_and_char_concatenation() {
    assert_success("assert(\"a\" + \"b\" == \"ab\");");
    assert_success("assert(\"a\" + 'b' == \"ab\");");
    assert_success("assert('a' + \"b\" == \"ab\");");
    assert_failure("x = 1 + \"a\";");
    assert_failure("x = 'a' + 'b';");
}

#[test]
fn relational_operators() {
    assert_success("assert(1 < 2); assert(2 <= 2); assert(3 > 2.5); assert(2 >= 2);");
    assert_success("assert(\"abc\" < \"abd\");");
    assert_success("assert('a' < 'b');");
    assert_failure("x = 1 < \"2\";");
    assert_failure("x = 'a' < \"a\";");
}

#[test]
fn single_quote_literals() {
    // exactly one enclosed character is a char, anything else is a string
    assert_success("c = 'a'; assert(c == 'a');");
    assert_success("s = 'abc'; assert(s == \"abc\");");
    assert_success("s = ''; assert(s == \"\");");
}

#[test]
fn conditions_truncate_doubles() {
    assert_success("a = 0; if (2.7) { a = 1; } assert(a == 1);");
    assert_success("a = 0; if (0.5) { a = 1; } assert(a == 0);");
    assert_failure("if (\"x\") { }");
    assert_failure("if ('x') { }");
}

#[test]
fn if_else_branches() {
    assert_success("a = 0; if (1) { a = 1; } else { a = 2; } assert(a == 1);");
    assert_success("a = 0; if (0) { a = 1; } else { a = 2; } assert(a == 2);");
    assert_success("a = 0; if (0) { a = 1; } assert(a == 0);");
}

#[test]
fn while_loop_terminates() {
    let context =
        run_script("a = ''; while (a != 'aaaaaaaaaa') { a = a + 'a' }").expect("script failed");

    assert_eq!(context.variables.get("a"),
               Some(&Value::Str("aaaaaaaaaa".to_string())));
}

#[test]
fn for_loop_counts() {
    assert_success("sum = 0; for (i = 0; i < 5; i++) { sum = sum + i; } assert(sum == 10);");
    // all three clauses are optional
    assert_success("i = 0; for (;;) { i++; if (i == 3) { break; } } assert(i == 3);");
    assert_success("sum = 0; i = 0; for (; i < 3;) { sum = sum + i; i++; } assert(sum == 3);");
}

#[test]
fn top_level_return_halts_script() {
    let context = run_script("a = 123; return; never_called();").expect("script failed");

    assert_eq!(context.variables.get("a"), Some(&Value::Integer(123)));
}

#[test]
fn break_is_isolated_to_inner_while() {
    assert_success("total = 0;
                    i = 0;
                    while (i < 3) {
                        j = 0;
                        while (true) {
                            j++;
                            if (j >= 2) { break; }
                        }
                        total = total + j;
                        i++;
                    }
                    assert(total == 6);");
}

#[test]
fn continue_is_isolated_to_inner_for() {
    assert_success("sum = 0;
                    for (i = 0; i < 3; i++) {
                        for (j = 0; j < 3; j++) {
                            if (j == 1) { continue; }
                            sum = sum + 1;
                        }
                    }
                    assert(sum == 6);");
}

#[test]
fn break_is_isolated_to_inner_foreach() {
    assert_success("outer = [1, 2, 3];
                    inner = [1, 2, 3, 4];
                    count = 0;
                    foreach (x in outer) {
                        foreach (y in inner) {
                            if (y > 2) { break; }
                            count++;
                        }
                    }
                    assert(count == 6);");
}

#[test]
fn continue_in_while_reaches_next_iteration() {
    assert_success("i = 0;
                    odd = 0;
                    while (i < 10) {
                        i++;
                        if (i - 2 * (i / 2) == 0) { continue; }
                        odd++;
                    }
                    assert(odd == 5);");
}

#[test]
fn array_indexing_and_assignment() {
    assert_success("arr = [10, 20, 30];
                    assert(arr[0] == 10);
                    assert(arr[2] == 30);
                    arr[1] = 25;
                    assert(arr[1] == 25);");
}

#[test]
fn array_push_and_pop() {
    assert_success("arr = [1, 2];
                    assert(array_length(arr) == 2);
                    array_push(arr, 3);
                    assert(array_length(arr) == 3);
                    assert(array_pop(arr) == 3);
                    assert(array_length(arr) == 2);");
}

#[test]
fn array_out_of_bounds_fails() {
    assert_failure("arr = [1]; arr[5];");
    assert_failure("arr = [1]; arr[0 - 1];");
    assert_failure("arr = [1]; arr[5] = 2;");
}

#[test]
fn popping_empty_array_fails() {
    assert_failure("arr = []; array_pop(arr);");
}

#[test]
fn nested_arrays() {
    assert_success("m = [[1, 2], [3, 4]];
                    assert(m[1][0] == 3);
                    m[0][1] = 9;
                    assert(m[0][1] == 9);");
}

#[test]
fn array_literals_are_distinct() {
    // two literals create two arrays, so their handles differ
    assert_success("assert(([1] == [1]) == 0);");
}

#[test]
fn foreach_visits_elements_in_order() {
    assert_success("arr = [1, 2, 3, 4];
                    sum = 0;
                    foreach (x in arr) { sum = sum + x; }
                    assert(sum == 10);");
    assert_failure("foreach (x in 5) { }");
    assert_failure("foreach (x in \"nope\") { }");
}

#[test]
fn postfix_yields_value_before_update() {
    assert_success("i = 1; j = i++; assert(j == 1); assert(i == 2);");
    assert_success("i = 1; j = i--; assert(j == 1); assert(i == 0);");
    assert_success("arr = [5]; arr[0]++; assert(arr[0] == 6);");
    assert_failure("x = 1.5; x++;");
    assert_failure("5++;");
}

#[test]
fn user_functions() {
    assert_success("fn add(a, b) { return a + b; }
                    assert(add(1, 2) == 3);");
    assert_success("fn fact(n) {
                        if (n < 2) { return 1; }
                        return n * fact(n - 1);
                    }
                    assert(fact(5) == 120);");
}

#[test]
fn argument_count_is_checked_at_call_time() {
    assert_failure("fn add(a, b) { return a + b; } add(1, 2, 3);");
    assert_failure("fn add(a, b) { return a + b; } add(1);");
    // declaring with the wrong shape alone is fine, only the call fails
    assert_success("fn add(a, b) { return a + b; }");
}

#[test]
fn function_redeclaration_replaces_the_old_body() {
    assert_success("fn f() { return 1; }
                    fn f() { return 2; }
                    assert(f() == 2);");
}

#[test]
fn calls_get_a_fresh_scope() {
    // caller variables are not visible inside the callee
    assert_failure("g = 5; fn probe() { return g; } probe();");
    // and parameter writes do not leak back out
    assert_success("x = 1;
                    fn shadow(x) { x = 99; return x; }
                    assert(shadow(5) == 99);
                    assert(x == 1);");
}

#[test]
fn arrays_are_global_across_calls() {
    assert_success("arr = [1];
                    fn extend(a) { array_push(a, 2); return 0; }
                    extend(arr);
                    assert(array_length(arr) == 2);");
}

#[test]
fn return_without_value_yields_void() {
    assert_success("fn nothing() { return; }
                    assert(to_string(nothing()) == \"<void>\");");
    // a stray break escaping a function body is absorbed
    assert_success("fn odd() { break; return 5; }
                    assert(to_string(odd()) == \"<void>\");");
}

#[test]
fn unknown_names_fail() {
    assert_failure("x = missing;");
    assert_failure("missing();");
}

#[test]
fn parse_errors() {
    assert_failure("\"unterminated");
    assert_failure("'unterminated");
    assert_failure("x = @;");
    assert_failure("1 = 2;");
    assert_failure("[1, 2] = 3;");
    assert_failure("println(1,);");
    assert_failure("else { }");
    assert_failure("if (1) {");
    assert_failure("x = (1 + 2;");
}

#[test]
fn comments_and_line_numbers() {
    assert_success("// a line comment
                    a = 1; /* a block
                    comment */ b = 2;
                    assert(a + b == 3);");

    let err = run_script("a = 1;\nb = missing;").err().expect("expected a failure");
    assert!(err.to_string().contains("line 2"), "got: {err}");
}

#[test]
fn conversions() {
    assert_success("assert(to_int(\"42\") == 42);");
    assert_success("assert(to_int(2.7) == 3);");
    assert_success("assert(to_int('7') == 7);");
    assert_failure("to_int(\"nope\");");
    assert_failure("to_int('x');");
    assert_success("assert(to_double(1) == 1.0);");
    assert_success("assert(to_double(\"2.5\") == 2.5);");
    assert_success("assert(to_string(12) == \"12\");");
    assert_success("assert(to_string('c') == \"c\");");
}

#[test]
fn constants() {
    assert_success("assert(true == 1); assert(false == 0);");
    assert_success("assert(pi > 3.14); assert(pi < 3.15);");
    assert_success("assert(e > 2.71); assert(e < 2.72);");
    assert_success("assert(\"a\" + endl == \"a\n\");");
}

#[test]
fn math_natives() {
    assert_success("assert(abs(0 - 5) == 5);");
    assert_success("assert(abs(0.0 - 2.5) == 2.5);");
    assert_success("assert(sqr(4) == 16);");
    assert_success("assert(sqrt(9.0) == 3.0);");
    assert_failure("sqrt(0 - 1);");
    assert_success("x = pow(2, 10); assert(x > 1023.9); assert(x < 1024.1);");
    assert_success("x = root(27, 3); assert(x > 2.99); assert(x < 3.01);");
    assert_success("x = log(8, 2); assert(x > 2.99); assert(x < 3.01);");
    assert_success("x = ln(e); assert(x > 0.99); assert(x < 1.01);");
    assert_failure("ln(0);");
    assert_success("assert(round(2.5) == 3.0);");
    assert_success("assert(sigmoid(0) == 0.5);");
    assert_success("assert(factorial(5) == 120);");
    assert_failure("factorial(0 - 1);");
    assert_success("assert(fib(10) == 55);");
    assert_success("assert(is_prime(7) == 1); assert(is_prime(8) == 0); assert(is_prime(1) == 0);");
}

#[test]
fn native_arity_is_checked() {
    assert_failure("to_int();");
    assert_failure("to_int(1, 2);");
    assert_failure("array_push([1]);");
    assert_failure("assert();");
}

#[test]
fn assertion_failure_aborts() {
    assert_failure("assert(0);");
    assert_success("assert(1); assert(0 - 1);");
}

#[test]
fn scripts_share_a_context() {
    let mut context = Context::new();
    stdlib::install(&mut context);

    run("a = 1; fn double(x) { return x * 2; }", &mut context).expect("first script failed");
    run("assert(double(a) == 2);", &mut context).expect("second script failed");
}
