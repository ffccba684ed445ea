//! The native standard library: I/O, conversions, array helpers and math,
//! plus the predefined constants. Everything registers through the same
//! function table user declarations go into, so a script may shadow any of
//! these by declaring a function with the same name.

use std::io::{BufRead, Write};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

/// Registers every native function and constant on the context.
pub fn install(context: &mut Context) {
    context.register_native("println", native_println);
    context.register_native("print", native_print);
    context.register_native("input", native_input);

    context.register_native("to_int", native_to_int);
    context.register_native("to_double", native_to_double);
    context.register_native("to_string", native_to_string);

    context.register_native("array_length", native_array_length);
    context.register_native("array_push", native_array_push);
    context.register_native("array_pop", native_array_pop);

    context.register_native("abs", native_abs);
    context.register_native("sqr", native_sqr);
    context.register_native("sqrt", native_sqrt);
    context.register_native("pow", native_pow);
    context.register_native("root", native_root);
    context.register_native("log", native_log);
    context.register_native("ln", native_ln);
    context.register_native("round", native_round);
    context.register_native("sigmoid", native_sigmoid);
    context.register_native("factorial", native_factorial);
    context.register_native("fib", native_fib);
    context.register_native("is_prime", native_is_prime);

    context.register_native("assert", native_assert);

    context.variables.insert("true".to_string(), Value::Integer(1));
    context.variables.insert("false".to_string(), Value::Integer(0));
    context.variables
           .insert("pi".to_string(), Value::Double(std::f64::consts::PI));
    context.variables
           .insert("e".to_string(), Value::Double(std::f64::consts::E));
    context.variables.insert("endl".to_string(), Value::Char('\n'));
}

/// Rejects calls whose argument count differs from `expected`.
fn check_arity(name: &str, expected: usize, args: &[Value], line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  expected,
                                                  found: args.len(),
                                                  line })
    }
}

/// Concatenates the display forms of all arguments, without separators.
fn join_arguments(args: &[Value]) -> String {
    args.iter().map(ToString::to_string).collect()
}

/// `println(...)`: prints all arguments and a newline.
fn native_println(_: &mut Context, args: &[Value], _: usize) -> EvalResult<Value> {
    println!("{}", join_arguments(args));
    Ok(Value::Void)
}

/// `print(...)`: prints all arguments without a newline.
fn native_print(_: &mut Context, args: &[Value], _: usize) -> EvalResult<Value> {
    print!("{}", join_arguments(args));
    let _ = std::io::stdout().flush();
    Ok(Value::Void)
}

/// `input()`: reads one line from stdin, without its line ending.
fn native_input(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("input", 0, args, line)?;

    let mut buffer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut buffer)
        .map_err(|e| RuntimeError::TypeError { details: format!("Failed to read input: {e}"),
                                               line })?;

    Ok(Value::Str(buffer.trim_end().to_string()))
}

/// `to_int(x)`: integers pass, doubles round, digit chars and numeric
/// strings parse.
fn native_to_int(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("to_int", 1, args, line)?;

    match &args[0] {
        Value::Integer(value) => Ok(Value::Integer(*value)),
        #[allow(clippy::cast_possible_truncation)]
        Value::Double(value) => Ok(Value::Integer(value.round() as i64)),
        Value::Str(value) => {
            value.trim()
                 .parse()
                 .map(Value::Integer)
                 .map_err(|_| RuntimeError::TypeError { details: format!("Cannot convert '{value}' to an integer"),
                                                        line })
        },
        Value::Char(value) => {
            value.to_digit(10)
                 .map(|digit| Value::Integer(i64::from(digit)))
                 .ok_or_else(|| RuntimeError::TypeError { details: format!("Cannot convert '{value}' to an integer"),
                                                          line })
        },
        Value::Void => {
            Err(RuntimeError::TypeError { details: "Cannot convert void to an integer".to_string(),
                                          line })
        },
    }
}

/// `to_double(x)`: numbers promote, chars convert to their code point,
/// numeric strings parse.
fn native_to_double(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("to_double", 1, args, line)?;

    match &args[0] {
        #[allow(clippy::cast_precision_loss)]
        Value::Integer(value) => Ok(Value::Double(*value as f64)),
        Value::Double(value) => Ok(Value::Double(*value)),
        Value::Str(value) => {
            value.trim()
                 .parse()
                 .map(Value::Double)
                 .map_err(|_| RuntimeError::TypeError { details: format!("Cannot convert '{value}' to a double"),
                                                        line })
        },
        Value::Char(value) => Ok(Value::Double(f64::from(u32::from(*value)))),
        Value::Void => {
            Err(RuntimeError::TypeError { details: "Cannot convert void to a double".to_string(),
                                          line })
        },
    }
}

/// `to_string(x)`: the display form of any value.
fn native_to_string(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("to_string", 1, args, line)?;
    Ok(Value::Str(args[0].to_string()))
}

/// `array_length(handle)`: the number of elements.
fn native_array_length(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("array_length", 1, args, line)?;

    let array = context.lookup_array(&args[0], line)?;
    #[allow(clippy::cast_possible_wrap)]
    let len = array.borrow().elements.len() as i64;

    Ok(Value::Integer(len))
}

/// `array_push(handle, v, ...)`: appends the values; yields the new length.
fn native_array_push(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    if args.len() < 2 {
        return Err(RuntimeError::ArgumentCountMismatch { name:     "array_push".to_string(),
                                                         expected: 2,
                                                         found:    args.len(),
                                                         line });
    }

    let array = context.lookup_array(&args[0], line)?;
    let mut array = array.borrow_mut();
    array.elements.extend_from_slice(&args[1..]);
    #[allow(clippy::cast_possible_wrap)]
    let len = array.elements.len() as i64;

    Ok(Value::Integer(len))
}

/// `array_pop(handle)`: removes and yields the last element.
fn native_array_pop(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("array_pop", 1, args, line)?;

    let array = context.lookup_array(&args[0], line)?;
    let mut array = array.borrow_mut();

    let name = array.name.clone();
    array.elements
         .pop()
         .ok_or(RuntimeError::EmptyArray { name, line })
}

/// `abs(x)`: kind-preserving absolute value.
fn native_abs(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("abs", 1, args, line)?;

    match &args[0] {
        Value::Integer(value) => Ok(Value::Integer(value.abs())),
        Value::Double(value) => Ok(Value::Double(value.abs())),
        other => {
            Err(RuntimeError::TypeError { details: format!("Expected a number for abs, got {}",
                                                           other.kind()),
                                          line })
        },
    }
}

/// `sqr(x)`: kind-preserving square.
fn native_sqr(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("sqr", 1, args, line)?;

    match &args[0] {
        Value::Integer(value) => Ok(Value::Integer(value * value)),
        Value::Double(value) => Ok(Value::Double(value * value)),
        other => {
            Err(RuntimeError::TypeError { details: format!("Expected a number for sqr, got {}",
                                                           other.kind()),
                                          line })
        },
    }
}

/// `sqrt(x)`: square root; negative input is an error.
fn native_sqrt(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("sqrt", 1, args, line)?;

    let value = args[0].as_double("sqrt", line)?;
    if value < 0.0 {
        return Err(RuntimeError::TypeError { details: format!("Cannot take the square root of {value}"),
                                             line });
    }

    Ok(Value::Double(value.sqrt()))
}

/// `pow(a, b)`: `a` raised to `b`, always a double.
fn native_pow(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("pow", 2, args, line)?;

    let base = args[0].as_double("pow", line)?;
    let exponent = args[1].as_double("pow", line)?;

    Ok(Value::Double(base.powf(exponent)))
}

/// `root(a, n)`: the n-th root of `a`.
fn native_root(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("root", 2, args, line)?;

    let value = args[0].as_double("root", line)?;
    let degree = args[1].as_double("root", line)?;
    if degree == 0.0 {
        return Err(RuntimeError::TypeError { details: "Cannot take the zeroth root".to_string(),
                                             line });
    }
    if value < 0.0 {
        return Err(RuntimeError::TypeError { details: format!("Cannot take the root of {value}"),
                                             line });
    }

    Ok(Value::Double(value.powf(1.0 / degree)))
}

/// `log(x, base)`: logarithm of `x` in the given base.
fn native_log(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("log", 2, args, line)?;

    let value = args[0].as_double("log", line)?;
    let base = args[1].as_double("log", line)?;
    if value <= 0.0 || base <= 0.0 || (base - 1.0).abs() < f64::EPSILON {
        return Err(RuntimeError::TypeError { details: format!("Cannot take the base {base} logarithm of {value}"),
                                             line });
    }

    Ok(Value::Double(value.log(base)))
}

/// `ln(x)`: natural logarithm.
fn native_ln(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("ln", 1, args, line)?;

    let value = args[0].as_double("ln", line)?;
    if value <= 0.0 {
        return Err(RuntimeError::TypeError { details: format!("Cannot take the natural logarithm of {value}"),
                                             line });
    }

    Ok(Value::Double(value.ln()))
}

/// `round(x)`: rounds half away from zero; yields a double.
fn native_round(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("round", 1, args, line)?;
    Ok(Value::Double(args[0].as_double("round", line)?.round()))
}

/// `sigmoid(x)`: the logistic function `1 / (1 + e^-x)`.
fn native_sigmoid(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("sigmoid", 1, args, line)?;

    let value = args[0].as_double("sigmoid", line)?;
    Ok(Value::Double(1.0 / (1.0 + (-value).exp())))
}

/// `factorial(n)`: for non-negative integers; overflow is an error.
fn native_factorial(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("factorial", 1, args, line)?;

    let n = args[0].as_int("factorial", line)?;
    if n < 0 {
        return Err(RuntimeError::TypeError { details: format!("Cannot take the factorial of {n}"),
                                             line });
    }

    let mut result: i64 = 1;
    for factor in 2..=n {
        result = result.checked_mul(factor)
                       .ok_or_else(|| RuntimeError::TypeError { details: format!("Factorial of {n} overflows"),
                                                                line })?;
    }

    Ok(Value::Integer(result))
}

/// `fib(n)`: the n-th Fibonacci number, with `fib(0) = 0`.
fn native_fib(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("fib", 1, args, line)?;

    let n = args[0].as_int("fib", line)?;
    if n < 0 {
        return Err(RuntimeError::TypeError { details: format!("Cannot take the Fibonacci number of {n}"),
                                             line });
    }

    let (mut previous, mut current): (i64, i64) = (0, 1);
    for _ in 0..n {
        let next = previous.checked_add(current)
                           .ok_or_else(|| RuntimeError::TypeError { details: format!("Fibonacci number {n} overflows"),
                                                                    line })?;
        previous = current;
        current = next;
    }

    Ok(Value::Integer(previous))
}

/// `is_prime(n)`: `1` when `n` is prime, `0` otherwise.
fn native_is_prime(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("is_prime", 1, args, line)?;

    let n = args[0].as_int("is_prime", line)?;
    if n < 2 {
        return Ok(Value::Integer(0));
    }

    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return Ok(Value::Integer(0));
        }
        divisor += 1;
    }

    Ok(Value::Integer(1))
}

/// `assert(cond)`: fails the run when the condition is falsy.
fn native_assert(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity("assert", 1, args, line)?;

    if args[0].as_int("assert", line)? == 0 {
        Err(RuntimeError::AssertionFailed { line })
    } else {
        Ok(Value::Void)
    }
}
