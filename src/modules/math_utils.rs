use crate::core::namespace::{Namespace, NamespaceBuilder};
use crate::domain::model::Value;
use crate::utils::error::{ModError, Result};

pub const ID: &str = "utilities.math_utils";

/// Largest n whose factorial fits in an `i64`.
pub const MAX_FACTORIAL_INPUT: i64 = 20;

pub fn namespace() -> Result<Namespace> {
    NamespaceBuilder::module(ID)
        .doc("Integer sequences and products")
        .function("factorial", 1, "Calculate factorial of n", |args| {
            factorial(args[0].as_int("factorial")?).map(Value::Int)
        })
        .function("fibonacci", 1, "Generate first n Fibonacci numbers", |args| {
            let sequence = fibonacci(args[0].as_int("fibonacci")?)?;
            Ok(Value::List(sequence.into_iter().map(Value::Int).collect()))
        })
        .build()
}

/// n! computed by self-recursion. Fails for negative n and when the
/// result does not fit in an `i64` (n > 20).
pub fn factorial(n: i64) -> Result<i64> {
    if n < 0 {
        return Err(ModError::domain(
            "factorial",
            "Factorial not defined for negative numbers",
        ));
    }
    // rejected up front so recursion depth stays bounded
    if n > MAX_FACTORIAL_INPUT {
        return Err(ModError::domain(
            "factorial",
            format!("{}! does not fit in 64 bits", n),
        ));
    }
    if n <= 1 {
        return Ok(1);
    }
    Ok(n * factorial(n - 1)?)
}

/// The first `n` Fibonacci numbers, starting 0, 1. Empty for `n <= 0`.
pub fn fibonacci(n: i64) -> Result<Vec<i64>> {
    if n <= 0 {
        return Ok(Vec::new());
    }
    let len = usize::try_from(n)
        .map_err(|_| ModError::domain("fibonacci", format!("{} is too large", n)))?;

    let mut fib = vec![0i64];
    if len > 1 {
        fib.push(1);
    }
    while fib.len() < len {
        let next = fib[fib.len() - 1]
            .checked_add(fib[fib.len() - 2])
            .ok_or_else(|| {
                ModError::domain(
                    "fibonacci",
                    format!("element {} does not fit in 64 bits", fib.len()),
                )
            })?;
        fib.push(next);
    }
    Ok(fib)
}
