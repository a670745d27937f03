use crate::core::namespace::{Namespace, NamespaceBuilder};
use crate::domain::model::Value;
use crate::utils::error::{ModError, Result};

pub const ID: &str = "calculator";
pub const PI: f64 = 3.14159;

pub fn namespace() -> Result<Namespace> {
    NamespaceBuilder::module(ID)
        .doc("Basic arithmetic helpers")
        .function("add", 2, "Add two numbers", add)
        .function("subtract", 2, "Subtract two numbers", subtract)
        .constant("PI", PI)
        .build()
}

fn add(args: &[Value]) -> Result<Value> {
    arithmetic("add", &args[0], &args[1], i64::checked_add, |a, b| a + b)
}

fn subtract(args: &[Value]) -> Result<Value> {
    arithmetic("subtract", &args[0], &args[1], i64::checked_sub, |a, b| a - b)
}

/// Int with int stays int; a float on either side makes the result a float.
fn arithmetic(
    name: &str,
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => int_op(*x, *y)
            .map(Value::Int)
            .ok_or_else(|| ModError::domain(name, "integer overflow")),
        _ => Ok(Value::Float(float_op(a.as_float(name)?, b.as_float(name)?))),
    }
}
