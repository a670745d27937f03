use crate::utils::error::{ModError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value passed to and returned from module functions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    List(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
        }
    }

    pub fn as_int(&self, function: &str) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(type_mismatch(function, "int", other)),
        }
    }

    /// Ints widen to floats; nothing else does.
    pub fn as_float(&self, function: &str) -> Result<f64> {
        match self {
            Value::Int(n) => Ok(*n as f64),
            Value::Float(x) => Ok(*x),
            other => Err(type_mismatch(function, "number", other)),
        }
    }

    pub fn as_str(&self, function: &str) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(type_mismatch(function, "str", other)),
        }
    }

    /// Parses a command-line token: int, then float, then bool, else string.
    /// A token wrapped in matching single or double quotes is always a string,
    /// with the quotes removed.
    pub fn parse_arg(token: &str) -> Value {
        for quote in ['\'', '"'] {
            if let Some(inner) = token
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            {
                return Value::Str(inner.to_string());
            }
        }
        if let Ok(n) = token.parse::<i64>() {
            return Value::Int(n);
        }
        if let Ok(x) = token.parse::<f64>() {
            return Value::Float(x);
        }
        match token {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Str(token.to_string()),
        }
    }

    /// Like `Display`, but strings are quoted.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("'{}'", s),
            other => other.to_string(),
        }
    }

    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

fn type_mismatch(function: &str, expected: &str, found: &Value) -> ModError {
    ModError::TypeMismatch {
        function: function.to_string(),
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_repr(f)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = ModError;

    fn try_from(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .ok_or_else(|| ModError::InvalidConfigValueError {
                    field: "step.args".to_string(),
                    value: n.to_string(),
                    reason: "Number does not fit in a 64-bit value".to_string(),
                }),
            serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            other => Err(ModError::InvalidConfigValueError {
                field: "step.args".to_string(),
                value: other.to_string(),
                reason: "Only numbers, strings, booleans and arrays can be passed".to_string(),
            }),
        }
    }
}

pub type NativeFn = fn(&[Value]) -> Result<Value>;

/// A named native callable with a fixed number of parameters.
#[derive(Clone)]
pub struct Function {
    pub name: String,
    pub arity: usize,
    pub doc: String,
    pub(crate) call: NativeFn,
}

impl Function {
    pub fn new(name: impl Into<String>, arity: usize, doc: impl Into<String>, call: NativeFn) -> Self {
        Self {
            name: name.into(),
            arity,
            doc: doc.into(),
            call,
        }
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        if args.len() != self.arity {
            return Err(ModError::ArityMismatch {
                function: self.name.clone(),
                expected: self.arity,
                given: args.len(),
            });
        }
        (self.call)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// An exported entry of a namespace.
#[derive(Debug, Clone)]
pub enum Symbol {
    Function(Function),
    Constant(Value),
}

impl Symbol {
    pub fn kind(&self) -> &'static str {
        match self {
            Symbol::Function(_) => "function",
            Symbol::Constant(_) => "constant",
        }
    }

    pub fn as_function(&self, name: &str) -> Result<&Function> {
        match self {
            Symbol::Function(function) => Ok(function),
            Symbol::Constant(_) => Err(ModError::NotCallable {
                name: name.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamespaceKind {
    Module,
    Package,
}

/// One `[[import]]` entry of a consumer script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSpec {
    pub module: String,
    #[serde(default)]
    pub names: Vec<String>,
    pub alias: Option<String>,
    #[serde(default)]
    pub all: bool,
}

/// One `[[step]]` entry of a consumer script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    pub label: Option<String>,
    pub call: Option<String>,
    pub get: Option<String>,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Report,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub run_id: String,
    pub steps_run: usize,
    pub failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_print_output() {
        let fib = Value::List(vec![0i64, 1, 1, 2].into_iter().map(Value::Int).collect());
        assert_eq!(fib.to_string(), "[0, 1, 1, 2]");
        assert_eq!(Value::from("dlroW olleH").to_string(), "dlroW olleH");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::Int(1)]).to_string(),
            "['a', 1]"
        );
        assert_eq!(Value::Float(3.14159).to_string(), "3.14159");
        assert_eq!(Value::Float(212.0).to_string(), "212.0");
    }

    #[test]
    fn test_parse_arg() {
        assert_eq!(Value::parse_arg("-3"), Value::Int(-3));
        assert_eq!(Value::parse_arg("2.5"), Value::Float(2.5));
        assert_eq!(Value::parse_arg("true"), Value::Bool(true));
        assert_eq!(Value::parse_arg("Hello World"), Value::from("Hello World"));
    }

    #[test]
    fn test_parse_arg_quoted_tokens_stay_strings() {
        assert_eq!(Value::parse_arg("'123'"), Value::from("123"));
        assert_eq!(Value::parse_arg("\"inf\""), Value::from("inf"));
        assert_eq!(Value::parse_arg("'true'"), Value::from("true"));
        assert_eq!(Value::parse_arg("''"), Value::from(""));
        // a lone or unmatched quote is an ordinary character
        assert_eq!(Value::parse_arg("'"), Value::from("'"));
        assert_eq!(Value::parse_arg("'12"), Value::from("'12"));
        assert_eq!(Value::parse_arg("inf"), Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!([5, 2.5, "x", [1, 2]]);
        let value = Value::try_from(&json).unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::Int(5),
                Value::Float(2.5),
                Value::from("x"),
                Value::List(vec![Value::Int(1), Value::Int(2)]),
            ])
        );
        assert!(Value::try_from(&serde_json::json!({"a": 1})).is_err());
    }

    #[test]
    fn test_function_checks_arity() {
        fn first(args: &[Value]) -> Result<Value> {
            Ok(args[0].clone())
        }
        let f = Function::new("first", 1, "Return the argument", first);
        assert_eq!(f.call(&[Value::Int(7)]).unwrap(), Value::Int(7));
        assert!(matches!(
            f.call(&[]),
            Err(ModError::ArityMismatch { expected: 1, given: 0, .. })
        ));
    }

    #[test]
    fn test_int_is_not_a_str() {
        let err = Value::Int(1).as_str("reverse_string").unwrap_err();
        assert!(matches!(err, ModError::TypeMismatch { .. }));
    }
}
