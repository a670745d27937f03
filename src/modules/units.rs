use crate::core::namespace::{Namespace, NamespaceBuilder};
use crate::domain::model::Value;
use crate::domain::validated::{Temperature, ABSOLUTE_ZERO_C};
use crate::utils::error::Result;

pub const ID: &str = "units";

pub fn namespace() -> Result<Namespace> {
    NamespaceBuilder::module(ID)
        .doc("Temperature conversions")
        .function("celsius_to_fahrenheit", 1, "Convert degrees Celsius to Fahrenheit", |args| {
            let t = Temperature::from_celsius(args[0].as_float("celsius_to_fahrenheit")?)?;
            Ok(Value::Float(t.fahrenheit()))
        })
        .function("fahrenheit_to_celsius", 1, "Convert degrees Fahrenheit to Celsius", |args| {
            let t = Temperature::from_fahrenheit(args[0].as_float("fahrenheit_to_celsius")?)?;
            Ok(Value::Float(t.celsius()))
        })
        .constant("ABSOLUTE_ZERO_C", ABSOLUTE_ZERO_C)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ModError;

    #[test]
    fn test_conversions() {
        let ns = namespace().unwrap();
        assert_eq!(
            ns.call("celsius_to_fahrenheit", &[Value::Int(100)]).unwrap(),
            Value::Float(212.0)
        );
        assert_eq!(
            ns.call("fahrenheit_to_celsius", &[Value::Int(212)]).unwrap(),
            Value::Float(100.0)
        );
    }

    #[test]
    fn test_below_absolute_zero() {
        let ns = namespace().unwrap();
        assert!(matches!(
            ns.call("celsius_to_fahrenheit", &[Value::Float(-300.0)]),
            Err(ModError::DomainError { .. })
        ));
    }
}
