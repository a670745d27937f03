use crate::core::namespace::{Namespace, NamespaceBuilder};
use crate::domain::model::Value;
use crate::domain::shapes::{Circle, Rectangle, Shape};
use crate::utils::error::Result;

pub const ID: &str = "geometry";

pub fn namespace() -> Result<Namespace> {
    NamespaceBuilder::module(ID)
        .doc("Areas and perimeters of simple shapes")
        .function("circle_area", 1, "Area of a circle with radius r", |args| {
            circle("circle_area", args).map(|c| Value::Float(c.area()))
        })
        .function("circle_perimeter", 1, "Circumference of a circle with radius r", |args| {
            circle("circle_perimeter", args).map(|c| Value::Float(c.perimeter()))
        })
        .function("rectangle_area", 2, "Area of a w by h rectangle", |args| {
            rectangle("rectangle_area", args).map(|r| Value::Float(r.area()))
        })
        .function("rectangle_perimeter", 2, "Perimeter of a w by h rectangle", |args| {
            rectangle("rectangle_perimeter", args).map(|r| Value::Float(r.perimeter()))
        })
        .build()
}

fn circle(name: &str, args: &[Value]) -> Result<Circle> {
    Circle::new(args[0].as_float(name)?)
}

fn rectangle(name: &str, args: &[Value]) -> Result<Rectangle> {
    Rectangle::new(args[0].as_float(name)?, args[1].as_float(name)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ModError;

    #[test]
    fn test_rectangle_functions() {
        let ns = namespace().unwrap();
        assert_eq!(
            ns.call("rectangle_area", &[Value::Int(4), Value::Int(5)]).unwrap(),
            Value::Float(20.0)
        );
        assert_eq!(
            ns.call("rectangle_perimeter", &[Value::Int(4), Value::Float(5.5)])
                .unwrap(),
            Value::Float(19.0)
        );
    }

    #[test]
    fn test_negative_radius_is_a_domain_error() {
        let ns = namespace().unwrap();
        assert!(matches!(
            ns.call("circle_area", &[Value::Int(-2)]),
            Err(ModError::DomainError { .. })
        ));
    }
}
