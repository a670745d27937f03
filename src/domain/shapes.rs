use crate::utils::error::{ModError, Result};
use std::f64::consts::PI;

pub trait Shape {
    fn name(&self) -> &'static str;
    fn area(&self) -> f64;
    fn perimeter(&self) -> f64;
}

fn check_dimension(shape: &str, field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModError::domain(
            shape,
            format!("{} must be a non-negative number, got {}", field, value),
        ));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self> {
        Ok(Self {
            radius: check_dimension("circle", "radius", radius)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Ok(Self {
            width: check_dimension("rectangle", "width", width)?,
            height: check_dimension("rectangle", "height", height)?,
        })
    }
}

impl Shape for Rectangle {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }
}

/// The closed set of shapes, for callers that hold a mix of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyShape {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape for AnyShape {
    fn name(&self) -> &'static str {
        match self {
            AnyShape::Circle(c) => c.name(),
            AnyShape::Rectangle(r) => r.name(),
        }
    }

    fn area(&self) -> f64 {
        match self {
            AnyShape::Circle(c) => c.area(),
            AnyShape::Rectangle(r) => r.area(),
        }
    }

    fn perimeter(&self) -> f64 {
        match self {
            AnyShape::Circle(c) => c.perimeter(),
            AnyShape::Rectangle(r) => r.perimeter(),
        }
    }
}

impl From<Circle> for AnyShape {
    fn from(c: Circle) -> Self {
        AnyShape::Circle(c)
    }
}

impl From<Rectangle> for AnyShape {
    fn from(r: Rectangle) -> Self {
        AnyShape::Rectangle(r)
    }
}

pub fn total_area(shapes: &[AnyShape]) -> f64 {
    shapes.iter().map(Shape::area).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle() {
        let r = Rectangle::new(4.0, 5.0).unwrap();
        assert_eq!(r.area(), 20.0);
        assert_eq!(r.perimeter(), 18.0);
    }

    #[test]
    fn test_circle() {
        let c = Circle::new(1.0).unwrap();
        assert!((c.area() - PI).abs() < 1e-12);
        assert!((c.perimeter() - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_negative_dimensions_are_rejected() {
        assert!(matches!(Circle::new(-1.0), Err(ModError::DomainError { .. })));
        assert!(matches!(
            Rectangle::new(2.0, -0.5),
            Err(ModError::DomainError { .. })
        ));
        assert!(Circle::new(f64::NAN).is_err());
    }

    #[test]
    fn test_mixed_shapes_dispatch() {
        let shapes: Vec<AnyShape> = vec![
            Rectangle::new(2.0, 3.0).unwrap().into(),
            Rectangle::new(1.0, 1.0).unwrap().into(),
        ];
        assert_eq!(total_area(&shapes), 7.0);
        assert_eq!(shapes[0].name(), "rectangle");
    }
}
