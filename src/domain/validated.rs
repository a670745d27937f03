use crate::utils::error::{ModError, Result};
use crate::utils::validation::validate_range;
use std::fmt;

pub const ABSOLUTE_ZERO_C: f64 = -273.15;
pub const MAX_AGE: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Result<Self> {
        let mut person = Self {
            name: String::new(),
            age: 0,
        };
        person.set_name(name)?;
        person.set_age(age)?;
        Ok(person)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModError::domain("person.name", "Name must be a non-empty string"));
        }
        self.name = name;
        Ok(())
    }

    pub fn set_age(&mut self, age: u32) -> Result<()> {
        validate_range("person.age", age, 0, MAX_AGE)?;
        self.age = age;
        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person({}, {})", self.name, self.age)
    }
}

/// Stored in celsius; never below absolute zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    celsius: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Result<Self> {
        let mut t = Self { celsius: 0.0 };
        t.set_celsius(celsius)?;
        Ok(t)
    }

    pub fn from_fahrenheit(fahrenheit: f64) -> Result<Self> {
        let mut t = Self { celsius: 0.0 };
        t.set_fahrenheit(fahrenheit)?;
        Ok(t)
    }

    pub fn celsius(&self) -> f64 {
        self.celsius
    }

    pub fn fahrenheit(&self) -> f64 {
        self.celsius * 9.0 / 5.0 + 32.0
    }

    pub fn set_celsius(&mut self, celsius: f64) -> Result<()> {
        if celsius.is_nan() || celsius < ABSOLUTE_ZERO_C {
            return Err(ModError::domain(
                "temperature",
                "Temperature below absolute zero is not possible",
            ));
        }
        self.celsius = celsius;
        Ok(())
    }

    pub fn set_fahrenheit(&mut self, fahrenheit: f64) -> Result<()> {
        self.set_celsius((fahrenheit - 32.0) * 5.0 / 9.0)
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self { celsius: 0.0 }
    }
}
