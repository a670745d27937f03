//! Built-in modules and the `utilities` package.

pub mod calculator;
pub mod geometry;
pub mod math_utils;
pub mod string_utils;
pub mod units;

use crate::core::registry::{ModuleDef, PackageDef, Registry};
use crate::utils::error::Result;

pub const UTILITIES: &str = "utilities";
pub const UTILITIES_VERSION: &str = "1.0.0";

/// Utilities package for common functions.
pub fn utilities_package() -> PackageDef {
    PackageDef::new(UTILITIES)
        .doc("Utilities package for common functions")
        .version(UTILITIES_VERSION)
        .author("modpack contributors")
        .reexport(math_utils::ID, &["factorial", "fibonacci"])
        .reexport(string_utils::ID, &["reverse_string", "capitalize_words"])
}

pub fn builtin_registry() -> Result<Registry> {
    Registry::builder()
        .module(ModuleDef::new(calculator::ID, calculator::namespace))
        .module(ModuleDef::new(math_utils::ID, math_utils::namespace))
        .module(ModuleDef::new(string_utils::ID, string_utils::namespace))
        .module(ModuleDef::new(geometry::ID, geometry::namespace))
        .module(ModuleDef::new(units::ID, units::namespace))
        .package(utilities_package())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_resolves() {
        let registry = builtin_registry().unwrap();
        let ids: Vec<String> = registry.ids().map(String::from).collect();
        assert_eq!(ids.len(), 6);
        for id in &ids {
            let ns = registry.resolve(id).unwrap();
            assert_eq!(ns.id(), id);
            assert!(!ns.is_empty(), "{} exports nothing", id);
        }
    }

    #[test]
    fn test_utilities_metadata() {
        let registry = builtin_registry().unwrap();
        let utilities = registry.resolve(UTILITIES).unwrap();
        assert_eq!(utilities.version(), Some("1.0.0"));
        assert_eq!(
            utilities.exports().collect::<Vec<_>>(),
            vec!["capitalize_words", "factorial", "fibonacci", "reverse_string"]
        );
    }
}
