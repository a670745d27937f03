pub mod config;
pub mod core;
pub mod domain;
pub mod modules;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::ScriptConfig;
pub use crate::core::{
    namespace::{Namespace, NamespaceBuilder},
    registry::{ModuleDef, PackageDef, Registry},
    scope::Scope,
    script::ScriptEngine,
};
pub use domain::model::{Symbol, Value};
pub use utils::error::{ModError, Result};
