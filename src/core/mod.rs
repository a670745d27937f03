pub mod namespace;
pub mod registry;
pub mod scope;
pub mod script;

pub use crate::domain::model::{Function, Symbol, Value};
pub use crate::domain::ports::{ModuleLoader, ScriptSource};
pub use crate::utils::error::Result;
