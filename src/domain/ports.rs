use crate::core::namespace::Namespace;
use crate::domain::model::{ErrorPolicy, ImportSpec, StepSpec};
use crate::utils::error::Result;

/// Builds the namespace of a single module. Loaders must not print or
/// otherwise have observable side effects; the registry may call them
/// more than once under contention and keeps only the first result.
pub trait ModuleLoader: Send + Sync {
    fn id(&self) -> &str;
    fn load(&self) -> Result<Namespace>;
}

/// A consumer script: what to import and which symbols to use.
pub trait ScriptSource {
    fn name(&self) -> &str;
    fn imports(&self) -> &[ImportSpec];
    fn steps(&self) -> &[StepSpec];
    fn error_policy(&self) -> ErrorPolicy;
}
