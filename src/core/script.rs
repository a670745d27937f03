use crate::core::registry::Registry;
use crate::core::scope::Scope;
use crate::domain::model::{ErrorPolicy, ImportSpec, ScriptReport, StepSpec, Value};
use crate::domain::ports::ScriptSource;
use crate::utils::error::{ModError, Result};
use std::io::Write;

/// Runs a consumer script: imports first, then each step in order.
pub struct ScriptEngine<S: ScriptSource> {
    source: S,
}

impl<S: ScriptSource> ScriptEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// What the script would do, one line per import and step. Resolves nothing.
    pub fn plan(&self) -> Vec<String> {
        let imports = self.source.imports().iter().map(describe_import);
        let steps = self.source.steps().iter().map(describe_step);
        imports.chain(steps).collect()
    }

    pub fn run<W: Write>(&self, registry: &Registry, out: &mut W) -> Result<ScriptReport> {
        let run_id = format!(
            "{}_{}",
            self.source.name(),
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        tracing::info!("Starting script '{}' (run {})", self.source.name(), run_id);

        let mut scope = Scope::new(registry);
        for import in self.source.imports() {
            tracing::debug!("{}", describe_import(import));
            apply_import(&mut scope, import)?;
        }

        let mut report = ScriptReport {
            run_id,
            ..Default::default()
        };

        for step in self.source.steps() {
            report.steps_run += 1;
            match run_step(&scope, step) {
                Ok(value) => writeln!(out, "{}: {}", step_title(step), value)?,
                Err(e) => match self.source.error_policy() {
                    ErrorPolicy::Abort => return Err(e),
                    ErrorPolicy::Report => {
                        tracing::warn!("Step '{}' failed: {}", step_title(step), e);
                        writeln!(out, "{}: error: {}", step_title(step), e)?;
                        report.failures += 1;
                    }
                },
            }
        }

        tracing::info!(
            "Script '{}' finished: {} step(s), {} failure(s)",
            self.source.name(),
            report.steps_run,
            report.failures
        );
        Ok(report)
    }
}

fn apply_import(scope: &mut Scope<'_>, import: &ImportSpec) -> Result<()> {
    if import.all {
        scope.import_all(&import.module)?;
        return Ok(());
    }
    match (import.names.as_slice(), import.alias.as_deref()) {
        ([], None) => scope.import(&import.module).map(|_| ()),
        ([], Some(alias)) => scope.import_as(&import.module, alias).map(|_| ()),
        ([name], Some(alias)) => scope.from_import_as(&import.module, name, alias),
        (names, _) => scope.from_import(&import.module, names),
    }
}

fn run_step(scope: &Scope<'_>, step: &StepSpec) -> Result<Value> {
    match (&step.call, &step.get) {
        (Some(path), _) => {
            let args = step
                .args
                .iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()?;
            scope.call(path, &args)
        }
        (None, Some(path)) => scope.get(path),
        (None, None) => Err(ModError::ConfigValidationError {
            field: "step".to_string(),
            message: "a step needs either `call` or `get`".to_string(),
        }),
    }
}

fn step_title(step: &StepSpec) -> String {
    if let Some(label) = &step.label {
        return label.clone();
    }
    describe_step(step)
}

pub fn describe_import(import: &ImportSpec) -> String {
    if import.all {
        return format!("from {} import *", import.module);
    }
    match (import.names.as_slice(), import.alias.as_deref()) {
        ([], None) => format!("import {}", import.module),
        ([], Some(alias)) => format!("import {} as {}", import.module, alias),
        ([name], Some(alias)) => format!("from {} import {} as {}", import.module, name, alias),
        (names, _) => format!("from {} import {}", import.module, names.join(", ")),
    }
}

pub fn describe_step(step: &StepSpec) -> String {
    match (&step.call, &step.get) {
        (Some(path), _) => {
            let args: Vec<String> = step
                .args
                .iter()
                .map(|arg| match Value::try_from(arg) {
                    Ok(value) => value.repr(),
                    Err(_) => arg.to_string(),
                })
                .collect();
            format!("{}({})", path, args.join(", "))
        }
        (None, Some(path)) => path.clone(),
        (None, None) => "<empty step>".to_string(),
    }
}
