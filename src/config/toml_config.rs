use crate::domain::model::{ErrorPolicy, ImportSpec, StepSpec};
use crate::domain::ports::ScriptSource;
use crate::utils::error::{ModError, Result};
use crate::utils::validation::{
    validate_identifier, validate_module_id, validate_non_empty_string, validate_one_of, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A consumer script described in TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub script: ScriptMeta,
    pub options: Option<OptionsConfig>,
    #[serde(default, rename = "import")]
    pub imports: Vec<ImportSpec>,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptMeta {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    pub on_error: Option<String>,
}

const ON_ERROR_VALUES: [&str; 2] = ["abort", "report"];

const MODULES_DEMO: &str = include_str!("../../scripts/modules.toml");
const PACKAGES_DEMO: &str = include_str!("../../scripts/packages.toml");

impl ScriptConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// One of the bundled demo scripts, by name.
    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "modules" => Self::from_toml_str(MODULES_DEMO),
            "packages" => Self::from_toml_str(PACKAGES_DEMO),
            other => Err(ModError::InvalidConfigValueError {
                field: "demo".to_string(),
                value: other.to_string(),
                reason: "Expected one of: modules, packages".to_string(),
            }),
        }
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("substitution pattern is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn description(&self) -> Option<&str> {
        self.script.description.as_deref()
    }

    pub fn set_error_policy(&mut self, policy: ErrorPolicy) {
        let on_error = match policy {
            ErrorPolicy::Abort => "abort",
            ErrorPolicy::Report => "report",
        };
        self.options
            .get_or_insert(OptionsConfig { on_error: None })
            .on_error = Some(on_error.to_string());
    }
}

fn validate_import(index: usize, import: &ImportSpec) -> Result<()> {
    let field = format!("import[{}]", index);
    validate_module_id(&import.module)?;
    for name in &import.names {
        validate_identifier(name)?;
    }
    if let Some(alias) = &import.alias {
        validate_identifier(alias)?;
    }

    if import.all && (!import.names.is_empty() || import.alias.is_some()) {
        return Err(ModError::ConfigValidationError {
            field,
            message: "`all = true` cannot be combined with `names` or `alias`".to_string(),
        });
    }
    if import.alias.is_some() && import.names.len() > 1 {
        return Err(ModError::ConfigValidationError {
            field,
            message: "`alias` can rename a module or a single name, not several".to_string(),
        });
    }
    Ok(())
}

fn validate_step(index: usize, step: &StepSpec) -> Result<()> {
    let field = format!("step[{}]", index);
    match (&step.call, &step.get) {
        (Some(_), Some(_)) | (None, None) => Err(ModError::ConfigValidationError {
            field,
            message: "exactly one of `call` or `get` is required".to_string(),
        }),
        (None, Some(_)) if !step.args.is_empty() => Err(ModError::ConfigValidationError {
            field,
            message: "`args` only apply to `call`".to_string(),
        }),
        (Some(path), None) | (None, Some(path)) => validate_non_empty_string(&field, path),
    }
}

impl Validate for ScriptConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("script.name", &self.script.name)?;

        if let Some(on_error) = self.options.as_ref().and_then(|o| o.on_error.as_deref()) {
            validate_one_of("options.on_error", on_error, &ON_ERROR_VALUES)?;
        }

        if self.steps.is_empty() {
            return Err(ModError::ConfigValidationError {
                field: "step".to_string(),
                message: "a script needs at least one step".to_string(),
            });
        }

        for (index, import) in self.imports.iter().enumerate() {
            validate_import(index, import)?;
        }
        for (index, step) in self.steps.iter().enumerate() {
            validate_step(index, step)?;
        }
        Ok(())
    }
}

impl ScriptSource for ScriptConfig {
    fn name(&self) -> &str {
        &self.script.name
    }

    fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    fn error_policy(&self) -> ErrorPolicy {
        match self.options.as_ref().and_then(|o| o.on_error.as_deref()) {
            Some("report") => ErrorPolicy::Report,
            _ => ErrorPolicy::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[script]
name = "sample"

[options]
on_error = "report"

[[import]]
module = "calculator"
names = ["subtract"]
alias = "sub"

[[step]]
call = "sub"
args = [50, 10]
"#;

    #[test]
    fn test_parse_sample() {
        let config = ScriptConfig::from_toml_str(SAMPLE).unwrap();
        config.validate().unwrap();
        assert_eq!(config.name(), "sample");
        assert_eq!(config.error_policy(), ErrorPolicy::Report);
        assert_eq!(config.imports[0].alias.as_deref(), Some("sub"));
        assert_eq!(config.steps[0].args, vec![serde_json::json!(50), serde_json::json!(10)]);
    }

    #[test]
    fn test_error_policy_override() {
        let mut config = ScriptConfig::builtin("packages").unwrap();
        config.set_error_policy(ErrorPolicy::Report);
        assert_eq!(config.error_policy(), ErrorPolicy::Report);
        config.validate().unwrap();
    }

    #[test]
    fn test_builtin_demos_are_valid() {
        for name in ["modules", "packages"] {
            let config = ScriptConfig::builtin(name).unwrap();
            config.validate().unwrap();
            assert_eq!(config.error_policy(), ErrorPolicy::Abort);
        }
        assert!(ScriptConfig::builtin("oop").is_err());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("MODPACK_TEST_MODULE", "calculator");
        let content = SAMPLE.replace("\"calculator\"", "\"${MODPACK_TEST_MODULE}\"");
        let config = ScriptConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.imports[0].module, "calculator");

        let untouched = ScriptConfig::substitute_env_vars("${MODPACK_SURELY_UNSET_VAR}");
        assert_eq!(untouched, "${MODPACK_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_rejects_bad_policy() {
        let content = SAMPLE.replace("\"report\"", "\"ignore\"");
        let config = ScriptConfig::from_toml_str(&content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ModError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_rejects_alias_with_many_names() {
        let content = SAMPLE.replace("[\"subtract\"]", "[\"add\", \"subtract\"]");
        let config = ScriptConfig::from_toml_str(&content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ModError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_rejects_step_with_call_and_get() {
        let content = format!("{}get = \"calculator.PI\"\n", SAMPLE);
        let config = ScriptConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ScriptConfig::from_toml_str("[script"),
            Err(ModError::TomlError(_))
        ));
    }
}
