pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::{ModError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_module_id, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "modpack")]
#[command(about = "Resolve built-in modules and packages, import from them and call their functions")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run one of the bundled consumer scripts
    Demo {
        #[arg(value_enum)]
        name: DemoName,
    },
    /// Call a function by its qualified name, e.g. `utilities.factorial 5`
    Call {
        path: String,
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },
    /// List registered modules, or the exports of one of them
    List { id: Option<String> },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoName {
    Modules,
    Packages,
}

#[cfg(feature = "cli")]
impl DemoName {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoName::Modules => "modules",
            DemoName::Packages => "packages",
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Call { path, .. } => {
                let (module, _) = path.rsplit_once('.').ok_or_else(|| {
                    ModError::InvalidConfigValueError {
                        field: "path".to_string(),
                        value: path.clone(),
                        reason: "Expected <module>.<function>".to_string(),
                    }
                })?;
                validate_module_id(path)?;
                validate_module_id(module)
            }
            Command::List { id: Some(id) } => validate_module_id(id),
            _ => Ok(()),
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call_with_negative_argument() {
        let config = CliConfig::parse_from(["modpack", "call", "utilities.factorial", "-3"]);
        match &config.command {
            Command::Call { path, args } => {
                assert_eq!(path, "utilities.factorial");
                assert_eq!(args, &vec!["-3".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        config.validate().unwrap();
    }

    #[test]
    fn test_call_needs_a_qualified_path() {
        let config = CliConfig::parse_from(["modpack", "call", "factorial", "5"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_demo() {
        let config = CliConfig::parse_from(["modpack", "--verbose", "demo", "packages"]);
        assert!(config.verbose);
        assert!(matches!(
            config.command,
            Command::Demo {
                name: DemoName::Packages
            }
        ));
    }
}
