use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModError {
    #[error("name '{name}' not found in '{namespace}'")]
    NameNotFound { namespace: String, name: String },

    #[error("no module or package named '{id}'")]
    ModuleNotFound { id: String },

    #[error("{operation}: {message}")]
    DomainError { operation: String, message: String },

    #[error("{function}() takes {expected} argument(s) but {given} were given")]
    ArityMismatch {
        function: String,
        expected: usize,
        given: usize,
    },

    #[error("{function}(): expected {expected}, got {found}")]
    TypeMismatch {
        function: String,
        expected: String,
        found: String,
    },

    #[error("'{name}' is a constant, not a function")]
    NotCallable { name: String },

    #[error("'{name}' is a module, not a function or constant")]
    NotASymbol { name: String },

    #[error("'{name}' is exported more than once from '{namespace}'")]
    DuplicateSymbol { namespace: String, name: String },

    #[error("module '{id}' is already registered")]
    DuplicateModule { id: String },

    #[error("circular import: {chain}")]
    CircularImport { chain: String },

    #[error("'{value}' is not a valid identifier")]
    InvalidIdentifier { value: String },

    #[error("{user} is not allowed to {action}")]
    PermissionDenied { user: String, action: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Resolution,
    Domain,
    Invocation,
    Definition,
    Access,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ModError {
    pub fn domain(operation: impl Into<String>, message: impl Into<String>) -> Self {
        ModError::DomainError {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn name_not_found(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        ModError::NameNotFound {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ModError::NameNotFound { .. }
            | ModError::ModuleNotFound { .. }
            | ModError::CircularImport { .. } => ErrorCategory::Resolution,
            ModError::DomainError { .. } => ErrorCategory::Domain,
            ModError::ArityMismatch { .. }
            | ModError::TypeMismatch { .. }
            | ModError::NotCallable { .. }
            | ModError::NotASymbol { .. } => ErrorCategory::Invocation,
            ModError::DuplicateSymbol { .. }
            | ModError::DuplicateModule { .. }
            | ModError::InvalidIdentifier { .. } => ErrorCategory::Definition,
            ModError::PermissionDenied { .. } => ErrorCategory::Access,
            ModError::TomlError(_)
            | ModError::ConfigValidationError { .. }
            | ModError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ModError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Access => ErrorSeverity::Medium,
            ErrorCategory::Domain
            | ErrorCategory::Resolution
            | ErrorCategory::Invocation
            | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Definition | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for a run that ended with this error. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ModError::NameNotFound { namespace, name } => {
                format!("Cannot import '{}' from '{}'", name, namespace)
            }
            ModError::ModuleNotFound { id } => format!("Unknown module '{}'", id),
            ModError::DomainError { operation, message } => {
                format!("{} rejected its input: {}", operation, message)
            }
            ModError::NotASymbol { name } => {
                format!("'{}' names a module; use '{}.<member>'", name, name)
            }
            ModError::IoError(e) => format!("Could not read or write a file: {}", e),
            ModError::TomlError(e) => format!("The script manifest is not valid TOML: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Resolution => {
                "Run `modpack list` to see registered modules and `modpack list <id>` for their exports"
            }
            ErrorCategory::Domain => "Check the argument against the function's documented range",
            ErrorCategory::Invocation => {
                "Check the number and type of arguments passed to the function"
            }
            ErrorCategory::Definition => "Fix the module definition; names must be unique identifiers",
            ErrorCategory::Access => "Grant the missing permission before retrying",
            ErrorCategory::Configuration => "Fix the script manifest and run again",
            ErrorCategory::System => "Check that the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ModError>;
