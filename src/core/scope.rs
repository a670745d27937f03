use crate::core::namespace::Namespace;
use crate::core::registry::Registry;
use crate::domain::model::{Symbol, Value};
use crate::utils::error::{ModError, Result};
use crate::utils::validation::validate_identifier;
use std::collections::HashMap;
use std::sync::Arc;

const SCOPE: &str = "<scope>";

#[derive(Debug, Clone)]
pub enum Binding {
    Namespace(Arc<Namespace>),
    Symbol(Symbol),
}

/// A consumer's local names, filled by the import forms.
///
/// Binding a name never touches the namespace it came from.
#[derive(Debug)]
pub struct Scope<'r> {
    registry: &'r Registry,
    bindings: HashMap<String, Binding>,
}

impl<'r> Scope<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            bindings: HashMap::new(),
        }
    }

    /// `import calculator`
    pub fn import(&mut self, id: &str) -> Result<Arc<Namespace>> {
        let ns = self.registry.resolve(id)?;
        self.bind(id.to_string(), Binding::Namespace(Arc::clone(&ns)));
        Ok(ns)
    }

    /// `import calculator as calc`
    pub fn import_as(&mut self, id: &str, alias: &str) -> Result<Arc<Namespace>> {
        validate_identifier(alias)?;
        let ns = self.registry.resolve(id)?;
        self.bind(alias.to_string(), Binding::Namespace(Arc::clone(&ns)));
        Ok(ns)
    }

    /// `from calculator import add, subtract`
    pub fn from_import<S: AsRef<str>>(&mut self, id: &str, names: &[S]) -> Result<()> {
        let ns = self.registry.resolve(id)?;
        for (name, symbol) in ns.select(names)? {
            self.bind(name, Binding::Symbol(symbol));
        }
        Ok(())
    }

    /// `from calculator import subtract as sub`
    pub fn from_import_as(&mut self, id: &str, name: &str, alias: &str) -> Result<()> {
        validate_identifier(alias)?;
        let ns = self.registry.resolve(id)?;
        let symbol = ns.get(name)?.clone();
        self.bind(alias.to_string(), Binding::Symbol(symbol));
        Ok(())
    }

    /// `from calculator import *`
    pub fn import_all(&mut self, id: &str) -> Result<usize> {
        let ns = self.registry.resolve(id)?;
        for (name, symbol) in ns.symbols() {
            self.bind(name.to_string(), Binding::Symbol(symbol.clone()));
        }
        Ok(ns.len())
    }

    fn bind(&mut self, name: String, binding: Binding) {
        tracing::debug!("Binding '{}'", name);
        self.bindings.insert(name, binding);
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Looks up a local name, or `qualifier.member` where the qualifier is a
    /// bound namespace (possibly itself dotted, as after `import a.b`).
    pub fn lookup(&self, path: &str) -> Result<Symbol> {
        match self.bindings.get(path) {
            Some(Binding::Symbol(symbol)) => return Ok(symbol.clone()),
            Some(Binding::Namespace(_)) => {
                return Err(ModError::NotASymbol {
                    name: path.to_string(),
                })
            }
            None => {}
        }

        let (qualifier, member) = path
            .rsplit_once('.')
            .ok_or_else(|| ModError::name_not_found(SCOPE, path))?;

        match self.bindings.get(qualifier) {
            Some(Binding::Namespace(ns)) => ns.get(member).cloned(),
            Some(Binding::Symbol(_)) => Err(ModError::name_not_found(qualifier, member)),
            None => Err(ModError::name_not_found(SCOPE, qualifier)),
        }
    }

    pub fn namespace(&self, name: &str) -> Option<&Arc<Namespace>> {
        match self.bindings.get(name) {
            Some(Binding::Namespace(ns)) => Some(ns),
            _ => None,
        }
    }

    pub fn call(&self, path: &str, args: &[Value]) -> Result<Value> {
        let symbol = self.lookup(path)?;
        symbol.as_function(path)?.call(args)
    }

    /// The value of a constant, or an error for functions.
    pub fn get(&self, path: &str) -> Result<Value> {
        match self.lookup(path)? {
            Symbol::Constant(value) => Ok(value),
            Symbol::Function(function) => Err(ModError::TypeMismatch {
                function: path.to_string(),
                expected: "constant".to_string(),
                found: format!("function {}()", function.name),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::namespace::NamespaceBuilder;
    use crate::core::registry::ModuleDef;

    fn add(args: &[Value]) -> Result<Value> {
        Ok(Value::Int(args[0].as_int("add")? + args[1].as_int("add")?))
    }

    fn calc() -> Result<Namespace> {
        NamespaceBuilder::module("calc.core")
            .function("add", 2, "Add two numbers", add)
            .constant("PI", 3.14159)
            .build()
    }

    fn registry() -> Registry {
        Registry::builder()
            .module(ModuleDef::new("calc.core", calc))
            .build()
            .unwrap()
    }

    #[test]
    fn test_qualified_access_through_dotted_import() {
        let reg = registry();
        let mut scope = Scope::new(&reg);
        scope.import("calc.core").unwrap();
        let sum = scope
            .call("calc.core.add", &[Value::Int(10), Value::Int(5)])
            .unwrap();
        assert_eq!(sum, Value::Int(15));
        assert_eq!(scope.get("calc.core.PI").unwrap(), Value::Float(3.14159));
    }

    #[test]
    fn test_alias_shares_the_namespace() {
        let reg = registry();
        let mut scope = Scope::new(&reg);
        let direct = scope.import("calc.core").unwrap();
        let aliased = scope.import_as("calc.core", "c").unwrap();
        assert!(Arc::ptr_eq(&direct, &aliased));
        assert!(Arc::ptr_eq(scope.namespace("c").unwrap(), &direct));
        assert_eq!(direct.id(), "calc.core");
    }

    #[test]
    fn test_failed_selective_import_binds_nothing() {
        let reg = registry();
        let mut scope = Scope::new(&reg);
        let err = scope.from_import("calc.core", &["add", "multiply"]).unwrap_err();
        assert!(matches!(err, ModError::NameNotFound { ref name, .. } if name == "multiply"));
        assert!(!scope.is_bound("add"));
        assert!(scope.names().is_empty());
    }

    #[test]
    fn test_function_alias() {
        let reg = registry();
        let mut scope = Scope::new(&reg);
        scope.from_import_as("calc.core", "add", "plus").unwrap();
        assert_eq!(
            scope.call("plus", &[Value::Int(1), Value::Int(2)]).unwrap(),
            Value::Int(3)
        );
        assert!(!scope.is_bound("add"));
        assert!(scope.from_import_as("calc.core", "add", "no good").is_err());
    }

    #[test]
    fn test_import_all() {
        let reg = registry();
        let mut scope = Scope::new(&reg);
        assert_eq!(scope.import_all("calc.core").unwrap(), 2);
        assert_eq!(scope.names(), vec!["PI", "add"]);
    }

    #[test]
    fn test_unbound_names() {
        let reg = registry();
        let mut scope = Scope::new(&reg);
        assert!(matches!(
            scope.call("add", &[]),
            Err(ModError::NameNotFound { .. })
        ));
        scope.import_as("calc.core", "c").unwrap();
        assert!(matches!(
            scope.call("c.sub", &[]),
            Err(ModError::NameNotFound { .. })
        ));
        assert!(scope.get("c.add").is_err());
    }

    #[test]
    fn test_namespace_is_not_a_value() {
        let reg = registry();
        let mut scope = Scope::new(&reg);
        scope.import_as("calc.core", "c").unwrap();
        let err = scope.call("c", &[]).unwrap_err();
        assert!(matches!(err, ModError::NotASymbol { ref name } if name == "c"));
        assert_eq!(err.to_string(), "'c' is a module, not a function or constant");
        assert!(matches!(scope.get("c"), Err(ModError::NotASymbol { .. })));

        scope.import("calc.core").unwrap();
        assert!(matches!(
            scope.get("calc.core"),
            Err(ModError::NotASymbol { .. })
        ));
        assert!(matches!(
            scope.call("calc.core.PI", &[]),
            Err(ModError::NotCallable { .. })
        ));
    }
}
