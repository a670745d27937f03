use crate::domain::model::{Function, NamespaceKind, NativeFn, Symbol, Value};
use crate::utils::error::{ModError, Result};
use crate::utils::validation::{validate_identifier, validate_module_id};
use std::collections::BTreeMap;

/// A frozen mapping from exported name to symbol.
///
/// Built once through [`NamespaceBuilder`]; there is no way to add, remove
/// or replace an export afterwards.
#[derive(Debug)]
pub struct Namespace {
    id: String,
    kind: NamespaceKind,
    doc: String,
    version: Option<String>,
    author: Option<String>,
    submodules: Vec<String>,
    symbols: BTreeMap<String, Symbol>,
}

impl Namespace {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NamespaceKind {
        self.kind
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn submodules(&self) -> &[String] {
        &self.submodules
    }

    pub fn get(&self, name: &str) -> Result<&Symbol> {
        self.symbols
            .get(name)
            .ok_or_else(|| ModError::name_not_found(&self.id, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn exports(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Bindings for exactly `names`, in request order. All or nothing.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<(String, Symbol)>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name).map(|symbol| (name.to_string(), symbol.clone()))
            })
            .collect()
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.get(name)?.as_function(name)?.call(args)
    }
}

#[derive(Debug)]
pub struct NamespaceBuilder {
    namespace: Namespace,
    errors: Vec<ModError>,
}

impl NamespaceBuilder {
    pub fn module(id: impl Into<String>) -> Self {
        Self::new(id.into(), NamespaceKind::Module)
    }

    pub fn package(id: impl Into<String>) -> Self {
        Self::new(id.into(), NamespaceKind::Package)
    }

    fn new(id: String, kind: NamespaceKind) -> Self {
        let mut errors = Vec::new();
        if let Err(e) = validate_module_id(&id) {
            errors.push(e);
        }
        Self {
            namespace: Namespace {
                id,
                kind,
                doc: String::new(),
                version: None,
                author: None,
                submodules: Vec::new(),
                symbols: BTreeMap::new(),
            },
            errors,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.namespace.doc = doc.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.namespace.version = Some(version.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.namespace.author = Some(author.into());
        self
    }

    pub fn submodule(mut self, id: impl Into<String>) -> Self {
        self.namespace.submodules.push(id.into());
        self
    }

    pub fn function(self, name: &str, arity: usize, doc: &str, call: NativeFn) -> Self {
        self.symbol(name, Symbol::Function(Function::new(name, arity, doc, call)))
    }

    pub fn constant(self, name: &str, value: impl Into<Value>) -> Self {
        self.symbol(name, Symbol::Constant(value.into()))
    }

    /// Adds an already-built symbol, e.g. one re-exported from another namespace.
    pub fn symbol(mut self, name: &str, symbol: Symbol) -> Self {
        if let Err(e) = validate_identifier(name) {
            self.errors.push(e);
            return self;
        }
        if self.namespace.symbols.contains_key(name) {
            self.errors.push(ModError::DuplicateSymbol {
                namespace: self.namespace.id.clone(),
                name: name.to_string(),
            });
            return self;
        }
        self.namespace.symbols.insert(name.to_string(), symbol);
        self
    }

    /// Freezes the namespace. Reports the first definition error, if any.
    pub fn build(mut self) -> Result<Namespace> {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }
        Ok(self.namespace)
    }
}
