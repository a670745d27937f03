use crate::core::namespace::{Namespace, NamespaceBuilder};
use crate::domain::ports::ModuleLoader;
use crate::utils::error::{ModError, Result};
use crate::utils::validation::validate_module_id;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// A module whose namespace is produced by a plain function.
pub struct ModuleDef {
    id: String,
    build: fn() -> Result<Namespace>,
}

impl ModuleDef {
    pub fn new(id: impl Into<String>, build: fn() -> Result<Namespace>) -> Self {
        Self {
            id: id.into(),
            build,
        }
    }
}

impl ModuleLoader for ModuleDef {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<Namespace> {
        (self.build)()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reexport {
    pub module: String,
    pub names: Vec<String>,
}

/// A package: an explicit allow-list of names taken from its modules.
#[derive(Debug, Clone, Default)]
pub struct PackageDef {
    id: String,
    doc: String,
    version: Option<String>,
    author: Option<String>,
    reexports: Vec<Reexport>,
}

impl PackageDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn reexport(mut self, module: impl Into<String>, names: &[&str]) -> Self {
        self.reexports.push(Reexport {
            module: module.into(),
            names: names.iter().map(|n| n.to_string()).collect(),
        });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn reexports(&self) -> &[Reexport] {
        &self.reexports
    }
}

enum Definition {
    Module(Box<dyn ModuleLoader>),
    Package(PackageDef),
}

#[derive(Default)]
pub struct RegistryBuilder {
    definitions: BTreeMap<String, Definition>,
    errors: Vec<ModError>,
}

impl RegistryBuilder {
    pub fn module<L: ModuleLoader + 'static>(self, loader: L) -> Self {
        let id = loader.id().to_string();
        self.define(id, Definition::Module(Box::new(loader)))
    }

    pub fn package(self, def: PackageDef) -> Self {
        let id = def.id.clone();
        self.define(id, Definition::Package(def))
    }

    fn define(mut self, id: String, definition: Definition) -> Self {
        if let Err(e) = validate_module_id(&id) {
            self.errors.push(e);
        } else if self.definitions.contains_key(&id) {
            self.errors.push(ModError::DuplicateModule { id });
        } else {
            self.definitions.insert(id, definition);
        }
        self
    }

    pub fn build(mut self) -> Result<Registry> {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }
        Ok(Registry {
            definitions: self.definitions,
            cache: Mutex::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        })
    }
}

/// Resolves module and package ids to namespaces, loading each one once.
///
/// The set of definitions is fixed when the registry is built. The first
/// successful resolution of an id is cached and every later resolution
/// returns the same `Arc`.
pub struct Registry {
    definitions: BTreeMap<String, Definition>,
    cache: Mutex<HashMap<String, Arc<Namespace>>>,
    loads: AtomicUsize,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The process-wide registry of built-in modules, created on first use.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            tracing::debug!("Initializing global module registry");
            // built-in definitions are static; modules::tests::test_every_builtin_resolves covers them
            crate::modules::builtin_registry().expect("built-in module definitions are well formed")
        })
    }

    pub fn resolve(&self, id: &str) -> Result<Arc<Namespace>> {
        self.resolve_in(id, &mut Vec::new())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.lock_cache().contains_key(id)
    }

    /// Number of namespaces that have been loaded and cached so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, Arc<Namespace>>> {
        // entries are only ever inserted whole, so a poisoned map is still consistent
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve_in(&self, id: &str, chain: &mut Vec<String>) -> Result<Arc<Namespace>> {
        if let Some(ns) = self.lock_cache().get(id) {
            tracing::debug!("Resolved '{}' from cache", id);
            return Ok(Arc::clone(ns));
        }

        let definition = self
            .definitions
            .get(id)
            .ok_or_else(|| ModError::ModuleNotFound { id: id.to_string() })?;

        if chain.iter().any(|seen| seen == id) {
            chain.push(id.to_string());
            return Err(ModError::CircularImport {
                chain: chain.join(" -> "),
            });
        }

        chain.push(id.to_string());
        let built = match definition {
            Definition::Module(loader) => loader.load(),
            Definition::Package(def) => self.build_package(def, chain),
        };
        chain.pop();

        Ok(self.store(id, built?))
    }

    fn build_package(&self, def: &PackageDef, chain: &mut Vec<String>) -> Result<Namespace> {
        let mut builder = NamespaceBuilder::package(&def.id).doc(&def.doc);
        if let Some(version) = &def.version {
            builder = builder.version(version);
        }
        if let Some(author) = &def.author {
            builder = builder.author(author);
        }

        for reexport in &def.reexports {
            let module = self.resolve_in(&reexport.module, chain)?;
            builder = builder.submodule(module.id());
            for (name, symbol) in module.select(&reexport.names)? {
                builder = builder.symbol(&name, symbol);
            }
        }

        builder.build()
    }

    fn store(&self, id: &str, namespace: Namespace) -> Arc<Namespace> {
        let mut cache = self.lock_cache();
        let entry = cache.entry(id.to_string()).or_insert_with(|| {
            self.loads.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Loaded '{}' with {} export(s)", id, namespace.len());
            Arc::new(namespace)
        });
        Arc::clone(entry)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("definitions", &self.definitions.keys().collect::<Vec<_>>())
            .field("loads", &self.load_count())
            .finish()
    }
}
