use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{LoadedModule, ModuleLoader, ModuleSource};
use crate::core::error::{ProviderError, ProviderResult};

/// Entrypoint body run by [`MemoryLoader::load_and_invoke`]. Receives the
/// module as currently defined (patched or not) and the launch arguments.
pub type EntrypointFn = Box<dyn Fn(&LoadedModule, &[String]) -> ProviderResult<()>>;

struct MemoryModule {
    location: PathBuf,
    module: LoadedModule,
    entrypoint: Option<EntrypointFn>,
}

/// Loader over modules registered in memory.
///
/// Intended for embedding hosts that already hold module bytes, and for
/// tests. Every invocation is recorded.
#[derive(Default)]
pub struct MemoryLoader {
    modules: BTreeMap<String, MemoryModule>,
    invocations: RefCell<Vec<(String, Vec<String>)>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register module `name` with `bytes`, loaded from `location`.
    pub fn with_module(mut self, name: &str, location: impl AsRef<Path>, bytes: Vec<u8>) -> Self {
        self.modules.insert(
            name.to_string(),
            MemoryModule {
                location: location.as_ref().to_path_buf(),
                module: LoadedModule::new(name, bytes),
                entrypoint: None,
            },
        );
        self
    }

    /// Attach an entrypoint body to an already registered module.
    pub fn with_entrypoint<F>(mut self, name: &str, entrypoint: F) -> Self
    where
        F: Fn(&LoadedModule, &[String]) -> ProviderResult<()> + 'static,
    {
        if let Some(entry) = self.modules.get_mut(name) {
            entry.entrypoint = Some(Box::new(entrypoint));
        }
        self
    }

    /// `(name, args)` of every `load_and_invoke` call so far.
    pub fn invocations(&self) -> Vec<(String, Vec<String>)> {
        self.invocations.borrow().clone()
    }
}

impl ModuleLoader for MemoryLoader {
    fn exists(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    fn location_of(&self, name: &str) -> Option<PathBuf> {
        self.modules.get(name).map(|entry| entry.location.clone())
    }

    fn load_and_invoke(&self, name: &str, args: &[String]) -> ProviderResult<()> {
        let entry = self
            .modules
            .get(name)
            .ok_or_else(|| ProviderError::ModuleNotFound(name.to_string()))?;

        self.invocations
            .borrow_mut()
            .push((name.to_string(), args.to_vec()));

        let entrypoint = entry.entrypoint.as_ref().ok_or_else(|| {
            ProviderError::Other(format!("{} has no entrypoint registered", name))
        })?;

        debug!("Invoking in-memory entrypoint {}", name);
        entrypoint(&entry.module, args)
    }
}

impl ModuleSource for MemoryLoader {
    fn read_module(&self, name: &str) -> ProviderResult<LoadedModule> {
        self.modules
            .get(name)
            .map(|entry| entry.module.clone())
            .ok_or_else(|| ProviderError::ModuleNotFound(name.to_string()))
    }

    fn define_module(&mut self, module: LoadedModule) {
        match self.modules.get_mut(module.name()) {
            Some(entry) => entry.module = module,
            None => {
                let name = module.name().to_string();
                self.modules.insert(
                    name,
                    MemoryModule {
                        location: PathBuf::new(),
                        module,
                        entrypoint: None,
                    },
                );
            }
        }
    }
}
