// ─── Module Loading ───
// Capability interfaces the provider consumes from its host, plus two
// implementations: an in-memory loader and a jar/directory classpath loader.

pub mod classpath;
pub mod memory;
pub mod module;

use std::path::PathBuf;

use crate::core::error::ProviderResult;

pub use classpath::ClasspathLoader;
pub use memory::MemoryLoader;
pub use module::LoadedModule;

/// Host facility that can find and run code units by symbol name.
///
/// `exists` and `location_of` must answer without initializing the symbol:
/// the entrypoint is looked up before the transformation pipeline runs.
#[cfg_attr(test, mockall::automock)]
pub trait ModuleLoader {
    /// Whether `name` is present and loadable.
    fn exists(&self, name: &str) -> bool;

    /// Physical location (archive or directory) `name` would be loaded from.
    fn location_of(&self, name: &str) -> Option<PathBuf>;

    /// Load `name` and run its entrypoint with `args`.
    fn load_and_invoke(&self, name: &str, args: &[String]) -> ProviderResult<()>;
}

/// Read/define access to module code, used to install patched modules
/// before the entrypoint runs.
pub trait ModuleSource {
    fn read_module(&self, name: &str) -> ProviderResult<LoadedModule>;

    /// Replace the code later loads of `name` will see.
    fn define_module(&mut self, module: LoadedModule);
}

/// Archive entry path for a dotted symbol name
/// (`a.b.Main` → `a/b/Main.class`).
pub fn entry_path(name: &str) -> String {
    format!("{}.class", name.replace('.', "/"))
}
