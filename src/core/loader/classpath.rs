// ─── Classpath Loader ───
// Looks symbols up inside jar archives and class directories, and runs the
// entrypoint in a child JVM with patched modules overlaid first.

use std::cell::OnceCell;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, info, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use super::{entry_path, LoadedModule, ModuleLoader, ModuleSource};
use crate::core::args::sanitize_launch_args;
use crate::core::error::{ProviderError, ProviderResult};

/// Loader over an ordered list of classpath roots (`.jar`/`.zip` archives
/// or class directories).
///
/// Presence and location queries only read archive directories; nothing is
/// loaded or initialized. Modules defined through [`ModuleSource`] are
/// written to an overlay directory that precedes every root on the child
/// classpath. The overlay is a private temp directory removed when the
/// loader is dropped, unless a fixed one is set with `with_overlay_dir`.
pub struct ClasspathLoader {
    roots: Vec<PathBuf>,
    java_bin: PathBuf,
    jvm_args: Vec<String>,
    overlay_dir: Option<PathBuf>,
    owned_overlay: OnceCell<TempDir>,
    defined: BTreeMap<String, LoadedModule>,
}

/// Largest read buffer preallocated from an archive's declared entry size.
const MAX_ENTRY_PREALLOC: u64 = 16 * 1024 * 1024;

impl ClasspathLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        let mut roots = roots;
        dedup_preserving_order(&mut roots);

        Self {
            roots,
            java_bin: PathBuf::from("java"),
            jvm_args: Vec::new(),
            overlay_dir: None,
            owned_overlay: OnceCell::new(),
            defined: BTreeMap::new(),
        }
    }

    pub fn with_java(mut self, java_bin: impl Into<PathBuf>) -> Self {
        self.java_bin = java_bin.into();
        self
    }

    pub fn with_jvm_args(mut self, jvm_args: Vec<String>) -> Self {
        self.jvm_args = jvm_args;
        self
    }

    /// Use a fixed overlay directory. It is wiped before every write and
    /// left in place on drop.
    pub fn with_overlay_dir(mut self, overlay_dir: impl Into<PathBuf>) -> Self {
        self.overlay_dir = Some(overlay_dir.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Overlay directory, once one exists.
    pub fn overlay_dir(&self) -> Option<&Path> {
        self.overlay_dir
            .as_deref()
            .or_else(|| self.owned_overlay.get().map(TempDir::path))
    }

    /// First root containing `entry`, in classpath order. Unreadable roots
    /// are logged and skipped.
    fn find_root(&self, entry: &str) -> Option<&PathBuf> {
        self.roots.iter().find(|root| {
            if !is_archive_path(root) {
                return root.join(entry).is_file();
            }

            match archive_contains(root, entry) {
                Ok(found) => found,
                Err(e) => {
                    warn!("Skipping unreadable classpath root {:?}: {}", root, e);
                    false
                }
            }
        })
    }

    fn prepare_overlay(&self) -> ProviderResult<&Path> {
        if let Some(dir) = &self.overlay_dir {
            if dir.exists() {
                std::fs::remove_dir_all(dir).map_err(|source| ProviderError::Io {
                    path: dir.clone(),
                    source,
                })?;
            }
            std::fs::create_dir_all(dir).map_err(|source| ProviderError::Io {
                path: dir.clone(),
                source,
            })?;
            return Ok(dir.as_path());
        }

        if let Some(owned) = self.owned_overlay.get() {
            return Ok(owned.path());
        }

        let created = tempfile::Builder::new()
            .prefix("game-provider-overlay-")
            .tempdir()
            .map_err(|source| ProviderError::Io {
                path: std::env::temp_dir(),
                source,
            })?;
        Ok(self.owned_overlay.get_or_init(|| created).path())
    }

    /// Write every defined module under the overlay directory.
    fn materialize_overlay(&self) -> ProviderResult<Option<&Path>> {
        if self.defined.is_empty() {
            return Ok(None);
        }

        let overlay = self.prepare_overlay()?;
        for module in self.defined.values() {
            let dest = overlay.join(entry_path(module.name()));
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|source| ProviderError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&dest, module.bytes()).map_err(|source| ProviderError::Io {
                path: dest.clone(),
                source,
            })?;
            debug!(
                "Overlay {} -> {:?} (sha256 {})",
                module.name(),
                dest,
                module.digest()
            );
        }

        Ok(Some(overlay))
    }

    /// Classpath string: overlay first (when anything is defined), then roots.
    pub fn classpath(&self, overlay: Option<&Path>) -> String {
        overlay
            .into_iter()
            .chain(self.roots.iter().map(PathBuf::as_path))
            .map(safe_path_str)
            .collect::<Vec<_>>()
            .join(get_classpath_separator())
    }

    /// Build the child JVM command running `name` with `args`.
    pub fn build_command(&self, name: &str, args: &[String]) -> ProviderResult<Command> {
        let overlay = self.materialize_overlay()?;
        let classpath = self.classpath(overlay);

        if classpath.trim().is_empty() {
            return Err(ProviderError::Other(
                "Classpath is empty: refusing to launch with an invalid -cp".into(),
            ));
        }

        let mut cmd = Command::new(&self.java_bin);
        for arg in sanitize_jvm_args(&self.jvm_args) {
            cmd.arg(arg);
        }
        cmd.arg("-cp").arg(classpath);
        cmd.arg(name);
        cmd.args(args);

        Ok(cmd)
    }
}

impl ModuleLoader for ClasspathLoader {
    fn exists(&self, name: &str) -> bool {
        if self.defined.contains_key(name) {
            return true;
        }

        self.find_root(&entry_path(name)).is_some()
    }

    /// Root the symbol originally comes from. Modules that exist only in the
    /// overlay have no location.
    fn location_of(&self, name: &str) -> Option<PathBuf> {
        self.find_root(&entry_path(name)).cloned()
    }

    fn load_and_invoke(&self, name: &str, args: &[String]) -> ProviderResult<()> {
        let mut cmd = self.build_command(name, args)?;

        info!("Launching {} with Java: {:?}", name, self.java_bin);
        debug!(
            "Command (copy/paste): {}",
            format_command_for_logs(&self.java_bin, &cmd, args)
        );

        let status = cmd.status().map_err(|source| ProviderError::Io {
            path: self.java_bin.clone(),
            source,
        })?;

        if !status.success() {
            return Err(ProviderError::ProcessExit {
                entrypoint: name.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

impl ModuleSource for ClasspathLoader {
    fn read_module(&self, name: &str) -> ProviderResult<LoadedModule> {
        if let Some(module) = self.defined.get(name) {
            return Ok(module.clone());
        }

        let entry = entry_path(name);
        let root = self
            .find_root(&entry)
            .ok_or_else(|| ProviderError::ModuleNotFound(name.to_string()))?;

        let bytes = if is_archive_path(root) {
            read_archive_entry(root, &entry)?
        } else {
            let path = root.join(&entry);
            std::fs::read(&path).map_err(|source| ProviderError::Io { path, source })?
        };

        Ok(LoadedModule::new(name, bytes))
    }

    fn define_module(&mut self, module: LoadedModule) {
        self.defined.insert(module.name().to_string(), module);
    }
}

/// Platform-specific Java classpath separator.
pub fn get_classpath_separator() -> &'static str {
    if cfg!(target_os = "windows") {
        ";"
    } else {
        ":"
    }
}

fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar") || ext.eq_ignore_ascii_case("zip"))
}

fn open_archive(path: &Path) -> ProviderResult<ZipArchive<File>> {
    let file = File::open(path).map_err(|source| ProviderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ZipArchive::new(file)?)
}

/// Presence check only reads the central directory.
fn archive_contains(path: &Path, entry: &str) -> ProviderResult<bool> {
    if !path.is_file() {
        return Ok(false);
    }

    let mut archive = open_archive(path)?;
    let found = match archive.by_name(entry) {
        Ok(_) => true,
        Err(ZipError::FileNotFound) => false,
        Err(e) => return Err(e.into()),
    };
    Ok(found)
}

fn read_archive_entry(path: &Path, entry: &str) -> ProviderResult<Vec<u8>> {
    let mut archive = open_archive(path)?;
    let mut file = archive.by_name(entry)?;
    let mut bytes = Vec::with_capacity(capacity_hint(file.size()));
    file.read_to_end(&mut bytes).map_err(|source| ProviderError::Io {
        path: path.join(entry),
        source,
    })?;
    Ok(bytes)
}

/// Preallocation for an entry of `declared` bytes. The declared size comes
/// from the archive and is not trusted beyond `MAX_ENTRY_PREALLOC`.
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_ENTRY_PREALLOC)).unwrap_or(0)
}

/// Drop caller-supplied classpath switches (with their value); the loader
/// always injects its own `-cp`.
fn sanitize_jvm_args(raw_args: &[String]) -> Vec<String> {
    let mut sanitized = Vec::with_capacity(raw_args.len());
    let mut i = 0;

    while i < raw_args.len() {
        let arg = &raw_args[i];
        if arg == "-cp" || arg == "-classpath" || arg == "--class-path" {
            i += 2;
            continue;
        }

        sanitized.push(arg.clone());
        i += 1;
    }

    sanitized
}

fn dedup_preserving_order(entries: &mut Vec<PathBuf>) {
    let mut seen = HashSet::new();
    entries.retain(|entry| {
        let key = if cfg!(target_os = "windows") {
            entry.to_string_lossy().to_lowercase()
        } else {
            entry.to_string_lossy().to_string()
        };
        seen.insert(key)
    });
}

/// Convert path to string, stripping the `\\?\` prefix Java cannot handle on Windows.
fn safe_path_str(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let text = resolved.to_string_lossy().to_string();

    #[cfg(target_os = "windows")]
    {
        if let Some(stripped) = text.strip_prefix(r"\\?\") {
            return stripped.to_string();
        }
    }

    text
}

/// Printable command line with the game arguments redacted.
fn format_command_for_logs(program: &Path, cmd: &Command, game_args: &[String]) -> String {
    let all_args: Vec<String> = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect();
    let jvm_len = all_args.len().saturating_sub(game_args.len());

    let mut shown: Vec<String> = all_args[..jvm_len].to_vec();
    shown.extend(sanitize_launch_args(game_args, true));

    std::iter::once(shell_escape(&program.to_string_lossy()))
        .chain(shown.iter().map(|arg| shell_escape(arg)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_escape(raw: &str) -> String {
    if raw.is_empty() {
        return "\"\"".to_string();
    }

    if raw.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '\\' | '=')
    }) {
        return raw.to_string();
    }

    format!("\"{}\"", raw.replace('"', "\\\""))
}
