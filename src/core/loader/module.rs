use sha2::{Digest, Sha256};

/// Immutable snapshot of one module's code, addressed by its symbol name.
///
/// Patches never edit a module in place; they produce a new value through
/// [`LoadedModule::with_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    name: String,
    bytes: Vec<u8>,
}

impl LoadedModule {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Same module name, new code.
    pub fn with_bytes(&self, bytes: Vec<u8>) -> Self {
        Self {
            name: self.name.clone(),
            bytes,
        }
    }

    /// Offset of the first occurrence of `needle`. An empty needle never matches.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.bytes.len() {
            return None;
        }
        self.bytes
            .windows(needle.len())
            .position(|window| window == needle)
    }

    pub fn contains(&self, needle: &[u8]) -> bool {
        self.find(needle).is_some()
    }

    /// Hex SHA-256 of the module code, used to fingerprint pipeline runs.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}
