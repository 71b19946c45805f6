use std::path::PathBuf;

use serde::Serialize;

/// Metadata of the synthetic mod that stands for the game itself.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuiltinModMetadata {
    pub id: String,
    pub version: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BuiltinModMetadata {
    pub fn builder(id: &str, version: &str) -> BuiltinModMetadataBuilder {
        BuiltinModMetadataBuilder {
            id: id.to_string(),
            version: version.to_string(),
            name: None,
            description: None,
        }
    }
}

pub struct BuiltinModMetadataBuilder {
    id: String,
    version: String,
    name: Option<String>,
    description: Option<String>,
}

impl BuiltinModMetadataBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Name defaults to the id.
    pub fn build(self) -> BuiltinModMetadata {
        BuiltinModMetadata {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            version: self.version,
            description: self.description,
        }
    }
}

/// The game presented to the host as one more loaded mod, so dependency and
/// version-compatibility bookkeeping can treat it uniformly.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BuiltinMod {
    pub location: PathBuf,
    #[serde(flatten)]
    pub metadata: BuiltinModMetadata,
}
