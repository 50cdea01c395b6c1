//! Schema artifacts discovered inside version directories

use serde::{Deserialize, Serialize};

/// A named, opaque schema file belonging to exactly one version.
///
/// Schemas are produced by a repository scan, one per non-directory entry
/// found under a version directory. Their content is never read, parsed, or
/// validated by this crate; only the file name and the owning version's
/// namespace are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Namespace of the owning version (e.g. `acme.schemas/v1`).
    pub namespace: String,
    /// File name the schema was discovered under (e.g. `schema.cue`).
    pub name: String,
}

impl Schema {
    /// Record a schema file found during a version scan.
    pub(crate) fn discovered(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Fully-qualified identifier, `<version-namespace>/<file-name>`.
    pub fn identifier(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}
