//! The repository manifest document

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RepositoryError, Result};
use crate::schema::Schema;
use crate::version::Version;

/// File name of the manifest inside the repository directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Serialized summary of a repository: its namespace, the version names,
/// and the schemas each version contains.
///
/// The manifest is rebuilt in full and overwritten on every change. On read
/// it is trusted only for the namespace; the filesystem, not this document,
/// is the source of truth for versions and schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Repository namespace (tenant / organization identifier).
    pub namespace: String,
    /// Version names, in the order versions were discovered.
    #[serde(default)]
    pub versions: Vec<String>,
    /// Per-version display records, keyed by version name.
    #[serde(default, rename = "version_schemas")]
    pub schemas: BTreeMap<String, DisplayVersion>,
}

/// One version's entry in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayVersion {
    /// Version name, e.g. `v1`.
    pub name: String,
    /// Fully-qualified version namespace, e.g. `acme.schemas/v1`.
    pub namespace: String,
    /// Schemas the version contains.
    pub schemas: Vec<Schema>,
}

impl Manifest {
    /// An empty manifest for a namespace with no versions.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Build the full document for a set of discovered versions.
    ///
    /// The `version_schemas` keys are exactly the entries of `versions`;
    /// version names are unique by construction since each corresponds to a
    /// distinct index.
    pub fn snapshot(namespace: &str, versions: &[Version]) -> Self {
        let mut manifest = Manifest::new(namespace);
        for version in versions {
            let display = DisplayVersion {
                name: version.name(),
                namespace: version.namespace(),
                schemas: version.schemas().to_vec(),
            };
            manifest.versions.push(display.name.clone());
            manifest.schemas.insert(display.name.clone(), display);
        }
        manifest
    }

    /// Read the manifest from a repository directory.
    ///
    /// An absent file (or directory) is [`RepositoryError::ManifestNotFound`];
    /// bytes that do not parse are [`RepositoryError::ManifestCorrupt`]; any
    /// other read failure is [`RepositoryError::Filesystem`].
    pub fn read_from(repo_dir: &Path) -> Result<Self> {
        let path = repo_dir.join(MANIFEST_FILE);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RepositoryError::ManifestNotFound(path.clone()),
            _ => RepositoryError::fs(&path, e),
        })?;
        serde_json::from_slice(&bytes).map_err(RepositoryError::ManifestCorrupt)
    }

    /// Serialize the manifest and overwrite it in a repository directory.
    ///
    /// The write is an unconditional in-place overwrite: no rename step, no
    /// backup of the previous file. A crash mid-write can leave a truncated
    /// manifest; rewriting it is the recovery path.
    pub fn write_to(&self, repo_dir: &Path) -> Result<()> {
        let path = repo_dir.join(MANIFEST_FILE);
        let bytes = serde_json::to_vec_pretty(self).map_err(RepositoryError::Serialization)?;
        fs::write(&path, bytes).map_err(|e| RepositoryError::fs(&path, e))
    }
}
