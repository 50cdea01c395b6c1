//! Version numbering and directory-name rules

use std::fmt;

use crate::schema::Schema;

/// A numbered, 1-based collection of schemas backed by a `v<index>`
/// directory.
///
/// Versions are computed from directory names during a scan or constructed
/// by [`Repository::new_version`](crate::Repository::new_version); they are
/// never deleted programmatically.
#[derive(Debug, Clone)]
pub struct Version {
    root_namespace: String,
    index: u32,
    schemas: Vec<Schema>,
}

impl Version {
    /// An empty version under a repository namespace.
    pub fn new(root_namespace: impl Into<String>, index: u32) -> Self {
        Self {
            root_namespace: root_namespace.into(),
            index,
            schemas: Vec::new(),
        }
    }

    /// Recognize a directory name of the form `v<integer>` with a positive
    /// index.
    ///
    /// Returns `None` for anything else: a bare `v`, a non-numeric suffix,
    /// a zero index, or a name that does not start with `v`. Such entries
    /// are not versions; the scan skips them without raising an error.
    pub fn from_dir_name(root_namespace: &str, dir_name: &str) -> Option<Self> {
        let suffix = dir_name.strip_prefix('v')?;
        if suffix.is_empty() {
            return None;
        }
        let index = suffix.parse::<u32>().ok()?;
        // Indices are 1-based; a v0 directory is not a version.
        if index == 0 {
            return None;
        }
        Some(Self::new(root_namespace, index))
    }

    /// Display name, `v<index>`.
    pub fn name(&self) -> String {
        format!("v{}", self.index)
    }

    /// Directory name relative to the repository directory.
    pub fn dir_name(&self) -> String {
        self.name()
    }

    /// Fully-qualified namespace, `<root-namespace>/v<index>`.
    pub fn namespace(&self) -> String {
        format!("{}/v{}", self.root_namespace, self.index)
    }

    /// Index parsed from the directory name.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Schemas discovered in this version, in filesystem iteration order.
    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub(crate) fn push_schema(&mut self, schema: Schema) {
        self.schemas.push(schema);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.index)
    }
}
