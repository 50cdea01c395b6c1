//! Repository orchestration
//!
//! Discovers versions from disk, creates new ones (copy-forward), and keeps
//! the manifest in sync with filesystem state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::error::{RepositoryError, Result};
use crate::manifest::Manifest;
use crate::schema::Schema;
use crate::version::Version;

/// Name of the managed directory under a working root.
pub const REPOSITORY_DIR: &str = "repository";

/// File name the embedded template is written under when the first version
/// is created.
pub const TEMPLATE_FILE: &str = "schema.cue";

/// Starting-point schema written into a brand-new `v1`. Opaque bytes to this
/// crate; the content belongs to the schema language, not the repository
/// model.
pub const SCHEMA_TEMPLATE: &[u8] = include_bytes!("../templates/schema.cue");

/// In-memory handle to a directory-based schema repository.
///
/// On-disk layout, relative to the working root:
///
/// ```text
/// <root>/repository/manifest.json
/// <root>/repository/v1/schema.cue         (and any other schema files)
/// <root>/repository/v2/...                (copy-forward of v1, then edited)
/// ```
///
/// The handle owns no lock on the directory. Structure only enters memory
/// through [`Repository::rescan`]; the manifest is trusted solely for the
/// namespace.
#[derive(Debug)]
pub struct Repository {
    namespace: String,
    root: PathBuf,
    versions: Vec<Version>,
}

impl Repository {
    /// Create the repository layout under `root` and write an initial
    /// manifest.
    ///
    /// Creating the `repository/` directory is idempotent: files already
    /// present under it are preserved, and the manifest is written to
    /// reflect whatever versions exist on disk (none, for a fresh root).
    pub fn create(root: impl AsRef<Path>, namespace: impl Into<String>) -> Result<Self> {
        let mut repo = Self {
            namespace: namespace.into(),
            root: root.as_ref().to_path_buf(),
            versions: Vec::new(),
        };
        let dir = repo.repository_dir();
        info!("creating repository directory at {}", dir.display());
        fs::create_dir_all(&dir).map_err(|e| RepositoryError::fs(&dir, e))?;

        info!("writing manifest for {}", repo.namespace);
        repo.write_manifest()?;
        Ok(repo)
    }

    /// Open an existing repository under `root`.
    ///
    /// Two steps: read the manifest to recover the namespace, then rescan
    /// the directory tree. The manifest's own version and schema listings
    /// are discarded; versions added or removed outside this tool are
    /// picked up from disk, never from the cached document.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let manifest = Manifest::read_from(&root.join(REPOSITORY_DIR))?;
        let mut repo = Self {
            namespace: manifest.namespace,
            root,
            versions: Vec::new(),
        };
        repo.rescan()?;
        Ok(repo)
    }

    /// Repository namespace (tenant / organization identifier).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Working root this repository lives under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The managed `repository/` directory.
    pub fn repository_dir(&self) -> PathBuf {
        self.root.join(REPOSITORY_DIR)
    }

    /// Versions as of the last scan, in filesystem iteration order rather
    /// than sorted by index.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Recompute the version list from disk.
    ///
    /// Iterates the immediate children of `repository/`: a directory whose
    /// name parses as `v<integer>` becomes a version and is walked for
    /// schemas; any other directory is skipped with an informational log
    /// line; non-directory entries are ignored entirely. A traversal error
    /// aborts the whole scan and leaves the list empty or holding only the
    /// versions processed before the abort, so a failed scan invalidates
    /// the handle.
    pub fn rescan(&mut self) -> Result<()> {
        self.versions.clear();
        let dir = self.repository_dir();
        let entries = fs::read_dir(&dir).map_err(|e| RepositoryError::fs(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| RepositoryError::fs(&dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| RepositoryError::fs(entry.path(), e))?;
            if !file_type.is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            let Some(mut version) = Version::from_dir_name(&self.namespace, &dir_name) else {
                info!("skipping non-version directory: {}", dir_name);
                continue;
            };
            self.load_schemas(&mut version)?;
            self.versions.push(version);
        }
        Ok(())
    }

    /// Walk one version directory and record every file found as a schema.
    ///
    /// Nested directories are traversed but contribute nothing themselves;
    /// files at any depth are recorded under their bare file name.
    fn load_schemas(&self, version: &mut Version) -> Result<()> {
        let dir = self.repository_dir().join(version.dir_name());
        for entry in WalkDir::new(&dir) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            version.push_schema(Schema::discovered(version.namespace(), name));
        }
        Ok(())
    }

    /// Create the next version directory and return its name.
    ///
    /// The first version is seeded with the embedded template; every later
    /// version starts as a recursive copy of the current highest version
    /// (copy-forward), after which the manifest is regenerated. The steps
    /// are independent fallible writes with no rollback; a failed call
    /// leaves the handle possibly inconsistent with disk, and the caller
    /// should discard it and reopen.
    pub fn new_version(&mut self) -> Result<String> {
        // One past the highest index on disk, so gaps left by manual
        // deletion never collide with an existing directory.
        let prev_index = self.versions.iter().map(Version::index).max().unwrap_or(0);
        let next = prev_index
            .checked_add(1)
            .ok_or(RepositoryError::VersionIndexExhausted(prev_index))?;
        let version = Version::new(&self.namespace, next);
        let name = version.name();
        self.versions.push(version);

        let vdir = self.repository_dir().join(&name);
        fs::create_dir_all(&vdir).map_err(|e| RepositoryError::fs(&vdir, e))?;

        if next == 1 {
            info!("seeding {} from the embedded template", name);
            let template = vdir.join(TEMPLATE_FILE);
            fs::write(&template, SCHEMA_TEMPLATE).map_err(|e| RepositoryError::fs(&template, e))?;
        } else {
            let prev = self.repository_dir().join(format!("v{}", prev_index));
            info!("copying {} forward into {}", prev.display(), name);
            copy_dir_contents(&prev, &vdir)?;
        }

        self.write_manifest()?;
        Ok(name)
    }

    /// Rebuild the manifest from disk and overwrite it.
    ///
    /// Always rescans first: the document reflects filesystem state, not
    /// whatever the in-memory list currently holds. The previous manifest
    /// is overwritten unconditionally; there is no incremental update and
    /// no backup.
    pub fn write_manifest(&mut self) -> Result<()> {
        self.rescan()?;
        let manifest = Manifest::snapshot(&self.namespace, &self.versions);
        manifest.write_to(&self.repository_dir())
    }

    /// Read the manifest document currently on disk (not the in-memory
    /// state).
    pub fn manifest(&self) -> Result<Manifest> {
        Manifest::read_from(&self.repository_dir())
    }

    /// Version names, in filesystem iteration order.
    pub fn version_names(&self) -> Vec<String> {
        self.versions.iter().map(Version::name).collect()
    }

    /// `<version-namespace>/<file-name>` for every schema across every
    /// version.
    pub fn schema_identifiers(&self) -> Vec<String> {
        self.versions
            .iter()
            .flat_map(|version| version.schemas().iter().map(Schema::identifier))
            .collect()
    }
}

/// Recursively copy everything under `src` into `dst`, preserving file
/// names and contents. `dst` must already exist.
fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).map_err(|_| {
            RepositoryError::fs(
                entry.path(),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "walk escaped source root"),
            )
        })?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| RepositoryError::fs(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| RepositoryError::fs(&target, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_empty_repository() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(dir.path(), "test.schema.net").unwrap();
        assert!(repo.versions().is_empty());
        assert!(repo.repository_dir().is_dir());
        assert!(repo.repository_dir().join("manifest.json").is_file());
    }

    #[test]
    fn test_rescan_picks_up_external_changes() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::create(dir.path(), "test.schema.net").unwrap();
        assert!(repo.versions().is_empty());

        // A version directory created behind the handle's back.
        let v1 = repo.repository_dir().join("v1");
        fs::create_dir_all(&v1).unwrap();
        fs::write(v1.join("schema.cue"), b"{}").unwrap();

        repo.rescan().unwrap();
        assert_eq!(repo.version_names(), vec!["v1"]);
        assert_eq!(repo.versions()[0].schemas().len(), 1);
    }

    #[test]
    fn test_nested_files_are_flattened() {
        let dir = tempdir().unwrap();
        let mut repo = Repository::create(dir.path(), "test.schema.net").unwrap();

        let nested = repo.repository_dir().join("v1").join("drafts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("draft.cue"), b"{}").unwrap();
        fs::write(repo.repository_dir().join("v1").join("schema.cue"), b"{}").unwrap();

        repo.rescan().unwrap();
        let names: Vec<_> = repo.versions()[0]
            .schemas()
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"schema.cue".to_string()));
        // The nested file appears under its bare name; the directory itself
        // contributes no schema.
        assert!(names.contains(&"draft.cue".to_string()));
    }

    #[test]
    fn test_copy_dir_contents_preserves_tree() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("a.cue"), b"alpha").unwrap();
        fs::write(src.join("sub").join("b.cue"), b"beta").unwrap();

        copy_dir_contents(&src, &dst).unwrap();

        assert_eq!(fs::read(dst.join("a.cue")).unwrap(), b"alpha");
        assert_eq!(fs::read(dst.join("sub").join("b.cue")).unwrap(), b"beta");
    }

    #[test]
    fn test_copy_dir_contents_missing_source() {
        let dir = tempdir().unwrap();
        let dst = dir.path().join("dst");
        fs::create_dir_all(&dst).unwrap();
        let err = copy_dir_contents(&dir.path().join("absent"), &dst).unwrap_err();
        assert!(matches!(err, RepositoryError::Filesystem { .. }));
    }
}
