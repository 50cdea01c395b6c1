//! Schema Repository
//!
//! A directory-backed, versioned repository for schema files. Versions are
//! numbered directories (`v1`, `v2`, ...) under a managed `repository/`
//! directory; each new version starts as a copy of the previous one and is
//! then edited in place. A `manifest.json` summarizes the layout for quick
//! inspection, but the filesystem itself is always the source of truth:
//! opening a repository rescans the directory tree and trusts the manifest
//! only for the namespace.
//!
//! ## Layout
//!
//! ```text
//! <root>/repository/
//! ├── manifest.json
//! ├── v1/
//! │   └── schema.cue
//! └── v2/
//!     ├── schema.cue
//!     └── events.cue
//! ```
//!
//! Schema files are opaque bytes to this crate. Versioning, discovery, and
//! the manifest are the model; interpreting schema content is left to the
//! tools that consume it.

pub mod config;
pub mod error;
pub mod manifest;
pub mod repository;
pub mod schema;
pub mod version;

pub use config::RepoConfig;
pub use error::{RepositoryError, Result};
pub use manifest::{DisplayVersion, Manifest, MANIFEST_FILE};
pub use repository::{Repository, REPOSITORY_DIR, SCHEMA_TEMPLATE, TEMPLATE_FILE};
pub use schema::Schema;
pub use version::Version;
