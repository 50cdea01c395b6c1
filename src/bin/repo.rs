//! Schema Repository CLI
//!
//! Commands for managing a directory-based schema repository.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use schema_repo::{RepoConfig, Repository};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-repo")]
#[command(about = "Directory-based, versioned schema repository")]
struct Cli {
    /// Working root the repository lives under (overrides config)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Path to a config file (schema-repo.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a repository and write an empty manifest
    Init {
        /// Namespace for the repository (defaults to the configured one)
        namespace: Option<String>,
    },

    /// Create the next version as a copy of the current highest
    NewVersion,

    /// List version directories
    Versions,

    /// List every schema as namespace/name
    Schemas,

    /// Print the manifest document from disk
    Manifest,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = RepoConfig::load_from(cli.config.as_deref())?;
    let root = match cli.root {
        Some(path) => path,
        None => config.repository_root(),
    };

    match cli.command {
        Commands::Init { namespace } => {
            let namespace = namespace.unwrap_or_else(|| config.repository.namespace.clone());
            println!("📦 Initializing repository at {:?}", root);
            let repo = Repository::create(&root, namespace)?;
            println!(
                "✅ Repository for {} ready at {:?}",
                repo.namespace(),
                repo.repository_dir()
            );
            Ok(())
        }

        Commands::NewVersion => {
            let mut repo = Repository::open(&root)?;
            let name = repo.new_version()?;
            println!("✅ Created {}", name);
            Ok(())
        }

        Commands::Versions => {
            let repo = Repository::open(&root)?;
            let versions = repo.version_names();

            if versions.is_empty() {
                println!("No versions yet.");
            } else {
                println!("📚 Versions:");
                for name in versions {
                    println!("  {}", name);
                }
            }
            Ok(())
        }

        Commands::Schemas => {
            let repo = Repository::open(&root)?;
            let schemas = repo.schema_identifiers();

            if schemas.is_empty() {
                println!("No schemas yet.");
            } else {
                println!("📄 Schemas:");
                for id in schemas {
                    println!("  {}", id);
                }
            }
            Ok(())
        }

        Commands::Manifest => {
            let repo = Repository::open(&root)?;
            let manifest = repo.manifest()?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
            Ok(())
        }
    }
}
