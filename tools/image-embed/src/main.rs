//! image-embed CLI
//!
//! ```bash
//! # Embed every image in a directory
//! image-embed res/images src/level_editor/image_data.cpp
//!
//! # Glob patterns work too (quote them so the shell leaves them alone)
//! image-embed 'res/**/*.{png,gif}' src/image_data.cpp
//!
//! # Fail when the checked-in sources are stale
//! image-embed res/images src/image_data.cpp --check
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use image_embed::config::{DEFAULT_GUARD_PREFIX, DEFAULT_NAMESPACE, DEFAULT_PATH_PREFIX};
use image_embed::EmbedConfig;

#[derive(Parser)]
#[command(name = "image-embed")]
#[command(about = "Embed image files into C++ sources as escaped byte arrays")]
#[command(version)]
struct Cli {
    /// Glob pattern or directory of images
    source: String,

    /// Definitions file to generate (.cpp); the .hpp is written next to it
    target: PathBuf,

    /// Namespace for the generated symbols ("::"-separated, empty for global)
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Prefix of the include-guard token
    #[arg(long, default_value = DEFAULT_GUARD_PREFIX)]
    guard_prefix: String,

    /// Prefix of the names stored in the lookup table
    #[arg(long, default_value = DEFAULT_PATH_PREFIX)]
    path_prefix: String,

    /// Image extension to pick up when SOURCE is a directory (repeatable)
    #[arg(short, long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Check that the generated files are up to date instead of writing them
    #[arg(long, conflicts_with = "list")]
    check: bool,

    /// Print the symbol table as JSON instead of writing files
    #[arg(long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> EmbedConfig {
        let mut config = EmbedConfig {
            namespace: self.namespace.clone(),
            guard_prefix: self.guard_prefix.clone(),
            path_prefix: self.path_prefix.clone(),
            ..Default::default()
        };
        if !self.extensions.is_empty() {
            config.extensions = self
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect();
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --list output stays machine-readable
    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let config = cli.config();
    let generated = image_embed::generate(&cli.source, &cli.target, &config)
        .with_context(|| format!("Failed to embed images from '{}'", cli.source))?;

    if cli.list {
        let rows = image_embed::listing(&generated.table, &config);
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if cli.check {
        if !image_embed::check_outputs(&generated)? {
            anyhow::bail!("Generated sources are out of date. Run image-embed without --check to regenerate.");
        }
    } else {
        image_embed::write_outputs(&generated)?;
        tracing::info!(
            "Embedded {} image(s), {} bytes",
            generated.table.len(),
            generated.table.total_bytes()
        );
    }

    Ok(())
}
