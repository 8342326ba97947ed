//! Image embedding generator library
//!
//! Turns a set of image files into a C++ definitions file (one escaped byte
//! array per image plus a sentinel-terminated `images` lookup table) and a
//! matching declarations file. Usable from the `image-embed` CLI or directly
//! from a build script:
//!
//! ```no_run
//! use image_embed::{generate, write_outputs, EmbedConfig};
//!
//! let generated = generate("res/images", "src/image_data.cpp", &EmbedConfig::default())?;
//! write_outputs(&generated)?;
//! # Ok::<(), image_embed::EmbedError>(())
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod generators;
pub mod model;
pub mod source;

use serde::Serialize;
use std::path::{Path, PathBuf};

pub use config::EmbedConfig;
pub use error::{EmbedError, Result};
pub use model::{ImageAsset, Symbol, SymbolTable};

use generators::declarations::{declarations_path, generate_declarations};
use generators::definitions::{table_entry_name, DefinitionsBuilder};

/// Both rendered files of one run, not yet written.
#[derive(Debug, Clone)]
pub struct Generated {
    pub definitions_path: PathBuf,
    pub definitions: String,
    pub declarations_path: PathBuf,
    pub declarations: String,
    pub table: SymbolTable,
}

/// Load and encode every file in order, returning the symbols it produced.
///
/// Each asset is dropped as soon as its array has been emitted.
pub fn encode_assets(files: &[PathBuf], builder: &mut DefinitionsBuilder<'_>) -> Result<SymbolTable> {
    let mut table = SymbolTable::new();
    for path in files {
        let asset = ImageAsset::load(path)?;
        table.insert(&asset)?;
        builder.push_asset(&asset)?;
        tracing::debug!(symbol = %asset.symbol, bytes = asset.len(), "embedded {}", path.display());
    }
    Ok(table)
}

/// Render both output files in memory.
pub fn generate(source: &str, target: impl AsRef<Path>, config: &EmbedConfig) -> Result<Generated> {
    let target = target.as_ref();
    let header_path = declarations_path(target)?;
    let header_name = header_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let files = source::resolve(source, &config.extensions)?;
    tracing::info!("Found {} image(s) matching {}", files.len(), source);

    let mut builder = DefinitionsBuilder::begin(config, &header_name)?;
    let table = encode_assets(&files, &mut builder)?;
    let definitions = builder.finish(&table)?;
    let declarations = generate_declarations(&table, config, &header_path)?;

    Ok(Generated {
        definitions_path: target.to_path_buf(),
        definitions,
        declarations_path: header_path,
        declarations,
        table,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| EmbedError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the definitions file, then the declarations file.
pub fn write_outputs(generated: &Generated) -> Result<()> {
    write_file(&generated.definitions_path, &generated.definitions)?;
    tracing::info!("Generated definitions: {}", generated.definitions_path.display());

    write_file(&generated.declarations_path, &generated.declarations)?;
    tracing::info!("Generated declarations: {}", generated.declarations_path.display());

    Ok(())
}

fn is_in_sync(path: &Path, fresh: &str) -> Result<bool> {
    match std::fs::read_to_string(path) {
        Ok(existing) => Ok(existing == fresh),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(EmbedError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Check whether the files on disk match a fresh rendering.
pub fn check_outputs(generated: &Generated) -> Result<bool> {
    let mut in_sync = true;

    for (path, fresh) in [
        (&generated.definitions_path, &generated.definitions),
        (&generated.declarations_path, &generated.declarations),
    ] {
        if is_in_sync(path, fresh)? {
            tracing::info!("In sync: {}", path.display());
        } else {
            tracing::warn!("Out of sync: {}", path.display());
            in_sync = false;
        }
    }

    Ok(in_sync)
}

/// One row of the `--list` report.
#[derive(Debug, Clone, Serialize)]
pub struct ListingEntry<'a> {
    pub symbol: &'a Symbol,
    pub source: &'a Path,
    pub size: usize,
    pub name: String,
}

/// Describe the symbol table the way it ends up in the lookup table.
pub fn listing<'a>(table: &'a SymbolTable, config: &EmbedConfig) -> Vec<ListingEntry<'a>> {
    table
        .entries()
        .iter()
        .map(|entry| ListingEntry {
            symbol: &entry.symbol,
            source: &entry.source,
            size: entry.size,
            name: table_entry_name(config, &entry.symbol),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_generate_orders_by_file_name() {
        let dir = tempdir().unwrap();
        let images = dir.path().join("images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("b.png"), b"bb").unwrap();
        fs::write(images.join("a.png"), b"a").unwrap();
        fs::write(images.join("c.txt"), b"skip").unwrap();

        let target = dir.path().join("image_data.cpp");
        let generated =
            generate(images.to_str().unwrap(), &target, &EmbedConfig::default()).unwrap();

        let names: Vec<_> = generated.table.symbols().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(generated.declarations_path, dir.path().join("image_data.hpp"));

        let a = generated.definitions.find("\"internal/a.png\"").unwrap();
        let b = generated.definitions.find("\"internal/b.png\"").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_generate_reports_collision() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a-b.png"), b"1").unwrap();
        fs::write(dir.path().join("a.b.png"), b"2").unwrap();

        let target = dir.path().join("out.cpp");
        let err = generate(dir.path().to_str().unwrap(), &target, &EmbedConfig::default())
            .unwrap_err();
        assert!(matches!(err, EmbedError::SymbolCollision { .. }));
    }

    #[test]
    fn test_encode_assets_missing_input_reports_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"a").unwrap();
        let missing = dir.path().join("gone.png");
        let files = vec![dir.path().join("a.png"), missing.clone()];

        let config = EmbedConfig::default();
        let mut builder = DefinitionsBuilder::begin(&config, "out.hpp").unwrap();
        match encode_assets(&files, &mut builder) {
            Err(EmbedError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_generate_unreadable_input_reports_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked.png");
        fs::write(&locked, b"secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to privileged users
        if fs::read(&locked).is_ok() {
            return;
        }

        let target = dir.path().join("out.cpp");
        let result = generate(dir.path().to_str().unwrap(), &target, &EmbedConfig::default());
        match result {
            Err(EmbedError::Read { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected read error, got {other:?}"),
        }
        assert!(!target.exists());
    }

    #[test]
    fn test_generate_rejects_bad_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.txt");
        let err = generate(dir.path().to_str().unwrap(), &target, &EmbedConfig::default())
            .unwrap_err();
        assert!(matches!(err, EmbedError::TargetExtension { .. }));
    }

    #[test]
    fn test_check_detects_missing_and_stale() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("icon.png"), b"icon").unwrap();
        let target = dir.path().join("out.cpp");
        let source = format!("{}/*.png", dir.path().display());

        let generated = generate(&source, &target, &EmbedConfig::default()).unwrap();
        assert!(!check_outputs(&generated).unwrap());

        write_outputs(&generated).unwrap();
        assert!(check_outputs(&generated).unwrap());

        fs::write(dir.path().join("icon.png"), b"changed").unwrap();
        let fresh = generate(&source, &target, &EmbedConfig::default()).unwrap();
        assert!(!check_outputs(&fresh).unwrap());
    }

    #[test]
    fn test_listing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("9lives.png"), b"12345").unwrap();
        let target = dir.path().join("out.cpp");

        let generated =
            generate(dir.path().to_str().unwrap(), &target, &EmbedConfig::default()).unwrap();
        let rows = listing(&generated.table, &EmbedConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol.as_str(), "_9lives");
        assert_eq!(rows[0].size, 5);
        assert_eq!(rows[0].name, "internal/_9lives.png");
    }
}
