//! Declarations (.hpp) generator

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use super::writer::SourceWriter;
use super::GENERATED_BANNER;
use crate::config::{EmbedConfig, DECLARATIONS_EXTENSION, DEFINITIONS_EXTENSION, TABLE_SYMBOL};
use crate::error::{EmbedError, Result};
use crate::model::{sanitize_identifier, SymbolTable};

/// Path of the declarations file paired with a definitions file.
pub fn declarations_path(target: &Path) -> Result<PathBuf> {
    match target.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext == DEFINITIONS_EXTENSION => {
            Ok(target.with_extension(DECLARATIONS_EXTENSION))
        }
        _ => Err(EmbedError::TargetExtension {
            path: target.to_path_buf(),
            expected: DEFINITIONS_EXTENSION.to_string(),
        }),
    }
}

/// Include-guard token for a declarations path.
pub fn guard_token(prefix: &str, path: &Path) -> String {
    let body = sanitize_identifier(&path.to_string_lossy()).to_uppercase();
    if prefix.is_empty() {
        format!("{}_", body)
    } else {
        format!("{}_{}_", prefix, body)
    }
}

/// Generate the declarations file for a symbol table.
pub fn generate_declarations(
    table: &SymbolTable,
    config: &EmbedConfig,
    path: &Path,
) -> Result<String> {
    let mut w = SourceWriter::new();
    let guard = guard_token(&config.guard_prefix, path);

    for line in GENERATED_BANNER {
        writeln!(w, "{}", line)?;
    }
    writeln!(w, "#ifndef {}", guard)?;
    writeln!(w, "#define {}", guard)?;

    let scopes = config.scopes();
    w.open_namespaces(&scopes)?;
    for symbol in table.symbols() {
        writeln!(w, "extern const char {}[];", symbol)?;
    }
    writeln!(w, "extern const char* {}[];", TABLE_SYMBOL)?;
    w.close_namespaces(scopes.len())?;

    writeln!(w, "#endif")?;

    Ok(w.finish())
}
