//! Intermediate representation for embedded images

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::TABLE_SYMBOL;
use crate::error::{EmbedError, Result};

/// C++ keywords that cannot be used as array names.
const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Replace every run of characters outside `[A-Za-z0-9_]` with a single `_`.
pub fn sanitize_identifier(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Identifier naming one embedded byte array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Derive a symbol from a file name.
    ///
    /// The final extension is stripped, every run of non-word characters
    /// becomes `_`, and a leading digit gets a `_` prefix.
    pub fn from_file_name(file_name: &str) -> Self {
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        };

        let mut name = sanitize_identifier(stem);
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }

        Self(name)
    }

    /// Derive the symbol for a file on disk.
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_file_name(&file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the symbol clashes with a keyword, the lookup table itself, or
    /// the names C++ reserves for the implementation (`_` followed by an
    /// uppercase letter, or any `__`).
    pub fn is_reserved(&self) -> bool {
        let name = self.0.as_str();
        let implementation_reserved = name.contains("__")
            || name
                .strip_prefix('_')
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()));

        name == TABLE_SYMBOL || CPP_KEYWORDS.contains(&name) || implementation_reserved
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One input file loaded for encoding.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub symbol: Symbol,
    pub source: PathBuf,
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    /// Read a file and derive its symbol.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| EmbedError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            symbol: Symbol::from_path(path),
            source: path.to_path_buf(),
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Table row for one embedded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub symbol: Symbol,
    pub source: PathBuf,
    pub size: usize,
}

/// Symbols of one run, in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    #[serde(skip)]
    index: HashMap<Symbol, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an asset, rejecting reserved and duplicate symbols.
    pub fn insert(&mut self, asset: &ImageAsset) -> Result<()> {
        if asset.symbol.is_reserved() {
            return Err(EmbedError::ReservedSymbol {
                symbol: asset.symbol.to_string(),
                path: asset.source.clone(),
            });
        }

        if let Some(&existing) = self.index.get(&asset.symbol) {
            return Err(EmbedError::SymbolCollision {
                symbol: asset.symbol.to_string(),
                first: self.entries[existing].source.clone(),
                second: asset.source.clone(),
            });
        }

        self.index.insert(asset.symbol.clone(), self.entries.len());
        self.entries.push(SymbolEntry {
            symbol: asset.symbol.clone(),
            source: asset.source.clone(),
            size: asset.len(),
        });
        Ok(())
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|e| &e.symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of embedded bytes.
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.size).sum()
    }
}
