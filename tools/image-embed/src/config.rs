//! Generator settings

/// Scope the generated symbols are placed in unless overridden.
pub const DEFAULT_NAMESPACE: &str = "Graal::level_editor::image_data";

/// Prefix of the include-guard token.
pub const DEFAULT_GUARD_PREFIX: &str = "GRAAL_LEVEL_EDITOR";

/// Prefix of the names stored in the lookup table.
pub const DEFAULT_PATH_PREFIX: &str = "internal";

/// Extensions picked up when the source is a plain directory.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "ico", "xpm"];

/// Extension of the definitions file.
pub const DEFINITIONS_EXTENSION: &str = "cpp";

/// Extension of the declarations file.
pub const DECLARATIONS_EXTENSION: &str = "hpp";

/// Name of the generated lookup table.
pub const TABLE_SYMBOL: &str = "images";

/// Number of source bytes per string-literal fragment.
pub const CHUNK_SIZE: usize = 68;

/// Settings for one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedConfig {
    /// `::`-separated scope, empty for the global namespace
    pub namespace: String,
    pub guard_prefix: String,
    pub path_prefix: String,
    /// Image extensions (without dot) used to expand a directory source
    pub extensions: Vec<String>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            guard_prefix: DEFAULT_GUARD_PREFIX.to_string(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl EmbedConfig {
    /// Namespace components, outermost first.
    pub fn scopes(&self) -> Vec<&str> {
        self.namespace
            .split("::")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
