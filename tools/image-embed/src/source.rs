//! Input enumeration
//!
//! Resolves a source argument into the ordered list of files to embed. The
//! source is either a directory (expanded to every recognized image
//! extension) or a shell-style glob:
//!
//! - `*` matches within one path component, `?` matches one character
//! - `**/` matches zero or more directories
//! - `[abc]`, `[a-z]`, `[!a]` character classes
//! - `{png,jpg}` alternatives
//!
//! Names starting with `.` are only matched when the pattern spells the dot
//! out. Results are ordered depth-first with entries sorted by file name in
//! each directory, so the generated table does not depend on the filesystem.

use regex::Regex;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{EmbedError, Result};

/// A compiled glob: literal base directory plus a matcher for the remainder.
#[derive(Debug)]
pub struct GlobPattern {
    base: PathBuf,
    matcher: Regex,
    max_depth: usize,
    match_hidden: bool,
}

fn has_wildcards(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}

fn invalid(pattern: &str, reason: impl Into<String>) -> EmbedError {
    EmbedError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

/// Translate one path component into regex syntax.
fn translate_component(pattern: &str, component: &str, out: &mut String) -> Result<()> {
    let mut chars = component.chars().peekable();
    let mut brace_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' => {
                out.push('[');
                if matches!(chars.peek(), Some('!') | Some('^')) {
                    chars.next();
                    out.push('^');
                }
                let mut closed = false;
                let mut first = true;
                while let Some(c) = chars.next() {
                    match c {
                        ']' if !first => {
                            closed = true;
                            break;
                        }
                        '\\' | '[' | ']' | '&' | '~' | '^' => {
                            out.push('\\');
                            out.push(c);
                        }
                        _ => out.push(c),
                    }
                    first = false;
                }
                if !closed {
                    return Err(invalid(pattern, "unterminated character class"));
                }
                out.push(']');
            }
            '{' => {
                brace_depth += 1;
                out.push_str("(?:");
            }
            ',' if brace_depth > 0 => out.push('|'),
            '}' if brace_depth > 0 => {
                brace_depth -= 1;
                out.push(')');
            }
            '\\' => match chars.next() {
                Some(escaped) => out.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4]))),
                None => return Err(invalid(pattern, "trailing escape")),
            },
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    if brace_depth > 0 {
        return Err(invalid(pattern, "unbalanced '{'"));
    }
    Ok(())
}

impl GlobPattern {
    /// Compile a glob. Returns `None` when the pattern has no wildcards.
    pub fn parse(pattern: &str) -> Result<Option<Self>> {
        let components: Vec<&str> = pattern.split('/').collect();
        let Some(first_wild) = components.iter().position(|c| has_wildcards(c)) else {
            return Ok(None);
        };

        let mut base = if pattern.starts_with('/') {
            PathBuf::from("/")
        } else {
            PathBuf::new()
        };
        for component in &components[..first_wild] {
            if !component.is_empty() {
                base.push(component);
            }
        }

        let rest: Vec<&str> = components[first_wild..]
            .iter()
            .copied()
            .filter(|c| !c.is_empty())
            .collect();

        Self::compile(pattern, base, &rest).map(Some)
    }

    /// Match files directly inside `dir` against a single-component glob.
    ///
    /// `dir` is taken literally, so wildcard characters in its name match
    /// only themselves.
    pub fn in_directory(dir: &Path, file_pattern: &str) -> Result<Self> {
        Self::compile(file_pattern, dir.to_path_buf(), &[file_pattern])
    }

    fn compile(pattern: &str, base: PathBuf, rest: &[&str]) -> Result<Self> {
        let mut regex = String::from("^");
        let mut recursive = false;
        for (i, component) in rest.iter().enumerate() {
            let last = i + 1 == rest.len();
            if *component == "**" && !last {
                recursive = true;
                regex.push_str("(?:[^/]+/)*");
                continue;
            }
            translate_component(pattern, component, &mut regex)?;
            if !last {
                regex.push('/');
            }
        }
        regex.push('$');

        let matcher = Regex::new(&regex).map_err(|e| invalid(pattern, e.to_string()))?;
        let match_hidden = rest.iter().any(|c| c.starts_with('.'));

        Ok(Self {
            base,
            matcher,
            max_depth: if recursive { usize::MAX } else { rest.len() },
            match_hidden,
        })
    }

    /// Directory the walk starts from (empty for the current directory).
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Match a `/`-separated path relative to the base.
    pub fn matches(&self, relative: &str) -> bool {
        self.matcher.is_match(relative)
    }

    fn is_visible(&self, entry: &DirEntry) -> bool {
        self.match_hidden
            || entry.depth() == 0
            || !entry.file_name().to_string_lossy().starts_with('.')
    }

    /// Walk the base directory and collect matching files.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let root = if self.base.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.base.as_path()
        };
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(self.max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.is_visible(e));

        for entry in walker {
            let entry = entry.map_err(|source| EmbedError::Walk {
                path: source.path().unwrap_or(root).to_path_buf(),
                source,
            })?;
            // Symlinked files count, directories never do
            if !entry.path().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if !self.matches(&to_slash(relative)) {
                continue;
            }

            if self.base.as_os_str().is_empty() {
                files.push(relative.to_path_buf());
            } else {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

/// Render a relative path with `/` separators for matching.
fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// File-name glob used for a plain directory source.
pub fn extension_pattern(extensions: &[String]) -> String {
    match extensions {
        [single] => format!("*.{single}"),
        _ => format!("*.{{{}}}", extensions.join(",")),
    }
}

/// Resolve a source argument into the ordered list of files to embed.
pub fn resolve(source: &str, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let dir = Path::new(source);
    if dir.is_dir() {
        if extensions.is_empty() {
            return Err(invalid(source, "directory source needs at least one extension"));
        }
        let glob = GlobPattern::in_directory(dir, &extension_pattern(extensions))?;
        tracing::debug!(base = %dir.display(), "walking directory");
        return glob.walk();
    }

    match GlobPattern::parse(source)? {
        Some(glob) => {
            tracing::debug!(base = %glob.base().display(), pattern = %source, "walking");
            glob.walk()
        }
        None => {
            let path = PathBuf::from(source);
            Ok(if path.is_file() { vec![path] } else { Vec::new() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn glob(pattern: &str) -> GlobPattern {
        GlobPattern::parse(pattern).unwrap().expect("pattern has wildcards")
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_literal_pattern_is_not_a_glob() {
        assert!(GlobPattern::parse("images/icon.png").unwrap().is_none());
    }

    #[test]
    fn test_base_is_literal_prefix() {
        assert_eq!(glob("res/images/*.png").base(), Path::new("res/images"));
        assert_eq!(glob("/abs/*.png").base(), Path::new("/abs"));
        assert_eq!(glob("*.png").base(), Path::new(""));
    }

    #[test]
    fn test_star_and_question_mark() {
        let g = glob("dir/*.png");
        assert!(g.matches("icon.png"));
        assert!(!g.matches("icon.pngx"));
        assert!(!g.matches("sub/icon.png"));

        let g = glob("dir/tile?.png");
        assert!(g.matches("tile1.png"));
        assert!(!g.matches("tile12.png"));
    }

    #[test]
    fn test_braces_and_classes() {
        let g = glob("dir/*.{png,gif}");
        assert!(g.matches("a.png"));
        assert!(g.matches("a.gif"));
        assert!(!g.matches("a.jpg"));

        let g = glob("dir/[a-c]*.png");
        assert!(g.matches("b.png"));
        assert!(!g.matches("d.png"));

        let g = glob("dir/[!a]*.png");
        assert!(!g.matches("a.png"));
        assert!(g.matches("z.png"));
    }

    #[test]
    fn test_recursive_star() {
        let g = glob("dir/**/*.png");
        assert!(g.matches("a.png"));
        assert!(g.matches("x/y/a.png"));
    }

    #[test]
    fn test_dot_is_literal() {
        let g = glob("dir/*.png");
        assert!(!g.matches("filexpng"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            GlobPattern::parse("dir/[abc.png"),
            Err(EmbedError::InvalidPattern { .. })
        ));
        assert!(matches!(
            GlobPattern::parse("dir/*.{png"),
            Err(EmbedError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_extension_pattern() {
        let exts = vec!["png".to_string(), "gif".to_string()];
        assert_eq!(extension_pattern(&exts), "*.{png,gif}");
        assert_eq!(extension_pattern(&exts[..1]), "*.png");
    }

    #[test]
    fn test_resolve_directory_with_wildcard_characters_in_name() {
        let dir = tempdir().unwrap();
        for name in ["assets[v2]", "my{images}", "shots{1,2}"] {
            touch(dir.path(), &format!("{name}/icon.png"));
            touch(dir.path(), &format!("{name}/notes.txt"));

            let source = dir.path().join(name);
            let files = resolve(source.to_str().unwrap(), &["png".to_string()]).unwrap();
            assert_eq!(files, vec![source.join("icon.png")], "directory {name}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_unreadable_subdirectory_reports_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        touch(dir.path(), "locked/a.png");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to privileged users
        let readable = fs::read_dir(&locked).is_ok();
        let pattern = format!("{}/**/*.png", dir.path().display());
        let result = resolve(&pattern, &[]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        match result {
            Err(EmbedError::Walk { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected walk error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_directory_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "zeta.png");
        touch(dir.path(), "alpha.png");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), ".hidden.png");
        fs::create_dir(dir.path().join("folder.png")).unwrap();

        let source = dir.path().to_str().unwrap();
        let files = resolve(source, &["png".to_string()]).unwrap();
        assert_eq!(names(&files), vec!["alpha.png", "zeta.png"]);
    }

    #[test]
    fn test_resolve_recursive_glob() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "b.png");
        touch(dir.path(), "a/c.png");
        touch(dir.path(), "a/b/d.png");

        let pattern = format!("{}/**/*.png", dir.path().display());
        let files = resolve(&pattern, &[]).unwrap();
        assert_eq!(names(&files), vec!["d.png", "c.png", "b.png"]);
    }

    #[test]
    fn test_resolve_no_match_is_empty() {
        let dir = tempdir().unwrap();
        let pattern = format!("{}/*.png", dir.path().display());
        assert!(resolve(&pattern, &[]).unwrap().is_empty());

        let missing = format!("{}/missing/*.png", dir.path().display());
        assert!(resolve(&missing, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_single_file() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "only.png");
        let path = dir.path().join("only.png");
        let files = resolve(path.to_str().unwrap(), &[]).unwrap();
        assert_eq!(files, vec![path]);
    }
}
