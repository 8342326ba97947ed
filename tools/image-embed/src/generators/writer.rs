//! Indentation-aware text sink shared by the generators

use std::fmt;

const INDENT: &str = "  ";

/// Accumulates generated source, indenting every non-empty line to the
/// current scope depth.
///
/// Use it through `write!`/`writeln!`; `open_scope` and `close_scope`
/// manage brace nesting.
#[derive(Debug)]
pub struct SourceWriter {
    out: String,
    depth: usize,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
            at_line_start: true,
        }
    }

    /// Write `<header> {` and indent what follows.
    pub fn open_scope(&mut self, header: fmt::Arguments<'_>) -> fmt::Result {
        fmt::Write::write_fmt(self, format_args!("{} {{\n", header))?;
        self.depth += 1;
        Ok(())
    }

    /// Dedent and write the closing brace followed by `suffix`.
    pub fn close_scope(&mut self, suffix: &str) -> fmt::Result {
        self.depth = self.depth.saturating_sub(1);
        fmt::Write::write_fmt(self, format_args!("}}{}\n", suffix))
    }

    /// Open one `namespace` per scope, outermost first.
    pub fn open_namespaces(&mut self, scopes: &[&str]) -> fmt::Result {
        for scope in scopes {
            self.open_scope(format_args!("namespace {}", scope))?;
        }
        Ok(())
    }

    pub fn close_namespaces(&mut self, count: usize) -> fmt::Result {
        for _ in 0..count {
            self.close_scope("")?;
        }
        Ok(())
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for SourceWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for piece in s.split_inclusive('\n') {
            if self.at_line_start && piece != "\n" {
                for _ in 0..self.depth {
                    self.out.push_str(INDENT);
                }
            }
            self.out.push_str(piece);
            self.at_line_start = piece.ends_with('\n');
        }
        Ok(())
    }
}
