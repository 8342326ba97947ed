//! Definitions (.cpp) generator

use std::fmt::Write as FmtWrite;

use super::writer::SourceWriter;
use super::GENERATED_BANNER;
use crate::config::{EmbedConfig, TABLE_SYMBOL};
use crate::encode::{encode_chunk, encode_literals};
use crate::error::Result;
use crate::model::{ImageAsset, Symbol, SymbolTable};

/// Name stored in the lookup table for a symbol.
pub fn table_entry_name(config: &EmbedConfig, symbol: &Symbol) -> String {
    if config.path_prefix.is_empty() {
        format!("{}.png", symbol)
    } else {
        format!("{}/{}.png", config.path_prefix.trim_end_matches('/'), symbol)
    }
}

/// Streams byte arrays into the definitions file one asset at a time.
pub struct DefinitionsBuilder<'a> {
    writer: SourceWriter,
    config: &'a EmbedConfig,
    scopes: usize,
}

impl<'a> DefinitionsBuilder<'a> {
    /// Write the banner, the declarations include and the namespace preamble.
    pub fn begin(config: &'a EmbedConfig, declarations_name: &str) -> Result<Self> {
        let mut writer = SourceWriter::new();
        for line in GENERATED_BANNER {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer, "#include {}", encode_chunk(declarations_name.as_bytes()))?;
        writeln!(writer)?;

        let scopes = config.scopes();
        writer.open_namespaces(&scopes)?;

        Ok(Self {
            writer,
            config,
            scopes: scopes.len(),
        })
    }

    /// Emit one byte array as concatenated literal fragments.
    pub fn push_asset(&mut self, asset: &ImageAsset) -> Result<()> {
        let w = &mut self.writer;
        let literals = encode_literals(&asset.bytes);

        writeln!(w, "const char {}[] =", asset.symbol)?;
        w.indent();
        let last = literals.len() - 1;
        for (i, literal) in literals.iter().enumerate() {
            if i == last {
                writeln!(w, "{};", literal)?;
            } else {
                writeln!(w, "{}", literal)?;
            }
        }
        w.dedent();
        writeln!(w)?;

        Ok(())
    }

    /// Emit the lookup table and close the preamble.
    pub fn finish(mut self, table: &SymbolTable) -> Result<String> {
        let w = &mut self.writer;

        w.open_scope(format_args!("const char* {}[] =", TABLE_SYMBOL))?;
        for symbol in table.symbols() {
            let name = table_entry_name(self.config, symbol);
            writeln!(
                w,
                "{}, {sym}, {sym} + sizeof({sym}) - 1,",
                encode_chunk(name.as_bytes()),
                sym = symbol
            )?;
        }
        writeln!(w, "0, 0, 0")?;
        w.close_scope(";")?;

        w.close_namespaces(self.scopes)?;
        Ok(self.writer.finish())
    }
}
