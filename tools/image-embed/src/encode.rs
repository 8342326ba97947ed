//! Byte → string-literal encoding
//!
//! Each chunk of input becomes one double-quoted C string literal. Adjacent
//! literals are concatenated by the compiler, so the fragments together spell
//! out the original bytes followed by the implicit terminator.

use crate::config::CHUNK_SIZE;

/// Whether a byte can appear verbatim inside a literal.
fn is_verbatim(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7e) && byte != b'\\' && byte != b'"'
}

/// Encode one chunk as a quoted literal, octal-escaping everything else.
pub fn encode_chunk(chunk: &[u8]) -> String {
    let mut literal = String::with_capacity(chunk.len() * 4 + 2);
    literal.push('"');
    for &byte in chunk {
        if is_verbatim(byte) {
            literal.push(byte as char);
        } else {
            // Three digits always, so a following digit is never absorbed
            literal.push_str(&format!("\\{:03o}", byte));
        }
    }
    literal.push('"');
    literal
}

/// Split data into `CHUNK_SIZE` pieces and encode each one.
///
/// Empty input yields a single `""` so the definition stays well-formed.
pub fn encode_literals(data: &[u8]) -> Vec<String> {
    if data.is_empty() {
        return vec![encode_chunk(&[])];
    }
    data.chunks(CHUNK_SIZE).map(encode_chunk).collect()
}
