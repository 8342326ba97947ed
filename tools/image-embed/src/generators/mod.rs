//! Source generators for the two output files

pub mod declarations;
pub mod definitions;
pub mod writer;

/// Comment lines opening every generated file.
pub(crate) const GENERATED_BANNER: &[&str] = &[
    "// GENERATED FILE - DO NOT EDIT",
    "// Generator: tools/image-embed",
];
