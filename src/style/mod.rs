//! Style engine: tokenizer, parser, typed values, registries, tables, resolver.

pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod value;
pub mod registry;
pub mod table;
pub mod resolver;

pub use resolver::{default_tables, Style, StyleMetrics, DEFAULT_SHEET};
pub use table::{PropertyTable, StyleError, StyleTables};
pub use value::{Color, ImageRef, StyleValue, ValueKind};
