//! Configuration document reading
//!
//! Reads YAML or JSON files from disk and hands back the parsed tree.

pub mod file_reader;

pub use file_reader::{resolve_document_path, FileDocumentReader};
