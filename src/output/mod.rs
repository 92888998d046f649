//! Output module for persisting the harvested document
//!
//! This module handles:
//! - Serializing the document to JSON
//! - Choosing the default output location
//! - Echoing the JSON to the console and writing the file

mod json;

pub use json::{format_document, write_document};

use crate::model::Document;
use crate::HarvestError;
use std::path::{Path, PathBuf};

/// File name used when no output path is configured
pub const DEFAULT_OUTPUT_FILE: &str = "tafsir.json";

/// Returns `tafsir.json` in the directory holding the running executable
///
/// Falls back to the current directory when the executable path is unknown.
pub fn default_output_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_OUTPUT_FILE)
}

/// Optionally prints the document as JSON, then writes it to `output_path`
///
/// # Arguments
///
/// * `document` - The harvested document
/// * `output_path` - Destination file
/// * `echo` - Print the JSON to stdout before writing
pub fn emit_document(document: &Document, output_path: &Path, echo: bool) -> Result<(), HarvestError> {
    if echo {
        println!("JSON data:");
        println!("{}", format_document(document)?);
    }

    write_document(document, output_path)?;
    tracing::info!("File path: {}", output_path.display());

    Ok(())
}
