//! JSON document output
//!
//! The document is written as a pretty-printed JSON array, exactly as held in
//! memory. No validation happens here.

use crate::model::Document;
use crate::HarvestError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formats a document as pretty-printed JSON
pub fn format_document(document: &Document) -> Result<String, HarvestError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Writes a document to `output_path`
///
/// # Arguments
///
/// * `document` - The harvested document
/// * `output_path` - Path where the JSON file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(HarvestError)` - Failed to serialize or write
pub fn write_document(document: &Document, output_path: &Path) -> Result<(), HarvestError> {
    let json = format_document(document)?;
    write_json(&json, output_path)
}

fn write_json(json: &str, output_path: &Path) -> Result<(), HarvestError> {
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
