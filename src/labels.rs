//! Loading of the whitespace-delimited classes file.

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::error::{PrepareError, Result};
use crate::types::{AppleClass, LabelMap};

/// Read the classes file at `path` into a label map
pub fn load_classes(path: &Path, good_label: &str) -> Result<LabelMap> {
    let content = fs::read_to_string(path).map_err(|e| PrepareError::io(path, e))?;
    let classes = parse_classes(&content, good_label);
    info!("Loaded {} labels from {}", classes.len(), path.display());
    Ok(classes)
}

/// Parse `<filename> <label> [extra fields]` lines.
///
/// Blank lines and lines with fewer than two fields are skipped. A repeated
/// file name keeps its last label.
pub fn parse_classes(content: &str, good_label: &str) -> LabelMap {
    let mut classes = LabelMap::new();
    for (line_no, line) in content.lines().enumerate() {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(image_name), Some(label)) => {
                classes.insert(
                    image_name.to_string(),
                    AppleClass::from_label(label, good_label),
                );
            }
            (Some(_), None) => debug!("Skipping line {}: missing label", line_no + 1),
            _ => {}
        }
    }
    classes
}
