use glob::{glob, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrepareError, Result};

/// List the files directly inside `dir` with the given extension, sorted by file name
pub fn list_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    // The directory is matched literally, only the file name is a pattern
    let pattern = format!("{}/*.{}", Pattern::escape(&dir.to_string_lossy()), ext);
    let entries = glob(&pattern).map_err(|source| PrepareError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            PrepareError::io(path, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Base file name of a path as an owned string
pub fn file_name_string(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Base file name of a path recorded inside an annotation; both separators are accepted
pub fn base_name(image_path: &str) -> &str {
    image_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(image_path)
}

/// Share of `part` in `whole` as a percentage, or `None` when `whole` is zero
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}

pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{:.1}%", p),
        None => "n/a".to_string(),
    }
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .progress_chars("#>-"),
    );
    pb
}

/// Create the output directory and its parents; existing directories are kept
pub fn create_output_directory(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        info!("Directory {:?} already exists. Keeping it.", path);
    }
    fs::create_dir_all(path).map_err(|e| PrepareError::io(path, e))?;
    Ok(path.to_path_buf())
}
