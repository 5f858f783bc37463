use log::info;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::config::{DatasetConfig, MANIFEST_FILE_NAME};
use crate::dataset::create_dataset_info;
use crate::error::{PrepareError, Result};
use crate::types::DatasetInfo;
use crate::utils::create_output_directory;

/// Render the manifest as pretty-printed JSON; non-ASCII text is written as is
pub fn manifest_json(info: &DatasetInfo) -> Result<String> {
    serde_json::to_string_pretty(info).map_err(|e| PrepareError::json(MANIFEST_FILE_NAME, e))
}

/// Write `dataset_info.json` into `output_dir`, creating the directory if needed
pub fn write_dataset_info(info: &DatasetInfo, output_dir: &Path) -> Result<PathBuf> {
    let output_dir = create_output_directory(output_dir)?;
    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    let json = manifest_json(info)?;
    fs::write(&manifest_path, json).map_err(|e| PrepareError::io(&manifest_path, e))?;
    info!("Dataset info saved: {}", manifest_path.display());
    Ok(manifest_path)
}

/// Read a previously written manifest back
pub fn read_dataset_info(path: &Path) -> Result<DatasetInfo> {
    let file = File::open(path).map_err(|e| PrepareError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| PrepareError::json(path, e))
}

/// Print the human-readable statistics for a written manifest
pub fn print_summary(info: &DatasetInfo, manifest_path: &Path) {
    println!("Dataset info saved: {}", manifest_path.display());
    println!();
    println!("{}", info.summary());
}

/// Build the manifest for `config`, persist it and report it
pub fn prepare_dataset(config: &DatasetConfig) -> Result<DatasetInfo> {
    let info = create_dataset_info(config)?;
    let manifest_path = write_dataset_info(&info, &config.output_dir)?;
    print_summary(&info, &manifest_path);
    Ok(info)
}
