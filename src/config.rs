use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::{PrepareError, Result};
use crate::types::IMG_FORMATS;

/// Name of the manifest written into the output directory
pub const MANIFEST_FILE_NAME: &str = "dataset_info.json";

/// Label text that marks an apple as good in the classes file
pub const DEFAULT_GOOD_LABEL: &str = "хорошее";

/// Label text written for the bad class in the manifest
pub const DEFAULT_BAD_LABEL: &str = "плохое";

/// Command-line arguments for preparing the apple quality dataset.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Dataset root containing the training images, LabelMe JSON files and the classes file
    #[arg(short = 'd', long = "dataset_dir", default_value = "omsk")]
    pub dataset_dir: String,

    /// Directory the dataset manifest is written to
    #[arg(short = 'o', long = "output_dir", default_value = "dataset_prepared")]
    pub output_dir: String,

    /// Classes file name inside the dataset root
    #[arg(long = "classes_file", default_value = "classes.txt")]
    pub classes_file: String,

    /// LabelMe annotation directory name inside the dataset root
    #[arg(long = "labelme_dir", default_value = "labelme")]
    pub labelme_dir: String,

    /// Training image directory name inside the dataset root
    #[arg(long = "training_dir", default_value = "Training")]
    pub training_dir: String,

    /// Extension of the training images
    #[arg(long = "image_ext", default_value = "jpg", value_parser = validate_image_ext)]
    pub image_ext: String,

    /// Label text of good apples; every other label counts as bad
    #[arg(long = "good_label", default_value = DEFAULT_GOOD_LABEL)]
    pub good_label: String,

    /// Label text of bad apples, used for the manifest class table
    #[arg(long = "bad_label", default_value = DEFAULT_BAD_LABEL)]
    pub bad_label: String,
}

impl Args {
    /// Resolve the arguments into an explicit dataset configuration
    pub fn to_dataset_config(&self) -> Result<DatasetConfig> {
        if self.good_label.trim().is_empty() {
            return Err(PrepareError::InvalidConfig(
                "good_label must not be empty".to_string(),
            ));
        }
        if self.good_label.split_whitespace().count() > 1 {
            return Err(PrepareError::InvalidConfig(format!(
                "good_label must be a single word, got '{}'",
                self.good_label
            )));
        }

        Ok(DatasetConfig {
            dataset_dir: PathBuf::from(&self.dataset_dir),
            output_dir: PathBuf::from(&self.output_dir),
            classes_file: self.classes_file.clone(),
            labelme_dir: self.labelme_dir.clone(),
            training_dir: self.training_dir.clone(),
            image_ext: validate_image_ext(&self.image_ext).map_err(PrepareError::InvalidConfig)?,
            good_label: self.good_label.clone(),
            bad_label: self.bad_label.clone(),
        })
    }
}

/// Layout of the dataset on disk and the class names used in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub dataset_dir: PathBuf,
    pub output_dir: PathBuf,
    pub classes_file: String,
    pub labelme_dir: String,
    pub training_dir: String,
    pub image_ext: String,
    pub good_label: String,
    pub bad_label: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("omsk"),
            output_dir: PathBuf::from("dataset_prepared"),
            classes_file: "classes.txt".to_string(),
            labelme_dir: "labelme".to_string(),
            training_dir: "Training".to_string(),
            image_ext: "jpg".to_string(),
            good_label: DEFAULT_GOOD_LABEL.to_string(),
            bad_label: DEFAULT_BAD_LABEL.to_string(),
        }
    }
}

impl DatasetConfig {
    /// Configuration with the default layout rooted at `dataset_dir`
    pub fn new(dataset_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            dataset_dir: dataset_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn training_path(&self) -> PathBuf {
        self.dataset_dir.join(&self.training_dir)
    }

    pub fn labelme_path(&self) -> PathBuf {
        self.dataset_dir.join(&self.labelme_dir)
    }

    pub fn classes_path(&self) -> PathBuf {
        self.dataset_dir.join(&self.classes_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE_NAME)
    }
}

// Normalize the extension and make sure it is a known image format
fn validate_image_ext(s: &str) -> std::result::Result<String, String> {
    let ext = s.trim().trim_start_matches('.').to_lowercase();
    if IMG_FORMATS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(format!(
            "IMAGE_EXT must be one of: {}",
            IMG_FORMATS.join(", ")
        ))
    }
}
