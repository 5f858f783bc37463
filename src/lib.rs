//! Apple quality dataset preparation
//!
//! This library joins a classes file, LabelMe polygon annotations and the training
//! image listing into a single `dataset_info.json` manifest.

pub mod annotations;
pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod labels;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use annotations::parse_labelme_annotations;
pub use config::{Args, DatasetConfig, MANIFEST_FILE_NAME};
pub use dataset::{build_dataset_info, create_dataset_info};
pub use error::{PrepareError, Result};
pub use io::{prepare_dataset, print_summary, read_dataset_info, write_dataset_info};
pub use labels::{load_classes, parse_classes};
pub use types::{
    AnnotationMap, AppleClass, DatasetInfo, DatasetSummary, ImageRecord, LabelMap, Polygon,
};
