use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use crate::annotations::parse_labelme_annotations;
use crate::config::DatasetConfig;
use crate::error::{PrepareError, Result};
use crate::labels::load_classes;
use crate::types::{AnnotationMap, AppleClass, DatasetInfo, ImageRecord, LabelMap};
use crate::utils::{file_name_string, list_files_with_extension};

// Number of unmatched names listed in debug output
const MAX_LISTED_NAMES: usize = 5;

/// Load labels and annotations, enumerate the training images and assemble the manifest
pub fn create_dataset_info(config: &DatasetConfig) -> Result<DatasetInfo> {
    if !config.dataset_dir.exists() {
        return Err(PrepareError::DatasetNotFound {
            path: config.dataset_dir.clone(),
        });
    }

    let classes = load_classes(&config.classes_path(), &config.good_label)?;
    let annotations = parse_labelme_annotations(&config.labelme_path())?;

    let training_dir = config.training_path();
    let images = list_files_with_extension(&training_dir, &config.image_ext)?;
    info!(
        "Found {} .{} images in {}",
        images.len(),
        config.image_ext,
        training_dir.display()
    );

    Ok(build_dataset_info(&classes, &annotations, &images, config))
}

/// Join labels and annotations onto the image listing.
///
/// `images` must already be sorted by file name.
pub fn build_dataset_info(
    classes: &LabelMap,
    annotations: &AnnotationMap,
    images: &[PathBuf],
    config: &DatasetConfig,
) -> DatasetInfo {
    let good_apples = classes
        .values()
        .filter(|&&class| class == AppleClass::Good)
        .count();
    let bad_apples = classes
        .values()
        .filter(|&&class| class == AppleClass::Bad)
        .count();

    let records: Vec<ImageRecord> = images
        .iter()
        .map(|image_path| {
            // Listed image files always have a file name
            let filename = file_name_string(image_path).unwrap_or_default();
            let polygons = annotations.get(&filename).map(Vec::len);
            ImageRecord {
                path: image_path.to_string_lossy().into_owned(),
                label: classes.get(&filename).copied(),
                has_annotation: polygons.is_some(),
                polygons,
                filename,
            }
        })
        .collect();

    report_unmatched(classes, annotations, &records);

    DatasetInfo {
        total_images: images.len(),
        labeled_images: classes.len(),
        good_apples,
        bad_apples,
        annotated_images: annotations.len(),
        classes: class_table(config),
        images: records,
    }
}

/// The class code to class name table written into the manifest
pub fn class_table(config: &DatasetConfig) -> BTreeMap<String, String> {
    BTreeMap::from([
        (AppleClass::Good.to_string(), config.good_label.clone()),
        (AppleClass::Bad.to_string(), config.bad_label.clone()),
    ])
}

// Labels and annotations are expected to name existing training images
fn report_unmatched(classes: &LabelMap, annotations: &AnnotationMap, records: &[ImageRecord]) {
    let known: HashSet<&str> = records.iter().map(|r| r.filename.as_str()).collect();

    let mut unmatched_labels: Vec<&str> = classes
        .keys()
        .map(String::as_str)
        .filter(|name| !known.contains(name))
        .collect();
    let mut unmatched_annotations: Vec<&str> = annotations
        .keys()
        .map(String::as_str)
        .filter(|name| !known.contains(name))
        .collect();

    if !unmatched_labels.is_empty() {
        unmatched_labels.sort_unstable();
        warn!(
            "{} labeled file(s) have no training image",
            unmatched_labels.len()
        );
        debug!(
            "Unmatched labels: {:?}",
            &unmatched_labels[..unmatched_labels.len().min(MAX_LISTED_NAMES)]
        );
    }
    if !unmatched_annotations.is_empty() {
        unmatched_annotations.sort_unstable();
        warn!(
            "{} annotation(s) have no training image",
            unmatched_annotations.len()
        );
        debug!(
            "Unmatched annotations: {:?}",
            &unmatched_annotations[..unmatched_annotations.len().min(MAX_LISTED_NAMES)]
        );
    }
}
