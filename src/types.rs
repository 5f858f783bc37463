use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// Supported image formats
pub const IMG_FORMATS: &[&str] = &[
    "bmp", "dng", "jpeg", "jpg", "mpo", "png", "tif", "tiff", "webp", "pfm",
];

/// Shape type retained from LabelMe annotations
pub const POLYGON_SHAPE_TYPE: &str = "polygon";

/// Quality class of an apple, stored in the manifest as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AppleClass {
    Good = 0,
    Bad = 1,
}

impl AppleClass {
    /// Every label other than the good sentinel collapses to `Bad`
    pub fn from_label(label: &str, good_label: &str) -> Self {
        if label == good_label {
            AppleClass::Good
        } else {
            AppleClass::Bad
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AppleClass::Good),
            1 => Some(AppleClass::Bad),
            _ => None,
        }
    }
}

impl fmt::Display for AppleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for AppleClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for AppleClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        AppleClass::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown class code {}", code)))
    }
}

/// Image file name to class code, built from the classes file
pub type LabelMap = HashMap<String, AppleClass>;

/// Image file name to its polygon annotations
pub type AnnotationMap = HashMap<String, Vec<Polygon>>;

// A LabelMe shape. Label and points are only checked for polygons, other
// shapes are dropped whatever their layout.
#[derive(Debug, Deserialize, Clone)]
pub struct Shape {
    #[serde(default)]
    pub label: Option<serde_json::Value>,
    #[serde(default)]
    pub points: Option<serde_json::Value>,
    pub shape_type: String,
}

impl Shape {
    pub fn is_polygon(&self) -> bool {
        self.shape_type == POLYGON_SHAPE_TYPE
    }
}

// The subset of a LabelMe annotation file needed to build the manifest
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LabelmeAnnotation {
    pub image_path: String,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

/// A labelled polygon belonging to one image
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Polygon {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// One entry of the manifest's image list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub filename: String,
    pub path: String,
    pub label: Option<AppleClass>,
    pub has_annotation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygons: Option<usize>,
}

/// The dataset manifest written to `dataset_info.json`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub total_images: usize,
    pub labeled_images: usize,
    pub good_apples: usize,
    pub bad_apples: usize,
    pub annotated_images: usize,
    pub classes: BTreeMap<String, String>,
    pub images: Vec<ImageRecord>,
}

impl DatasetInfo {
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            total_images: self.total_images,
            labeled_images: self.labeled_images,
            good_apples: self.good_apples,
            bad_apples: self.bad_apples,
            annotated_images: self.annotated_images,
            good_percent: crate::utils::percentage(self.good_apples, self.labeled_images),
            bad_percent: crate::utils::percentage(self.bad_apples, self.labeled_images),
            annotated_percent: crate::utils::percentage(self.annotated_images, self.total_images),
        }
    }
}

/// Counts and shares reported after the manifest is written.
///
/// Percentages are `None` when their denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetSummary {
    pub total_images: usize,
    pub labeled_images: usize,
    pub good_apples: usize,
    pub bad_apples: usize,
    pub annotated_images: usize,
    pub good_percent: Option<f64>,
    pub bad_percent: Option<f64>,
    pub annotated_percent: Option<f64>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Total images: {}", self.total_images)?;
        writeln!(f, "  Labeled: {}", self.labeled_images)?;
        writeln!(
            f,
            "  Good apples: {} ({})",
            self.good_apples,
            crate::utils::format_percent(self.good_percent)
        )?;
        writeln!(
            f,
            "  Bad apples: {} ({})",
            self.bad_apples,
            crate::utils::format_percent(self.bad_percent)
        )?;
        write!(
            f,
            "  With segmentation: {} ({})",
            self.annotated_images,
            crate::utils::format_percent(self.annotated_percent)
        )
    }
}
