use log::{debug, info};
use serde::de;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{PrepareError, Result};
use crate::types::{AnnotationMap, LabelmeAnnotation, Polygon, Shape};
use crate::utils::{base_name, create_progress_bar, list_files_with_extension};

/// Read and parse a single LabelMe JSON file
pub fn read_and_parse_json(path: &Path) -> Result<LabelmeAnnotation> {
    let file = File::open(path).map_err(|e| PrepareError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| PrepareError::json(path, e))
}

/// Keep only the polygon shapes of an annotation.
///
/// A polygon without a string `label` or a list of `[x, y]` points is a format error.
pub fn extract_polygons(annotation: &LabelmeAnnotation, path: &Path) -> Result<Vec<Polygon>> {
    annotation
        .shapes
        .iter()
        .filter(|shape| shape.is_polygon())
        .map(|shape| polygon_from_shape(shape).map_err(|e| PrepareError::json(path, e)))
        .collect()
}

fn polygon_from_shape(shape: &Shape) -> serde_json::Result<Polygon> {
    let label = shape
        .label
        .clone()
        .ok_or_else(|| <serde_json::Error as de::Error>::missing_field("label"))?;
    let points = shape
        .points
        .clone()
        .ok_or_else(|| <serde_json::Error as de::Error>::missing_field("points"))?;
    Ok(Polygon {
        label: serde_json::from_value(label)?,
        points: serde_json::from_value(points)?,
    })
}

/// Parse every `*.json` file in `labelme_dir` into an annotation map keyed by image file name.
///
/// The first unreadable or malformed file aborts the whole parse.
pub fn parse_labelme_annotations(labelme_dir: &Path) -> Result<AnnotationMap> {
    let json_files = list_files_with_extension(labelme_dir, "json")?;
    let pb = create_progress_bar(json_files.len() as u64, "Annotations");

    let mut annotations = AnnotationMap::new();
    for json_path in &json_files {
        let (annotation, polygons) = read_and_parse_json(json_path)
            .and_then(|annotation| {
                let polygons = extract_polygons(&annotation, json_path)?;
                Ok((annotation, polygons))
            })
            .map_err(|e| {
                pb.abandon();
                e
            })?;
        let image_name = base_name(&annotation.image_path).to_string();
        debug!(
            "{}: {} polygon(s) of {} shape(s) for {}",
            json_path.display(),
            polygons.len(),
            annotation.shapes.len(),
            image_name
        );
        annotations.insert(image_name, polygons);
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "Parsed {} annotation files from {}",
        json_files.len(),
        labelme_dir.display()
    );
    Ok(annotations)
}
