use crate::annotations::detection::Detection;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads a file with the class names into a vector so that the number ids
/// which come directly from the ORT inference session can be given meaning.
///
/// Trailing blank lines are ignored.
pub fn read_classes_txt_file(filepath: &Path) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = BufReader::new(File::open(filepath)?)
        .lines()
        .map(|line| line.map(|name| name.trim().to_string()))
        .collect::<io::Result<_>>()?;
    while names.last().is_some_and(|name| name.is_empty()) {
        names.pop();
    }
    Ok(names)
}

/// Non maxmimum suppression is a way of removing duplicate detections.
///
/// Boxes only suppress boxes of the same class. The result is ordered by confidence, highest
/// first, with equal confidences keeping their input order.
pub fn non_maximum_suppression(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let mut detections_to_remove: Vec<bool> = vec![false; detections.len()];
    for (current_index, current_det) in detections.iter().enumerate() {
        if detections_to_remove[current_index] {
            continue;
        }
        for (other_index, other_det) in detections[current_index + 1..].iter().enumerate() {
            let other_index = current_index + other_index + 1;
            if detections_to_remove[other_index] || current_det.class_id != other_det.class_id {
                continue;
            }
            let iou = current_det
                .annotation
                .intersection_over_union(&other_det.annotation);
            if iou > iou_threshold {
                detections_to_remove[other_index] = true;
            }
        }
    }
    let mut drop_iter = detections_to_remove.into_iter();
    detections.retain(|_| !drop_iter.next().unwrap_or(false));
    detections
}
