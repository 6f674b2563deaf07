use crate::annotations::detection::DetectionSet;
use crate::error::PipelineError;
use crate::object_detection::class_names::ClassNameLookup;
use std::path::Path;

/// Defines a trait that all object detection models must follow.
///
/// `infer` reads the image itself so that a model may decode it however its input requires.
/// Detections are in pixel coordinates of the original image. Failures are
/// [`PipelineError::InferenceError`]; an image with no objects is an empty set, not an error.
pub trait ObjectDetectionModel {
    fn infer(&mut self, image_path: &Path) -> Result<DetectionSet, PipelineError>;

    /// The id to name table the model's detections were labelled with.
    fn class_names(&self) -> &dyn ClassNameLookup;

    fn model_name(&self) -> &str;
}
