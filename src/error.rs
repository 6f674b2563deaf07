use std::path::PathBuf;

/// Errors produced by one analysis run.
///
/// The first three variants originate in collaborators (the detection model and the image
/// loader) and are passed through unchanged. Aggregation, rendering and presentation never fail.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The detection model could not be loaded.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model failed while running on an image.
    #[error("Inference failed: {0}")]
    InferenceError(String),

    /// The image is missing, unreadable or has zero width or height.
    #[error("Failed to load image {path:?}: {reason}")]
    ImageLoadError { path: PathBuf, reason: String },

    /// A resize was requested with a zero target, or on an empty image.
    #[error("Invalid dimension: cannot fit a {width}x{height} image into {max_dimension} pixels")]
    InvalidDimension {
        max_dimension: u32,
        width: u32,
        height: u32,
    },

    #[error("Failed to save image {path:?}: {reason}")]
    ImageSaveError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<ort::Error> for PipelineError {
    /// Session failures after the model is loaded are runtime inference failures.
    fn from(err: ort::Error) -> Self {
        PipelineError::InferenceError(err.to_string())
    }
}
