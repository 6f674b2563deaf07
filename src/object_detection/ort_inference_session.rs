use crate::error::PipelineError;
use log::info;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use std::path::Path;

/// An onnxruntime inference session.
///
/// All of the object detection classes in this project are just wrappers
/// around an ONNX inference session that handles running the model on
/// hardware.
pub struct OrtInferenceSession {
    pub session: Session,
}

impl OrtInferenceSession {
    /// Any failure while building the session means the model is unavailable.
    pub fn new(model_path: &Path) -> Result<Self, PipelineError> {
        if !model_path.exists() {
            return Err(PipelineError::ModelUnavailable(format!(
                "Model path does not exist, or cannot be read: {:?}",
                model_path
            )));
        }
        let session =
            build_session(model_path).map_err(|err| PipelineError::ModelUnavailable(err.to_string()))?;
        info!("Loaded ONNX model {:?}", model_path);
        Ok(Self { session })
    }
}

fn build_session(model_path: &Path) -> ort::Result<Session> {
    let session = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .commit_from_file(model_path)?;
    Ok(session)
}
