use crate::error::PipelineError;
use crate::image_utils::scaling::DEFAULT_DISPLAY_MAX_DIMENSION;
use crate::object_detection::yolov11::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_IOU_THRESHOLD};
use crate::presentation::ranking::MAX_RANKING_ROWS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_MODEL_PATH: &str = "models/yolo11x.onnx";
const DEFAULT_CLASSES_PATH: &str = "models/coco-classes.txt";
const DEFAULT_INPUT_SIZE: u32 = 640;
const DEFAULT_FONT_SIZE: f32 = 20.0;
const DEFAULT_FONT_CANDIDATES: [&str; 6] = [
    "arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

/// Settings for the model and the rendering of one analysis run.
///
/// Every field has a default, so a TOML file only needs the values it changes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub model_path: PathBuf,

    /// One class name per line; the line index is the class id.
    pub classes_path: PathBuf,

    pub input_width: u32,
    pub input_height: u32,

    /// Detections scoring below this are discarded by the model.
    pub confidence_threshold: f32,

    /// Overlap above which the weaker of two same-class boxes is discarded.
    pub iou_threshold: f32,

    /// Longest side of the preview image.
    pub display_max_dimension: u32,

    pub font_size: f32,

    /// Label fonts to try in order before falling back to the built-in font.
    pub font_candidates: Vec<PathBuf>,

    pub ranking_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            classes_path: PathBuf::from(DEFAULT_CLASSES_PATH),
            input_width: DEFAULT_INPUT_SIZE,
            input_height: DEFAULT_INPUT_SIZE,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            display_max_dimension: DEFAULT_DISPLAY_MAX_DIMENSION,
            font_size: DEFAULT_FONT_SIZE,
            font_candidates: DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            ranking_limit: MAX_RANKING_ROWS,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| PipelineError::ConfigError(format!("read {}: {}", path.display(), err)))?;
        let config = Self::from_toml_str(&raw)
            .map_err(|err| PipelineError::ConfigError(format!("{}: {}", path.display(), err)))?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig =
            toml::from_str(raw).map_err(|err| PipelineError::ConfigError(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.input_width == 0 || self.input_height == 0 {
            return Err(PipelineError::ConfigError(format!(
                "model input size must be positive, got {}x{}",
                self.input_width, self.input_height
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(PipelineError::ConfigError(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(PipelineError::ConfigError(format!(
                "iou_threshold must be within [0, 1], got {}",
                self.iou_threshold
            )));
        }
        if self.display_max_dimension == 0 {
            return Err(PipelineError::ConfigError(
                "display_max_dimension must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
