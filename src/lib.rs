//! Object detection summaries for a single image.
//!
//! A detection model produces a list of boxes; this crate reduces them to a per-class ranking
//! and draws them onto a copy of the image.

pub mod aggregation;
pub mod annotations;
pub mod config;
pub mod error;
pub mod image_utils;
pub mod object_detection;
pub mod pipeline;
pub mod presentation;
pub mod rendering;

pub use aggregation::{Aggregation, ClassStat, aggregate};
pub use annotations::bounding_box::BoundingBox;
pub use annotations::detection::{Detection, DetectionSet};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{PipelineOutput, run_pipeline};
pub use presentation::{RankingRow, StyleTier, present};
pub use rendering::{AnnotationRenderer, ColorAssigner};
