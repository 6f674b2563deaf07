use crate::aggregation::{TopDetection, aggregate};
use crate::error::PipelineError;
use crate::image_utils::image_io::open_image;
use crate::image_utils::scaling::scale_to_fit;
use crate::object_detection::ObjectDetectionModel;
use crate::presentation::{MAX_RANKING_ROWS, RankingRow, RunReport, present_with_limit};
use crate::rendering::AnnotationRenderer;
use image::DynamicImage;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Everything one successful run hands to the display layer.
pub struct PipelineOutput {
    pub total_count: usize,
    pub elapsed_seconds: f64,
    /// Full resolution image with boxes and labels.
    pub annotated_image: DynamicImage,
    pub ranking: Vec<RankingRow>,
    pub top_detection: Option<TopDetection>,
}

impl PipelineOutput {
    /// The annotated image resized for display.
    pub fn preview(&self, max_dimension: u32) -> Result<DynamicImage, PipelineError> {
        scale_to_fit(&self.annotated_image, max_dimension)
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            total_objects: self.total_count,
            detection_time_seconds: self.elapsed_seconds,
            top_detection: self.top_detection.clone(),
            ranking: self.ranking.clone(),
        }
    }
}

/// Runs detection on one image and builds the summary and the annotated image.
///
/// Either every output is produced or an error is returned.
pub fn run_pipeline<M: ObjectDetectionModel + ?Sized>(
    model: &mut M,
    image_path: &Path,
    renderer: &AnnotationRenderer,
) -> Result<PipelineOutput, PipelineError> {
    run_pipeline_with_limit(model, image_path, renderer, MAX_RANKING_ROWS)
}

pub fn run_pipeline_with_limit<M: ObjectDetectionModel + ?Sized>(
    model: &mut M,
    image_path: &Path,
    renderer: &AnnotationRenderer,
    ranking_limit: usize,
) -> Result<PipelineOutput, PipelineError> {
    let image = open_image(image_path)?;

    let start = Instant::now();
    let detections = model.infer(image_path)?;
    let elapsed_seconds = start.elapsed().as_secs_f64();
    debug!(
        "{} returned {} detections in {:.3}s",
        model.model_name(),
        detections.len(),
        elapsed_seconds
    );

    let aggregation = aggregate(&detections);
    let annotated_image = renderer.render(&image, &detections, model.class_names());
    let ranking = present_with_limit(&aggregation.stats, ranking_limit);

    info!(
        "Analyzed {:?}: {} objects in {} classes",
        image_path,
        aggregation.total_count,
        aggregation.stats.len()
    );
    Ok(PipelineOutput {
        total_count: aggregation.total_count,
        elapsed_seconds,
        top_detection: aggregation.top_detection(),
        annotated_image,
        ranking,
    })
}
