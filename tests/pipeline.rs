use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use image_analyzer::image_utils::image_io::{open_image, save_image};
use image_analyzer::object_detection::{ClassNameLookup, ClassNames, ObjectDetectionModel};
use image_analyzer::pipeline::run_pipeline;
use image_analyzer::rendering::LabelFont;
use image_analyzer::{AnnotationRenderer, BoundingBox, ColorAssigner, Detection, DetectionSet, PipelineError};
use std::path::{Path, PathBuf};

/// Returns a fixed result for every image.
struct FakeModel {
    result: Result<DetectionSet, String>,
    class_names: ClassNames,
    calls: usize,
}

impl FakeModel {
    fn returning(detections: DetectionSet) -> Self {
        let names = (0..20).map(|i| format!("class_{}", i)).collect();
        FakeModel {
            result: Ok(detections),
            class_names: ClassNames::new(names),
            calls: 0,
        }
    }

    fn failing(reason: &str) -> Self {
        FakeModel {
            result: Err(reason.to_string()),
            class_names: ClassNames::default(),
            calls: 0,
        }
    }
}

impl ObjectDetectionModel for FakeModel {
    fn infer(&mut self, _image_path: &Path) -> Result<DetectionSet, PipelineError> {
        self.calls += 1;
        self.result.clone().map_err(PipelineError::InferenceError)
    }

    fn class_names(&self) -> &dyn ClassNameLookup {
        &self.class_names
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

fn detection(xyxy: (f32, f32, f32, f32), confidence: f32, class_id: usize, name: &str) -> Detection {
    Detection {
        annotation: BoundingBox::new(xyxy.0, xyxy.1, xyxy.2, xyxy.3, name.to_string()).unwrap(),
        confidence,
        class_id,
    }
}

fn renderer() -> AnnotationRenderer {
    AnnotationRenderer::new(LabelFont::builtin(20.0).unwrap(), ColorAssigner::default())
}

fn write_test_image(dir: &Path) -> PathBuf {
    let path = dir.join("scene.png");
    let img = RgbImage::from_fn(160, 120, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
    save_image(&DynamicImage::ImageRgb8(img), &path).unwrap();
    path
}

#[test]
fn cat_and_dog_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = write_test_image(dir.path());
    let mut model = FakeModel::returning(vec![
        detection((10.0, 10.0, 50.0, 50.0), 0.9, 15, "cat"),
        detection((60.0, 60.0, 100.0, 100.0), 0.6, 15, "cat"),
        detection((5.0, 5.0, 20.0, 20.0), 0.8, 16, "dog"),
    ]);

    let output = run_pipeline(&mut model, &image_path, &renderer()).unwrap();

    assert_eq!(output.total_count, 3);
    assert!(output.elapsed_seconds >= 0.0);
    let summary: Vec<(usize, &str, usize, f32)> = output
        .ranking
        .iter()
        .map(|row| (row.rank, row.class_name.as_str(), row.count, row.confidence))
        .collect();
    assert_eq!(summary, vec![(1, "cat", 2, 0.9), (2, "dog", 1, 0.8)]);

    let top = output.top_detection.as_ref().unwrap();
    assert_eq!((top.class_name.as_str(), top.count), ("cat", 2));

    assert_eq!(output.annotated_image.dimensions(), (160, 120));
    assert_ne!(output.annotated_image, open_image(&image_path).unwrap());
    assert_eq!(output.preview(500).unwrap().dimensions(), (500, 375));

    let report = output.report();
    assert_eq!(report.total_objects, 3);
    assert_eq!(report.ranking.len(), 2);
}

#[test]
fn empty_detection_set() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = write_test_image(dir.path());
    let mut model = FakeModel::returning(Vec::new());

    let output = run_pipeline(&mut model, &image_path, &renderer()).unwrap();

    assert_eq!(output.total_count, 0);
    assert!(output.ranking.is_empty());
    assert!(output.top_detection.is_none());
    assert_eq!(output.annotated_image, open_image(&image_path).unwrap());
}

#[test]
fn ranking_is_capped_at_ten_classes() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = write_test_image(dir.path());
    let detections = (0..12)
        .map(|i| {
            let name = format!("class_{}", i);
            detection((1.0, 30.0, 20.0, 40.0), 0.2 + 0.05 * i as f32, i, &name)
        })
        .collect();
    let mut model = FakeModel::returning(detections);

    let output = run_pipeline(&mut model, &image_path, &renderer()).unwrap();

    assert_eq!(output.total_count, 12);
    assert_eq!(output.ranking.len(), 10);
    assert_eq!(output.ranking[0].class_name, "class_11");
    assert!(output.ranking.iter().all(|row| row.class_name != "class_0" && row.class_name != "class_1"));
    for (i, row) in output.ranking.iter().enumerate() {
        assert_eq!(row.rank, i + 1);
    }
}

#[test]
fn missing_image_fails_before_inference() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = FakeModel::returning(Vec::new());

    let result = run_pipeline(&mut model, &dir.path().join("missing.jpg"), &renderer());

    assert!(matches!(result, Err(PipelineError::ImageLoadError { .. })));
    assert_eq!(model.calls, 0);
}

#[test]
fn inference_errors_propagate_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = write_test_image(dir.path());
    let mut model = FakeModel::failing("corrupt tensor");

    match run_pipeline(&mut model, &image_path, &renderer()) {
        Err(PipelineError::InferenceError(reason)) => assert_eq!(reason, "corrupt tensor"),
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("expected an error"),
    }
    assert_eq!(model.calls, 1);
}
