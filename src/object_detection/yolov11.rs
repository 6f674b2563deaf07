use crate::annotations::bounding_box::BoundingBox;
use crate::annotations::detection::{Detection, DetectionSet};
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::image_utils::image_conversion::convert_rgb_image_to_input_array;
use crate::image_utils::padding::{Letterbox, letterbox};
use crate::object_detection::class_names::{ClassNameLookup, ClassNames};
use crate::object_detection::object_detection_model::ObjectDetectionModel;
use crate::object_detection::object_detection_utils::non_maximum_suppression;
use crate::object_detection::ort_inference_session::OrtInferenceSession;
use log::debug;
use ndarray::ArrayView3;
use ort::inputs;
use ort::value::Tensor;
use std::path::Path;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.2;
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.7;

/// A YOLO11 detection model exported to ONNX.
///
/// The model takes a `1x3xHxW` image in [0, 1] and outputs `1x(4+C)xN`: for each of N candidate
/// boxes a center-format box followed by one score per class.
pub struct Yolov11 {
    ort_session: OrtInferenceSession,
    class_names: ClassNames,
    input_width: u32,
    input_height: u32,
    confidence_threshold: f32,
    iou_threshold: f32,
    model_name: String,
}

impl Yolov11 {
    pub fn new(
        model_path: &Path,
        class_names: ClassNames,
        input_width: u32,
        input_height: u32,
        model_name: String,
    ) -> Result<Self, PipelineError> {
        let ort_session = OrtInferenceSession::new(model_path)?;
        Ok(Yolov11 {
            ort_session,
            class_names,
            input_width,
            input_height,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            model_name,
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let class_names = ClassNames::from_txt_file(&config.classes_path)?;
        let model_name = config
            .model_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "yolo11".to_string());
        let model = Yolov11::new(
            &config.model_path,
            class_names,
            config.input_width,
            config.input_height,
            model_name,
        )?
        .with_confidence_threshold(config.confidence_threshold)
        .with_iou_threshold(config.iou_threshold);
        Ok(model)
    }

    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.iou_threshold = threshold;
        self
    }
}

impl ObjectDetectionModel for Yolov11 {
    fn infer(&mut self, image_path: &Path) -> Result<DetectionSet, PipelineError> {
        let image = image::open(image_path)
            .map_err(|err| PipelineError::InferenceError(format!("cannot decode {:?}: {}", image_path, err)))?
            .into_rgb8();
        if image.width() == 0 || image.height() == 0 {
            return Err(PipelineError::InferenceError(format!("{:?} has no pixels", image_path)));
        }

        let letterboxed = letterbox(&image, self.input_width, self.input_height);
        let input_array = convert_rgb_image_to_input_array(&letterboxed.image);
        let shape: Vec<usize> = input_array.shape().to_vec();
        let (data, _offset) = input_array.into_raw_vec_and_offset();
        let input_tensor = Tensor::from_array(([shape[0], shape[1], shape[2], shape[3]], data))?;

        let outputs = self.ort_session.session.run(inputs!["images" => input_tensor])?;
        let (output_shape, output_data) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: Vec<usize> = output_shape.iter().map(|&dim| dim as usize).collect();

        let candidates = decode_output(
            &dims,
            output_data,
            self.confidence_threshold,
            &letterboxed,
            image.dimensions(),
            &self.class_names,
        )?;
        let candidate_count = candidates.len();
        let detections = non_maximum_suppression(candidates, self.iou_threshold);
        debug!(
            "{}: {} candidates above {}, {} after NMS",
            self.model_name,
            candidate_count,
            self.confidence_threshold,
            detections.len()
        );
        Ok(detections)
    }

    fn class_names(&self) -> &dyn ClassNameLookup {
        &self.class_names
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Turns raw `1x(4+C)xN` model output into detections in original image coordinates.
///
/// Boxes are clamped to the image. Candidates whose best class score is below
/// `confidence_threshold` are dropped.
pub fn decode_output(
    dims: &[usize],
    data: &[f32],
    confidence_threshold: f32,
    letterbox: &Letterbox,
    original_size: (u32, u32),
    class_names: &dyn ClassNameLookup,
) -> Result<Vec<Detection>, PipelineError> {
    if dims.len() != 3 || dims[0] != 1 || dims[1] < 5 {
        return Err(PipelineError::InferenceError(format!(
            "unexpected model output shape {:?}",
            dims
        )));
    }
    let output = ArrayView3::from_shape((dims[0], dims[1], dims[2]), data)
        .map_err(|err| PipelineError::InferenceError(err.to_string()))?;
    let num_classes = dims[1] - 4;
    let (image_width, image_height) = (original_size.0 as f32, original_size.1 as f32);

    let mut detections: Vec<Detection> = Vec::new();
    for i in 0..dims[2] {
        let Some((class_id, prob)) = (0..num_classes)
            .map(|class_id| (class_id, output[[0, 4 + class_id, i]]))
            .reduce(|accum, row| if row.1 > accum.1 { row } else { accum })
        else {
            continue;
        };
        if prob < confidence_threshold {
            continue;
        }
        let x = output[[0, 0, i]];
        let y = output[[0, 1, i]];
        let w = output[[0, 2, i]];
        let h = output[[0, 3, i]];
        let (left, top) = letterbox.to_original(x - (w / 2.0), y - (h / 2.0));
        let (right, bottom) = letterbox.to_original(x + (w / 2.0), y + (h / 2.0));
        let bbox = BoundingBox::new(
            left.clamp(0.0, image_width),
            top.clamp(0.0, image_height),
            right.clamp(0.0, image_width),
            bottom.clamp(0.0, image_height),
            class_names.name_of(class_id).into_owned(),
        )
        .map_err(PipelineError::InferenceError)?;
        detections.push(Detection {
            annotation: bbox,
            confidence: prob,
            class_id,
        });
    }
    Ok(detections)
}
