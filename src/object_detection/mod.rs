pub mod class_names;
pub mod object_detection_model;
pub mod object_detection_utils;
pub mod ort_inference_session;
pub mod yolov11;

pub use class_names::{ClassNameLookup, ClassNames};
pub use object_detection_model::ObjectDetectionModel;
pub use yolov11::Yolov11;
