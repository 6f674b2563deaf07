use crate::annotations::bounding_box::BoundingBox;

/// A detection is what is produced as output from an object detection model.
///
/// A detection is a bounding box combined with a confidence score: a probability value that
/// encodes the model's belief that the detection is true. The box's category holds the class
/// name resolved from `class_id` by the model's class table.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub annotation: BoundingBox,
    pub confidence: f32,
    pub class_id: usize,
}

impl Detection {
    pub fn class_name(&self) -> &str {
        self.annotation.category()
    }
}

/// All detections from one inference call on one image, in model output order.
pub type DetectionSet = Vec<Detection>;
