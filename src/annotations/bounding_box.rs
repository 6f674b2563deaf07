/// A struct representing a bounding box.
///
/// A bounding box is the smallest rectangle that contains a detected object, paired with the
/// category (class name) the model assigned to it.
///
/// This project uses the standard convention of the left side of the image being x=0 and the top
/// of the image being y=0. Coordinates are in pixels of the original, full-resolution image.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    category: String,
}

impl BoundingBox {
    /// Checks if a box has valid parameters before constructing.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32, category: String) -> Result<Self, String> {
        if left > right {
            Err(format!(
                "Failed to create BoundingBox, value for left > value for right ({} > {}).",
                left, right
            ))
        } else if top > bottom {
            Err(format!(
                "Failed to create BoundingBox, value for top > value for bottom ({} > {}).",
                top, bottom
            ))
        } else {
            Ok(BoundingBox {
                left,
                top,
                right,
                bottom,
                category,
            })
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn as_xyxy(&self) -> (f32, f32, f32, f32) {
        (self.left, self.top, self.right, self.bottom)
    }

    /// Area of the overlap divided by the area of the union. Zero for disjoint boxes.
    pub fn intersection_over_union(&self, other: &BoundingBox) -> f32 {
        let inter_width = (self.right.min(other.right) - self.left.max(other.left)).max(0.0);
        let inter_height = (self.bottom.min(other.bottom) - self.top.max(other.top)).max(0.0);
        let intersection = inter_width * inter_height;
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            0.0
        } else {
            intersection / union
        }
    }
}
