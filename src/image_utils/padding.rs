use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Fill value of the padded border, the YOLO convention.
pub const LETTERBOX_FILL: Rgb<u8> = Rgb([114, 114, 114]);

/// An image resized to fit a model input and padded evenly on both sides of the short axis.
pub struct Letterbox {
    pub image: RgbImage,
    /// Scale factor from original pixels to letterboxed pixels.
    pub gain: f32,
    pub pad_x: u32,
    pub pad_y: u32,
}

impl Letterbox {
    /// Maps a point in letterboxed coordinates back onto the original image.
    pub fn to_original(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.pad_x as f32) / self.gain,
            (y - self.pad_y as f32) / self.gain,
        )
    }
}

/// Resizes `original_image` to fit within `new_width`x`new_height` and pads the remainder.
pub fn letterbox(original_image: &RgbImage, new_width: u32, new_height: u32) -> Letterbox {
    let (width, height) = original_image.dimensions();
    let gain = (new_width as f32 / width as f32).min(new_height as f32 / height as f32);
    let resized_width = ((width as f32 * gain).round() as u32).clamp(1, new_width);
    let resized_height = ((height as f32 * gain).round() as u32).clamp(1, new_height);
    let resized = imageops::resize(original_image, resized_width, resized_height, FilterType::Triangle);

    let pad_x = (new_width - resized_width) / 2;
    let pad_y = (new_height - resized_height) / 2;
    let mut padded_image = RgbImage::from_pixel(new_width, new_height, LETTERBOX_FILL);
    imageops::replace(&mut padded_image, &resized, pad_x as i64, pad_y as i64);

    Letterbox {
        image: padded_image,
        gain,
        pad_x,
        pad_y,
    }
}
