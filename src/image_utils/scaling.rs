use crate::error::PipelineError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Target size of the preview image.
pub const DEFAULT_DISPLAY_MAX_DIMENSION: u32 = 500;

/// Output size for fitting `width`x`height` into a `max_dimension` square.
///
/// The longer side becomes `max_dimension` and the other is scaled proportionally, rounded to
/// the nearest pixel and never below one.
pub fn fitted_dimensions(width: u32, height: u32, max_dimension: u32) -> Result<(u32, u32), PipelineError> {
    if max_dimension == 0 || width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimension {
            max_dimension,
            width,
            height,
        });
    }
    let scale_other = |other: u32, longer: u32| -> u32 {
        let scaled = (other as f64 * max_dimension as f64 / longer as f64).round() as u32;
        scaled.max(1)
    };
    if width >= height {
        Ok((max_dimension, scale_other(height, width)))
    } else {
        Ok((scale_other(width, height), max_dimension))
    }
}

/// Resizes an image so its longer side equals `max_dimension`, preserving aspect ratio.
///
/// The resize is unconditional: images already smaller than the target are enlarged.
pub fn scale_to_fit(image: &DynamicImage, max_dimension: u32) -> Result<DynamicImage, PipelineError> {
    let (width, height) = image.dimensions();
    let (new_width, new_height) = fitted_dimensions(width, height, max_dimension)?;
    Ok(image.resize_exact(new_width, new_height, FilterType::Lanczos3))
}
