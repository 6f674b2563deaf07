use crate::error::PipelineError;
use image::{ColorType, DynamicImage, GenericImageView};
use log::debug;
use std::path::Path;

/// Opens an image file, rejecting images with no pixels.
pub fn open_image(filepath: &Path) -> Result<DynamicImage, PipelineError> {
    let image = image::open(filepath).map_err(|err| PipelineError::ImageLoadError {
        path: filepath.to_path_buf(),
        reason: err.to_string(),
    })?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::ImageLoadError {
            path: filepath.to_path_buf(),
            reason: format!("image has zero size ({}x{})", width, height),
        });
    }
    debug!("Loaded {:?} ({}x{})", filepath, width, height);
    Ok(image)
}

/// Saves an image, choosing the format from the file extension.
pub fn save_image(image: &DynamicImage, filepath: &Path) -> Result<(), PipelineError> {
    // JPEG holds 8-bit gray or RGB only.
    let is_jpeg = filepath
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
    let result = if is_jpeg && !matches!(image.color(), ColorType::L8 | ColorType::Rgb8) {
        DynamicImage::ImageRgb8(image.to_rgb8()).save(filepath)
    } else {
        image.save(filepath)
    };
    result.map_err(|err| PipelineError::ImageSaveError {
        path: filepath.to_path_buf(),
        reason: err.to_string(),
    })?;
    debug!("Saved {:?}", filepath);
    Ok(())
}
