use image::RgbImage;
use ndarray::Array4;

/// Converts an rgb8 image into a model input array.
///
/// The dimensions of the array encode (image, channel, row, column), with a single image and
/// pixel values scaled into [0, 1].
pub fn convert_rgb_image_to_input_array(rgb_image: &RgbImage) -> Array4<f32> {
    let mut image_array = Array4::<f32>::zeros((
        1,
        3,
        rgb_image.height() as usize,
        rgb_image.width() as usize,
    ));
    for (x, y, pixel) in rgb_image.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        let [r, g, b] = pixel.0;
        image_array[[0, 0, y, x]] = (r as f32) / 255.;
        image_array[[0, 1, y, x]] = (g as f32) / 255.;
        image_array[[0, 2, y, x]] = (b as f32) / 255.;
    }
    image_array
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn convert_rgb_image_to_input_array_test() {
        // 3 wide, 2 tall so that rows and columns cannot be confused.
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 1, Rgb([255, 0, 0]));
        img.put_pixel(1, 1, Rgb([0, 255, 0]));
        img.put_pixel(2, 1, Rgb([0, 0, 255]));
        img.put_pixel(2, 0, Rgb([255, 255, 255]));

        let arr = convert_rgb_image_to_input_array(&img);
        assert_eq!(arr.shape(), &[1, 3, 2, 3]);
        // Each line below tests one pixel by getting all its channels into a tuple.
        assert_eq!((arr[[0, 0, 0, 0]], arr[[0, 1, 0, 0]], arr[[0, 2, 0, 0]]), (0.0, 0.0, 0.0));
        assert_eq!((arr[[0, 0, 1, 0]], arr[[0, 1, 1, 0]], arr[[0, 2, 1, 0]]), (1.0, 0.0, 0.0));
        assert_eq!((arr[[0, 0, 1, 1]], arr[[0, 1, 1, 1]], arr[[0, 2, 1, 1]]), (0.0, 1.0, 0.0));
        assert_eq!((arr[[0, 0, 1, 2]], arr[[0, 1, 1, 2]], arr[[0, 2, 1, 2]]), (0.0, 0.0, 1.0));
        assert_eq!((arr[[0, 0, 0, 2]], arr[[0, 1, 0, 2]], arr[[0, 2, 0, 2]]), (1.0, 1.0, 1.0));
    }
}
