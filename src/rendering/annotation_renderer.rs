use crate::annotations::detection::Detection;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::object_detection::class_names::ClassNameLookup;
use crate::rendering::color::ColorAssigner;
use crate::rendering::font::LabelFont;
use image::{DynamicImage, ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};
use imageproc::definitions::Clamp;
use imageproc::drawing::{Canvas, draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

pub const LABEL_STROKE_WIDTH: u32 = 3;
pub const LABEL_PADDING_X: u32 = 5;
pub const LABEL_PADDING_Y: u32 = 2;
pub const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Draws detection boxes and "<class> <confidence>" labels onto a copy of an image.
///
/// Each label sits on a filled background in the class color whose bottom edge touches the top
/// of its box. Labels of boxes near the top of the image may extend past the canvas; whatever
/// falls outside is not drawn. The copy keeps the pixel format of the source image.
pub struct AnnotationRenderer {
    font: LabelFont,
    colors: ColorAssigner,
}

impl AnnotationRenderer {
    pub fn new(font: LabelFont, colors: ColorAssigner) -> Self {
        AnnotationRenderer { font, colors }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let font = LabelFont::resolve(&config.font_candidates, config.font_size)?;
        Ok(AnnotationRenderer::new(font, ColorAssigner::default()))
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    /// Returns the annotated copy. With no detections the copy is pixel-identical to `image`.
    pub fn render(
        &self,
        image: &DynamicImage,
        detections: &[Detection],
        class_names: &dyn ClassNameLookup,
    ) -> DynamicImage {
        if detections.is_empty() {
            return image.clone();
        }
        match image {
            DynamicImage::ImageLuma8(source) => {
                DynamicImage::ImageLuma8(self.annotate(source, detections, class_names, |c| c.to_luma()))
            }
            DynamicImage::ImageLumaA8(source) => {
                DynamicImage::ImageLumaA8(self.annotate(source, detections, class_names, |c| c.to_luma_alpha()))
            }
            DynamicImage::ImageRgb8(source) => {
                DynamicImage::ImageRgb8(self.annotate(source, detections, class_names, |c| c))
            }
            DynamicImage::ImageRgba8(source) => {
                DynamicImage::ImageRgba8(self.annotate(source, detections, class_names, |c| c.to_rgba()))
            }
            DynamicImage::ImageLuma16(source) => DynamicImage::ImageLuma16(self.annotate(
                source,
                detections,
                class_names,
                |c| Luma(c.to_luma().0.map(widen_u16)),
            )),
            DynamicImage::ImageLumaA16(source) => DynamicImage::ImageLumaA16(self.annotate(
                source,
                detections,
                class_names,
                |c| LumaA(c.to_luma_alpha().0.map(widen_u16)),
            )),
            DynamicImage::ImageRgb16(source) => DynamicImage::ImageRgb16(self.annotate(
                source,
                detections,
                class_names,
                |c| Rgb(c.0.map(widen_u16)),
            )),
            DynamicImage::ImageRgba16(source) => DynamicImage::ImageRgba16(self.annotate(
                source,
                detections,
                class_names,
                |c| Rgba(c.to_rgba().0.map(widen_u16)),
            )),
            DynamicImage::ImageRgb32F(source) => DynamicImage::ImageRgb32F(self.annotate(
                source,
                detections,
                class_names,
                |c| Rgb(c.0.map(widen_f32)),
            )),
            DynamicImage::ImageRgba32F(source) => DynamicImage::ImageRgba32F(self.annotate(
                source,
                detections,
                class_names,
                |c| Rgba(c.to_rgba().0.map(widen_f32)),
            )),
            other => DynamicImage::ImageRgba8(self.annotate(
                &other.to_rgba8(),
                detections,
                class_names,
                |c| c.to_rgba(),
            )),
        }
    }

    /// Draws every detection onto a clone of `source`. `paint` maps an 8-bit RGB color into the
    /// pixel type of the canvas.
    fn annotate<P>(
        &self,
        source: &ImageBuffer<P, Vec<P::Subpixel>>,
        detections: &[Detection],
        class_names: &dyn ClassNameLookup,
        paint: impl Fn(Rgb<u8>) -> P,
    ) -> ImageBuffer<P, Vec<P::Subpixel>>
    where
        P: Pixel,
        P::Subpixel: Into<f32> + Clamp<f32>,
    {
        let mut canvas = source.clone();
        for detection in detections {
            self.draw_detection(&mut canvas, detection, class_names, &paint);
        }
        canvas
    }

    fn draw_detection<C>(
        &self,
        canvas: &mut C,
        detection: &Detection,
        class_names: &dyn ClassNameLookup,
        paint: &impl Fn(Rgb<u8>) -> C::Pixel,
    ) where
        C: Canvas,
        <C::Pixel as Pixel>::Subpixel: Into<f32> + Clamp<f32>,
    {
        let color = paint(self.colors.color_for(detection.class_id));
        let (left, top, right, bottom) = detection.annotation.as_xyxy();
        let (x1, y1) = (left.round() as i32, top.round() as i32);
        let (x2, y2) = (right.round() as i32, bottom.round() as i32);
        draw_box_outline(canvas, (x1, y1, x2, y2), color, LABEL_STROKE_WIDTH);

        let label = format!(
            "{} {:.2}",
            class_names.name_of(detection.class_id),
            detection.confidence
        );
        let (text_width, text_height) = self.font.text_size(&label);
        let background_width = text_width + 2 * LABEL_PADDING_X;
        let background_height = text_height + 2 * LABEL_PADDING_Y;
        let background_top = y1 - background_height as i32;
        draw_filled_rect_mut(
            canvas,
            Rect::at(x1, background_top).of_size(background_width, background_height),
            color,
        );
        self.font.draw_text(
            canvas,
            paint(LABEL_TEXT_COLOR),
            x1 + LABEL_PADDING_X as i32,
            background_top + LABEL_PADDING_Y as i32,
            &label,
        );
    }
}

fn widen_u16(channel: u8) -> u16 {
    u16::from(channel) * 257
}

fn widen_f32(channel: u8) -> f32 {
    f32::from(channel) / 255.0
}

/// Outline of `stroke_width` pixels growing inward from the box edges, which are inclusive.
fn draw_box_outline<C: Canvas>(canvas: &mut C, xyxy: (i32, i32, i32, i32), color: C::Pixel, stroke_width: u32) {
    let (x1, y1, x2, y2) = xyxy;
    for inset in 0..stroke_width as i32 {
        let (left, top, right, bottom) = (x1 + inset, y1 + inset, x2 - inset, y2 - inset);
        if right < left || bottom < top {
            break;
        }
        let rect = Rect::at(left, top).of_size((right - left + 1) as u32, (bottom - top + 1) as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::bounding_box::BoundingBox;
    use crate::object_detection::class_names::ClassNames;
    use image::{ColorType, GenericImageView, RgbImage, RgbaImage};

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn renderer() -> AnnotationRenderer {
        AnnotationRenderer::new(LabelFont::builtin(20.0).unwrap(), ColorAssigner::default())
    }

    fn class_names() -> ClassNames {
        ClassNames::new(vec!["cat".to_string(), "dog".to_string()])
    }

    fn detection(xyxy: (f32, f32, f32, f32), confidence: f32, class_id: usize, name: &str) -> Detection {
        Detection {
            annotation: BoundingBox::new(xyxy.0, xyxy.1, xyxy.2, xyxy.3, name.to_string()).unwrap(),
            confidence,
            class_id,
        }
    }

    #[test]
    fn empty_detections_return_identical_image() {
        let mut source = RgbImage::new(16, 8);
        source.put_pixel(3, 4, Rgb([12, 34, 56]));
        let source = DynamicImage::ImageRgb8(source);
        let rendered = renderer().render(&source, &[], &class_names());
        assert_eq!(rendered, source);

        let rgba = DynamicImage::new_rgba8(5, 5);
        assert_eq!(renderer().render(&rgba, &[], &class_names()), rgba);
    }

    #[test]
    fn draws_box_and_label_background() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(120, 120));
        let dets = vec![detection((20.0, 40.0, 80.0, 100.0), 0.9, 0, "cat")];
        let rendered = renderer().render(&source, &dets, &class_names()).into_rgb8();

        // Three pixel stroke growing inward.
        assert_eq!(rendered.get_pixel(20, 40), &RED);
        assert_eq!(rendered.get_pixel(22, 42), &RED);
        assert_eq!(rendered.get_pixel(80, 100), &RED);
        assert_eq!(rendered.get_pixel(23, 43), &BLACK);
        assert_eq!(rendered.get_pixel(50, 70), &BLACK);

        // Label "cat 0.90": background bottom edge sits on the box's top edge.
        let (_, text_height) = renderer().font().text_size("cat 0.90");
        let background_top = 40 - (text_height + 2 * LABEL_PADDING_Y);
        assert_eq!(rendered.get_pixel(21, background_top), &RED);
        assert_eq!(rendered.get_pixel(21, 39), &RED);
        assert_eq!(rendered.get_pixel(19, 39), &BLACK);

        // Untouched areas.
        assert_eq!(rendered.get_pixel(5, 5), &BLACK);
        assert_eq!(rendered.get_pixel(100, 110), &BLACK);
    }

    #[test]
    fn label_text_is_inset_from_background() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(160, 100));
        let dets = vec![detection((50.0, 60.0, 140.0, 95.0), 0.9, 0, "cat")];
        let renderer = renderer();
        let rendered = renderer.render(&source, &dets, &class_names()).into_rgb8();

        let (text_width, text_height) = renderer.font().text_size("cat 0.90");
        let background_top = 60 - (text_height + 2 * LABEL_PADDING_Y) as i32;
        let background_right = 50 + text_width + 2 * LABEL_PADDING_X;

        let mut expected = RgbImage::from_pixel(160, 100, RED);
        renderer.font().draw_text(
            &mut expected,
            LABEL_TEXT_COLOR,
            50 + LABEL_PADDING_X as i32,
            background_top + LABEL_PADDING_Y as i32,
            "cat 0.90",
        );

        let mut text_pixels = 0;
        for y in (background_top as u32)..60 {
            for x in 50..background_right {
                assert_eq!(rendered.get_pixel(x, y), expected.get_pixel(x, y), "at ({}, {})", x, y);
                if rendered.get_pixel(x, y) != &RED {
                    text_pixels += 1;
                    assert!(x >= 50 + LABEL_PADDING_X);
                    assert!(y >= background_top as u32 + LABEL_PADDING_Y);
                }
            }
        }
        assert!(text_pixels > 0);
    }

    #[test]
    fn source_image_is_not_modified() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
        let before = source.clone();
        let dets = vec![detection((10.0, 20.0, 50.0, 60.0), 0.5, 1, "dog")];
        let rendered = renderer().render(&source, &dets, &class_names());
        assert_eq!(source, before);
        assert_ne!(rendered, before);
    }

    #[test]
    fn keeps_alpha_channel() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 0])));
        let dets = vec![detection((20.0, 30.0, 60.0, 60.0), 0.8, 0, "cat")];
        let rendered = renderer().render(&source, &dets, &class_names());

        assert_eq!(rendered.color(), ColorType::Rgba8);
        assert_eq!(image::GenericImageView::get_pixel(&rendered, 0, 63), Rgba([10, 20, 30, 0]));
        assert_eq!(image::GenericImageView::get_pixel(&rendered, 20, 30), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn keeps_sixteen_bit_depth() {
        let source = DynamicImage::new_rgb16(64, 64);
        let dets = vec![detection((20.0, 30.0, 60.0, 60.0), 0.8, 0, "cat")];
        let rendered = renderer().render(&source, &dets, &class_names());

        assert_eq!(rendered.color(), ColorType::Rgb16);
        let canvas = rendered.as_rgb16().unwrap();
        assert_eq!(canvas.get_pixel(20, 30), &Rgb([u16::MAX, 0, 0]));
        assert_eq!(canvas.get_pixel(0, 63), &Rgb([0, 0, 0]));
    }

    #[test]
    fn grayscale_stays_grayscale() {
        let source = DynamicImage::new_luma8(64, 64);
        let dets = vec![detection((20.0, 30.0, 60.0, 60.0), 0.8, 0, "cat")];
        let rendered = renderer().render(&source, &dets, &class_names());

        assert_eq!(rendered.color(), ColorType::L8);
        let canvas = rendered.as_luma8().unwrap();
        assert_eq!(canvas.get_pixel(20, 30), &RED.to_luma());
    }

    #[test]
    fn uses_class_color() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
        let dets = vec![detection((30.0, 30.0, 60.0, 60.0), 0.5, 11, "11")];
        let rendered = renderer().render(&source, &dets, &class_names()).into_rgb8();
        assert_eq!(rendered.get_pixel(30, 30), &ColorAssigner::default().color_for(1));
    }

    #[test]
    fn labels_near_top_edge_are_clipped_without_panicking() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(40, 40));
        let dets = vec![
            detection((0.0, 0.0, 39.0, 39.0), 0.99, 0, "cat"),
            detection((30.0, 2.0, 39.0, 10.0), 0.42, 1, "dog"),
        ];
        let rendered = renderer().render(&source, &dets, &class_names()).into_rgb8();
        assert_eq!(rendered.dimensions(), (40, 40));
        assert_eq!(rendered.get_pixel(0, 0), &RED);
    }

    #[test]
    fn tiny_boxes_are_drawn() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(40, 40));
        let dets = vec![detection((20.0, 30.0, 21.0, 31.0), 0.3, 0, "cat")];
        let rendered = renderer().render(&source, &dets, &class_names()).into_rgb8();
        assert_eq!(rendered.get_pixel(21, 31), &RED);
    }
}
