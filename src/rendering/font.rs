use crate::error::PipelineError;
use ab_glyph::{FontArc, PxScale};
use image::Pixel;
use imageproc::definitions::Clamp;
use imageproc::drawing::{Canvas, draw_text_mut, text_size};
use log::{debug, warn};
use std::fs;
use std::iter;
use std::path::PathBuf;

/// DejaVu Sans, compiled in so labels can always be drawn.
static BUILTIN_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Where a label font may come from, tried in order until one loads.
#[derive(Clone, Debug, PartialEq)]
pub enum FontSource {
    File(PathBuf),
    Builtin,
}

/// The font used for box labels.
#[derive(Clone, Debug)]
pub struct LabelFont {
    font: FontArc,
    scale: PxScale,
    source: FontSource,
}

impl LabelFont {
    /// Tries each candidate file in order and falls back to the embedded font.
    pub fn resolve(candidates: &[PathBuf], size: f32) -> Result<Self, PipelineError> {
        let sources = candidates
            .iter()
            .cloned()
            .map(FontSource::File)
            .chain(iter::once(FontSource::Builtin));
        for source in sources {
            match Self::load(&source, size) {
                Ok(font) => {
                    if source == FontSource::Builtin {
                        warn!("No label font could be loaded from {:?}, using the built-in font", candidates);
                    } else {
                        debug!("Using label font {:?}", source);
                    }
                    return Ok(font);
                }
                Err(reason) => debug!("Skipping font {:?}: {}", source, reason),
            }
        }
        Err(PipelineError::ConfigError("no label font could be loaded".to_string()))
    }

    pub fn load(source: &FontSource, size: f32) -> Result<Self, String> {
        let font = match source {
            FontSource::File(path) => {
                let data = fs::read(path).map_err(|err| err.to_string())?;
                FontArc::try_from_vec(data).map_err(|err| err.to_string())?
            }
            FontSource::Builtin => FontArc::try_from_slice(BUILTIN_FONT).map_err(|err| err.to_string())?,
        };
        Ok(LabelFont {
            font,
            scale: PxScale::from(size),
            source: source.clone(),
        })
    }

    pub fn builtin(size: f32) -> Result<Self, String> {
        Self::load(&FontSource::Builtin, size)
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn text_size(&self, text: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, text)
    }

    pub fn draw_text<C>(&self, canvas: &mut C, color: C::Pixel, x: i32, y: i32, text: &str)
    where
        C: Canvas,
        <C::Pixel as Pixel>::Subpixel: Into<f32> + Clamp<f32>,
    {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}
