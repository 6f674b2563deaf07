use image::Rgb;

/// Box and label colors, indexed by class id modulo the palette length.
pub const DEFAULT_PALETTE: [Rgb<u8>; 10] = [
    Rgb([0xFF, 0x00, 0x00]),
    Rgb([0x00, 0xFF, 0x00]),
    Rgb([0x00, 0x00, 0xFF]),
    Rgb([0xFF, 0xFF, 0x00]),
    Rgb([0xFF, 0x00, 0xFF]),
    Rgb([0x00, 0xFF, 0xFF]),
    Rgb([0xFF, 0xA5, 0x00]),
    Rgb([0x80, 0x00, 0x80]),
    Rgb([0x00, 0x80, 0x00]),
    Rgb([0x80, 0x00, 0x00]),
];

/// Deterministic class id to color mapping over a fixed palette.
#[derive(Clone, Debug)]
pub struct ColorAssigner {
    palette: Vec<Rgb<u8>>,
}

impl ColorAssigner {
    /// Returns `None` for an empty palette.
    pub fn with_palette(palette: Vec<Rgb<u8>>) -> Option<Self> {
        if palette.is_empty() {
            None
        } else {
            Some(ColorAssigner { palette })
        }
    }

    pub fn palette_size(&self) -> usize {
        self.palette.len()
    }

    pub fn color_for(&self, class_id: usize) -> Rgb<u8> {
        self.palette[class_id % self.palette.len()]
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        ColorAssigner {
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}
