use std::fmt::Display;

/// Number of channels in an RGBA8 pixel
pub const RGBA_CHANNELS: usize = 4;

/// Exact RGBA8 color. Equality and hashing are component-wise, no tolerance.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_u8(0, 0, 0, 0);

    pub const fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    pub const fn from_u8_array(rgba: &[u8; 4]) -> Color {
        Color::from_u8(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Read a color from the first four channels of a pixel slice.
    ///
    /// # Panics
    /// Panics if `pixel` holds fewer than four channels.
    #[inline]
    pub fn from_slice(pixel: &[u8]) -> Color {
        Color::from_u8(pixel[0], pixel[1], pixel[2], pixel[3])
    }

    #[inline]
    pub const fn to_u8_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Color::from_u8_array(&rgba)
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        Color::from_u8_array(&pixel.0)
    }
}

/// Position of a cell inside a LUT.
///
/// Written back into a frame as an RG color: `r = x`, `g = y`, `b = 0`, `a = 255`.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

impl Coordinate {
    pub const fn new(x: u8, y: u8) -> Self {
        Coordinate { x, y }
    }

    /// Coordinate named by an RG color, blue and alpha are ignored.
    pub const fn from_rg_color(color: Color) -> Self {
        Coordinate::new(color.r, color.g)
    }

    #[inline]
    pub const fn to_rg_color(self) -> Color {
        Color::from_u8(self.x, self.y, 0, 255)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
