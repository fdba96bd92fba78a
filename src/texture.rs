use image::RgbaImage;

use crate::{
    color::{Color, RGBA_CHANNELS},
    error::{Result, UvMapperError},
};

pub type TextureShape = (usize, usize);

/// Trait defining ops available on RGBA8 textures with
/// lendable inner buffer
pub trait TextureRef: AsRef<[u8]> {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    #[inline]
    fn shape(&self) -> TextureShape {
        (self.width() as usize, self.height() as usize)
    }

    #[inline]
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Color of the pixel at `(x, y)`, `None` when out of bounds
    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y as usize * self.width() as usize + x as usize) * RGBA_CHANNELS;
        Some(Color::from_slice(&self.as_ref()[offset..offset + RGBA_CHANNELS]))
    }

    /// Colors in raster order
    fn colors(&self) -> impl ExactSizeIterator<Item = Color> + '_ {
        self.as_ref().chunks_exact(RGBA_CHANNELS).map(Color::from_slice)
    }
}

fn check_buffer_len(width: u32, height: u32, len: usize) -> Result {
    let expected = width as usize * height as usize * RGBA_CHANNELS;
    if len != expected {
        return Err(UvMapperError::malformed(format!(
            "buffer of {} bytes does not match {}x{} RGBA image ({} bytes)",
            len, width, height, expected
        )));
    }
    Ok(())
}

/// RGBA8 texture with owned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl AsRef<[u8]> for Texture {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl TextureRef for Texture {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }
}

impl Texture {
    /// Fully transparent texture
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0; width as usize * height as usize * RGBA_CHANNELS],
        }
    }

    /// Take ownership of a raw RGBA8 buffer.
    ///
    /// Fails with `MalformedImage` when the length is not `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, buffer: Vec<u8>) -> Result<Self> {
        check_buffer_len(width, height, buffer.len())?;
        Ok(Texture {
            width,
            height,
            buffer,
        })
    }

    pub fn from_colors(width: u32, height: u32, colors: &[Color]) -> Result<Self> {
        let buffer = colors.iter().flat_map(|c| c.to_u8_array()).collect();
        Self::from_raw(width, height, buffer)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let offset = (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS;
        self.buffer[offset..offset + RGBA_CHANNELS].copy_from_slice(&color.to_u8_array());
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        // buffer length is checked on every constructor
        RgbaImage::from_raw(self.width, self.height, self.buffer)
            .expect("texture buffer matches its dimensions")
    }
}

impl From<RgbaImage> for Texture {
    fn from(value: RgbaImage) -> Self {
        Texture {
            width: value.width(),
            height: value.height(),
            buffer: value.into_raw(),
        }
    }
}

/// RGBA8 texture with borrowed internal buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a> {
    width: u32,
    height: u32,
    buffer: &'a [u8],
}

impl AsRef<[u8]> for TextureSlice<'_> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.buffer
    }
}

impl TextureRef for TextureSlice<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl<'a> TextureSlice<'a> {
    pub fn new(width: u32, height: u32, buffer: &'a [u8]) -> Result<Self> {
        check_buffer_len(width, height, buffer.len())?;
        Ok(Self {
            width,
            height,
            buffer,
        })
    }
}

pub mod prelude {
    pub use super::{Texture, TextureRef, TextureSlice};
}
