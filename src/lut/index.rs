use std::collections::{HashMap, hash_map::Entry};

use tracing::debug;

use crate::{
    color::{Color, Coordinate, RGBA_CHANNELS},
    error::{Result, UvMapperError},
    texture::TextureRef,
    utils::iterator::GridIterator,
};

/// Largest LUT side whose positions still fit in one 8 bit channel
pub const MAX_LUT_SIDE: usize = u8::MAX as usize + 1;

/// Reverse index from a LUT color to the position it occupies in the LUT.
///
/// Read-only once built; share it between frames with `&` or `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ColorIndex {
    map: HashMap<Color, Coordinate>,
    lut_width: u32,
    lut_height: u32,
    duplicates: usize,
}

impl ColorIndex {
    /// Build the index from a LUT texture. See [build_index].
    pub fn from_texture(lut: &impl TextureRef) -> Result<Self> {
        build_index(lut.as_ref(), lut.width())
    }

    #[inline]
    pub fn get(&self, color: &Color) -> Option<Coordinate> {
        self.map.get(color).copied()
    }

    #[inline]
    pub fn contains(&self, color: &Color) -> bool {
        self.map.contains_key(color)
    }

    /// Number of distinct colors
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// LUT positions skipped because their color was already indexed
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn lut_width(&self) -> u32 {
        self.lut_width
    }

    pub fn lut_height(&self) -> u32 {
        self.lut_height
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Color, &Coordinate)> {
        self.map.iter()
    }
}

/// Build a [ColorIndex] from a raw RGBA8 LUT buffer.
///
/// The pixel at flat position `i` maps its color to `(i % lut_width, i / lut_width)`.
/// When a color appears more than once, the first position in raster order is kept.
///
/// Fails with `MalformedImage` when the buffer is empty or is not a whole number
/// of `lut_width * 4` byte rows.
///
/// A well-formed buffer describing a LUT wider or taller than 256 is also
/// rejected as `MalformedImage`, even though its length checks out: positions
/// past 255 do not fit the 8 bit red and green channels of the output.
pub fn build_index(lut_pixels: &[u8], lut_width: u32) -> Result<ColorIndex> {
    let width = lut_width as usize;
    if width == 0 {
        return Err(UvMapperError::malformed("LUT width must be positive"));
    }
    let row_len = width * RGBA_CHANNELS;
    if lut_pixels.is_empty() || lut_pixels.len() % row_len != 0 {
        return Err(UvMapperError::malformed(format!(
            "LUT buffer of {} bytes is not a whole number of {} pixel wide rows",
            lut_pixels.len(),
            width
        )));
    }
    let height = lut_pixels.len() / row_len;
    if width > MAX_LUT_SIDE || height > MAX_LUT_SIDE {
        return Err(UvMapperError::malformed(format!(
            "LUT of {}x{} exceeds the {}x{} positions an RG color can address",
            width, height, MAX_LUT_SIDE, MAX_LUT_SIDE
        )));
    }

    let mut map = HashMap::with_capacity(width * height);
    let mut duplicates = 0;
    for ((x, y, _), pixel) in GridIterator::new(width, height).zip(lut_pixels.chunks_exact(RGBA_CHANNELS)) {
        // bounds checked above
        let coordinate = Coordinate::new(x as u8, y as u8);
        match map.entry(Color::from_slice(pixel)) {
            Entry::Vacant(entry) => {
                entry.insert(coordinate);
            }
            Entry::Occupied(_) => duplicates += 1,
        }
    }

    debug!(
        width,
        height,
        colors = map.len(),
        duplicates,
        "built color index"
    );

    Ok(ColorIndex {
        map,
        lut_width,
        lut_height: height as u32,
        duplicates,
    })
}
