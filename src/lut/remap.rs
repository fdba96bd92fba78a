use rayon::prelude::*;

use crate::{
    color::{Color, RGBA_CHANNELS},
    error::{Result, UvMapperError},
    lut::index::ColorIndex,
    texture::{Texture, TextureRef, TextureSlice},
};

/// How a single frame is walked during remapping.
///
/// Both strategies produce identical output and report the same miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemapStrategy {
    #[default]
    Auto,
    Seq,
    Par,
}

impl RemapStrategy {
    /// Pick sequential for small frames, where spawning rayon jobs costs more than the lookups
    pub fn auto(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;

        if width < 450 || count < 202500 {
            return RemapStrategy::Seq;
        }
        RemapStrategy::Par
    }

    fn resolve(self, width: u32, height: u32) -> Self {
        match self {
            RemapStrategy::Auto => RemapStrategy::auto(width, height),
            other => other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RemapStrategy::Auto => "auto",
            RemapStrategy::Seq => "seq",
            RemapStrategy::Par => "par",
        }
    }

    /// Remap `frame` through `index` into a freshly allocated texture.
    pub fn remap(&self, index: &ColorIndex, frame: &impl TextureRef) -> Result<Texture> {
        let pixels = frame.as_ref();
        let (width, height) = (frame.width(), frame.height());
        let mut output = vec![0u8; pixels.len()];

        let miss = match self.resolve(width, height) {
            RemapStrategy::Par => remap_par(index, pixels, &mut output, width as usize),
            _ => remap_seq(index, pixels, &mut output),
        };
        if let Some(idx) = miss {
            let offset = idx * RGBA_CHANNELS;
            return Err(UvMapperError::ColorNotFound {
                color: Color::from_slice(&pixels[offset..offset + RGBA_CHANNELS]),
                x: (idx % width as usize) as u32,
                y: (idx / width as usize) as u32,
            });
        }

        Texture::from_raw(width, height, output)
    }
}

/// Rewrite every pixel of a frame into the RG color of its LUT position.
///
/// `frame_pixels` is a raw RGBA8 buffer of `frame_width` pixel wide rows.
/// Returns `ColorNotFound` for the first pixel (in raster order) whose color is
/// missing from the index; no output is produced in that case.
pub fn remap_frame(index: &ColorIndex, frame_pixels: &[u8], frame_width: u32) -> Result<Texture> {
    if frame_pixels.len() % RGBA_CHANNELS != 0 {
        return Err(UvMapperError::malformed(format!(
            "frame buffer of {} bytes is not a whole number of RGBA pixels",
            frame_pixels.len()
        )));
    }
    let pixel_count = frame_pixels.len() / RGBA_CHANNELS;
    let frame_height = match (pixel_count, frame_width as usize) {
        (0, _) => 0,
        (_, 0) => {
            return Err(UvMapperError::malformed("frame width must be positive"));
        }
        (count, width) if count % width != 0 => {
            return Err(UvMapperError::malformed(format!(
                "{} pixels do not form rows of {} pixels",
                count, width
            )));
        }
        (count, width) => (count / width) as u32,
    };

    let frame = TextureSlice::new(frame_width, frame_height, frame_pixels)?;
    RemapStrategy::Auto.remap(index, &frame)
}

#[inline]
fn remap_pixel(index: &ColorIndex, src: &[u8], dst: &mut [u8]) -> bool {
    match index.get(&Color::from_slice(src)) {
        Some(coordinate) => {
            dst.copy_from_slice(&coordinate.to_rg_color().to_u8_array());
            true
        }
        None => false,
    }
}

/// Returns the flat index of the first pixel missing from the index
fn remap_seq(index: &ColorIndex, input: &[u8], output: &mut [u8]) -> Option<usize> {
    output
        .chunks_exact_mut(RGBA_CHANNELS)
        .zip(input.chunks_exact(RGBA_CHANNELS))
        .position(|(dst, src)| !remap_pixel(index, src, dst))
}

/// Rows are filled in parallel, the reported miss is still the first in raster order
fn remap_par(index: &ColorIndex, input: &[u8], output: &mut [u8], width: usize) -> Option<usize> {
    let row_len = width * RGBA_CHANNELS;
    if row_len == 0 {
        return None;
    }
    output
        .par_chunks_exact_mut(row_len)
        .zip(input.par_chunks_exact(row_len))
        .enumerate()
        .find_map_first(|(row, (out_row, in_row))| {
            remap_seq(index, in_row, out_row).map(|col| row * width + col)
        })
}
