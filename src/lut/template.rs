use tracing::debug;

use crate::{
    color::{Color, Coordinate},
    error::{Result, UvMapperError},
    texture::{Texture, TextureRef},
};

/// Author a LUT from an RG template and a texture painted over it.
///
/// Each template pixel names a LUT cell through its red and green channels; the
/// texture pixel at the same position becomes that cell's color. Later pixels
/// overwrite earlier ones, cells outside the LUT are ignored and cells never
/// written stay transparent.
pub fn build_lut(
    template: &impl TextureRef,
    texture: &impl TextureRef,
    lut_width: u32,
    lut_height: u32,
) -> Result<Texture> {
    if template.shape() != texture.shape() {
        return Err(UvMapperError::malformed(format!(
            "template is {}x{} but texture is {}x{}",
            template.width(),
            template.height(),
            texture.width(),
            texture.height()
        )));
    }

    let mut lut = Texture::new(lut_width, lut_height);
    let mut written = 0usize;
    let mut skipped = 0usize;
    for (rg, color) in template.colors().zip(texture.colors()) {
        let Coordinate { x, y } = Coordinate::from_rg_color(rg);
        if u32::from(x) >= lut_width || u32::from(y) >= lut_height {
            skipped += 1;
            continue;
        }
        lut.set_pixel(u32::from(x), u32::from(y), color);
        written += 1;
    }

    debug!(lut_width, lut_height, written, skipped, "authored LUT");
    Ok(lut)
}

/// RG template whose pixel at `(x, y)` is `(x, y, 0, 255)`.
///
/// Authoring against it copies the texture straight into the LUT.
pub fn identity_template(width: u32, height: u32) -> Texture {
    let mut template = Texture::new(width, height);
    for y in 0..height {
        for x in 0..width {
            // positions past 255 wrap, they cannot be expressed in one channel
            template.set_pixel(x, y, Color::from_u8(x as u8, y as u8, 0, 255));
        }
    }
    template
}
