use crate::{
    error::{Result, UvMapperError},
    texture::{Texture, TextureRef},
};
use image::{
    ExtendedColorType, ImageEncoder, ImageReader,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};
use std::{fs::File, io::BufWriter, path::Path};
use tracing::debug;

/// Decode an image file into an RGBA8 texture.
///
/// Every call allocates its own buffer, so decodes may run concurrently.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<Texture> {
    let path = path.as_ref();
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(UvMapperError::ImageDecode)?
        .to_rgba8();
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );
    Ok(image.into())
}

/// Encode a texture as PNG and write it to `path`, replacing any existing file.
pub fn encode<P: AsRef<Path>>(texture: &impl TextureRef, path: P) -> Result {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    let encoder = PngEncoder::new_with_quality(file, CompressionType::Default, FilterType::Adaptive);
    encoder
        .write_image(
            texture.as_ref(),
            texture.width(),
            texture.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(UvMapperError::ImageEncode)?;
    debug!(
        path = %path.display(),
        width = texture.width(),
        height = texture.height(),
        "encoded image"
    );
    Ok(())
}

/// Whether the path carries a `.png` extension
pub fn is_png_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}
