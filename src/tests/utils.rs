use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use rand::{Rng, seq::IndexedRandom};

use crate::{color::Color, lut::template::identity_template, texture::Texture};

pub fn rand_color(rng: &mut rand::rngs::ThreadRng) -> Color {
    Color::from_u8(rng.random(), rng.random(), rng.random(), 255)
}

/// LUT where every cell holds its own RG color
pub fn identity_lut(width: u32, height: u32) -> Texture {
    identity_template(width, height)
}

/// LUT filled with distinct opaque random colors, returned with its palette in raster order
pub fn palette_lut(width: u32, height: u32) -> (Texture, Vec<Color>) {
    let mut rng = rand::rng();
    let size = (width * height) as usize;
    let mut seen = HashSet::with_capacity(size);
    let mut palette = Vec::with_capacity(size);
    while palette.len() < size {
        let color = rand_color(&mut rng);
        if seen.insert(color) {
            palette.push(color);
        }
    }
    let lut = Texture::from_colors(width, height, &palette).unwrap();
    (lut, palette)
}

/// Frame painted only with colors picked from `palette`
pub fn palette_frame(palette: &[Color], width: u32, height: u32) -> Texture {
    let mut rng = rand::rng();
    let colors: Vec<Color> = (0..width * height)
        .map(|_| *palette.choose(&mut rng).unwrap())
        .collect();
    Texture::from_colors(width, height, &colors).unwrap()
}

/// Scratch directory under the system temp dir, removed on drop
pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("uvmapper-{}-{}", std::process::id(), name));
        if path.exists() {
            std::fs::remove_dir_all(&path).unwrap();
        }
        std::fs::create_dir_all(&path).unwrap();
        TestDir { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
