//! Convert sprite-sheet frames painted with a custom palette into RG frames
//! whose red and green channels address a color lookup table.

pub mod animation;
pub mod batch;
pub mod color;
pub mod config;
pub mod error;
pub mod lut;
pub mod texture;
pub mod utils;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::animation::AnimationPart;
    pub use crate::batch::{BatchReport, Converter, InputSelector, build_luts};
    pub use crate::color::{Color, Coordinate};
    pub use crate::config::ConverterConfig;
    pub use crate::error::{Result, UvMapperError};
    pub use crate::lut::prelude::*;
    pub use crate::texture::prelude::*;
}
