use std::{fmt::Display, path::Path, str::FromStr};

use crate::{
    error::{Result, UvMapperError},
    utils::image::is_png_file,
};

/// Body part an animation frame is drawn for. Each part owns exactly one LUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationPart {
    Body,
    Cape,
    Hair,
}

impl AnimationPart {
    pub const ALL: [AnimationPart; 3] = [
        AnimationPart::Body,
        AnimationPart::Cape,
        AnimationPart::Hair,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnimationPart::Body => "body",
            AnimationPart::Cape => "cape",
            AnimationPart::Hair => "hair",
        }
    }

    /// File name shared by the part's LUT and its animation frames
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name())
    }

    /// Resolve the part of an animation frame file.
    ///
    /// The file must be a `.png` whose stem is exactly a part name.
    pub fn from_frame_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let stem = path.file_stem().and_then(|s| s.to_str());
        match stem.map(str::parse::<AnimationPart>) {
            Some(Ok(part)) if is_png_file(path) => Ok(part),
            _ => Err(UvMapperError::invalid_input(format!(
                "{} is not of .png extension or it doesn't fit any animation part template",
                path.display()
            ))),
        }
    }
}

impl FromStr for AnimationPart {
    type Err = UvMapperError;

    fn from_str(s: &str) -> Result<Self> {
        AnimationPart::ALL
            .into_iter()
            .find(|part| part.name() == s)
            .ok_or_else(|| UvMapperError::invalid_input(format!("unknown animation part '{}'", s)))
    }
}

impl Display for AnimationPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
