use std::fmt;

use crate::{color::Color, config::ConfigError};

/// The main error type for the uvmapper crate
#[derive(Debug)]
pub enum UvMapperError {
    /// Pixel buffer length or dimensions are inconsistent
    MalformedImage { reason: String },

    /// A frame pixel has a color the LUT does not contain
    ColorNotFound { color: Color, x: u32, y: u32 },

    /// Batch input that does not follow the directory conventions
    InvalidInput(String),

    /// Error occurred while reading or decoding an image
    ImageDecode(image::ImageError),

    /// Error occurred while writing or encoding an image
    ImageEncode(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    Io(std::io::Error),

    /// Configuration file could not be parsed
    Config(ConfigError),
}

impl UvMapperError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        UvMapperError::MalformedImage {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        UvMapperError::InvalidInput(msg.into())
    }
}

impl fmt::Display for UvMapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UvMapperError::MalformedImage { reason } => write!(f, "Malformed image: {}", reason),
            UvMapperError::ColorNotFound { color, x, y } => {
                write!(f, "Missing color on LUT: {} at pixel ({}, {})", color, x, y)
            }
            UvMapperError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            UvMapperError::ImageDecode(e) => write!(f, "Image decode error: {}", e),
            UvMapperError::ImageEncode(e) => write!(f, "Image encode error: {}", e),
            UvMapperError::Io(e) => write!(f, "I/O error: {}", e),
            UvMapperError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for UvMapperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UvMapperError::ImageDecode(e) | UvMapperError::ImageEncode(e) => Some(e),
            UvMapperError::Io(e) => Some(e),
            UvMapperError::Config(e) => Some(e),
            _ => None,
        }
    }
}

// From implementations for automatic conversion from common error types

impl From<image::ImageError> for UvMapperError {
    fn from(err: image::ImageError) -> Self {
        // Distinguish between decode and encode errors based on the error kind
        match &err {
            image::ImageError::Encoding(_) => UvMapperError::ImageEncode(err),
            _ => UvMapperError::ImageDecode(err),
        }
    }
}

impl From<std::io::Error> for UvMapperError {
    fn from(err: std::io::Error) -> Self {
        UvMapperError::Io(err)
    }
}

impl From<ConfigError> for UvMapperError {
    fn from(err: ConfigError) -> Self {
        UvMapperError::Config(err)
    }
}

// Convenience type alias for Results using UvMapperError
pub type Result<T = ()> = std::result::Result<T, UvMapperError>;
