//! Color lookup tables: reverse indexing, frame remapping and LUT authoring.

pub mod index;
pub mod remap;
pub mod template;

pub mod prelude {
    pub use super::index::{ColorIndex, build_index};
    pub use super::remap::{RemapStrategy, remap_frame};
    pub use super::template::{build_lut, identity_template};
}
