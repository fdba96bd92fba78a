pub mod image;
pub mod iterator;
