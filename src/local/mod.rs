//! Building normalized descriptors of local media files.
mod builder;
mod capture;
pub mod error;
mod mime;
pub mod structs;
pub use builder::{LocalDescriptorBuilder, describe};
pub use mime::{detect_mime, normalize_mime};
