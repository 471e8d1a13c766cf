//! Module for normalizing capture, remote, and filesystem timestamps into UTC instants.
pub mod error;
mod logic;
mod parsing;
pub mod structs;
pub use logic::{from_system_time, normalize, normalize_timestamp, parse_timezone};
