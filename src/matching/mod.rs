//! Staged matching of one local descriptor against a remote album index.
mod logic;
pub mod structs;
pub use logic::decide;
