//! Output artifacts for a compiled program.
pub mod c;
pub mod json;
pub mod text;
