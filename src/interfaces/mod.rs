//! Outer surfaces: JSON request reading and result writing.

pub mod json;
