//! Core domain types for mdgen.
//!
//! This module contains the types shared by the scanner and the generator:
//! - `Block` - a target path paired with fenced content
//! - path cleaning helpers that keep output inside the output root

mod block;
mod path;

pub use block::Block;
pub use path::{clean_path, safe_relative_path};
