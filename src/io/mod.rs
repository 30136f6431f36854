//! I/O layer: decoding source rasters, discovering inputs on disk, and the
//! `writers` that encode finished crops.
pub mod discovery;
pub use discovery::{clear_output_dir, is_image_path, list_images};

pub mod reader;
pub use reader::load_rgba;

pub mod writers;
