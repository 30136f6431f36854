use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{Error, Result};
use crate::types::{OutputFormat, RasterImage};

fn encode_error(output: &Path) -> impl FnOnce(image::ImageError) -> Error + '_ {
    move |source| Error::Encode {
        path: output.to_path_buf(),
        source,
    }
}

pub fn write_rgba_png(output: &Path, img: &RasterImage) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(encode_error(output))
}

pub fn write_rgba_webp(output: &Path, img: &RasterImage) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);
    let encoder = WebPEncoder::new_lossless(writer);
    encoder
        .encode(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(encode_error(output))
}

pub fn write_rgba(output: &Path, img: &RasterImage, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Png => write_rgba_png(output, img),
        OutputFormat::Webp => write_rgba_webp(output, img),
    }
}
