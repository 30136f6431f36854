use std::path::Path;

use image::ImageReader;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::RasterImage;

/// Decode any supported raster at `path` into non-premultiplied RGBA8.
/// The format is sniffed from the content, not the extension.
pub fn load_rgba(path: &Path) -> Result<RasterImage> {
    let decode_err = |source| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(decode_err)?
        .into_rgba8();
    debug!("Decoded {:?}: {}x{}", path, img.width(), img.height());
    Ok(img)
}
