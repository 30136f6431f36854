use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// True when `path` has one of the recognised raster extensions (any case)
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Resolve `target` into the images to process: the image files directly
/// inside a directory (sorted), or the file itself.
pub fn list_images(target: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(target)?;
    if meta.is_dir() {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(target)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && is_image_path(&path) {
                out.push(path);
            } else {
                debug!("Skipping non-image entry: {:?}", path);
            }
        }
        out.sort();
        if out.is_empty() {
            return Err(Error::NoImagesFound(target.to_path_buf()));
        }
        return Ok(out);
    }
    if meta.is_file() && is_image_path(target) {
        return Ok(vec![target.to_path_buf()]);
    }
    Err(Error::NoImagesFound(target.to_path_buf()))
}

/// Delete the image files directly inside `dir`. A missing directory deletes
/// nothing. Returns the number of files removed.
pub fn clear_output_dir(dir: &Path) -> Result<usize> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };
    let mut deleted = 0;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_image_path(&path) {
            std::fs::remove_file(&path)?;
            deleted += 1;
        }
    }
    info!("Cleared {} files from {:?}", deleted, dir);
    Ok(deleted)
}
