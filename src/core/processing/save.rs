use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::core::processing::pipeline::CropArtifact;
use crate::error::Result;
use crate::io::writers::raster::write_rgba;
use crate::types::OutputFormat;

/// Path fragments of a source image that are embedded in artifact names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTokens {
    /// Name of the directory holding the source
    pub parent: String,
    /// Source file name without extension
    pub base: String,
}

impl SourceTokens {
    pub fn from_path(path: &Path) -> Self {
        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());
        let base = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { parent, base }
    }
}

pub fn artifact_file_name(seq: u64, tokens: &SourceTokens, format: OutputFormat) -> String {
    format!(
        "{} X{}-{} Y{}-{}.{}",
        seq,
        tokens.parent,
        tokens.parent,
        tokens.base,
        tokens.base,
        format.extension()
    )
}

/// Write `artifact` into `output_dir` (created if absent) under the next
/// sequence number drawn from `seq`. Returns the written path.
pub fn save_artifact(
    artifact: &CropArtifact,
    output_dir: &Path,
    format: OutputFormat,
    tokens: &SourceTokens,
    seq: &AtomicU64,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let n = seq.fetch_add(1, Ordering::Relaxed) + 1;
    let name = artifact_file_name(n, tokens, format);
    let path = output_dir.join(&name);
    write_rgba(&path, &artifact.scaled, format)?;

    let (w1, h1) = artifact.padded.dimensions();
    let (tw, th) = artifact.scaled.dimensions();
    info!(
        "ok {} {}x{} +pad{} -> {}x{} x{} => {}x{}",
        name,
        artifact.region.width(),
        artifact.region.height(),
        artifact.pad,
        w1,
        h1,
        artifact.scale,
        tw,
        th
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::components::Component;
    use crate::types::RasterImage;
    use image::Rgba;

    fn artifact() -> CropArtifact {
        let padded = RasterImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        CropArtifact {
            region: Component {
                min_x: 0,
                min_y: 0,
                max_x: 0,
                max_y: 0,
                count: 1,
            },
            pad: 1,
            scaled: padded.clone(),
            padded,
            scale: 1,
        }
    }

    #[test]
    fn tokens_come_from_parent_and_stem() {
        let t = SourceTokens::from_path(Path::new("/tiles/1860/1311.png"));
        assert_eq!(t.parent, "1860");
        assert_eq!(t.base, "1311");
        let bare = SourceTokens::from_path(Path::new("sprite.png"));
        assert_eq!(bare.parent, ".");
    }

    #[test]
    fn file_name_embeds_sequence_and_tokens() {
        let t = SourceTokens {
            parent: "1860".into(),
            base: "1311".into(),
        };
        assert_eq!(
            artifact_file_name(7, &t, OutputFormat::Png),
            "7 X1860-1860 Y1311-1311.png"
        );
        assert_eq!(
            artifact_file_name(8, &t, OutputFormat::Webp),
            "8 X1860-1860 Y1311-1311.webp"
        );
    }

    #[test]
    fn saving_creates_dir_and_advances_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let seq = AtomicU64::new(0);
        let t = SourceTokens {
            parent: "p".into(),
            base: "b".into(),
        };
        let a = artifact();
        let first = save_artifact(&a, &out, OutputFormat::Png, &t, &seq).unwrap();
        let second = save_artifact(&a, &out, OutputFormat::Png, &t, &seq).unwrap();
        assert!(first.ends_with("1 Xp-p Yb-b.png"));
        assert!(second.ends_with("2 Xp-p Yb-b.png"));
        let back = image::open(&second).unwrap().into_rgba8();
        assert_eq!(back.as_raw(), a.scaled.as_raw());
    }

    #[test]
    fn unwritable_output_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let seq = AtomicU64::new(0);
        let t = SourceTokens::from_path(Path::new("a/b.png"));
        assert!(save_artifact(&artifact(), &blocker.join("out"), OutputFormat::Png, &t, &seq).is_err());
    }
}
