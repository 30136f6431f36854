//! High-level, ergonomic library API: extract crops from one image into a
//! directory or into memory, and batch helpers that fan a list of images out
//! over a bounded worker pool. Prefer these entrypoints over the low-level
//! processing modules when integrating spritecut.
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicU64;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::core::params::ExtractParams;
use crate::core::processing::pipeline::{
    CropOutcome, RegionScan, build_crop, extract_crops, find_sprite_regions,
};
use crate::core::processing::save::{SourceTokens, save_artifact};
use crate::error::Result;
use crate::io::discovery::list_images;
use crate::io::reader::load_rgba;

/// What happened to the crops of one source image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageReport {
    /// True when the image produced no candidate regions at all
    pub skipped: bool,
    pub crops_written: usize,
    pub crops_rejected: usize,
    pub crops_failed: usize,
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub crops_written: usize,
    pub crops_rejected: usize,
    pub crops_failed: usize,
}

impl BatchReport {
    fn record(mut self, outcome: &Result<ImageReport>) -> Self {
        match outcome {
            Ok(r) => {
                if r.skipped {
                    self.skipped += 1;
                } else {
                    self.processed += 1;
                }
                self.crops_written += r.crops_written;
                self.crops_rejected += r.crops_rejected;
                self.crops_failed += r.crops_failed;
            }
            Err(_) => self.errors += 1,
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            processed: self.processed + other.processed,
            skipped: self.skipped + other.skipped,
            errors: self.errors + other.errors,
            crops_written: self.crops_written + other.crops_written,
            crops_rejected: self.crops_rejected + other.crops_rejected,
            crops_failed: self.crops_failed + other.crops_failed,
        }
    }
}

/// Decode `input` and write every crop that passes the quality gates into
/// `params.output_dir`, naming files with numbers drawn from `seq`.
///
/// Only a decode failure is returned as an error; a crop that fails to save
/// is logged and counted, and its siblings are still attempted.
pub fn process_image_to_dir(
    input: &Path,
    params: &ExtractParams,
    seq: &AtomicU64,
) -> Result<ImageReport> {
    let img = load_rgba(input)?;
    let tokens = SourceTokens::from_path(input);
    let mut report = ImageReport::default();

    let scan = find_sprite_regions(&img, params);
    match &scan {
        RegionScan::Sparse { solid_pixels } => {
            info!(
                "skip {}: {} solid px (<= {})",
                tokens.base, solid_pixels, params.min_solid_pixels
            );
            report.skipped = true;
            return Ok(report);
        }
        RegionScan::Regions { ranked, .. } if ranked.is_empty() => {
            info!("skip {}: no crops", tokens.base);
            report.skipped = true;
            return Ok(report);
        }
        RegionScan::Regions { .. } => {}
    }

    let gates = params.quality_gates();
    for region in scan.ranked() {
        match build_crop(&img, region, params, &gates) {
            Err(e) => {
                warn!("Failed to build crop from {:?}: {}", input, e);
                report.crops_failed += 1;
            }
            Ok(CropOutcome::Rejected { reason, .. }) => {
                info!("skip {}: {}", tokens.base, reason);
                report.crops_rejected += 1;
            }
            Ok(CropOutcome::Ready(artifact)) => {
                match save_artifact(&artifact, &params.output_dir, params.format, &tokens, seq) {
                    Ok(_) => report.crops_written += 1,
                    Err(e) => {
                        warn!("Failed to save crop from {:?}: {}", input, e);
                        report.crops_failed += 1;
                    }
                }
            }
        }
    }
    Ok(report)
}

/// Decode `input` and return its crop outcomes without touching the disk
pub fn process_image_to_buffers(input: &Path, params: &ExtractParams) -> Result<Vec<CropOutcome>> {
    let img = load_rgba(input)?;
    extract_crops(&img, params)
}

/// Worker count: available parallelism capped by the number of jobs
pub fn worker_count(jobs: usize) -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cpus.min(jobs).max(1)
}

/// Process every path on a bounded pool; per-image failures are logged and
/// counted, never returned. The call returns once all images were attempted.
pub fn process_paths(paths: &[PathBuf], params: &ExtractParams) -> Result<BatchReport> {
    params.validate()?;
    if paths.is_empty() {
        return Ok(BatchReport::default());
    }

    let workers = worker_count(paths.len());
    info!("Processing {} images with {} workers", paths.len(), workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("spritecut-worker-{}", i))
        .build()?;

    let seq = AtomicU64::new(0);
    let report = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                debug!("Processing: {:?}", path);
                let outcome = process_image_to_dir(path, params, &seq);
                if let Err(e) = &outcome {
                    warn!("Error processing {:?}: {}", path, e);
                }
                BatchReport::default().record(&outcome)
            })
            .reduce(BatchReport::default, BatchReport::merge)
    });

    info!("done -> {:?}", params.output_dir);
    Ok(report)
}

/// Discover images at `input` (a file or a directory) and process them all
pub fn process_path(input: &Path, params: &ExtractParams) -> Result<BatchReport> {
    let paths = list_images(input)?;
    process_paths(&paths, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RasterImage;
    use image::Rgba;

    fn sprite_sheet() -> RasterImage {
        let mut img = RasterImage::new(48, 24);
        for y in 2..12 {
            for x in 2..14 {
                img.put_pixel(x, y, Rgba([(x * 20) as u8, (y * 20) as u8, 90, 255]));
            }
        }
        for y in 4..10 {
            for x in 30..40 {
                img.put_pixel(x, y, Rgba([40, (x * 7) as u8, (y * 9) as u8, 255]));
            }
        }
        img
    }

    #[test]
    fn worker_count_is_bounded() {
        assert_eq!(worker_count(1), 1);
        assert_eq!(worker_count(0), 1);
        assert!(worker_count(1000) >= 1);
    }

    #[test]
    fn report_folding_counts_errors() {
        let ok = Ok(ImageReport {
            skipped: false,
            crops_written: 2,
            crops_rejected: 1,
            crops_failed: 0,
        });
        let skipped = Ok(ImageReport {
            skipped: true,
            ..Default::default()
        });
        let err: Result<ImageReport> = Err(crate::Error::NoImagesFound(PathBuf::from("x")));
        let r = BatchReport::default()
            .record(&ok)
            .merge(BatchReport::default().record(&skipped).record(&err));
        assert_eq!(r.processed, 1);
        assert_eq!(r.skipped, 1);
        assert_eq!(r.errors, 1);
        assert_eq!(r.crops_written, 2);
        assert_eq!(r.crops_rejected, 1);
    }

    #[test]
    fn image_to_dir_writes_ranked_crops() {
        let dir = tempfile::tempdir().unwrap();
        let src_dir = dir.path().join("1860");
        std::fs::create_dir(&src_dir).unwrap();
        let src = src_dir.join("42.png");
        sprite_sheet().save(&src).unwrap();

        let params = ExtractParams {
            output_dir: dir.path().join("out"),
            ..Default::default()
        };
        let seq = AtomicU64::new(0);
        let report = process_image_to_dir(&src, &params, &seq).unwrap();
        assert_eq!(report.crops_written, 2);
        assert!(!report.skipped);
        // The larger sprite is ranked first and gets the first sequence number
        let first = image::open(params.output_dir.join("1 X1860-1860 Y42-42.png")).unwrap();
        let second = image::open(params.output_dir.join("2 X1860-1860 Y42-42.png")).unwrap();
        assert_eq!(first.width(), (12 + 4) * 8);
        assert_eq!(second.width(), (10 + 4) * 8);
    }

    #[test]
    fn buffers_match_disk_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("s.png");
        sprite_sheet().save(&src).unwrap();
        let outcomes = process_image_to_buffers(&src, &ExtractParams::default()).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| matches!(o, CropOutcome::Ready(_))));
    }
}
