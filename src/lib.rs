#![doc = r#"
spritecut: pull sprite-like regions out of large, mostly-transparent images.

Given a composite raster (a canvas snapshot, a tile export, a sprite dump), spritecut
finds every cluster of solid pixels, groups nearby clusters into one region, trims each
region to its true extent, and writes it as its own image, padded and upscaled by a
power of two so every output lands near a common width. It powers the `spritecut` CLI
and can be embedded in your own Rust applications.

Pipeline
--------
1. alpha mask → 2. square dilation → 3. 8-connected labeling → 4. gap merging to a
fixpoint → 5. tightening on the original mask → 6. size filters and ranking →
7. crop + transparent padding → 8. quality gates → 9. power-of-two nearest upscale →
10. write with a unique, sequence-based name.

Process a directory
-------------------
```rust,no_run
use std::path::Path;
use spritecut::{process_path, ExtractParams};

fn main() -> spritecut::Result<()> {
    let params = ExtractParams {
        output_dir: "out/cropped".into(),
        target_width: 512,
        ..Default::default()
    };
    let report = process_path(Path::new("/data/tiles/1860"), &params)?;
    println!(
        "processed={} skipped={} errors={} written={}",
        report.processed, report.skipped, report.errors, report.crops_written
    );
    Ok(())
}
```

In-memory extraction
--------------------
```rust
use spritecut::{extract_crops, CropOutcome, ExtractParams, RasterImage};

# fn main() -> spritecut::Result<()> {
let mut img = RasterImage::new(64, 64);
for y in 10..20 {
    for x in 10..30 {
        img.put_pixel(x, y, image::Rgba([x as u8 * 8, y as u8 * 8, 128, 255]));
    }
}
let outcomes = extract_crops(&img, &ExtractParams::default())?;
assert_eq!(outcomes.len(), 1);
if let CropOutcome::Ready(crop) = &outcomes[0] {
    assert_eq!(crop.padded.width(), 20 + 2 * 2);
}
# Ok(())
# }
```

Error handling
--------------
All fallible public functions return `spritecut::Result<T>`; match on `spritecut::Error`
for specific cases. Batch helpers never fail because of one bad image: decode errors
are logged and counted in the returned `BatchReport`.

Useful modules
--------------
- [`api`]: high-level entry points and batch orchestration.
- [`core`]: parameters and the individual processing stages.
- [`types`]: shared enums (`OutputFormat`, `QualityGate`, `Rejection`).
- [`io`]: decoding, input discovery and writers.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::params::ExtractParams;
pub use crate::core::processing::components::Component;
pub use crate::core::processing::pipeline::{
    CropArtifact, CropOutcome, RegionScan, extract_crops, find_sprite_regions,
};
pub use error::{Error, Result};
pub use types::{OutputFormat, QualityGate, RasterImage, Rejection};

pub use io::{clear_output_dir, list_images, load_rgba};

pub use api::{
    BatchReport, ImageReport, process_image_to_buffers, process_image_to_dir, process_path,
    process_paths,
};
