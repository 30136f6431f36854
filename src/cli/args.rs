use clap::Parser;
use std::path::PathBuf;

use spritecut::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "spritecut", version, about = "Extract sprites from transparent images")]
pub struct CliArgs {
    /// Input image file, or a directory whose images are all processed
    pub input: PathBuf,

    /// JSON file with extraction parameters; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory for crops
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format (png or webp)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Minimum alpha (inclusive) counted as solid
    #[arg(long)]
    pub alpha_threshold: Option<u8>,

    /// Dilation radius applied before grouping
    #[arg(long)]
    pub dilate_radius: Option<usize>,

    /// Merge components whose boxes come within this many pixels
    #[arg(long)]
    pub merge_gap: Option<usize>,

    /// Drop components with fewer solid pixels
    #[arg(long)]
    pub min_solid_pixels: Option<usize>,

    /// Drop components whose bounding area is at or below this
    #[arg(long)]
    pub min_area: Option<usize>,

    /// Transparent border added before scaling
    #[arg(long)]
    pub padding: Option<usize>,

    /// Width the power-of-two upscale aims for
    #[arg(long)]
    pub target_width: Option<usize>,

    /// Largest scale factor (1, 2, 4, 8, ...)
    #[arg(long)]
    pub max_scale: Option<usize>,

    /// Reject crops whose row and column pixel periods disagree
    #[arg(long)]
    pub strict_grid_guard: Option<bool>,

    /// Reject crops with fewer distinct colors (0 disables)
    #[arg(long)]
    pub min_unique_colors: Option<usize>,

    /// Delete existing images in the output directory first
    #[arg(long, default_value_t = false)]
    pub clean: bool,

    /// Print the effective parameters as JSON and exit
    #[arg(long, default_value_t = false)]
    pub dump_config: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
