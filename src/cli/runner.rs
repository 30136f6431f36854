use tracing::info;
use tracing_subscriber::EnvFilter;

use spritecut::{ExtractParams, clear_output_dir, process_path};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Start from defaults or the config file, then apply every flag that was given
pub fn resolve_params(args: &CliArgs) -> Result<ExtractParams, AppError> {
    let mut params = match &args.config {
        Some(path) if !path.exists() => {
            return Err(AppError::MissingConfig { path: path.clone() });
        }
        Some(path) => ExtractParams::from_json_file(path)?,
        None => ExtractParams::default(),
    };

    if let Some(v) = &args.output_dir {
        params.output_dir = v.clone();
    }
    if let Some(v) = args.format {
        params.format = v;
    }
    if let Some(v) = args.alpha_threshold {
        params.alpha_threshold = v;
    }
    if let Some(v) = args.dilate_radius {
        params.dilate_radius = v;
    }
    if let Some(v) = args.merge_gap {
        params.merge_gap = v;
    }
    if let Some(v) = args.min_solid_pixels {
        params.min_solid_pixels = v;
    }
    if let Some(v) = args.min_area {
        params.min_area = v;
    }
    if let Some(v) = args.padding {
        params.padding_at_1x = v;
    }
    if let Some(v) = args.target_width {
        params.target_width = v;
    }
    if let Some(v) = args.max_scale {
        params.max_pow2_scale = v;
    }
    if let Some(v) = args.strict_grid_guard {
        params.strict_grid_guard = v;
    }
    if let Some(v) = args.min_unique_colors {
        params.min_unique_colors = v;
    }

    params.validate()?;
    Ok(params)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let params = resolve_params(&args)?;
    if args.dump_config {
        println!("{}", params.to_json_pretty()?);
        return Ok(());
    }

    if !args.input.exists() {
        return Err(AppError::MissingInput {
            path: args.input.clone(),
        }
        .into());
    }

    if args.clean {
        clear_output_dir(&params.output_dir)?;
    }

    info!("Input: {:?}", args.input);
    info!("Output directory: {:?}", params.output_dir);

    let report = process_path(&args.input, &params)?;

    info!("Batch processing complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);
    info!(
        "Crops written: {}, rejected: {}, failed: {}",
        report.crops_written, report.crops_rejected, report.crops_failed
    );

    if report.errors > 0 && report.processed == 0 && report.skipped == 0 {
        return Err(AppError::AllFailed {
            errors: report.errors,
        }
        .into());
    }
    Ok(())
}
