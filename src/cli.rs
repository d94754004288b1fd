// ============================================================================
// ShiftInvert CLI — headless batch inversion of image files
// ============================================================================
//
// Usage examples:
//   shiftinvert -i screenshot.png -o inverted.png
//   shiftinvert -i shots/*.png --output-dir inverted/ --format webp
//   shiftinvert -i page.jpg -o page_dark.jpg --white-bias 0.15 --gpu
//   shiftinvert -i a.png b.png --output-dir out/ --bypass   (format conversion only)
// ============================================================================

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::filter::ColorInversionFilter;
use crate::inverter::{Backend, FrameInverter};
use crate::io::{SaveFormat, load_image, save_image};
use crate::settings::InvertSettings;
use crate::{log_err, log_info, log_warn};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// Contrast-preserving colour inversion for image files.
#[derive(Parser, Debug)]
#[command(
    name = "shiftinvert",
    about = "Invert image colours while keeping contrast and transparency",
    long_about = "Applies the shift-whitish colour inversion to every pixel of the\n\
                  input images. Alpha is preserved exactly. Pure white maps to a\n\
                  near-black gray and black maps to white.\n\n\
                  Example:\n  \
                  shiftinvert -i page.png -o page_dark.png\n  \
                  shiftinvert -i *.png --output-dir dark/ --white-bias 0.12"
)]
pub struct CliArgs {
    /// Input file(s). Glob patterns accepted (e.g. "*.png", "shots/*.jpg").
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Output file path. Only valid for single-file input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format: png, jpeg, webp, bmp, tga, tiff.
    /// When omitted, inferred from --output's extension, then the settings file.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality (1–100). Defaults to the settings file value.
    #[arg(short, long, value_name = "1-100")]
    pub quality: Option<u8>,

    /// Contrast bias (> -1). Lower is harsher. Defaults to the settings file value.
    #[arg(long, value_name = "BIAS", allow_negative_numbers = true)]
    pub white_bias: Option<f32>,

    /// Run the inversion on the GPU, falling back to the CPU if unavailable.
    #[arg(long)]
    pub gpu: bool,

    /// Copy pixels through unchanged (filter disabled).
    #[arg(long)]
    pub bypass: bool,

    /// Store the effective bias, format, quality and --gpu choice as new defaults.
    #[arg(long)]
    pub save_settings: bool,

    /// Print per-file timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = all files succeeded, `1` = one or more files failed.
pub fn run(args: CliArgs, settings: &InvertSettings) -> ExitCode {
    let inputs = resolve_inputs(&args.input);
    if inputs.is_empty() {
        eprintln!("error: no input files matched the given pattern(s).");
        log_err!("no input files matched {:?}", args.input);
        return ExitCode::FAILURE;
    }

    if inputs.len() > 1 && args.output.is_some() {
        eprintln!(
            "error: {} input files given but --output only accepts a single file path.\n\
             Use --output-dir to specify a destination directory for batch processing.",
            inputs.len()
        );
        return ExitCode::FAILURE;
    }

    let filter = match ColorInversionFilter::new(args.white_bias.unwrap_or(settings.white_bias)) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = match parse_format(args.format.as_deref(), args.output.as_deref(), settings.default_format) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let quality = args.quality.unwrap_or(settings.jpeg_quality).clamp(1, 100);

    if let Some(dir) = &args.output_dir
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!(
            "error: could not create output directory '{}': {}",
            dir.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    if args.save_settings {
        match effective_settings(settings, filter, format, quality, args.gpu).save() {
            Ok(path) => {
                log_info!("saved settings to {}", path.display());
                println!("saved settings to {}", path.display());
            }
            Err(e) => eprintln!("warning: could not save settings: {}", e),
        }
    }

    let backend = if args.gpu || settings.gpu_acceleration {
        Backend::Gpu { preferred: settings.preferred_gpu.clone() }
    } else {
        Backend::Cpu
    };
    let inverter = FrameInverter::new(filter, backend);
    if args.gpu && !inverter.uses_gpu() {
        eprintln!("warning: no GPU adapter available, using CPU.");
    }
    log_info!(
        "processing {} file(s), white_bias={}, gpu={}, bypass={}",
        inputs.len(),
        filter.white_bias(),
        inverter.uses_gpu(),
        args.bypass
    );

    let total = inputs.len();
    let multi = total > 1;
    let mut any_failure = false;

    for (idx, input_path) in inputs.iter().enumerate() {
        if multi || args.verbose {
            println!("[{}/{}] {}", idx + 1, total, input_path.display());
        }
        let file_start = Instant::now();

        let Some(output_path) = build_output_path(
            input_path,
            args.output.as_deref(),
            args.output_dir.as_deref(),
            format,
        ) else {
            eprintln!("  error: cannot determine output path for '{}'.", input_path.display());
            any_failure = true;
            continue;
        };

        match run_one(&inverter, input_path, &output_path, format, quality, !args.bypass) {
            Ok(()) => {
                log_info!("{} -> {}", input_path.display(), output_path.display());
                if args.verbose || multi {
                    println!(
                        "  → {} ({:.0}ms)",
                        output_path.display(),
                        file_start.elapsed().as_secs_f64() * 1000.0
                    );
                }
            }
            Err(e) => {
                eprintln!("  error: {}", e);
                log_err!("{}: {}", input_path.display(), e);
                any_failure = true;
            }
        }
    }

    if any_failure { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// Per-file processing pipeline
// ============================================================================

fn run_one(
    inverter: &FrameInverter,
    input: &Path,
    output: &Path,
    format: SaveFormat,
    quality: u8,
    enabled: bool,
) -> Result<(), String> {
    let img = load_image(input).map_err(|e| format!("load failed: {}", e))?;
    let result = inverter.process(&img, enabled);
    save_image(&result, output, format, quality).map_err(|e| format!("save failed: {}", e))
}

// ============================================================================
// Helpers
// ============================================================================

/// Settings that reproduce this run's choices on the next invocation.
pub(crate) fn effective_settings(
    base: &InvertSettings,
    filter: ColorInversionFilter,
    format: SaveFormat,
    quality: u8,
    gpu: bool,
) -> InvertSettings {
    InvertSettings {
        white_bias: filter.white_bias(),
        gpu_acceleration: base.gpu_acceleration || gpu,
        preferred_gpu: base.preferred_gpu.clone(),
        default_format: format,
        jpeg_quality: quality,
    }
}

/// Expand glob patterns and literal paths into a deduplicated, ordered list.
pub(crate) fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let as_path = Path::new(pattern);

        if as_path.exists() {
            if !result.iter().any(|p| p.as_path() == as_path) {
                result.push(as_path.to_path_buf());
            }
            continue;
        }

        match glob::glob(pattern) {
            Ok(entries) => {
                let mut matched = false;
                for entry in entries.flatten() {
                    if !result.contains(&entry) {
                        result.push(entry);
                    }
                    matched = true;
                }
                if !matched {
                    eprintln!("warning: pattern '{}' matched no files.", pattern);
                    log_warn!("pattern '{}' matched no files", pattern);
                }
            }
            Err(e) => {
                eprintln!("warning: invalid glob '{}': {}", pattern, e);
            }
        }
    }

    result
}

/// Choose the [`SaveFormat`] from `--format`, else the output extension,
/// else `fallback`. An unknown `--format` name is an error.
pub(crate) fn parse_format(
    format_arg: Option<&str>,
    output: Option<&Path>,
    fallback: SaveFormat,
) -> Result<SaveFormat, String> {
    if let Some(f) = format_arg {
        return SaveFormat::from_name(f).ok_or_else(|| format!("unknown output format '{}'", f));
    }
    Ok(output.and_then(SaveFormat::from_path).unwrap_or(fallback))
}

/// Compute the output path for a single input file.
///
/// Priority:
/// 1. `--output` (explicit path, used for single-file input)
/// 2. `--output-dir` (batch directory, derives filename from input stem)
/// 3. Fallback: next to the input as `<stem>_inverted.<ext>`
pub(crate) fn build_output_path(
    input: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    format: SaveFormat,
) -> Option<PathBuf> {
    if let Some(out) = output {
        return Some(out.to_path_buf());
    }

    let ext = format.extension();
    let stem = input.file_stem()?.to_string_lossy().into_owned();

    if let Some(dir) = output_dir {
        return Some(dir.join(format!("{}.{}", stem, ext)));
    }

    let parent = input.parent().unwrap_or(Path::new("."));
    Some(parent.join(format!("{}_inverted.{}", stem, ext)))
}
