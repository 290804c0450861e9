use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};

use eyeside_core::detection::domain::object_detector::ObjectDetector;
use eyeside_core::gaze::domain::darkness::DarknessRule;
use eyeside_core::gaze::domain::gaze_direction::GazeDirection;
use eyeside_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use eyeside_core::pipeline::classify_gaze_use_case::ClassifyGazeUseCase;
use eyeside_core::pipeline::classify_image_use_case::ClassifyImageUseCase;
use eyeside_core::shared::cascade_config::CascadeConfig;
use eyeside_core::shared::cascade_resolver;
use eyeside_core::shared::constants::{
    CHANNEL_DARKNESS_THRESHOLD, EYE_CASCADE_NAME, EYE_CASCADE_URL, FACE_CASCADE_NAME,
    FACE_CASCADE_URL, IMAGE_EXTENSIONS, PACKED_DARKNESS_THRESHOLD,
};
use eyeside_core::shared::settings::Settings;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Darkness {
    /// Legacy packed ARGB comparison against #333333.
    Packed,
    /// Every channel at or below 0x33.
    PerChannel,
}

/// Estimate whether the person in a still image is looking left or right.
#[derive(Parser)]
#[command(name = "eyeside")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Face cascade definition (downloaded to the cache if omitted).
    #[arg(long)]
    face_cascade: Option<PathBuf>,

    /// Eye cascade definition (downloaded to the cache if omitted).
    #[arg(long)]
    eye_cascade: Option<PathBuf>,

    /// Settings file (JSON). Defaults to the user config directory.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Detector scale factor between pyramid levels (> 1.0).
    #[arg(long)]
    scale_factor: Option<f64>,

    /// Minimum neighbouring hits for a detection to be kept.
    #[arg(long)]
    min_neighbors: Option<i32>,

    /// How dark pixels are recognised.
    #[arg(long, value_enum)]
    darkness: Option<Darkness>,

    /// Print the verdict as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    run_with(Cli::parse())
}

fn run_with(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(&cli)?;

    let settings = build_settings(&cli)?;
    // Fail before any cascade download when no backend is available
    let detector = build_detector()?;
    let cascades = resolve_cascades(&settings)?;
    let classify = ClassifyGazeUseCase::with_settings(cascades, detector, &settings);
    let use_case = ClassifyImageUseCase::new(Box::new(ImageFileReader::new()), classify);

    let direction = use_case.execute(&cli.input)?;
    print_verdict(&cli.input, direction, cli.json)?;
    Ok(())
}

fn build_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::load()?,
    };

    if let Some(path) = &cli.face_cascade {
        settings.face_cascade = Some(path.clone());
    }
    if let Some(path) = &cli.eye_cascade {
        settings.eye_cascade = Some(path.clone());
    }
    if let Some(scale) = cli.scale_factor {
        settings.scale_factor = scale;
    }
    if let Some(n) = cli.min_neighbors {
        settings.min_neighbors = n;
    }
    if let Some(darkness) = cli.darkness {
        settings.darkness = match darkness {
            Darkness::Packed => DarknessRule::PackedRgb(PACKED_DARKNESS_THRESHOLD),
            Darkness::PerChannel => DarknessRule::PerChannel(CHANNEL_DARKNESS_THRESHOLD),
        };
    }

    settings.validate()?;
    Ok(settings)
}

fn resolve_cascades(settings: &Settings) -> Result<CascadeConfig, Box<dyn std::error::Error>> {
    let face = match &settings.face_cascade {
        Some(path) => path.clone(),
        None => resolve_default(FACE_CASCADE_NAME, FACE_CASCADE_URL)?,
    };
    let eye = match &settings.eye_cascade {
        Some(path) => path.clone(),
        None => resolve_default(EYE_CASCADE_NAME, EYE_CASCADE_URL)?,
    };
    Ok(CascadeConfig::new(face, eye))
}

fn resolve_default(name: &str, url: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving cascade: {name}");
    let path = cascade_resolver::resolve(name, url, None, Some(Box::new(download_progress)))?;
    Ok(path)
}

#[cfg(feature = "opencv")]
fn build_detector() -> Result<Box<dyn ObjectDetector>, Box<dyn std::error::Error>> {
    use eyeside_core::detection::infrastructure::opencv_cascade_detector::OpencvCascadeDetector;
    Ok(Box::new(OpencvCascadeDetector::new()))
}

#[cfg(not(feature = "opencv"))]
fn build_detector() -> Result<Box<dyn ObjectDetector>, Box<dyn std::error::Error>> {
    Err("no cascade detector backend compiled in; rebuild with --features opencv".into())
}

fn print_verdict(
    input: &Path,
    direction: GazeDirection,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let out = serde_json::json!({
            "input": input.display().to_string(),
            "direction": direction,
            "code": direction.code(),
        });
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{direction}");
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!(
            "Unsupported image type: {} (expected one of: {})",
            cli.input.display(),
            IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }
    for path in [&cli.face_cascade, &cli.eye_cascade].into_iter().flatten() {
        if !path.exists() {
            return Err(format!("Cascade file not found: {}", path.display()).into());
        }
    }
    if let Some(scale) = cli.scale_factor {
        if !(scale > 1.0) {
            return Err(format!("Scale factor must be greater than 1.0, got {scale}").into());
        }
    }
    if let Some(n) = cli.min_neighbors {
        if n < 0 {
            return Err(format!("Min neighbors must be non-negative, got {n}").into());
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = downloaded as f64 / total as f64 * 100.0;
        eprint!("\rDownloading: {pct:.0}%");
    } else {
        eprint!("\rDownloading: {} KB", downloaded / 1024);
    }
    if total > 0 && downloaded >= total {
        eprintln!();
    }
}
