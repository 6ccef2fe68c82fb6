//! rectiplane CLI - rectify a photograph from marked points and measure on
//! the result.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rectiplane_core::Point;
use rectiplane_io::ImageFormat;
use rectiplane_rectify::{
    Letterbox, Mode, RectifyConfig, Scale, derive, format_measurement, load_config,
    parse_side_length, rectify,
};
use rectiplane_transform::rotate_about_center;
use std::path::PathBuf;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "rectiplane")]
#[command(about = "Rectify a photographed plane from a marked trapezoid or circle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rectify an image onto a square canvas.
    Rectify(RectifyArgs),

    /// Convert a canvas distance to real-world units.
    Measure(MeasureArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Trapezoid,
    Circle,
}

impl ModeArg {
    fn to_mode(self) -> Mode {
        match self {
            ModeArg::Trapezoid => Mode::Trapezoid,
            ModeArg::Circle => Mode::Circle,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct RectifyArgs {
    /// Path to the input image (PNG or JPEG).
    #[arg(long)]
    image: PathBuf,

    /// Path to write the rectified PNG.
    #[arg(long)]
    out: PathBuf,

    /// Reference shape marked by the points.
    #[arg(long, value_enum, default_value_t = ModeArg::Trapezoid)]
    mode: ModeArg,

    /// Control points as "x,y;x,y;...": 8 side points (left, top, right,
    /// bottom pairs) for trapezoid mode, 5 circle points for circle mode.
    #[arg(long)]
    points: String,

    /// Interpret points in source-image pixels instead of canvas pixels.
    #[arg(long)]
    image_space: bool,

    /// Output side length in pixels (default: canvas size from config).
    #[arg(long)]
    size: Option<u32>,

    /// Display rotation of the output in radians (clockwise).
    #[arg(long, default_value = "0.0")]
    rotation: f64,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to write the derived transform points (JSON).
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct MeasureArgs {
    /// Real-world length of the canvas side.
    #[arg(long)]
    side_length: String,

    /// First endpoint "x,y" in canvas pixels.
    #[arg(long)]
    from: String,

    /// Second endpoint "x,y" in canvas pixels.
    #[arg(long)]
    to: String,

    /// Canvas side in pixels.
    #[arg(long, default_value = "600")]
    size: u32,

    /// Also convert a circle radius in canvas pixels.
    #[arg(long)]
    radius: Option<f64>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rectify(args) => run_rectify(&args),
        Commands::Measure(args) => run_measure(&args),
    }
}

fn parse_point(text: &str) -> CliResult<Point> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| -> CliError { format!("expected \"x,y\", got {text:?}").into() })?;
    Ok(Point::new(x.trim().parse()?, y.trim().parse()?))
}

fn parse_points(text: &str) -> CliResult<Vec<Point>> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_point)
        .collect()
}

// ── rectify ────────────────────────────────────────────────────────────

fn run_rectify(args: &RectifyArgs) -> CliResult<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RectifyConfig::default(),
    };
    let size = args.size.unwrap_or(config.canvas_size);
    let mode = args.mode.to_mode();

    tracing::info!("Loading image: {}", args.image.display());
    let image = rectiplane_io::read_image(&args.image)?;
    tracing::info!("Image size: {}x{}", image.width(), image.height());

    let lb = Letterbox::fit(image.width(), image.height(), config.canvas_size)?;
    let points = parse_points(&args.points)?;
    let image_points: Vec<Point> = if args.image_space {
        points
    } else {
        points.iter().map(|&p| lb.canvas_to_image(p)).collect()
    };
    let reference_x = lb
        .canvas_to_image(Point::new(config.canvas_size as f64 / 2.0, 0.0))
        .x;

    let derivation = derive(mode, &image_points, reference_x)?;
    for (i, tp) in derivation.transform_points.iter().enumerate() {
        match tp {
            Some(p) => tracing::info!("Corner {}: ({:.2}, {:.2})", i, p.x, p.y),
            None => tracing::warn!("Corner {}: sides are parallel", i),
        }
    }
    if let (Some(e), Some(strategy)) = (&derivation.ellipse, derivation.strategy) {
        tracing::info!(
            "Ellipse: center=({:.2}, {:.2}) axes=({:.2}, {:.2}) theta={:.4}, tangents via {}",
            e.h,
            e.k,
            e.a,
            e.b,
            e.theta,
            strategy.name()
        );
    }

    if let Some(report) = &args.report {
        let corners: Vec<_> = derivation
            .transform_points
            .iter()
            .map(|tp| tp.map(|p| [p.x, p.y]))
            .collect();
        let json = serde_json::json!({
            "mode": format!("{mode:?}").to_lowercase(),
            "transform_points": corners,
            "ellipse": derivation.ellipse.map(|e| serde_json::json!({
                "h": e.h, "k": e.k, "a": e.a, "b": e.b, "theta": e.theta,
            })),
            "strategy": derivation.strategy.map(|s| s.name()),
        });
        std::fs::write(report, serde_json::to_string_pretty(&json)?)?;
        tracing::info!("Report written to {}", report.display());
    }

    let out = rectify(&image, &derivation.transform_points, size)?;
    let out = rotate_about_center(&out, args.rotation)?;
    rectiplane_io::write_image(&out, &args.out, ImageFormat::Png)?;
    tracing::info!("Rectified {}x{} written to {}", size, size, args.out.display());

    Ok(())
}

// ── measure ────────────────────────────────────────────────────────────

fn run_measure(args: &MeasureArgs) -> CliResult<()> {
    let scale = parse_side_length(&args.side_length).and_then(|s| Scale::from_side_length(s, args.size));
    if scale.is_none() {
        tracing::warn!("Side length {:?} is not a positive number", args.side_length);
    }

    let from = parse_point(&args.from)?;
    let to = parse_point(&args.to)?;
    let pixels = from.distance_to(to);
    println!("distance: {}", format_measurement(scale.map(|s| s.to_world(pixels))));

    if let Some(radius) = args.radius {
        println!("radius: {}", format_measurement(scale.map(|s| s.to_world(radius))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let pts = parse_points("1,2; 3.5 ,4;").unwrap();
        assert_eq!(pts, vec![Point::new(1.0, 2.0), Point::new(3.5, 4.0)]);
        assert!(parse_points("1;2").is_err());
        assert!(parse_points("a,b").is_err());
        assert!(parse_points("").unwrap().is_empty());
    }

    #[test]
    fn test_cli_parses_rectify() {
        let cli = Cli::try_parse_from([
            "rectiplane",
            "rectify",
            "--image",
            "in.jpg",
            "--out",
            "out.png",
            "--mode",
            "circle",
            "--points",
            "1,1;2,2;3,3;4,4;5,5",
            "--rotation",
            "1.5",
        ])
        .unwrap();
        let Commands::Rectify(args) = cli.command else {
            panic!("expected rectify");
        };
        assert!(matches!(args.mode, ModeArg::Circle));
        assert_eq!(args.rotation, 1.5);
        assert_eq!(args.size, None);
    }
}
