//! Command-line converter: image file in, 1-bit monochrome image (and
//! optionally a headerless packed bitstream) out.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mono_raster::{CanvasSize, ConvertOptions, FitMode, QuantizeMode, io};

#[derive(Parser)]
#[command(name = "mono-convert")]
#[command(about = "Convert images to 1-bit monochrome for binary-depth displays")]
struct Cli {
    /// Input image path
    input: PathBuf,

    /// Output image path (format chosen by extension)
    output: PathBuf,

    /// Also write the headerless packed bitstream to this path
    #[arg(long)]
    raw: Option<PathBuf>,

    /// Target canvas width in pixels
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Target canvas height in pixels
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Clockwise rotation in degrees
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    rotate: i32,

    /// Use Floyd-Steinberg dithering instead of a fixed threshold
    #[arg(long, conflicts_with = "threshold")]
    dither: bool,

    /// Threshold for binarization: white at or above this value [default: 128]
    #[arg(long)]
    threshold: Option<u8>,

    /// How the image maps onto the requested canvas
    #[arg(long, value_enum, default_value = "letterbox")]
    fit: FitArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    /// Scale to fit, preserve aspect ratio, center on a black canvas
    Letterbox,
    /// Resize to exactly the requested dimensions
    Stretch,
}

impl From<FitArg> for FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Letterbox => FitMode::FitLetterbox,
            FitArg::Stretch => FitMode::Stretch,
        }
    }
}

impl Cli {
    fn convert_options(&self) -> ConvertOptions {
        let canvas = match (self.width, self.height) {
            (Some(width), Some(height)) => Some(CanvasSize { width, height }),
            _ => None,
        };
        let quantize = if self.dither {
            QuantizeMode::Dither
        } else {
            QuantizeMode::Threshold(self.threshold.unwrap_or(mono_raster::DEFAULT_THRESHOLD))
        };
        ConvertOptions {
            canvas,
            rotate_deg: self.rotate,
            fit: self.fit.into(),
            quantize,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let opts = cli.convert_options();

    let img = io::decode(&cli.input)?;
    let bitmap = mono_raster::convert(&img, &opts)?;

    io::encode(&bitmap, &cli.output)?;
    tracing::info!("Saved image: {}", cli.output.display());

    if let Some(raw) = &cli.raw {
        io::write_raw(&bitmap, raw)?;
        tracing::info!("Saved raw 1-bit: {}", raw.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn minimal_invocation_uses_defaults() {
        let cli = parse(&["mono-convert", "in.png", "out.png"]);
        let opts = cli.convert_options();
        assert_eq!(opts.canvas, None);
        assert_eq!(opts.rotate_deg, 0);
        assert_eq!(opts.fit, FitMode::FitLetterbox);
        assert_eq!(opts.quantize, QuantizeMode::Threshold(128));
        assert!(cli.raw.is_none());
    }

    #[test]
    fn missing_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["mono-convert"]).is_err());
        assert!(Cli::try_parse_from(["mono-convert", "in.png"]).is_err());
    }

    #[test]
    fn canvas_requires_both_dimensions() {
        assert!(Cli::try_parse_from(["mono-convert", "in.png", "out.png", "--width", "68"]).is_err());
        assert!(Cli::try_parse_from(["mono-convert", "in.png", "out.png", "--height", "140"]).is_err());

        let cli = parse(&[
            "mono-convert", "in.png", "out.png", "--width", "68", "--height", "140",
        ]);
        assert_eq!(
            cli.convert_options().canvas,
            Some(CanvasSize { width: 68, height: 140 })
        );
    }

    #[test]
    fn dither_conflicts_with_threshold() {
        assert!(
            Cli::try_parse_from([
                "mono-convert", "in.png", "out.png", "--dither", "--threshold", "100",
            ])
            .is_err()
        );
    }

    #[test]
    fn dither_flag_selects_dither_mode() {
        let cli = parse(&["mono-convert", "in.png", "out.png", "--dither"]);
        assert_eq!(cli.convert_options().quantize, QuantizeMode::Dither);
    }

    #[test]
    fn threshold_out_of_byte_range_is_rejected() {
        assert!(
            Cli::try_parse_from(["mono-convert", "in.png", "out.png", "--threshold", "256"])
                .is_err()
        );
    }

    #[test]
    fn negative_rotation_parses() {
        let cli = parse(&["mono-convert", "in.png", "out.png", "--rotate", "-90"]);
        assert_eq!(cli.convert_options().rotate_deg, -90);
    }

    #[test]
    fn stretch_fit_mode_parses() {
        let cli = parse(&[
            "mono-convert", "in.png", "out.png", "--width", "20", "--height", "20", "--fit",
            "stretch",
        ]);
        assert_eq!(cli.convert_options().fit, FitMode::Stretch);
    }
}
