//! Command-line front end for the planimeter measurement engine.
//!
//! This binary is the interchangeable transport shell: it decodes a
//! photograph from disk, calls into `planimeter-engine`, and prints the
//! result (JSON on stdout, progress on stderr). An HTTP service would
//! wire the same calls to request handlers.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use planimeter_engine::{
    CalibrationSession, ChromaKey, MeasureConfig, Point, Retrieval, RgbImage, decode_image,
    extract_contours, measure_at, measure_net,
};
use planimeter_render::{OverlayStyle, draw_partition, draw_reference, encode_png};

/// Measure the physical surface of objects photographed on a chroma-key
/// background.
#[derive(Parser)]
#[command(name = "planimeter")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove the chroma-key background (whiten it) and save the result.
    Segment {
        /// Input photograph.
        input: PathBuf,

        /// Output PNG path.
        #[arg(short, long)]
        output: PathBuf,

        /// Lower hue bound of the key (half-degrees, 0-179).
        #[arg(long, default_value_t = 35)]
        hue_low: u8,

        /// Upper hue bound of the key (half-degrees, 0-179).
        #[arg(long, default_value_t = 85)]
        hue_high: u8,
    },

    /// Extract contours and save an overlay visualization.
    Contours {
        /// Input photograph.
        input: PathBuf,

        /// Output PNG path for the overlay.
        #[arg(short, long)]
        output: PathBuf,

        /// Only trace outermost boundaries, ignoring holes.
        #[arg(long)]
        external_only: bool,

        /// Threshold the raw image without the chroma-key pre-step.
        #[arg(long)]
        no_chroma: bool,
    },

    /// Calibrate from two reference points and measure a surface.
    Measure {
        /// Input photograph.
        input: PathBuf,

        /// First calibration reference point as "X,Y" pixels.
        #[arg(long, value_name = "X,Y")]
        ref_a: String,

        /// Second calibration reference point as "X,Y" pixels.
        #[arg(long, value_name = "X,Y")]
        ref_b: String,

        /// Real-world distance between the reference points.
        #[arg(long)]
        distance: f64,

        /// Measure the contour nearest to this "X,Y" pixel instead of
        /// the net area of everything in the photograph.
        #[arg(long, value_name = "X,Y")]
        pick: Option<String>,

        /// Use the strict binarization cutoff (254 instead of 200).
        #[arg(long)]
        strict: bool,

        /// Save an overlay of the reference points and measured
        /// contours next to the JSON result.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse an "X,Y" pixel coordinate pair.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x_str, y_str) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'X,Y', got: '{s}'"))?;

    let x: i32 = x_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid X '{x_str}': {e}"))?;
    let y: i32 = y_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid Y '{y_str}': {e}"))?;

    Ok(Point::new(x, y))
}

fn load_image(path: &Path) -> Result<RgbImage, Box<dyn std::error::Error>> {
    eprintln!("Reading image from {}", path.display());
    let bytes = std::fs::read(path)?;
    Ok(decode_image(&bytes)?)
}

fn save_png(image: &RgbImage, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, encode_png(image)?)?;
    eprintln!("Saved {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Command::Segment {
            input,
            output,
            hue_low,
            hue_high,
        } => {
            let img = load_image(&input)?;
            let key = ChromaKey {
                hue_low,
                hue_high,
                ..ChromaKey::default()
            };
            let whitened = planimeter_engine::segment::whiten_background(&img, &key);
            save_png(&whitened, &output)?;
        }

        Command::Contours {
            input,
            output,
            external_only,
            no_chroma,
        } => {
            let img = load_image(&input)?;
            let config = MeasureConfig {
                chroma_key: if no_chroma {
                    None
                } else {
                    Some(ChromaKey::default())
                },
                ..MeasureConfig::default()
            };
            let retrieval = if external_only {
                Retrieval::External
            } else {
                Retrieval::Tree
            };

            let partition = extract_contours(&img, &config, retrieval).into_partition();
            eprintln!(
                "Found {} external and {} internal contour(s)",
                partition.external.len(),
                partition.internal.len(),
            );

            let overlay = draw_partition(&img, &partition, &OverlayStyle::default());
            save_png(&overlay, &output)?;
        }

        Command::Measure {
            input,
            ref_a,
            ref_b,
            distance,
            pick,
            strict,
            output,
        } => {
            let img = load_image(&input)?;

            let p1 = parse_point(&ref_a).map_err(|e| format!("--ref-a: {e}"))?;
            let p2 = parse_point(&ref_b).map_err(|e| format!("--ref-b: {e}"))?;

            let mut session = CalibrationSession::new();
            let scale = session.calibrate(p1, p2, distance)?;
            eprintln!("Calibrated: {scale:.6} units per pixel");

            let config = MeasureConfig {
                binarize_threshold: if strict {
                    planimeter_engine::extract::STRICT_BINARIZE_THRESHOLD
                } else {
                    planimeter_engine::extract::BINARIZE_THRESHOLD
                },
                ..MeasureConfig::default()
            };

            let measurement = match pick {
                Some(spec) => {
                    let pointer = parse_point(&spec).map_err(|e| format!("--pick: {e}"))?;
                    measure_at(&img, &config, &session, pointer)?
                }
                None => measure_net(&img, &config, &session)?,
            };

            println!("{}", serde_json::to_string_pretty(&measurement)?);

            if let Some(path) = output {
                let partition =
                    extract_contours(&img, &config, Retrieval::Tree).into_partition();
                let style = OverlayStyle::default();
                let overlay = draw_partition(&img, &partition, &style);
                let overlay = draw_reference(&overlay, p1, p2, &style);
                save_png(&overlay, &path)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_spaces() {
        assert_eq!(parse_point("12, 34"), Ok(Point::new(12, 34)));
    }

    #[test]
    fn parse_point_rejects_garbage() {
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("").is_err());
    }
}
