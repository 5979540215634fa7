//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use crate::color::Color;
use crate::scale::{BezierPoints, NumberingMode};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Perceptual color scales with lightness-based step numbering
#[derive(Parser, Debug)]
#[command(name = "tonal-scales")]
#[command(version)]
#[command(about = "Generate perceptually even color scales, harmonize key colors and check contrast", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,
}

/// Shaping flags shared by `generate`; each overrides the `[scale]` section
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ShapeArgs {
    /// Number of swatches, not counting anchors (1-100)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// L* of the darkest swatch
    #[arg(long, allow_negative_numbers = true)]
    pub lstar_min: Option<f64>,

    /// L* of the lightest swatch
    #[arg(long, allow_negative_numbers = true)]
    pub lstar_max: Option<f64>,

    /// Saturation percentage at the dark end
    #[arg(long)]
    pub saturation_min: Option<f64>,

    /// Saturation percentage at the light end
    #[arg(long)]
    pub saturation_max: Option<f64>,

    /// Hue rotation in degrees at the dark end
    #[arg(long, allow_negative_numbers = true)]
    pub hue_shift_dark: Option<f64>,

    /// Hue rotation in degrees at the light end
    #[arg(long, allow_negative_numbers = true)]
    pub hue_shift_light: Option<f64>,

    /// Easing curve: linear, ease-in, ease-out, ease-in-out, or "x1,y1,x2,y2"
    #[arg(long, value_name = "CURVE")]
    pub bezier: Option<BezierPoints>,

    /// Keep the pure white and black anchors
    #[arg(long)]
    pub anchors: bool,

    /// Replace the closest swatch with the exact key color
    #[arg(long)]
    pub lock: bool,

    /// Step numbering mode (overrides config)
    #[arg(long, value_name = "MODE")]
    pub numbering: Option<NumberingMode>,

    /// Increment for sequential numbering (overrides config)
    #[arg(long)]
    pub increment: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a single scale from a key color
    Generate {
        /// Key color as hex (#3b82f6); defaults to the configured key color
        key: Option<Color>,

        #[command(flatten)]
        shape: ShapeArgs,

        /// Custom swatch color by index (repeatable), e.g. 3=#ff0080
        #[arg(long = "set", value_name = "INDEX=HEX")]
        overrides: Vec<String>,

        /// Add WCAG and APCA columns against white and black text
        #[arg(long)]
        contrast: bool,

        /// Print JSON records instead of a table
        #[arg(long)]
        json: bool,

        /// Show a truecolor block next to each swatch
        #[arg(long)]
        swatches: bool,
    },

    /// Generate every scale in the configured palette
    Palette {
        /// Write design tokens to a file (defaults to [export].path)
        #[arg(short, long, value_name = "FILE", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,

        /// Write compact JSON regardless of [export].pretty
        #[arg(long)]
        compact: bool,

        /// Print the token JSON to stdout instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Derive a key color from a base color, keeping the target's hue
    Harmonize {
        /// Color whose saturation and lightness are borrowed
        base: Color,

        /// Color whose hue is kept
        target: Color,

        /// direct, complementary, analogous, triadic, monochromatic
        #[arg(short, long, default_value = "direct")]
        method: String,

        /// Show the result of every method
        #[arg(long)]
        all: bool,
    },

    /// Contrast between a text color and a background color
    Contrast {
        /// Text (foreground) color
        text: Color,

        /// Background color
        background: Color,
    },

    /// Pick a random key color
    RandomKey {
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Also generate the scale for the picked color
        #[arg(long)]
        generate: bool,
    },

    /// Open the configuration file in your default editor
    ///
    /// The config file is stored at:
    /// - Windows: %APPDATA%\tonal_scales\config.toml
    /// - Linux/macOS: ~/.config/tonal_scales/config.toml
    ///
    /// If no config file exists, a default one will be created.
    Config {
        /// Show the config file path without opening it
        #[arg(long)]
        path: bool,

        /// Reset config to defaults (creates a fresh config file)
        #[arg(long)]
        reset: bool,
    },

    /// Generate a configuration file at a specific location
    GenerateConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration
    ShowConfig,
}
