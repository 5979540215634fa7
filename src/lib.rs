//! Tonal Scales Library
//!
//! Perceptually even color scales: swatches spaced in CIE L* rather than HSL
//! lightness, labelled with step numbers that track their lightness, plus
//! key-color harmonization and WCAG/APCA contrast checks.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`color`] - Color type, hex/RGB/HSL/L* conversions and contrast math
//! - [`scale`] - Bézier easing, swatch generation, step numbering and overrides
//! - [`harmony`] - Key-color harmonization with one-level undo
//! - [`palette`] - Named scales with harmonize references, generated in parallel
//! - [`export`] - Design-token JSON export
//! - [`core`] - Configuration and error handling
//! - [`cli`] - Command-line interface (only used by the binary)
//!
//! # Example Usage
//!
//! ```rust
//! use tonal_scales::color::Color;
//! use tonal_scales::harmony::{harmonize, HarmonyMethod};
//! use tonal_scales::scale::{build_scale, NumberingOptions, ScaleConfig, SwatchOverrides};
//!
//! let blue: Color = "#3b82f6".parse().unwrap();
//! let green = harmonize(blue, "#10b981".parse().unwrap(), HarmonyMethod::Analogous);
//!
//! let scale = build_scale(
//!     &ScaleConfig::with_key(green),
//!     &NumberingOptions::default(),
//!     &SwatchOverrides::new(),
//! );
//!
//! for swatch in &scale {
//!     println!("{:>3} {} L*={:.1}", swatch.step, swatch.color, swatch.lstar);
//! }
//! ```

pub mod cli;
pub mod color;
pub mod core;
pub mod export;
pub mod harmony;
pub mod palette;
pub mod scale;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
