//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands.

use crate::cli::output::{
    print_divider, print_header, print_info, print_scale_table, print_success, print_warning,
};
use crate::cli::{Args, Commands, ShapeArgs};
use crate::color::{
    apca_contrast, contrast_ratio, wcag_level, Color, Hsl, WCAG_AA, WCAG_AAA, WCAG_AA_LARGE,
};
use crate::core::config::{get_config_path, init_config, open_config_in_editor, Config};
use crate::export::TokenExport;
use crate::harmony::{harmonize, HarmonyMethod};
use crate::palette::{NamedScale, PaletteEntry};
use crate::scale::{build_scale, NumberingOptions, Scale, ScaleConfig, SwatchOverrides};
use anyhow::{anyhow, Context, Result};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

/// Run the command specified in the arguments
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Commands::Generate {
            key,
            shape,
            overrides,
            contrast,
            json,
            swatches,
        } => generate_scale(config, *key, shape, overrides, *contrast, *json, *swatches),
        Commands::Palette {
            export,
            compact,
            json,
        } => generate_palette(config, export.as_ref(), *compact, *json),
        Commands::Harmonize {
            base,
            target,
            method,
            all,
        } => {
            harmonize_colors(*base, *target, method, *all);
            Ok(())
        }
        Commands::Contrast { text, background } => {
            show_contrast(*text, *background);
            Ok(())
        }
        Commands::RandomKey { seed, generate } => random_key(config, *seed, *generate),
        Commands::Config { path, reset } => handle_config_command(*path, *reset),
        Commands::GenerateConfig { output } => generate_config_file(output.clone()),
        Commands::ShowConfig => show_config(config),
    }
}

/// Merge the `[scale]` section with command-line shaping flags
pub fn scale_config_from_args(base: &ScaleConfig, key: Option<Color>, shape: &ShapeArgs) -> ScaleConfig {
    ScaleConfig {
        key_color: key.unwrap_or(base.key_color),
        lstar_min: shape.lstar_min.unwrap_or(base.lstar_min),
        lstar_max: shape.lstar_max.unwrap_or(base.lstar_max),
        saturation_min: shape.saturation_min.unwrap_or(base.saturation_min),
        saturation_max: shape.saturation_max.unwrap_or(base.saturation_max),
        hue_shift_dark: shape.hue_shift_dark.unwrap_or(base.hue_shift_dark),
        hue_shift_light: shape.hue_shift_light.unwrap_or(base.hue_shift_light),
        bezier: shape.bezier.unwrap_or(base.bezier),
        swatch_count: shape.count.unwrap_or(base.swatch_count),
        include_anchors: shape.anchors || base.include_anchors,
        lock_key_color: shape.lock || base.lock_key_color,
    }
}

/// Merge the `[numbering]` section with command-line flags
pub fn numbering_from_args(base: &NumberingOptions, shape: &ShapeArgs) -> NumberingOptions {
    NumberingOptions {
        mode: shape.numbering.unwrap_or(base.mode),
        increment: shape.increment.unwrap_or(base.increment),
    }
}

/// Parse `INDEX=HEX` override flags
pub fn parse_overrides(args: &[String]) -> Result<SwatchOverrides> {
    let mut overrides = SwatchOverrides::new();
    for arg in args {
        let (index, hex) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid override '{}': expected INDEX=HEX", arg))?;
        let index: usize = index
            .trim()
            .parse()
            .with_context(|| format!("Invalid swatch index in '{}'", arg))?;
        let color: Color = hex.trim().parse()?;
        if let Some(previous) = overrides.set(index, color) {
            debug!("Override for swatch {} replaced ({} -> {})", index, previous, color);
        }
    }
    Ok(overrides)
}

/// Generate one scale and print it
fn generate_scale(
    config: &Config,
    key: Option<Color>,
    shape: &ShapeArgs,
    override_args: &[String],
    with_contrast: bool,
    json: bool,
    swatches: bool,
) -> Result<()> {
    let scale_config = scale_config_from_args(&config.scale, key, shape);
    let numbering = numbering_from_args(&config.numbering, shape);
    let overrides = parse_overrides(override_args)?;

    let scale = build_scale(&scale_config, &numbering, &overrides);
    info!(
        "Generated {} swatches for {} ({} numbering)",
        scale.len(),
        scale_config.key_color,
        numbering.mode
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&scale.to_records())?);
        return Ok(());
    }

    print_header(&format!("Scale for {}", scale_config.key_color));
    print_scale_table(&scale, with_contrast, swatches);
    if !overrides.is_empty() {
        println!();
        print_info("* custom color");
    }
    Ok(())
}

/// Palette entries from config, or a single scale from `[scale]` if none are configured
fn palette_entries(config: &Config) -> Vec<PaletteEntry> {
    if config.palette.is_empty() {
        vec![PaletteEntry::new("primary", config.scale.key_color)]
    } else {
        config.palette.clone()
    }
}

/// Generate every configured scale, optionally exporting tokens
fn generate_palette(
    config: &Config,
    export: Option<&Option<PathBuf>>,
    compact: bool,
    json: bool,
) -> Result<()> {
    let mut palette = config.palette();
    if palette.entries.is_empty() {
        print_warning("No [[palette]] entries configured; using the [scale] key color");
        palette.entries = palette_entries(config);
    }

    let scales = palette.generate()?;
    let tokens = TokenExport::from_scales(&scales);
    let pretty = config.export.pretty && !compact;

    if json {
        println!("{}", tokens.to_json(pretty)?);
    } else {
        print_header("Palette");
        for named in &scales {
            print_named_scale(named);
        }
    }

    if let Some(path) = export {
        let path = path.clone().unwrap_or_else(|| config.export.path.clone());
        tokens.write_to(&path, pretty)?;
        print_success(&format!("Tokens written to {}", path.display()));
    }

    Ok(())
}

fn print_named_scale(named: &NamedScale) {
    if named.single {
        println!("  {} (single): {}", named.name, named.key_color);
    } else {
        println!("  {} (key {})", named.name, named.key_color);
        print_scale_table(&named.scale, false, false);
    }
    print_divider();
}

/// Show harmonized key colors
fn harmonize_colors(base: Color, target: Color, method: &str, all: bool) {
    let methods: Vec<HarmonyMethod> = if all {
        HarmonyMethod::ALL.to_vec()
    } else {
        vec![HarmonyMethod::from_name(method)]
    };

    println!("  base    {}  {}", base, base.to_hsl());
    println!("  target  {}  {}", target, target.to_hsl());
    println!();
    for method in methods {
        let result = harmonize(base, target, method);
        println!("  {:<14} {}  {}", method.to_string(), result, result.to_hsl());
    }
}

fn verdict(ratio: f64, threshold: f64) -> &'static str {
    if ratio >= threshold {
        "pass"
    } else {
        "fail"
    }
}

/// Show WCAG and APCA contrast between two colors
fn show_contrast(text: Color, background: Color) {
    let ratio = contrast_ratio(text, background);
    let lc = apca_contrast(text, background);

    println!("  text        {}", text);
    println!("  background  {}", background);
    println!();
    println!("  WCAG ratio  {:.2}:1 ({})", ratio, wcag_level(ratio));
    println!("  AA          {}", verdict(ratio, WCAG_AA));
    println!("  AA large    {}", verdict(ratio, WCAG_AA_LARGE));
    println!("  AAA         {}", verdict(ratio, WCAG_AAA));
    println!("  AAA large   {}", verdict(ratio, WCAG_AA));
    println!("  APCA Lc     {:.1}", lc);
}

/// Random saturated key color
pub fn random_key_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let hue = rng.gen_range(0.0..360.0);
    let saturation = rng.gen_range(0.6..0.9);
    let lightness = rng.gen_range(0.45..0.6);
    Color::from_hsl(Hsl::new(hue, saturation, lightness))
}

fn random_key(config: &Config, seed: Option<u64>, generate: bool) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let key = random_key_color(&mut rng);
    println!("{}", key);

    if generate {
        let scale_config = ScaleConfig {
            key_color: key,
            ..config.scale.clone()
        };
        let scale: Scale = build_scale(&scale_config, &config.numbering, &SwatchOverrides::new());
        print_scale_table(&scale, false, false);
    }
    Ok(())
}

/// Handle the `config` command - open, show path, or reset the config file
pub fn handle_config_command(show_path: bool, reset: bool) -> Result<()> {
    if reset {
        if let Some(config_path) = get_config_path() {
            if config_path.exists() {
                fs::remove_file(&config_path)?;
                info!("Removed existing config file");
            }
        }
        let path = init_config()?;
        info!("Created fresh config file at: {}", path.display());
        return Ok(());
    }

    if show_path {
        let path = Config::get_active_config_path();
        println!("{}", path.display());
        if path.exists() {
            info!("Config file exists at: {}", path.display());
        } else {
            info!("Config file would be created at: {}", path.display());
        }
        return Ok(());
    }

    info!("Opening configuration file in default editor...");
    match open_config_in_editor() {
        Ok(path) => {
            info!("Config file: {}", path.display());
            info!("Run 'tonal-scales show-config' to verify your settings.");
        }
        Err(e) => {
            error!("Failed to open config file: {}", e);
            if let Some(path) = get_config_path() {
                info!("You can manually edit the config at: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Generate a configuration file at the specified or default location
pub fn generate_config_file(output: Option<PathBuf>) -> Result<()> {
    let output_path = match output {
        Some(path) => {
            fs::write(&path, Config::generate_default_config())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path
        }
        None => init_config()?,
    };

    info!("Configuration file: {}", output_path.display());
    info!("Quick tip: Run 'tonal-scales config' to open the config in your editor.");

    Ok(())
}

/// Show the current configuration settings
pub fn show_config(config: &Config) -> Result<()> {
    let config_path = Config::get_active_config_path();
    info!("Configuration file: {}", config_path.display());
    if !config_path.exists() {
        info!("(Using default settings - no config file found)");
    }
    println!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{BezierPoints, NumberingMode};

    #[test]
    fn test_parse_overrides() {
        let overrides =
            parse_overrides(&["3=#ff0080".to_string(), " 0 = ffffff ".to_string()]).unwrap();
        assert_eq!(overrides.get(3), Some(Color::from_rgb(255, 0, 128)));
        assert_eq!(overrides.get(0), Some(Color::WHITE));
        assert_eq!(overrides.len(), 2);
    }

    #[test]
    fn test_parse_overrides_rejects_bad_input() {
        assert!(parse_overrides(&["3:#ff0080".to_string()]).is_err());
        assert!(parse_overrides(&["x=#ff0080".to_string()]).is_err());
        assert!(parse_overrides(&["3=#ff00".to_string()]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let base = ScaleConfig::default();
        let shape = ShapeArgs {
            count: Some(6),
            hue_shift_light: Some(15.0),
            bezier: Some(BezierPoints::EASE_OUT),
            anchors: true,
            ..ShapeArgs::default()
        };

        let merged = scale_config_from_args(&base, Some(Color::BLACK), &shape);
        assert_eq!(merged.key_color, Color::BLACK);
        assert_eq!(merged.swatch_count, 6);
        assert_eq!(merged.hue_shift_light, 15.0);
        assert_eq!(merged.bezier, BezierPoints::EASE_OUT);
        assert!(merged.include_anchors);
        assert_eq!(merged.lstar_min, base.lstar_min);
        assert_eq!(merged.lock_key_color, base.lock_key_color);
    }

    #[test]
    fn test_numbering_flags() {
        let shape = ShapeArgs {
            numbering: Some(NumberingMode::Sequential),
            ..ShapeArgs::default()
        };
        let numbering = numbering_from_args(&NumberingOptions::default(), &shape);
        assert_eq!(numbering.mode, NumberingMode::Sequential);
        assert_eq!(numbering.increment, 100);
    }

    #[test]
    fn test_random_key_is_reproducible() {
        let a = random_key_color(&mut StdRng::seed_from_u64(7));
        let b = random_key_color(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_key_is_saturated_midtone() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let hsl = random_key_color(&mut rng).to_hsl();
            assert!(hsl.s > 0.55, "{:?}", hsl);
            assert!(hsl.l > 0.43 && hsl.l < 0.62, "{:?}", hsl);
        }
    }

    #[test]
    fn test_palette_entries_fallback() {
        let config = Config::default();
        let entries = palette_entries(&config);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key_color, config.scale.key_color);
    }
}
