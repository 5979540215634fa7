//! Color space conversions
//!
//! Every function here is pure and total except [`hex_to_rgb`], which rejects
//! anything that is not exactly six hex digits.
//!
//! The pipeline to perceptual lightness is sRGB → linear RGB → Y (BT.709 / D65
//! weights) → CIE L*. The linearization routine is shared with the WCAG
//! luminance in [`super::contrast`]; only the threshold differs.

use super::{Color, Hsl};
use crate::core::error::{Result, ScaleError};

/// Linearization threshold of the IEC 61966-2-1 sRGB decode (used for L*)
pub const SRGB_LINEAR_THRESHOLD: f64 = 0.04045;

/// Linearization threshold as written in WCAG 2.x (used for contrast)
pub const WCAG_LINEAR_THRESHOLD: f64 = 0.03928;

/// BT.709 / D65 luminance weights for linear R, G, B
const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// CIE ε: below this Y the L* curve is linear
const CIE_EPSILON: f64 = 0.008856;

/// CIE κ: slope of the linear segment of the L* curve
const CIE_KAPPA: f64 = 903.3;

// =============================================================================
// Hex
// =============================================================================

/// Parse exactly six hex digits, with an optional leading `#`
pub fn hex_to_rgb(hex: &str) -> Result<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ScaleError::InvalidHex(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ScaleError::InvalidHex(hex.to_string()))
    };

    Ok(Color::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format float channels as `#rrggbb`
///
/// Each channel is rounded to the nearest integer and clamped to [0, 255].
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        quantize(r),
        quantize(g),
        quantize(b)
    )
}

#[inline]
fn quantize(channel: f64) -> u8 {
    if channel.is_nan() {
        return 0;
    }
    channel.round().clamp(0.0, 255.0) as u8
}

// =============================================================================
// HSL
// =============================================================================

/// Convert an sRGB color to hue/saturation/lightness
pub fn rgb_to_hsl(color: Color) -> Hsl {
    let r = color.r as f64 / 255.0;
    let g = color.g as f64 / 255.0;
    let b = color.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h * 60.0, s, l }
}

/// Convert hue/saturation/lightness back to an sRGB color
pub fn hsl_to_rgb(hsl: Hsl) -> Color {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = quantize(l * 255.0);
        return Color::from_rgb(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Color::from_rgb(
        quantize(hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0),
        quantize(hue_to_channel(p, q, h) * 255.0),
        quantize(hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0),
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// =============================================================================
// Linear light and L*
// =============================================================================

/// Decode one 8-bit sRGB channel to linear light
///
/// `threshold` selects the breakpoint of the piecewise curve:
/// [`SRGB_LINEAR_THRESHOLD`] for L*, [`WCAG_LINEAR_THRESHOLD`] for contrast.
#[inline]
pub fn linearize_channel(channel: u8, threshold: f64) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= threshold {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Luminance Y of a color with the given linearization threshold
pub fn luminance_with_threshold(color: Color, threshold: f64) -> f64 {
    let [wr, wg, wb] = LUMINANCE_WEIGHTS;
    wr * linearize_channel(color.r, threshold)
        + wg * linearize_channel(color.g, threshold)
        + wb * linearize_channel(color.b, threshold)
}

/// Encode linear light to a gamma-encoded sRGB value in [0, 1]
#[inline]
fn encode_channel(linear: f64) -> f64 {
    let srgb = if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    srgb.clamp(0.0, 1.0)
}

/// CIE L* of an sRGB color
pub fn rgb_to_lstar(color: Color) -> f64 {
    let y = luminance_with_threshold(color, SRGB_LINEAR_THRESHOLD);
    if y <= CIE_EPSILON {
        CIE_KAPPA * y
    } else {
        116.0 * y.cbrt() - 16.0
    }
}

/// Achromatic (gray) color with the given L*
pub fn lstar_to_rgb(lstar: f64) -> Color {
    let lstar = lstar.clamp(0.0, 100.0);
    let y = if lstar > CIE_KAPPA * CIE_EPSILON {
        ((lstar + 16.0) / 116.0).powi(3)
    } else {
        lstar / CIE_KAPPA
    };

    let v = quantize(encode_channel(y) * 255.0);
    Color::from_rgb(v, v, v)
}

// =============================================================================
// Shaped lightness
// =============================================================================

/// Color for one swatch of a scale
///
/// `position` runs from 0 at `lstar_max` (light end) to 1 at `lstar_min`
/// (dark end). Saturation percentages interpolate linearly over that range
/// and scale the base saturation; the hue shift interpolates from
/// `hue_shift_light` to `hue_shift_dark`. The HSL lightness of the result is
/// `target_lstar / 100`. Out-of-range inputs are clamped.
#[allow(clippy::too_many_arguments)]
pub fn color_at_lightness(
    base: Color,
    target_lstar: f64,
    lstar_min: f64,
    lstar_max: f64,
    saturation_min: f64,
    saturation_max: f64,
    hue_shift_dark: f64,
    hue_shift_light: f64,
) -> Color {
    let base_hsl = rgb_to_hsl(base);

    let range = lstar_max - lstar_min;
    let position = if range.abs() < f64::EPSILON {
        0.0
    } else {
        ((lstar_max - target_lstar) / range).clamp(0.0, 1.0)
    };

    let saturation =
        base_hsl.s * (saturation_max - position * (saturation_max - saturation_min)) / 100.0;
    let hue = base_hsl.h + hue_shift_light + position * (hue_shift_dark - hue_shift_light);

    hsl_to_rgb(Hsl::new(hue, saturation, target_lstar / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_hex_to_rgb_accepts_optional_hash() {
        assert_eq!(hex_to_rgb("#3b82f6").unwrap(), Color::from_rgb(59, 130, 246));
        assert_eq!(hex_to_rgb("3B82F6").unwrap(), Color::from_rgb(59, 130, 246));
    }

    #[test]
    fn test_hex_to_rgb_rejects_malformed() {
        for bad in ["", "#", "#fff", "#ffff", "#fffffff", "##ffffff", "#gggggg", " #ffffff", "#ff ff0"] {
            assert!(
                matches!(hex_to_rgb(bad), Err(ScaleError::InvalidHex(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_hex_round_trip_is_case_normalized() {
        for hex in ["#000000", "#FFFFFF", "#3B82f6", "#0a0B0c", "#7f7f7f"] {
            let color = hex_to_rgb(hex).unwrap();
            let back = rgb_to_hex(color.r as f64, color.g as f64, color.b as f64);
            assert_eq!(back, hex.to_lowercase());
        }
    }

    #[test]
    fn test_rgb_to_hex_rounds_and_clamps() {
        assert_eq!(rgb_to_hex(254.6, 0.4, 127.5), "#ff0080");
        assert_eq!(rgb_to_hex(300.0, -12.0, f64::NAN), "#ff0000");
    }

    #[test]
    fn test_rgb_to_hsl_primaries() {
        let red = rgb_to_hsl(Color::from_rgb(255, 0, 0));
        assert_eq!((red.h, red.s, red.l), (0.0, 1.0, 0.5));

        let green = rgb_to_hsl(Color::from_rgb(0, 255, 0));
        assert!((green.h - 120.0).abs() < 1e-9);

        let blue = rgb_to_hsl(Color::from_rgb(0, 0, 255));
        assert!((blue.h - 240.0).abs() < 1e-9);

        let gray = rgb_to_hsl(Color::from_rgb(128, 128, 128));
        assert_eq!(gray.s, 0.0);
        assert_eq!(gray.h, 0.0);
    }

    #[test]
    fn test_hsl_round_trip_random_samples() {
        let mut rng = StdRng::seed_from_u64(0x5ca1e);
        for _ in 0..1000 {
            let color = Color::from_rgb(rng.gen(), rng.gen(), rng.gen());
            let back = hsl_to_rgb(rgb_to_hsl(color));
            for (a, b) in [(color.r, back.r), (color.g, back.g), (color.b, back.b)] {
                assert!(
                    (a as i16 - b as i16).abs() <= 1,
                    "{} -> {} drifted",
                    color,
                    back
                );
            }
        }
    }

    #[test]
    fn test_lstar_extremes() {
        assert!(rgb_to_lstar(Color::BLACK).abs() < 1e-9);
        assert!((rgb_to_lstar(Color::WHITE) - 100.0).abs() < 1e-6);
        assert_eq!(lstar_to_rgb(0.0), Color::BLACK);
        assert_eq!(lstar_to_rgb(100.0), Color::WHITE);
    }

    #[test]
    fn test_lstar_middle_gray() {
        // 18% gray sits at L* 50, sRGB 119
        let gray = lstar_to_rgb(50.0);
        assert_eq!(gray, Color::from_rgb(119, 119, 119));
    }

    #[test]
    fn test_lstar_round_trip_within_quantization() {
        let mut lstar = 0.0;
        while lstar <= 100.0 {
            let back = rgb_to_lstar(lstar_to_rgb(lstar));
            assert!(
                (back - lstar).abs() < 1.0,
                "L* {} came back as {}",
                lstar,
                back
            );
            lstar += 0.25;
        }
    }

    #[test]
    fn test_lstar_to_rgb_clamps_input() {
        assert_eq!(lstar_to_rgb(-20.0), Color::BLACK);
        assert_eq!(lstar_to_rgb(140.0), Color::WHITE);
    }

    #[test]
    fn test_linearize_thresholds_agree_on_8bit_codes() {
        // No 8-bit code lands between 0.03928 and 0.04045
        for code in 0..=255u8 {
            let srgb = linearize_channel(code, SRGB_LINEAR_THRESHOLD);
            let wcag = linearize_channel(code, WCAG_LINEAR_THRESHOLD);
            assert_eq!(srgb, wcag, "code {}", code);
        }
        assert!((linearize_channel(10, SRGB_LINEAR_THRESHOLD) - 10.0 / 255.0 / 12.92).abs() < 1e-12);
    }

    #[test]
    fn test_color_at_lightness_endpoints() {
        let base = Color::from_rgb(59, 130, 246);
        let base_hsl = rgb_to_hsl(base);

        let light = color_at_lightness(base, 90.0, 10.0, 90.0, 100.0, 100.0, 0.0, 0.0);
        let light_hsl = rgb_to_hsl(light);
        assert!((light_hsl.l - 0.9).abs() < 0.01);
        assert!((light_hsl.h - base_hsl.h).abs() < 2.0);

        let dark = color_at_lightness(base, 10.0, 10.0, 90.0, 100.0, 100.0, 0.0, 0.0);
        assert!((rgb_to_hsl(dark).l - 0.1).abs() < 0.01);
    }

    #[test]
    fn test_color_at_lightness_interpolates_saturation() {
        let base = Color::from_rgb(255, 0, 0);

        // Light end uses saturation_max, dark end saturation_min
        let light = color_at_lightness(base, 80.0, 20.0, 80.0, 0.0, 100.0, 0.0, 0.0);
        let dark = color_at_lightness(base, 20.0, 20.0, 80.0, 0.0, 100.0, 0.0, 0.0);
        assert!(rgb_to_hsl(light).s > 0.95);
        assert_eq!(rgb_to_hsl(dark).s, 0.0);
    }

    #[test]
    fn test_color_at_lightness_hue_shift() {
        let base = Color::from_rgb(255, 0, 0);

        let light = color_at_lightness(base, 80.0, 20.0, 80.0, 100.0, 100.0, 0.0, 30.0);
        let dark = color_at_lightness(base, 20.0, 20.0, 80.0, 100.0, 100.0, -30.0, 30.0);
        assert!((rgb_to_hsl(light).h - 30.0).abs() < 2.0);
        assert!((rgb_to_hsl(dark).h - 330.0).abs() < 2.0);
    }

    #[test]
    fn test_color_at_lightness_degenerate_range() {
        let base = Color::from_rgb(0, 128, 255);
        let color = color_at_lightness(base, 50.0, 50.0, 50.0, 100.0, 100.0, 0.0, 0.0);
        assert!((rgb_to_hsl(color).l - 0.5).abs() < 0.01);
    }
}
