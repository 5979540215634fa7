//! Contrast metrics
//!
//! Two independent measures of text/background readability:
//! - WCAG 2 contrast ratio, from relative luminance (1.0 - 21.0)
//! - APCA lightness contrast Lc, polarity-aware (roughly 0 - 108)

use super::convert::{luminance_with_threshold, WCAG_LINEAR_THRESHOLD};
use super::Color;
use crate::core::error::Result;
use serde::Serialize;

/// WCAG AA minimum for normal text
pub const WCAG_AA: f64 = 4.5;

/// WCAG AA minimum for large text
pub const WCAG_AA_LARGE: f64 = 3.0;

/// WCAG AAA minimum for normal text
pub const WCAG_AAA: f64 = 7.0;

// APCA constants
const APCA_BLACK_THRESHOLD: f64 = 0.022;
const APCA_BLACK_CLAMP: f64 = 1.414;
const APCA_SCALE: f64 = 1.14;
const APCA_BG_LIGHT: f64 = 0.56;
const APCA_TEXT_LIGHT: f64 = 0.57;
const APCA_BG_DARK: f64 = 0.65;
const APCA_TEXT_DARK: f64 = 0.62;

/// WCAG relative luminance (channels linearized at 0.03928)
pub fn relative_luminance(color: Color) -> f64 {
    luminance_with_threshold(color, WCAG_LINEAR_THRESHOLD)
}

/// WCAG contrast ratio; symmetric in its arguments
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG contrast ratio between two hex strings
pub fn contrast_ratio_hex(a: &str, b: &str) -> Result<f64> {
    Ok(contrast_ratio(a.parse()?, b.parse()?))
}

#[inline]
fn soft_clamp_black(y: f64) -> f64 {
    if y < APCA_BLACK_THRESHOLD {
        y + (APCA_BLACK_THRESHOLD - y).powf(APCA_BLACK_CLAMP)
    } else {
        y
    }
}

/// APCA lightness contrast magnitude of `text` drawn on `background`
pub fn apca_contrast(text: Color, background: Color) -> f64 {
    let text_y = soft_clamp_black(relative_luminance(text));
    let bg_y = soft_clamp_black(relative_luminance(background));

    let sapc = if bg_y > text_y {
        (bg_y.powf(APCA_BG_LIGHT) - text_y.powf(APCA_TEXT_LIGHT)) * APCA_SCALE
    } else {
        (bg_y.powf(APCA_BG_DARK) - text_y.powf(APCA_TEXT_DARK)) * APCA_SCALE
    };

    (sapc * 100.0).abs()
}

/// APCA contrast between two hex strings
pub fn apca_contrast_hex(text: &str, background: &str) -> Result<f64> {
    Ok(apca_contrast(text.parse()?, background.parse()?))
}

/// Readability of one color used as a background for white and black text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastReport {
    /// WCAG ratio with white text
    pub on_white: f64,
    /// WCAG ratio with black text
    pub on_black: f64,
    /// APCA Lc with white text
    pub apca_white: f64,
    /// APCA Lc with black text
    pub apca_black: f64,
    /// Text color with the higher WCAG ratio
    pub preferred_text: Color,
}

impl ContrastReport {
    /// Evaluate `background` against pure white and pure black text
    pub fn for_background(background: Color) -> Self {
        let on_white = contrast_ratio(Color::WHITE, background);
        let on_black = contrast_ratio(Color::BLACK, background);

        Self {
            on_white,
            on_black,
            apca_white: apca_contrast(Color::WHITE, background),
            apca_black: apca_contrast(Color::BLACK, background),
            preferred_text: if on_black >= on_white {
                Color::BLACK
            } else {
                Color::WHITE
            },
        }
    }

    /// Best WCAG ratio achievable with white or black text
    pub fn best_ratio(&self) -> f64 {
        self.on_white.max(self.on_black)
    }

    /// Short WCAG verdict for the best text color: "AAA", "AA", "AA18" or "-"
    pub fn wcag_level(&self) -> &'static str {
        wcag_level(self.best_ratio())
    }
}

/// Short WCAG verdict for a ratio
pub fn wcag_level(ratio: f64) -> &'static str {
    if ratio >= WCAG_AAA {
        "AAA"
    } else if ratio >= WCAG_AA {
        "AA"
    } else if ratio >= WCAG_AA_LARGE {
        "AA18"
    } else {
        "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_white_black_is_maximum() {
        let ratio = contrast_ratio(Color::WHITE, Color::BLACK);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert!((contrast_ratio_hex("#ffffff", "#000000").unwrap() - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_same_color_is_one() {
        for hex in ["#000000", "#ffffff", "#3b82f6", "#777777"] {
            assert_eq!(contrast_ratio_hex(hex, hex).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_contrast_is_symmetric() {
        let a = Color::from_rgb(59, 130, 246);
        let b = Color::from_rgb(250, 250, 250);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn test_contrast_hex_propagates_parse_error() {
        assert!(contrast_ratio_hex("#fff", "#000000").is_err());
        assert!(apca_contrast_hex("#000000", "nope").is_err());
    }

    #[test]
    fn test_relative_luminance_known_value() {
        // #777777 is the classic 4.48:1 gray on white
        let gray = Color::from_rgb(0x77, 0x77, 0x77);
        let ratio = contrast_ratio(gray, Color::WHITE);
        assert!((ratio - 4.48).abs() < 0.01);
    }

    #[test]
    fn test_apca_polarity() {
        let dark_on_light = apca_contrast(Color::BLACK, Color::WHITE);
        let light_on_dark = apca_contrast(Color::WHITE, Color::BLACK);
        assert!(dark_on_light > 100.0 && dark_on_light < 110.0);
        assert!(light_on_dark > 100.0 && light_on_dark < 115.0);
        assert!(dark_on_light != light_on_dark);
    }

    #[test]
    fn test_apca_orders_gray_text() {
        let black = apca_contrast(Color::BLACK, Color::WHITE);
        let gray = apca_contrast(Color::from_rgb(0x77, 0x77, 0x77), Color::WHITE);
        let pale = apca_contrast(Color::from_rgb(0xdd, 0xdd, 0xdd), Color::WHITE);
        assert!(black > gray && gray > pale);
    }

    #[test]
    fn test_report_prefers_readable_text() {
        let light = ContrastReport::for_background(Color::from_rgb(240, 240, 240));
        assert_eq!(light.preferred_text, Color::BLACK);
        assert_eq!(light.wcag_level(), "AAA");

        let dark = ContrastReport::for_background(Color::from_rgb(20, 20, 60));
        assert_eq!(dark.preferred_text, Color::WHITE);
    }

    #[test]
    fn test_wcag_levels() {
        assert_eq!(wcag_level(21.0), "AAA");
        assert_eq!(wcag_level(5.0), "AA");
        assert_eq!(wcag_level(3.2), "AA18");
        assert_eq!(wcag_level(1.5), "-");
    }
}
