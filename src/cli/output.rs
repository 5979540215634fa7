//! Console output utilities
//!
//! Headers, status lines and swatch tables for the CLI, plus the
//! [`DualWriter`] used when logging to a file.

use crate::color::{Color, ContrastReport};
use crate::scale::Scale;
use std::io::Write;

// ============================================================================
// Console output helpers
// ============================================================================

/// Print a header section with a box
pub fn print_header(title: &str) {
    let width = 68;
    let title_padded = format!("{:^width$}", title, width = width - 4);
    println!();
    println!("╔{}╗", "═".repeat(width - 2));
    println!("║ {} ║", title_padded);
    println!("╚{}╝", "═".repeat(width - 2));
    println!();
}

/// Print a section divider
pub fn print_divider() {
    println!();
    println!("{}", "─".repeat(60));
    println!();
}

/// Print a success message with checkmark
pub fn print_success(msg: &str) {
    println!("  ✓ {}", msg);
}

/// Print an info message with bullet
pub fn print_info(msg: &str) {
    println!("  • {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("  ⚠ {}", msg);
}

// ============================================================================
// Swatch tables
// ============================================================================

/// 24-bit ANSI background block for terminals that support truecolor
fn color_block(color: Color) -> String {
    let (r, g, b) = color.to_rgb();
    format!("\x1b[48;2;{};{};{}m      \x1b[0m", r, g, b)
}

/// Column header matching [`format_swatch_row`]
pub fn swatch_table_header(with_contrast: bool) -> String {
    let mut header = format!("{:>6}  {:<8}  {:>6}", "step", "hex", "L*");
    if with_contrast {
        header.push_str(&format!(
            "  {:>7}  {:>7}  {:>6}  {:>6}  {:<5}",
            "white", "black", "Lc(w)", "Lc(b)", "text"
        ));
    }
    header
}

/// One table row: step, hex, L*, and optionally contrast figures
pub fn format_swatch_row(
    step: i32,
    color: Color,
    lstar: f64,
    is_custom: bool,
    report: Option<&ContrastReport>,
) -> String {
    let marker = if is_custom { "*" } else { " " };
    let mut row = format!("{:>6}{} {:<8}  {:>6.1}", step, marker, color.to_hex(), lstar);
    if let Some(report) = report {
        row.push_str(&format!(
            "  {:>5.2}:1  {:>5.2}:1  {:>6.1}  {:>6.1}  {:<5}",
            report.on_white,
            report.on_black,
            report.apca_white,
            report.apca_black,
            report.preferred_text.to_hex(),
        ));
    }
    row
}

/// Print a scale as a table, with color blocks when `swatches` is set
pub fn print_scale_table(scale: &Scale, with_contrast: bool, swatches: bool) {
    println!("  {}", swatch_table_header(with_contrast));
    for swatch in scale {
        let report = with_contrast.then(|| ContrastReport::for_background(swatch.color));
        let row = format_swatch_row(
            swatch.step,
            swatch.color,
            swatch.lstar,
            swatch.is_custom,
            report.as_ref(),
        );
        if swatches {
            println!("  {}  {}", row, color_block(swatch.color));
        } else {
            println!("  {}", row);
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Writer that tees log output to stderr and a file
pub struct DualWriter {
    pub console: std::io::Stderr,
    pub file: std::fs::File,
}

impl Write for DualWriter {
    /// Writes the whole buffer to both sinks; console errors do not stop file logging
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let _ = self.console.write_all(buf);
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let _ = self.console.flush();
        self.file.flush()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_swatch_row_plain() {
        let row = format_swatch_row(50, Color::from_rgb(0x77, 0x77, 0x77), 50.03, false, None);
        assert_eq!(row, "    50  #777777     50.0");
    }

    #[test]
    fn test_format_swatch_row_marks_custom() {
        let row = format_swatch_row(95, Color::WHITE, 100.0, true, None);
        assert!(row.starts_with("    95* #ffffff"));
    }

    #[test]
    fn test_format_swatch_row_with_contrast() {
        let report = ContrastReport::for_background(Color::BLACK);
        let row = format_swatch_row(10, Color::BLACK, 0.0, false, Some(&report));
        assert!(row.contains("21.00:1"));
        assert!(row.contains(" 1.00:1"));
        assert!(row.ends_with("#ffffff"));
    }

    #[test]
    fn test_dual_writer_writes_full_lines_to_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tonal_scales.log");
        let mut writer = DualWriter {
            console: std::io::stderr(),
            file: std::fs::File::create(&path).unwrap(),
        };

        let line = format!("[INFO tonal_scales] {}\n", "x".repeat(8192));
        let written = writer.write(line.as_bytes()).unwrap();
        writer.flush().unwrap();

        assert_eq!(written, line.len());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), line);
    }

    #[test]
    fn test_header_columns_match_rows() {
        let header = swatch_table_header(false);
        let row = format_swatch_row(98, Color::WHITE, 100.0, false, None);
        assert_eq!(header.chars().count(), row.chars().count());
    }
}
