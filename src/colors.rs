//! Color utilities for request ID visualization.

use owo_colors::{AnsiColors, DynColors, OwoColorize, Style};

/// Palette for request ID coloring
///
/// Standard and bright ANSI variants only, so IDs stay readable on both
/// light and dark terminal backgrounds.
const PALETTE: [AnsiColors; 12] = [
    AnsiColors::Red,
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
    AnsiColors::BrightRed,
    AnsiColors::BrightGreen,
    AnsiColors::BrightYellow,
    AnsiColors::BrightBlue,
    AnsiColors::BrightMagenta,
    AnsiColors::BrightCyan,
];

/// Maps a request ID to a palette color, consistent across runs.
pub fn get_color_for_id(id: &str) -> AnsiColors {
    let hash = id
        .bytes()
        .fold(5381u32, |acc, b| acc.wrapping_mul(33) ^ u32::from(b));
    PALETTE[hash as usize % PALETTE.len()]
}

/// Formats a request ID with consistent color coding
///
/// Returns a `String` with embedded ANSI color codes, wrapped in brackets
/// for alignment in the log output.
pub fn colored_id(id: &str) -> String {
    let color = get_color_for_id(id);
    let style = Style::new().color(DynColors::Ansi(color));
    format!("[{}]", id).style(style).to_string()
}
