//! Formatting utilities used for CLI outputs.

use crate::models::treatment_log::LogStatus;
use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Pad to `width` terminal columns (labels carry "³" and similar glyphs).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Litres with two decimals, as shown next to the estimated dye.
pub fn litres(value: f64) -> String {
    format!("{:.2} L", value)
}

/// Textual description and ANSI colour for an approval status.
pub fn describe_status(status: LogStatus) -> (&'static str, &'static str) {
    match status {
        LogStatus::Pending => ("Pending approval", "\x1b[33m"),
        LogStatus::Approved => ("Approved", "\x1b[32m"),
        LogStatus::Rejected => ("Rejected", "\x1b[31m"),
    }
}

/// Short placeholder for long encoded signatures.
pub fn signature_summary(sig: &str) -> String {
    if sig.trim().is_empty() {
        "(not signed)".to_string()
    } else {
        format!("signed ({} bytes)", sig.len())
    }
}
