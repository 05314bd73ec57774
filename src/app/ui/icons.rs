//! Unicode UI icon constants.
//!
//! Uses a BMP-only "safe" subset for broad font coverage (no emoji fonts needed).

pub const ICON_MENU: &str = "☰";
pub const ICON_LINE: &str = "↔";
pub const ICON_RECT: &str = "□";
pub const ICON_STATS: &str = "Σ";
