//! Tag colors.
//!
//! Colors are `#rrggbb` strings. Any value is stored as given; the palette is
//! only the set offered when picking one.

/// Color given to tasks that never chose one
pub const DEFAULT_TAG_COLOR: &str = "#f87171";

/// Colors offered by the task form, in display order
pub const PALETTE: &[&str] = &[
    "#f87171", // red
    "#fb923c", // orange
    "#fbbf24", // amber
    "#a3e635", // lime
    "#34d399", // emerald
    "#22d3ee", // cyan
    "#60a5fa", // blue
    "#818cf8", // indigo
    "#a78bfa", // violet
    "#e879f9", // fuchsia
];

/// True for `#` followed by exactly six hex digits.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
