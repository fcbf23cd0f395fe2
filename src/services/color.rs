// src/services/color.rs
//! Color helpers for the customization preview.

/// Hue rotations for the built-in palette, relative to the default brand
/// color. Anything off-palette is left unrotated.
const HUE_ROTATIONS: [(&str, u16); 5] = [
    ("#4f46e5", 0),
    ("#10b981", 120),
    ("#ef4444", 240),
    ("#f59e0b", 60),
    ("#7c3aed", 300),
];

/// Degrees to rotate a placeholder image so it reads as `hex`.
pub fn hue_rotation(hex: &str) -> u16 {
    let hex = hex.trim().to_ascii_lowercase();
    HUE_ROTATIONS
        .iter()
        .find(|(color, _)| *color == hex)
        .map(|(_, degrees)| *degrees)
        .unwrap_or(0)
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            (digits.len() == 3 || digits.len() == 6)
                && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Expand `#rgb` shorthand to `#rrggbb`. Other input is returned as is.
pub fn expand_hex(hex: &str) -> String {
    match hex.strip_prefix('#') {
        Some(digits) if digits.len() == 3 && is_hex_color(hex) => {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            format!("#{}", doubled)
        }
        _ => hex.to_string(),
    }
}

/// Background tint used behind the preview: the color at 1/8 alpha.
pub fn preview_background(hex: &str) -> String {
    format!("{}20", expand_hex(hex))
}
