//! Fixed color palettes and sibling color allocation.
//!
//! # Responsibility
//! - Hold the fixed vintage palettes for categories and projects.
//! - Pick a visually distinct color for a new sibling entity.
//!
//! # Invariants
//! - While an unused palette entry exists, allocation is deterministic
//!   (first unused in palette order).
//! - With the palette exhausted, allocation returns a uniformly random
//!   palette member instead of failing.

use rand::Rng;

/// Category palette (vintage tones, 10 entries).
pub const CATEGORY_COLORS: &[&str] = &[
    "#1d3557", "#c1513b", "#e07b39", "#e9b44c", "#d4a574", "#7d8471", "#3d4a37", "#b5835a",
    "#8b7355", "#5c4033",
];

/// Project palette (vintage tones, 10 entries).
pub const PROJECT_COLORS: &[&str] = &[
    "#1d3557", "#c1513b", "#e07b39", "#e9b44c", "#d4a574", "#7d8471", "#3d4a37", "#b5835a",
    "#8b7355", "#5c4033",
];

/// Default highlight color (soft yellow).
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#fef08a";

/// Picks a color for a new sibling.
///
/// Returns the first palette entry missing from `used`. When every entry is
/// taken, falls back to a uniformly random palette member; callers must not
/// assume which one.
pub fn allocate_color(used: &[&str], palette: &[&'static str]) -> String {
    if let Some(color) = palette.iter().find(|color| !used.contains(*color)) {
        return (*color).to_string();
    }
    let index = rand::thread_rng().gen_range(0..palette.len());
    palette[index].to_string()
}

#[cfg(test)]
mod tests {
    use super::{allocate_color, CATEGORY_COLORS, PROJECT_COLORS};

    #[test]
    fn first_allocation_takes_palette_head() {
        assert_eq!(allocate_color(&[], CATEGORY_COLORS), CATEGORY_COLORS[0]);
    }

    #[test]
    fn allocation_skips_used_entries() {
        let used = [CATEGORY_COLORS[0], CATEGORY_COLORS[1], CATEGORY_COLORS[3]];
        assert_eq!(allocate_color(&used, CATEGORY_COLORS), CATEGORY_COLORS[2]);
    }

    #[test]
    fn exhausted_palette_yields_some_palette_member() {
        let used: Vec<&str> = PROJECT_COLORS.to_vec();
        for _ in 0..50 {
            let color = allocate_color(&used, PROJECT_COLORS);
            assert!(PROJECT_COLORS.contains(&color.as_str()));
        }
    }
}
