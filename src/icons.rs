// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Symbolic icon names stored on categories and goals, and the glyphs used
//! to show them in a terminal.

pub const FALLBACK_GLYPH: &str = "●";

/// Glyph for an icon name. Unknown names get [`FALLBACK_GLYPH`].
pub fn glyph(name: &str) -> &'static str {
    match name.trim().to_ascii_lowercase().as_str() {
        "briefcase" => "💼",
        "laptop" => "💻",
        "trending-up" => "📈",
        "gift" => "🎁",
        "plus" => "➕",
        "utensils" => "🍴",
        "car" => "🚗",
        "home" => "🏠",
        "gamepad" => "🎮",
        "heart" => "❤",
        "graduation-cap" => "🎓",
        "shopping-bag" => "🛍",
        "receipt" => "🧾",
        "more" => "…",
        "target" => "🎯",
        "piggy-bank" => "🐷",
        "plane" => "✈",
        _ => FALLBACK_GLYPH,
    }
}

/// `glyph name`, for table cells.
pub fn label(icon: &str, name: &str) -> String {
    format!("{} {}", glyph(icon), name)
}
