use std::ops::Range;

use ratatui::style::Color;

pub const SNOW_COUNT: usize = 32;

// Percentage of the viewport width
pub const POSITION: Range<f32> = 0.0..100.0;
// Seconds
pub const DURATION: Range<f32> = 10.0..20.0;
pub const OPACITY: Range<f32> = 0.4..1.0;
pub const SCALE: Range<f32> = 0.6..1.6;

// Glyphs ordered by size, indexed by scale
pub const SNOWFLAKES: [char; 4] = ['·', '•', '❅', '❄'];
pub const FLAKE_COLOR: Color = Color::Rgb(255, 255, 255);
