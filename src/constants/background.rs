use ratatui::style::Color;

pub const IMAGES: [&str; 3] = [
    "/images/background-image/img1.jpg",
    "/images/background-image/img2.jpg",
    "/images/background-image/img3.jpg",
];

// Used when no image could be loaded
pub const NIGHT_SKY: Color = Color::Rgb(12, 18, 38);

// Upper half block: fg paints the upper pixel, bg the lower one
pub const HALF_BLOCK: char = '▀';
