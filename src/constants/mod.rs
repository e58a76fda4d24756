pub mod background;
pub mod snow;
