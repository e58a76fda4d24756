pub mod backdrop;
pub mod help;
pub mod snowfall;
