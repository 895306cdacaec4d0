pub mod cli;
pub mod configuration;
pub mod error;
pub mod export;
pub mod font;
pub mod image;
pub mod progress;
