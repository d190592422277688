//! CLI command implementations.

pub mod autoplay;
pub mod beatmap;
pub mod replay;
