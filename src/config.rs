use std::path::PathBuf;

use clap::Parser;

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, FPS};

/// Video highlights carousel.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Directory with the highlight videos and the play/pause/replay icons
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// TOML file with `[[slide]]` entries replacing the built-in highlights
    #[arg(long)]
    pub slides: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: i32,

    /// Initial window height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: i32,

    /// Target frame rate
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,
}
