use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

/// One carousel entry: a video and the caption lines drawn over it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlideSpec {
    pub video: PathBuf,
    pub captions: Vec<String>,
    /// Horizontal shift of the video inside its frame, as a fraction of the frame width.
    #[serde(default)]
    pub video_offset: f32,
}

#[derive(Debug, Deserialize)]
struct SlideFile {
    #[serde(rename = "slide")]
    slides: Vec<SlideSpec>,
}

/// The four built-in highlight slides, with videos looked up in `assets`.
pub fn highlight_slides(assets: &Path) -> Vec<SlideSpec> {
    let slide = |file: &str, captions: &[&str], video_offset: f32| SlideSpec {
        video: assets.join(file),
        captions: captions.iter().map(|s| s.to_string()).collect(),
        video_offset,
    };
    vec![
        slide("highlight-first.mp4", &["Enter a new chip.", "Game-changing power.", "Groundbreaking performance."], 0.0),
        slide("highlight-second.mp4", &["Titanium.", "So strong. So light. So Pro."], 0.0),
        slide("highlight-third.mp4", &["The longest optical zoom", "we have ever shipped.", "Far out."], 0.15),
        slide("highlight-fourth.mp4", &["All-new Action button.", "What will yours do?"], 0.0),
    ]
}

/// Reads a slide list from a TOML file of `[[slide]]` tables.
pub fn load_slides(path: &Path) -> anyhow::Result<Vec<SlideSpec>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read slide list {}", path.display()))?;
    let base = path.parent().unwrap_or(Path::new("."));
    parse_slides(&text, base).with_context(|| format!("Invalid slide list {}", path.display()))
}

/// Parses a slide list; relative video paths are resolved against `base`.
pub fn parse_slides(text: &str, base: &Path) -> anyhow::Result<Vec<SlideSpec>> {
    let file: SlideFile = toml::from_str(text)?;
    if file.slides.is_empty() {
        bail!("no [[slide]] entries");
    }
    Ok(file
        .slides
        .into_iter()
        .map(|mut slide| {
            if slide.video.is_relative() {
                slide.video = base.join(&slide.video);
            }
            slide
        })
        .collect())
}
