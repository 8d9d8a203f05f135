use std::path::Path;

use raylib::prelude::*;

use crate::ffmpeg::VideoFrame;
use crate::state::ControlButton;
use crate::video::VideoPlayer;

// --- Control icons ---
pub struct Icons {
    play: Option<Texture2D>,
    pause: Option<Texture2D>,
    replay: Option<Texture2D>,
}

impl Icons {
    /// Loads `play.png`, `pause.png` and `replay.png` from `assets`.
    ///
    /// A missing icon is not fatal: the renderer draws a plain glyph instead.
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, assets: &Path) -> Icons {
        let mut load = |name: &str| {
            let path = assets.join(name);
            match rl.load_texture(thread, &path.to_string_lossy()) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    tracing::warn!("Icon {:?} not loaded, using fallback: {}", path, e);
                    None
                }
            }
        };
        Icons {
            play: load("play.png"),
            pause: load("pause.png"),
            replay: load("replay.png"),
        }
    }

    pub fn get(&self, button: ControlButton) -> Option<&Texture2D> {
        match button {
            ControlButton::Play => self.play.as_ref(),
            ControlButton::Pause => self.pause.as_ref(),
            ControlButton::Replay => self.replay.as_ref(),
        }
    }
}

// --- Video frames ---
struct Uploaded {
    texture: Texture2D,
    frame_index: u64,
}

/// One GPU texture per slide, refreshed from the players' latest frames.
pub struct VideoTextures {
    slots: Vec<Option<Uploaded>>,
}

impl VideoTextures {
    pub fn new(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| None).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Texture2D> {
        self.slots.get(index)?.as_ref().map(|u| &u.texture)
    }

    pub fn sync(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, players: &[VideoPlayer]) {
        for (slot, player) in self.slots.iter_mut().zip(players) {
            let Some(frame) = player.frame() else {
                continue;
            };
            let fits = slot.as_ref().is_some_and(|u| {
                u.texture.width() == frame.width as i32 && u.texture.height() == frame.height as i32
            });
            if !fits {
                match create_texture(rl, thread, frame) {
                    Ok(texture) => *slot = Some(Uploaded { texture, frame_index: u64::MAX }),
                    Err(e) => {
                        tracing::warn!("Failed to create texture for {:?}: {}", player.path(), e);
                        continue;
                    }
                }
            }
            if let Some(uploaded) = slot {
                if uploaded.frame_index == frame.index {
                    continue;
                }
                let result = check_frame(frame)
                    .and_then(|()| uploaded.texture.update_texture(&frame.data).map_err(|e| format!("{}", e)));
                match result {
                    Ok(()) => uploaded.frame_index = frame.index,
                    Err(e) => tracing::warn!("Failed to upload frame {} of {:?}: {}", frame.index, player.path(), e),
                }
            }
        }
    }
}

// --- A frame must hold exactly one RGBA pixel per texel ---
fn check_frame(frame: &VideoFrame) -> Result<(), String> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(format!("frame {} has {} bytes for {}x{}", frame.index, frame.data.len(), frame.width, frame.height));
    }
    Ok(())
}

// --- Create an RGBA texture sized for `frame` ---
fn create_texture(rl: &mut RaylibHandle, thread: &RaylibThread, frame: &VideoFrame) -> Result<Texture2D, String> {
    check_frame(frame)?;
    let image = Image::gen_image_color(frame.width as i32, frame.height as i32, Color::BLACK);
    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| format!("{}", e))?;

    // Only the texture is needed from here on
    drop(image);

    Ok(texture)
}
