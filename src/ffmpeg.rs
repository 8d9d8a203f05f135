use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;

use crossbeam_channel::{Receiver, bounded};

use crate::error::{MediaError, Result};

/// Stream properties reported by ffprobe.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f32,
    pub duration: f32,
}

/// One decoded RGBA frame.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub index: u64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

pub fn probe(path: &Path) -> Result<VideoInfo> {
    let output = Command::new("ffprobe")
        .args(["-v", "error"])
        .args(["-select_streams", "v:0"])
        .args(["-show_entries", "stream=width,height,r_frame_rate:format=duration"])
        .args(["-of", "default=noprint_wrappers=1"])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| MediaError::Spawn { program: "ffprobe", source })?;

    if !output.status.success() {
        return Err(MediaError::Exited {
            program: "ffprobe",
            path: path.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    parse_probe(&String::from_utf8_lossy(&output.stdout), path)
}

/// Parses `key=value` lines as printed by `ffprobe -of default=noprint_wrappers=1`.
pub fn parse_probe(text: &str, path: &Path) -> Result<VideoInfo> {
    let mut width = None;
    let mut height = None;
    let mut fps = None;
    let mut duration = None;

    for line in text.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        match key {
            "width" => width = Some(parse_value("width", value)?),
            "height" => height = Some(parse_value("height", value)?),
            "r_frame_rate" => fps = Some(parse_rate(value)?),
            // Container duration is "N/A" for some streams
            "duration" => duration = value.parse::<f32>().ok().or(duration),
            _ => {}
        }
    }

    let (Some(width), Some(height)) = (width, height) else {
        return Err(MediaError::NoVideoStream(path.to_path_buf()));
    };
    let duration = duration.ok_or_else(|| MediaError::InvalidProbe {
        key: "duration",
        value: "N/A".to_string(),
    })?;

    Ok(VideoInfo {
        width,
        height,
        fps: fps.unwrap_or(30.0),
        duration,
    })
}

fn parse_value(key: &'static str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| MediaError::InvalidProbe {
        key,
        value: value.to_string(),
    })
}

fn parse_rate(value: &str) -> Result<f32> {
    let invalid = || MediaError::InvalidProbe {
        key: "r_frame_rate",
        value: value.to_string(),
    };
    let rate = match value.split_once('/') {
        Some((num, den)) => {
            let num: f32 = num.parse().map_err(|_| invalid())?;
            let den: f32 = den.parse().map_err(|_| invalid())?;
            if den == 0.0 {
                return Err(invalid());
            }
            num / den
        }
        None => value.parse().map_err(|_| invalid())?,
    };
    if rate > 0.0 { Ok(rate) } else { Err(invalid()) }
}

/// Output size for decoding: never wider than `max_width`, even dimensions.
pub fn decode_size(info: &VideoInfo, max_width: u32) -> (u32, u32) {
    // ffmpeg rejects odd sizes for yuv420 sources; 0 would mean empty frames
    let even = |n: u32| n.max(2) & !1;
    if info.width <= max_width {
        return (even(info.width), even(info.height));
    }
    let height = (info.height as u64 * max_width as u64 / info.width as u64) as u32;
    (even(max_width), even(height))
}

/// An ffmpeg process decoding a file to raw RGBA frames.
///
/// Frames are read on a background thread into a bounded queue, so the
/// decoder runs at most `queue` frames ahead of the consumer. The queue
/// disconnects when the stream ends.
pub struct Decoder {
    process: Child,
    frames: Receiver<VideoFrame>,
}

impl Decoder {
    pub fn spawn(path: &Path, width: u32, height: u32, queue: usize) -> Result<Decoder> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(path)
            .args(["-f", "rawvideo"])
            .args(["-pix_fmt", "rgba"])
            .args(["-vf", &format!("scale={}:{}", width, height)])
            .arg("-")
            .spawn()
            .map_err(|source| MediaError::Spawn { program: "ffmpeg", source })?;

        let Some(mut stdout) = process.stdout.take() else {
            let _ = process.kill();
            return Err(MediaError::Exited {
                program: "ffmpeg",
                path: path.to_path_buf(),
                stderr: "stdout unavailable".to_string(),
            });
        };

        let (tx, frames) = bounded(queue);
        let name: PathBuf = path.to_path_buf();
        let frame_len = width as usize * height as usize * 4;
        thread::spawn(move || {
            let mut index = 0;
            loop {
                let mut data = vec![0u8; frame_len];
                match stdout.read_exact(&mut data) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                    Err(e) => {
                        tracing::warn!("Decoding {:?} stopped: {}", name, e);
                        break;
                    }
                }
                let frame = VideoFrame { index, width, height, data };
                if tx.send(frame).is_err() {
                    // Receiver dropped, the player no longer wants frames
                    break;
                }
                index += 1;
            }
            tracing::trace!("Decoder for {:?} finished after {} frames", name, index);
        });

        tracing::debug!("Started decoder for {:?} at {}x{}", path, width, height);
        Ok(Decoder { process, frames })
    }

    pub fn frames(&self) -> &Receiver<VideoFrame> {
        &self.frames
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        // Kill ffmpeg; the reader thread exits on EOF or on the closed queue
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}
