use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, TryRecvError, bounded};

use crate::constants::{DECODE_QUEUE, MAX_DECODE_WIDTH};
use crate::error::{MediaError, Result};
use crate::ffmpeg::{self, Decoder, VideoFrame, VideoInfo};
use crate::media::{MediaElement, MediaEvent};

enum Load {
    Probing(Receiver<Result<VideoInfo>>),
    Ready(VideoInfo),
    Failed,
}

/// A video file played through an ffmpeg decoder.
///
/// Metadata is probed on a background thread as soon as the player is
/// created, and the decoder is started right after so the first frame can be
/// shown as a poster. The playback clock only advances as far as decoded
/// frames allow: when decoding stalls, `current_time` stalls with it.
pub struct VideoPlayer {
    path: PathBuf,
    load: Load,
    decoder: Option<Decoder>,
    frame: Option<VideoFrame>,
    position: Option<u64>,  // index of the last frame taken from the current decoder
    time: f32,
    paused: bool,
    ended: bool,
    pending: Vec<MediaEvent>,
}

impl VideoPlayer {
    pub fn open(path: &Path) -> VideoPlayer {
        let (tx, rx) = bounded(1);
        let probe_path = path.to_path_buf();
        thread::spawn(move || {
            let _ = tx.send(ffmpeg::probe(&probe_path));
        });

        VideoPlayer {
            path: path.to_path_buf(),
            load: Load::Probing(rx),
            decoder: None,
            frame: None,
            position: None,
            time: 0.0,
            paused: true,
            ended: false,
            pending: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Most recent decoded frame, if any.
    pub fn frame(&self) -> Option<&VideoFrame> {
        self.frame.as_ref()
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.load, Load::Failed)
    }

    pub fn info(&self) -> Option<&VideoInfo> {
        match &self.load {
            Load::Ready(info) => Some(info),
            _ => None,
        }
    }

    fn fail(&mut self, error: MediaError) {
        tracing::warn!("Video {:?} unavailable: {}", self.path, error);
        self.load = Load::Failed;
        self.decoder = None;
        self.pending.push(MediaEvent::Failed(error.to_string()));
    }

    fn poll_metadata(&mut self) {
        let Load::Probing(rx) = &self.load else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(info)) => {
                tracing::info!(
                    "Loaded {:?}: {}x{} @ {:.2} fps, {:.2}s",
                    self.path, info.width, info.height, info.fps, info.duration
                );
                self.load = Load::Ready(info);
                self.pending.push(MediaEvent::LoadedMetadata);
                if !self.paused {
                    self.pending.push(MediaEvent::Playing);
                }
            }
            Ok(Err(error)) => self.fail(error),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.fail(MediaError::LoaderGone(self.path.clone())),
        }
    }

    fn ensure_decoder(&mut self) {
        let Load::Ready(info) = &self.load else {
            return;
        };
        if self.decoder.is_some() {
            return;
        }
        let (width, height) = ffmpeg::decode_size(info, MAX_DECODE_WIDTH);
        match Decoder::spawn(&self.path, width, height, DECODE_QUEUE) {
            Ok(decoder) => self.decoder = Some(decoder),
            Err(error) => self.fail(error),
        }
    }

    fn advance(&mut self, dt: f32) {
        let (Load::Ready(info), Some(decoder)) = (&self.load, &self.decoder) else {
            return;
        };
        let fps = info.fps;
        let duration = info.duration;

        let wanted_time = self.time + dt;
        let wanted_index = (wanted_time * fps) as u64;
        let mut finished = false;
        let mut stalled = false;

        while self.position.is_none_or(|index| index < wanted_index) {
            match decoder.frames().try_recv() {
                Ok(frame) => {
                    self.position = Some(frame.index);
                    self.frame = Some(frame);
                }
                Err(TryRecvError::Empty) => {
                    stalled = true;
                    break;
                }
                Err(TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
            }
        }

        self.time = if stalled {
            let shown = self.position.map_or(0.0, |index| index as f32 / fps);
            shown.max(self.time).min(wanted_time)
        } else {
            wanted_time
        };

        if finished || self.time >= duration {
            self.time = duration;
            self.ended = true;
            self.paused = true;
            self.pending.push(MediaEvent::Ended);
        }
    }
}

impl MediaElement for VideoPlayer {
    fn play(&mut self) {
        if self.has_failed() {
            return;
        }
        if self.ended {
            // Restart: a fresh decoder starts from the first frame
            self.ended = false;
            self.time = 0.0;
            self.decoder = None;
            self.position = None;
        }
        if self.paused {
            self.paused = false;
            if matches!(self.load, Load::Ready(_)) {
                self.pending.push(MediaEvent::Playing);
            }
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f32 {
        self.time
    }

    fn duration(&self) -> Option<f32> {
        self.info().map(|info| info.duration)
    }

    fn update(&mut self, dt: f32) -> Vec<MediaEvent> {
        self.poll_metadata();
        self.ensure_decoder();

        if self.position.is_none() {
            // Poster frame while paused
            if let Some(decoder) = &self.decoder {
                if let Ok(frame) = decoder.frames().try_recv() {
                    self.position = Some(frame.index);
                    self.frame = Some(frame);
                }
            }
        }

        if !self.paused && !self.ended {
            self.advance(dt);
        }
        std::mem::take(&mut self.pending)
    }
}
