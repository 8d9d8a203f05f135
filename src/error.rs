use std::path::PathBuf;

use thiserror::Error;

/// Problems probing or decoding a video file.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed on {path:?}: {stderr}")]
    Exited {
        program: &'static str,
        path: PathBuf,
        stderr: String,
    },

    #[error("no video stream in {0:?}")]
    NoVideoStream(PathBuf),

    #[error("invalid probe value {key}={value:?}")]
    InvalidProbe { key: &'static str, value: String },

    #[error("metadata loader for {0:?} stopped unexpectedly")]
    LoaderGone(PathBuf),
}

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("the carousel needs at least one slide")]
    NoSlides,

    #[error("{slides} slides but {media} media elements")]
    MediaCountMismatch { slides: usize, media: usize },
}

pub type Result<T, E = MediaError> = std::result::Result<T, E>;
