/// Notifications a media element raises while it is updated.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    LoadedMetadata,
    Playing,
    Ended,
    Failed(String),
}

/// The subset of a video element's behavior the carousel drives.
///
/// `play` on an ended element restarts it from the beginning. Calling `play`
/// before metadata is available queues the request; playback starts (and
/// `Playing` is raised) once the element is ready.
pub trait MediaElement {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    /// Playback position in seconds.
    fn current_time(&self) -> f32;
    /// Total length in seconds, `None` until metadata is loaded.
    fn duration(&self) -> Option<f32>;
    /// Advances the element by `dt` seconds of wall-clock time.
    fn update(&mut self, dt: f32) -> Vec<MediaEvent>;
}

/// Playback position as a fraction of the duration, if known.
pub fn playback_progress(media: &impl MediaElement) -> Option<f32> {
    match media.duration() {
        Some(duration) if duration > 0.0 => Some(media.current_time() / duration),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeMedia;
    use super::*;

    #[test]
    fn test_play_before_ready_is_queued() {
        let mut media = FakeMedia::loading(2.0, 0.5);
        media.play();
        assert!(media.update(0.25).is_empty());
        assert_eq!(media.current_time(), 0.0);
        let events = media.update(0.25);
        assert_eq!(events, vec![MediaEvent::LoadedMetadata, MediaEvent::Playing]);
        media.update(1.0);
        assert_eq!(media.current_time(), 1.0);
    }

    #[test]
    fn test_play_after_end_restarts() {
        let mut media = FakeMedia::new(1.0);
        media.update(0.0);
        media.play();
        let events = media.update(1.0);
        assert!(events.contains(&MediaEvent::Ended));
        assert_eq!(playback_progress(&media), Some(1.0));

        media.play();
        assert_eq!(media.current_time(), 0.0);
        assert_eq!(media.update(0.0), vec![MediaEvent::Playing]);
    }

    #[test]
    fn test_progress_unknown_before_metadata() {
        let media = FakeMedia::loading(3.0, 1.0);
        assert_eq!(playback_progress(&media), None);
    }
}
