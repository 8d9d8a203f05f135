/// Playback state of the carousel.
///
/// Every field is touched only through [`CarouselState::apply`], which is a pure
/// function of the previous state, so rapid clicks compose as last-writer-wins.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub active_index: usize,
    pub has_started_play: bool,
    pub is_playing: bool,
    pub did_reach_end: bool,
    pub is_on_last_slide: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    VideoEnded(usize),   // The media element at this index reached its natural end
    Replay,
    Pause,
    Play,
    SelectSlide(usize),  // Indicator dot clicked
    ScrolledIntoView,
    MediaPlaying,        // Native "playing" notification from the active element
}

/// What the single control button currently offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    Play,
    Pause,
    Replay,
}

impl ControlButton {
    pub fn label(self) -> &'static str {
        match self {
            ControlButton::Play => "play",
            ControlButton::Pause => "pause",
            ControlButton::Replay => "replay",
        }
    }
}

impl CarouselState {
    pub fn apply(self, event: CarouselEvent, slide_count: usize) -> Self {
        let last = slide_count.saturating_sub(1);
        match event {
            CarouselEvent::VideoEnded(i) if i >= slide_count => self,
            CarouselEvent::VideoEnded(i) if i != last => Self {
                did_reach_end: true,
                is_on_last_slide: false,
                active_index: i + 1,
                ..self
            },
            CarouselEvent::VideoEnded(_) => Self {
                is_on_last_slide: true,
                did_reach_end: false,
                is_playing: false,
                ..self
            },
            CarouselEvent::Replay => Self {
                active_index: 0,
                is_on_last_slide: false,
                did_reach_end: false,
                has_started_play: true,
                is_playing: true,
            },
            CarouselEvent::Pause => Self { is_playing: false, ..self },
            CarouselEvent::Play => Self {
                is_playing: true,
                has_started_play: true,
                ..self
            },
            CarouselEvent::SelectSlide(i) if i < slide_count => Self {
                active_index: i,
                has_started_play: true,
                is_playing: true,
                did_reach_end: false,
                is_on_last_slide: false,
            },
            CarouselEvent::SelectSlide(_) => self,
            CarouselEvent::ScrolledIntoView => Self {
                has_started_play: true,
                is_playing: true,
                ..self
            },
            CarouselEvent::MediaPlaying => Self { is_playing: true, ..self },
        }
    }

    pub fn control(&self) -> ControlButton {
        if self.is_on_last_slide {
            ControlButton::Replay
        } else if !self.is_playing {
            ControlButton::Play
        } else {
            ControlButton::Pause
        }
    }

    /// Event produced by pressing the control button in this state.
    pub fn control_event(&self) -> CarouselEvent {
        match self.control() {
            ControlButton::Replay => CarouselEvent::Replay,
            ControlButton::Play => CarouselEvent::Play,
            ControlButton::Pause => CarouselEvent::Pause,
        }
    }

    /// Whether the active media element should be running right now.
    pub fn wants_playback(&self) -> bool {
        self.has_started_play && self.is_playing
    }
}
