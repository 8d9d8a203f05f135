use raylib::ease;
use raylib::prelude::Color;

use crate::constants::*;
use crate::ticker::{FrameTicker, TickerId};
use crate::tween::AnimatedValue;

/// Width of the active indicator for a viewport `viewport_width` pixels wide.
///
/// Narrow viewports get a wider dot so it stays tappable.
pub fn active_indicator_width(viewport_width: f32) -> f32 {
    let vw = viewport_width / 100.0;
    if viewport_width < MOBILE_BREAKPOINT {
        ACTIVE_WIDTH_NARROW_VW * vw
    } else if viewport_width < TABLET_BREAKPOINT {
        ACTIVE_WIDTH_NARROW_VW * vw
    } else {
        ACTIVE_WIDTH_WIDE_VW * vw
    }
}

/// Rounds playback progress up to a whole percentage.
pub fn quantize(progress: f32) -> u32 {
    (progress.clamp(0.0, 1.0) * 100.0).ceil() as u32
}

/// One clickable dot of the control strip.
pub struct Indicator {
    width: AnimatedValue,
    fill: AnimatedValue,  // percent of `width`
    fill_color: Color,
}

impl Indicator {
    fn new() -> Self {
        Self {
            width: AnimatedValue::new(INDICATOR_SIZE),
            fill: AnimatedValue::new(0.0),
            fill_color: FILL_ACTIVE,
        }
    }

    pub fn width(&self) -> f32 {
        self.width.value()
    }

    pub fn fill_percent(&self) -> f32 {
        self.fill.value()
    }

    /// Percentage the fill is heading to.
    pub fn fill_target(&self) -> f32 {
        self.fill.target()
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    fn expand(&mut self, viewport_width: f32) {
        let width = active_indicator_width(viewport_width);
        self.width.animate_to(width, INDICATOR_DURATION, ease::quad_out);
    }

    fn collapse(&mut self) {
        self.width.animate_to(INDICATOR_SIZE, INDICATOR_DURATION, ease::quad_out);
    }

    fn reset_fill(&mut self) {
        self.fill.set(0.0);
        self.fill_color = FILL_ACTIVE;
    }

    fn update(&mut self, dt: f32) {
        self.width.update(dt);
        self.fill.update(dt);
    }
}

/// The progress animation bound to one slide's indicator.
#[derive(Debug)]
struct Track {
    index: usize,
    quantized: u32,
    playing: bool,
    completed: bool,
    subscription: Option<TickerId>,
}

/// Drives indicator fill and width from the active video's playback position.
pub struct ProgressDriver {
    indicators: Box<[Indicator]>,
    track: Option<Track>,
    last_index: Option<usize>,
    last_completed: bool,
    viewport_width: f32,
}

impl ProgressDriver {
    pub fn new(slide_count: usize, viewport_width: f32) -> Self {
        Self {
            indicators: (0..slide_count).map(|_| Indicator::new()).collect(),
            track: None,
            last_index: None,
            last_completed: false,
            viewport_width,
        }
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn tracked_index(&self) -> Option<usize> {
        self.track.as_ref().map(|t| t.index)
    }

    pub fn is_subscribed(&self) -> bool {
        self.track.as_ref().is_some_and(|t| t.subscription.is_some())
    }

    pub fn set_viewport_width(&mut self, viewport_width: f32) {
        if self.viewport_width == viewport_width {
            return;
        }
        self.viewport_width = viewport_width;
        if let Some(track) = &self.track {
            if track.quantized > 0 && !track.completed {
                if let Some(indicator) = self.indicators.get_mut(track.index) {
                    indicator.expand(viewport_width);
                }
            }
        }
    }

    /// Tears down the current animation and starts a new one for `index`.
    ///
    /// Only subscribes to the ticker while `playing`. Moving to a different
    /// slide, or playing a slide that already completed, restarts its fill
    /// from zero; a completed slide that stays stopped keeps its full fill.
    pub fn activate(&mut self, index: usize, playing: bool, ticker: &mut FrameTicker) {
        self.teardown(ticker, index);
        if index >= self.indicators.len() {
            return;
        }

        let same_slide = self.last_index == Some(index);
        let finished = same_slide && self.last_completed;
        let indicator = &mut self.indicators[index];
        let (quantized, completed) = if finished && !playing {
            (100, true)
        } else if same_slide && !finished {
            (indicator.fill_target().round() as u32, false)
        } else {
            indicator.reset_fill();
            (0, false)
        };

        let subscription = playing.then(|| ticker.add());
        tracing::debug!(index, playing, quantized, "progress animation started");
        self.track = Some(Track {
            index,
            quantized,
            playing,
            completed,
            subscription,
        });
        self.last_index = Some(index);
    }

    /// Stops the frame subscription and kills the animation.
    pub fn deactivate(&mut self, ticker: &mut FrameTicker) {
        self.teardown(ticker, usize::MAX);
    }

    fn teardown(&mut self, ticker: &mut FrameTicker, next_index: usize) {
        let Some(track) = self.track.take() else {
            return;
        };
        self.last_completed = track.completed;
        if let Some(id) = track.subscription {
            ticker.remove(id);
        }
        if track.index != next_index && !track.completed {
            if let Some(indicator) = self.indicators.get_mut(track.index) {
                indicator.collapse();
            }
        }
    }

    /// Consumes the ticks delivered since last frame; the caller samples
    /// playback only when this returns true.
    pub fn take_tick(&mut self, ticker: &mut FrameTicker) -> bool {
        self.track
            .as_ref()
            .and_then(|t| t.subscription)
            .is_some_and(|id| ticker.take_ticks(id) > 0)
    }

    /// Feeds the active video's position (`current_time / duration`).
    pub fn set_progress(&mut self, progress: f32) {
        let Some(track) = self.track.as_mut() else {
            return;
        };
        if track.completed {
            return;
        }
        let quantized = quantize(progress);
        if quantized > track.quantized {
            track.quantized = quantized;
            if let Some(indicator) = self.indicators.get_mut(track.index) {
                indicator.expand(self.viewport_width);
                indicator.fill_color = FILL_ACTIVE;
                indicator
                    .fill
                    .animate_to(quantized as f32, INDICATOR_DURATION, ease::quad_out);
            }
        }
        if progress >= 1.0 && track.playing {
            self.complete();
        }
    }

    /// Marks the tracked slide as fully played: full grey fill, collapsed dot.
    pub fn complete(&mut self) {
        let Some(track) = self.track.as_mut() else {
            return;
        };
        if track.completed {
            return;
        }
        track.completed = true;
        track.quantized = 100;
        if let Some(indicator) = self.indicators.get_mut(track.index) {
            indicator.fill.animate_to(100.0, INDICATOR_DURATION, ease::quad_out);
            indicator.fill_color = FILL_DONE;
            indicator.collapse();
        }
        tracing::debug!(index = track.index, "progress animation complete");
    }

    /// Clears every indicator's fill, used when the carousel starts over.
    pub fn reset_all(&mut self) {
        for indicator in self.indicators.iter_mut() {
            indicator.reset_fill();
            indicator.collapse();
        }
        self.last_index = None;
        self.last_completed = false;
    }

    pub fn update(&mut self, dt: f32) {
        for indicator in self.indicators.iter_mut() {
            indicator.update(dt);
        }
    }
}
