use std::cell::RefCell;
use std::rc::Rc;

use raylib::ease;

use crate::constants::SLIDE_DURATION;
use crate::error::CarouselError;
use crate::media::{MediaElement, MediaEvent, playback_progress};
use crate::progress::{Indicator, ProgressDriver};
use crate::scroll::ScrollTrigger;
use crate::slides::SlideSpec;
use crate::state::{CarouselEvent, CarouselState, ControlButton};
use crate::ticker::FrameTicker;
use crate::tween::AnimatedValue;

/// Horizontally sliding video carousel.
///
/// Owns one media element and one indicator per slide for its whole
/// lifetime. State changes go through [`CarouselState::apply`]; after each
/// change the drivers that depend on the touched fields are re-run:
///
/// - slide transition: `active_index`, or `did_reach_end` becoming true
/// - progress and playback: `active_index`, `has_started_play`, `is_playing`
pub struct VideoCarousel<M: MediaElement> {
    slides: Vec<SlideSpec>,
    media: Box<[M]>,
    failed: Box<[bool]>,
    state: CarouselState,
    slider: AnimatedValue,  // strip offset, in slide widths
    progress: ProgressDriver,
    trigger: ScrollTrigger,
    ticker: Rc<RefCell<FrameTicker>>,
}

impl<M: MediaElement> VideoCarousel<M> {
    pub fn new(
        slides: Vec<SlideSpec>,
        media: Vec<M>,
        ticker: Rc<RefCell<FrameTicker>>,
        viewport_width: f32,
    ) -> Result<Self, CarouselError> {
        if slides.is_empty() {
            return Err(CarouselError::NoSlides);
        }
        if slides.len() != media.len() {
            return Err(CarouselError::MediaCountMismatch {
                slides: slides.len(),
                media: media.len(),
            });
        }

        let count = slides.len();
        let mut carousel = Self {
            slides,
            media: media.into_boxed_slice(),
            failed: vec![false; count].into_boxed_slice(),
            state: CarouselState::default(),
            slider: AnimatedValue::new(0.0),
            progress: ProgressDriver::new(count, viewport_width),
            trigger: ScrollTrigger::default(),
            ticker,
        };
        carousel.run_effects(None);
        Ok(carousel)
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn slides(&self) -> &[SlideSpec] {
        &self.slides
    }

    pub fn media(&self) -> &[M] {
        &self.media
    }

    pub fn indicators(&self) -> &[Indicator] {
        self.progress.indicators()
    }

    /// Current strip translation in slide widths (`-active_index` at rest).
    pub fn slider_offset(&self) -> f32 {
        self.slider.value()
    }

    pub fn control(&self) -> ControlButton {
        self.state.control()
    }

    pub fn set_viewport_width(&mut self, viewport_width: f32) {
        self.progress.set_viewport_width(viewport_width);
    }

    /// Indicator dot clicked.
    pub fn select_slide(&mut self, index: usize) {
        self.dispatch(CarouselEvent::SelectSlide(index));
    }

    /// Play, pause or replay, whichever the button currently shows.
    pub fn press_control(&mut self) {
        tracing::debug!(control = self.state.control().label(), "control pressed");
        self.dispatch(self.state.control_event());
    }

    /// Advances media, the viewport trigger and all animations by `dt`.
    ///
    /// `in_view` tells whether the carousel currently intersects the viewport.
    pub fn update(&mut self, dt: f32, in_view: bool) {
        let mut events = Vec::new();
        for (index, media) in self.media.iter_mut().enumerate() {
            events.extend(media.update(dt).into_iter().map(|event| (index, event)));
        }
        for (index, event) in events {
            self.on_media_event(index, event);
        }

        let active = self.state.active_index;
        if self.failed[active] && self.state.wants_playback() {
            self.finish(active);
        }

        if self.trigger.observe(in_view, dt) {
            tracing::debug!("carousel scrolled into view");
            self.dispatch(CarouselEvent::ScrolledIntoView);
        }

        if self.progress.take_tick(&mut self.ticker.borrow_mut()) {
            if let Some(progress) = self.media.get(self.state.active_index).and_then(playback_progress) {
                self.progress.set_progress(progress);
            }
        }

        self.slider.update(dt);
        self.progress.update(dt);
    }

    fn on_media_event(&mut self, index: usize, event: MediaEvent) {
        let active = index == self.state.active_index;
        match event {
            MediaEvent::LoadedMetadata => {
                tracing::debug!(index, "metadata loaded");
            }
            MediaEvent::Playing if active => self.dispatch(CarouselEvent::MediaPlaying),
            MediaEvent::Ended if active => self.finish(index),
            MediaEvent::Failed(reason) => {
                tracing::warn!(index, %reason, "slide video failed, it will be skipped");
                self.failed[index] = true;
            }
            // Stale notification from an element that is no longer featured
            MediaEvent::Playing | MediaEvent::Ended => {}
        }
    }

    /// The active slide is done: complete its indicator and move on.
    fn finish(&mut self, index: usize) {
        if self.state.is_playing {
            self.progress.complete();
        }
        if let Some(media) = self.media.get_mut(index) {
            media.pause();
        }
        self.dispatch(CarouselEvent::VideoEnded(index));
    }

    fn dispatch(&mut self, event: CarouselEvent) {
        if event == CarouselEvent::Replay {
            for media in self.media.iter_mut() {
                media.pause();
            }
            self.progress.reset_all();
        }
        let next = self.state.apply(event, self.media.len());
        self.commit(next);
    }

    fn commit(&mut self, next: CarouselState) {
        let prev = std::mem::replace(&mut self.state, next);
        if prev != next {
            tracing::debug!(?prev, ?next, "carousel state changed");
            self.run_effects(Some(prev));
        }
    }

    fn run_effects(&mut self, prev: Option<CarouselState>) {
        let state = self.state;

        let slide_changed = prev.is_none_or(|p| {
            p.active_index != state.active_index || (!p.did_reach_end && state.did_reach_end)
        });
        if slide_changed {
            self.slider.animate_to(-(state.active_index as f32), SLIDE_DURATION, ease::quad_in_out);
            self.trigger.rearm();
        }

        let playback_changed = prev.is_none_or(|p| {
            p.active_index != state.active_index
                || p.has_started_play != state.has_started_play
                || p.is_playing != state.is_playing
        });
        if playback_changed {
            self.progress
                .activate(state.active_index, state.is_playing, &mut self.ticker.borrow_mut());
            self.sync_playback();
        }
    }

    /// Only the active element may run; everything else is paused.
    fn sync_playback(&mut self) {
        let active = self.state.active_index;
        for (index, media) in self.media.iter_mut().enumerate() {
            if index != active {
                media.pause();
            }
        }
        if let Some(media) = self.media.get_mut(active) {
            if self.state.wants_playback() {
                media.play();
            } else {
                media.pause();
            }
        }
    }
}

impl<M: MediaElement> Drop for VideoCarousel<M> {
    fn drop(&mut self) {
        if let Ok(mut ticker) = self.ticker.try_borrow_mut() {
            self.progress.deactivate(&mut ticker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FILL_ACTIVE, FILL_DONE};
    use crate::media::fake::FakeMedia;
    use std::path::PathBuf;

    const FRAME: f32 = 1.0 / 60.0;

    struct Harness {
        carousel: VideoCarousel<FakeMedia>,
        ticker: Rc<RefCell<FrameTicker>>,
    }

    impl Harness {
        fn new(media: Vec<FakeMedia>) -> Self {
            let slides = (0..media.len())
                .map(|i| SlideSpec {
                    video: PathBuf::from(format!("{i}.mp4")),
                    captions: vec![format!("Slide {i}")],
                    video_offset: 0.0,
                })
                .collect();
            let ticker = Rc::new(RefCell::new(FrameTicker::new()));
            let carousel = VideoCarousel::new(slides, media, ticker.clone(), 1500.0).unwrap();
            Self { carousel, ticker }
        }

        fn uniform(count: usize, length: f32) -> Self {
            Self::new((0..count).map(|_| FakeMedia::new(length)).collect())
        }

        fn step(&mut self, dt: f32, in_view: bool) {
            self.ticker.borrow_mut().advance(dt);
            self.carousel.update(dt, in_view);
        }

        fn run(&mut self, seconds: f32) {
            let frames = (seconds / FRAME).ceil() as usize;
            for _ in 0..frames {
                self.step(FRAME, false);
            }
        }

        fn playing(&self) -> Vec<usize> {
            self.carousel
                .media()
                .iter()
                .enumerate()
                .filter(|(_, m)| !m.is_paused())
                .map(|(i, _)| i)
                .collect()
        }

        fn state(&self) -> CarouselState {
            self.carousel.state()
        }
    }

    #[test]
    fn test_construction_errors() {
        let ticker = Rc::new(RefCell::new(FrameTicker::new()));
        let empty = VideoCarousel::<FakeMedia>::new(Vec::new(), Vec::new(), ticker.clone(), 800.0);
        assert!(matches!(empty, Err(CarouselError::NoSlides)));

        let slides = vec![SlideSpec { video: "a.mp4".into(), captions: vec![], video_offset: 0.0 }];
        let mismatch = VideoCarousel::new(slides, vec![FakeMedia::new(1.0); 2], ticker, 800.0);
        assert!(matches!(mismatch, Err(CarouselError::MediaCountMismatch { slides: 1, media: 2 })));
    }

    #[test]
    fn test_mount_is_idle() {
        let mut h = Harness::uniform(4, 1.0);
        h.run(0.5);
        assert_eq!(h.state(), CarouselState::default());
        assert!(h.playing().is_empty());
        assert_eq!(h.ticker.borrow().subscriber_count(), 0);
        assert_eq!(h.carousel.slider_offset(), 0.0);
        assert_eq!(h.carousel.control(), ControlButton::Play);
    }

    #[test]
    fn test_scroll_into_view_starts_autoplay() {
        let mut h = Harness::uniform(4, 5.0);
        for _ in 0..3 {
            h.step(0.1, true);
        }
        assert!(!h.state().has_started_play);
        assert!(h.playing().is_empty());

        for _ in 0..7 {
            h.step(0.1, true);
        }
        assert!(h.state().has_started_play);
        assert!(h.state().is_playing);
        assert_eq!(h.playing(), vec![0]);
        assert_eq!(h.carousel.control(), ControlButton::Pause);
    }

    #[test]
    fn test_indicator_click_plays_only_that_slide() {
        let mut h = Harness::uniform(4, 3.0);
        h.run(0.1);
        for i in [2, 0, 3, 1] {
            h.carousel.select_slide(i);
            h.run(0.2);
            assert_eq!(h.state().active_index, i);
            assert_eq!(h.playing(), vec![i]);
        }
    }

    #[test]
    fn test_end_of_slide_advances() {
        let mut h = Harness::uniform(4, 1.0);
        h.carousel.select_slide(0);
        h.run(1.2);

        let state = h.state();
        assert_eq!(state.active_index, 1);
        assert!(state.did_reach_end);
        assert_eq!(h.playing(), vec![1]);

        h.run(1.0);
        assert_eq!(h.state().active_index, 2);
        assert_eq!(h.playing(), vec![2]);
    }

    #[test]
    fn test_end_of_last_slide_stops() {
        let mut h = Harness::uniform(4, 1.0);
        h.carousel.select_slide(3);
        h.run(1.2);

        let state = h.state();
        assert_eq!(state.active_index, 3);
        assert!(state.is_on_last_slide);
        assert!(!state.is_playing);
        assert!(h.playing().is_empty());
        assert_eq!(h.carousel.control(), ControlButton::Replay);
        assert_eq!(h.ticker.borrow().subscriber_count(), 0);

        h.run(1.0);
        let indicator = &h.carousel.indicators()[3];
        assert_eq!(indicator.fill_percent(), 100.0);
        assert_eq!(indicator.fill_color(), FILL_DONE);
    }

    #[test]
    fn test_reselecting_ended_last_slide_restarts_fill() {
        let mut h = Harness::uniform(4, 2.0);
        h.carousel.select_slide(3);
        h.run(2.5);
        assert!(h.state().is_on_last_slide);
        assert_eq!(h.carousel.indicators()[3].fill_color(), FILL_DONE);

        h.carousel.select_slide(3);
        assert_eq!(h.playing(), vec![3]);
        h.run(1.0);

        let indicator = &h.carousel.indicators()[3];
        let fill = indicator.fill_target();
        assert!((45.0..=55.0).contains(&fill), "{fill}");
        assert_eq!(indicator.fill_color(), FILL_ACTIVE);
        assert_eq!(h.ticker.borrow().subscriber_count(), 1);
    }

    #[test]
    fn test_slide_change_rearms_scroll_trigger() {
        let mut h = Harness::uniform(4, 1.0);
        while !h.state().is_playing {
            h.step(FRAME, true);
        }
        while h.state().active_index == 0 {
            h.step(FRAME, true);
        }

        // Paused right after the transition: the trigger resumes it once
        h.carousel.press_control();
        assert!(!h.state().is_playing);
        for _ in 0..18 {
            h.step(FRAME, true);
        }
        assert!(!h.state().is_playing);
        assert!(h.playing().is_empty());

        for _ in 0..24 {
            h.step(FRAME, true);
        }
        assert!(h.state().is_playing);
        assert_eq!(h.state().active_index, 1);
        assert_eq!(h.playing(), vec![1]);

        h.carousel.press_control();
        for _ in 0..60 {
            h.step(FRAME, true);
        }
        assert!(!h.state().is_playing);
        assert!(h.playing().is_empty());
    }

    #[test]
    fn test_replay_restarts_from_first() {
        let mut h = Harness::uniform(4, 1.0);
        h.carousel.select_slide(0);
        h.run(4.5);
        assert!(h.state().is_on_last_slide);

        h.carousel.press_control();
        let state = h.state();
        assert_eq!(state.active_index, 0);
        assert!(state.is_playing);
        assert!(state.has_started_play);
        assert!(!state.is_on_last_slide);
        assert_eq!(h.playing(), vec![0]);
        assert_eq!(h.carousel.media()[0].current_time(), 0.0);

        h.run(1.0);
        for indicator in &h.carousel.indicators()[2..] {
            assert_eq!(indicator.fill_percent(), 0.0);
            assert_eq!(indicator.fill_color(), FILL_ACTIVE);
        }
    }

    #[test]
    fn test_pause_and_resume_keep_slide() {
        let mut h = Harness::uniform(4, 3.0);
        h.carousel.select_slide(1);
        h.run(0.5);
        assert_eq!(h.ticker.borrow().subscriber_count(), 1);

        h.carousel.press_control();
        assert!(!h.state().is_playing);
        assert_eq!(h.state().active_index, 1);
        assert!(h.playing().is_empty());
        assert_eq!(h.ticker.borrow().subscriber_count(), 0);

        let frozen = h.carousel.media()[1].current_time();
        h.run(0.5);
        assert_eq!(h.carousel.media()[1].current_time(), frozen);

        h.carousel.press_control();
        assert!(h.state().is_playing);
        assert_eq!(h.state().active_index, 1);
        assert_eq!(h.playing(), vec![1]);
        h.run(0.5);
        assert!(h.carousel.media()[1].current_time() > frozen);
    }

    #[test]
    fn test_progress_follows_playback() {
        let mut h = Harness::uniform(4, 2.0);
        h.carousel.select_slide(0);

        let mut last = 0.0;
        while h.state().active_index == 0 {
            h.step(FRAME, false);
            let fill = h.carousel.indicators()[0].fill_percent();
            assert!(fill >= last, "{fill} < {last}");
            last = fill;
        }
        assert!(last > 50.0);
        assert_eq!(h.carousel.indicators()[1].fill_percent(), 0.0);

        h.run(1.0);
        let fill = h.carousel.indicators()[1].fill_target();
        assert!((45.0..=55.0).contains(&fill), "{fill}");
        assert_eq!(h.carousel.indicators()[0].fill_percent(), 100.0);
    }

    #[test]
    fn test_slider_moves_to_active() {
        let mut h = Harness::uniform(4, 10.0);
        h.carousel.select_slide(2);
        h.run(1.0);
        let midway = h.carousel.slider_offset();
        assert!(midway < 0.0 && midway > -2.0);
        h.run(1.5);
        assert_eq!(h.carousel.slider_offset(), -2.0);
    }

    #[test]
    fn test_play_queued_until_ready() {
        let mut media = vec![FakeMedia::new(3.0); 4];
        media[2] = FakeMedia::loading(3.0, 0.5);
        let mut h = Harness::new(media);

        h.carousel.select_slide(2);
        h.run(0.3);
        assert_eq!(h.carousel.media()[2].current_time(), 0.0);
        assert_eq!(h.playing(), vec![2]);

        h.run(0.7);
        assert!(h.carousel.media()[2].current_time() > 0.0);
        assert!(h.state().is_playing);
    }

    #[test]
    fn test_failed_slide_is_skipped() {
        let mut media = vec![FakeMedia::new(3.0); 3];
        media[1] = FakeMedia::broken();
        let mut h = Harness::new(media);
        h.run(0.1);

        h.carousel.select_slide(1);
        h.run(0.1);
        assert_eq!(h.state().active_index, 2);
        assert_eq!(h.playing(), vec![2]);
    }

    #[test]
    fn test_drop_releases_ticker() {
        let mut h = Harness::uniform(4, 3.0);
        h.carousel.select_slide(0);
        h.run(0.2);
        assert_eq!(h.ticker.borrow().subscriber_count(), 1);

        let ticker = h.ticker.clone();
        drop(h);
        assert_eq!(ticker.borrow().subscriber_count(), 0);
    }
}
