use crate::constants::TRIGGER_DELAY;

/// One-shot viewport trigger.
///
/// Once armed it waits for the watched region to be visible, lets `delay`
/// seconds pass and fires exactly once. Observing again after firing is a
/// no-op until [`rearm`](ScrollTrigger::rearm) is called.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    delay: f32,
    armed: bool,
    countdown: Option<f32>,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(TRIGGER_DELAY)
    }
}

impl ScrollTrigger {
    pub fn new(delay: f32) -> Self {
        Self {
            delay,
            armed: true,
            countdown: None,
        }
    }

    pub fn rearm(&mut self) {
        self.armed = true;
        self.countdown = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns true on the frame the trigger fires.
    pub fn observe(&mut self, visible: bool, dt: f32) -> bool {
        if !self.armed {
            return false;
        }
        let remaining = match self.countdown {
            Some(remaining) => remaining - dt,
            None if visible => self.delay,
            None => return false,
        };
        if remaining <= 0.0 {
            self.armed = false;
            self.countdown = None;
            true
        } else {
            self.countdown = Some(remaining);
            false
        }
    }
}

/// Whether a vertical span intersects the viewport, measured in screen space.
pub fn in_viewport(top: f32, bottom: f32, viewport_height: f32) -> bool {
    top < viewport_height && bottom > 0.0
}
