use raylib::ease;

/// Penner-style easing: `(time, start, change, duration) -> value`.
pub type Easing = fn(f32, f32, f32, f32) -> f32;

/// A float that eases towards a target and can be retargeted mid-flight.
///
/// Retargeting starts a new tween from wherever the value currently is, so
/// an interrupted transition never jumps.
pub struct AnimatedValue {
    value: f32,
    target: f32,
    tween: Option<ease::Tween>,
    timer: f32,
    duration: f32,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            target: value,
            tween: None,
            timer: 0.0,
            duration: 0.0,
        }
    }

    pub fn animate_to(&mut self, target: f32, duration: f32, easing: Easing) {
        if self.target == target && (self.tween.is_some() || self.value == target) {
            return;
        }
        self.target = target;
        if duration <= 0.0 {
            self.set(target);
            return;
        }
        self.tween = Some(ease::Tween::new(easing, self.value, target, duration));
        self.timer = 0.0;
        self.duration = duration;
    }

    /// Jumps to `value`, cancelling any running tween.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.tween = None;
    }

    pub fn update(&mut self, dt: f32) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        self.timer += dt;
        self.value = tween.apply(dt);
        if self.timer >= self.duration {
            self.value = self.target;
            self.tween = None;
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_target() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(-3.0, 2.0, ease::quad_in_out);
        assert!(v.is_animating());
        for _ in 0..60 {
            v.update(1.0 / 60.0);
        }
        assert!(v.value() < 0.0 && v.value() > -3.0);
        for _ in 0..90 {
            v.update(1.0 / 60.0);
        }
        assert_eq!(v.value(), -3.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn test_retarget_starts_from_current() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(10.0, 1.0, ease::linear_none);
        v.update(0.5);
        let midway = v.value();
        assert!((midway - 5.0).abs() < 1e-3);

        v.animate_to(0.0, 1.0, ease::linear_none);
        v.update(0.0);
        assert!((v.value() - midway).abs() < 1e-3);
        v.update(1.0);
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_and_set() {
        let mut v = AnimatedValue::new(1.0);
        v.animate_to(4.0, 0.0, ease::linear_none);
        assert_eq!(v.value(), 4.0);
        v.animate_to(8.0, 1.0, ease::linear_none);
        v.set(2.0);
        assert!(!v.is_animating());
        assert_eq!(v.target(), 2.0);
    }
}
