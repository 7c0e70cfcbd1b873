//! Frame-rate independent easing helpers.

/// Move `current` toward `target` by an exponential step.
///
/// `rate` is the interpolation speed multiplier (higher = faster). The step
/// never overshoots: once `rate * dt >= 1` the target is returned.
pub fn ease_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// A value easing toward a target over several frames.
///
/// Setting a new target while easing cancels the old run and restarts from
/// the current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    pub value: f32,
    target: Option<f32>,
    pub rate: f32,
    pub epsilon: f32,
}

impl Easing {
    pub fn new(value: f32, rate: f32, epsilon: f32) -> Self {
        Self {
            value,
            target: None,
            rate,
            epsilon,
        }
    }

    /// Start (or restart) easing toward `target`.
    pub fn restart(&mut self, target: f32) {
        self.target = Some(target);
    }

    /// Stop easing and hold the current value.
    pub fn cancel(&mut self) {
        self.target = None;
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<f32> {
        self.target
    }

    /// Advance one frame. Snaps exactly onto the target once within epsilon.
    pub fn tick(&mut self, dt: f32) {
        let Some(target) = self.target else {
            return;
        };

        self.value = ease_toward(self.value, target, self.rate, dt);

        if (self.value - target).abs() <= self.epsilon {
            self.value = target;
            self.target = None;
        }
    }
}
