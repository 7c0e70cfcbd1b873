//! Hit feedback - screen shake and damage flash.

use bevy::prelude::*;

/// Fire-and-forget camera shake handle.
pub trait CameraShake {
    fn shake(&mut self, intensity: f32, duration: f32);
}

/// Screen shake effect resource.
#[derive(Resource, Default, Debug)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub timer: f32,
}

impl CameraShake for ScreenShake {
    fn shake(&mut self, intensity: f32, duration: f32) {
        // Only override if new shake is stronger
        if intensity > self.intensity || self.timer <= 0.0 {
            self.intensity = intensity;
            self.duration = duration;
            self.timer = duration;
        }
    }
}

impl ScreenShake {
    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    /// Advance the shake and return this frame's camera offset.
    pub fn update(&mut self, delta: f32) -> Vec2 {
        if self.timer <= 0.0 || self.duration <= 0.0 {
            self.timer = 0.0;
            self.intensity = 0.0;
            return Vec2::ZERO;
        }

        self.timer = (self.timer - delta).max(0.0);
        let progress = self.timer / self.duration;
        let current_intensity = self.intensity * progress;

        let x = (rand::random::<f32>() - 0.5) * 2.0 * current_intensity;
        let y = (rand::random::<f32>() - 0.5) * 2.0 * current_intensity;

        Vec2::new(x, y)
    }
}

/// Offset currently applied to a shaking camera, so it can be undone.
#[derive(Component, Default)]
pub struct ShakeOffset(pub Vec2);

/// Blinking sprite after taking damage.
///
/// Inserting a new flash over an old one restarts the blink.
#[derive(Component, Debug, Clone)]
pub struct DamageFlash {
    pub remaining: f32,
    pub blink_interval: f32,
    elapsed: f32,
}

impl DamageFlash {
    pub fn new(duration: f32, blink_interval: f32) -> Self {
        Self {
            remaining: duration,
            blink_interval: blink_interval.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Advance the flash. Returns the sprite alpha for this frame, or `None`
    /// once the flash is over.
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.remaining -= delta;
        self.elapsed += delta;

        if self.remaining <= 0.0 {
            return None;
        }

        let phase = (self.elapsed / self.blink_interval) as u32;
        Some(if phase % 2 == 0 { 0.35 } else { 1.0 })
    }
}

impl Default for DamageFlash {
    fn default() -> Self {
        Self::new(0.3, 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weaker_shake_does_not_override_active_one() {
        let mut shake = ScreenShake::default();
        shake.shake(4.0, 0.3);
        shake.shake(1.0, 1.0);

        assert_eq!(shake.intensity, 4.0);
        assert_eq!(shake.duration, 0.3);
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut shake = ScreenShake::default();
        shake.shake(4.0, 0.2);

        for _ in 0..20 {
            shake.update(0.05);
        }

        assert!(!shake.is_active());
        assert_eq!(shake.update(0.05), Vec2::ZERO);
    }

    #[test]
    fn test_damage_flash_blinks_then_ends() {
        let mut flash = DamageFlash::new(0.2, 0.05);

        assert_eq!(flash.tick(0.01), Some(0.35));
        assert_eq!(flash.tick(0.05), Some(1.0));
        assert_eq!(flash.tick(0.2), None);
    }
}
