//! Sprite-sheet animation for enemies.
//!
//! `SpriteAnimator` is the engine-side [`Animator`]: the states ask it to play
//! named clips and read back progress, and `animate_sprites` pushes the
//! resulting frame and facing onto the `Sprite` each frame.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::ClipDef;
use super::io::Animator;

/// Clip playback over a texture atlas.
#[derive(Component, Debug, Clone, Default)]
pub struct SpriteAnimator {
    clips: HashMap<String, ClipDef>,
    current: Option<String>,
    elapsed: f32,
    flip_x: bool,
}

impl SpriteAnimator {
    pub fn new(clips: HashMap<String, ClipDef>) -> Self {
        Self {
            clips,
            ..default()
        }
    }

    pub fn current_clip(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn current_def(&self) -> Option<&ClipDef> {
        self.current.as_ref().and_then(|name| self.clips.get(name))
    }

    pub fn advance(&mut self, delta: f32) {
        if self.current.is_some() {
            self.elapsed += delta;
        }
    }

    /// Atlas index to show for the current clip.
    pub fn frame_index(&self) -> Option<usize> {
        let clip = self.current_def()?;
        let count = clip.frame_count();
        let frame = (self.elapsed * clip.fps.max(0.0)) as usize;

        let offset = if clip.looping {
            frame % count
        } else {
            frame.min(count - 1)
        };
        Some(clip.first + offset)
    }

    pub fn flip_x(&self) -> bool {
        self.flip_x
    }
}

impl Animator for SpriteAnimator {
    /// Start `clip` from its first frame. A looping clip that is already
    /// playing keeps going.
    fn play(&mut self, clip: &str) {
        if self.current.as_deref() == Some(clip)
            && self.current_def().is_some_and(|def| def.looping)
        {
            return;
        }
        self.current = Some(clip.to_string());
        self.elapsed = 0.0;
    }

    fn normalized_progress(&self) -> f32 {
        let Some(clip) = self.current_def() else {
            return 0.0;
        };

        let duration = clip.duration();
        if duration <= 0.0 {
            return 1.0;
        }

        let progress = self.elapsed / duration;
        if clip.looping {
            progress.fract()
        } else {
            progress.min(1.0)
        }
    }

    fn has_clip(&self, clip: &str) -> bool {
        self.clips.contains_key(clip)
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }
}

/// Advance every animator and show its frame.
pub fn animate_sprites(time: Res<Time>, mut query: Query<(&mut SpriteAnimator, &mut Sprite)>) {
    for (mut animator, mut sprite) in query.iter_mut() {
        animator.advance(time.delta_secs());

        if sprite.flip_x != animator.flip_x() {
            sprite.flip_x = animator.flip_x();
        }

        let Some(index) = animator.frame_index() else {
            continue;
        };
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            if atlas.index != index {
                atlas.index = index;
            }
        }
    }
}
