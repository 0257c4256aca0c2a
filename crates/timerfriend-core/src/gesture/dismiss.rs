//! Shrink-into-the-zone animation played after a dismiss request.
//!
//! The host owns the clock and reports the current scale; this type only maps
//! a scale to a surface position, and time to scale for hosts that sample.

use serde::{Deserialize, Serialize};

use super::controller::DismissRequest;
use crate::geometry::Position;

pub const DEFAULT_DISMISS_DURATION_MS: u64 = 300;

/// Accelerating curve over normalized time `t` in `[0, 1]`.
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub scale: f32,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DismissAnimation {
    generation: u64,
    request: DismissRequest,
    duration_ms: u64,
}

impl DismissAnimation {
    pub fn new(generation: u64, request: DismissRequest, duration_ms: u64) -> Self {
        Self {
            generation,
            request,
            duration_ms,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> DismissRequest {
        self.request
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Scale after `elapsed_ms`, from 1.0 down to 0.0.
    pub fn scale_at(&self, elapsed_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        let t = elapsed_ms as f32 / self.duration_ms as f32;
        1.0 - ease_in(t)
    }

    /// Surface position for a given scale: the start position pulled towards
    /// the zone center by `1 - scale`.
    pub fn position_for(&self, scale: f32) -> Position {
        let progress = 1.0 - scale.clamp(0.0, 1.0);
        self.request.from.lerp(self.request.target, progress)
    }

    pub fn frame(&self, scale: f32) -> AnimationFrame {
        AnimationFrame {
            scale,
            position: self.position_for(scale),
        }
    }

    /// Frames sampled every `interval_ms`, always ending with scale 0.0.
    pub fn frames(&self, interval_ms: u64) -> Vec<AnimationFrame> {
        let interval = interval_ms.max(1);
        let mut frames = Vec::new();
        let mut elapsed = 0;
        while elapsed < self.duration_ms {
            frames.push(self.frame(self.scale_at(elapsed)));
            elapsed += interval;
        }
        frames.push(self.frame(0.0));
        frames
    }
}
