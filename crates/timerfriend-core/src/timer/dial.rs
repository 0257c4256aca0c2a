//! Numeric model of the radial countdown dial.
//!
//! The dial represents a full hour: a 15 minute countdown fills a quarter of
//! it at start and drains back to 12 o'clock. Rendering is left to the host.

use serde::{Deserialize, Serialize};

/// Twelve markers, one every five minutes.
pub const DIAL_MARKER_COUNT: usize = 12;
/// Arcs start at 12 o'clock.
pub const DIAL_START_DEGREES: f32 = -90.0;

const RADIUS_FRACTION: f32 = 0.8;
const MARKER_RADIUS_FRACTION: f32 = 0.85;

/// Clockwise sweep of the filled arc, in degrees.
pub fn sweep_degrees(progress: f32, total_minutes: u64) -> f32 {
    let max_sweep = (total_minutes as f32 / 60.0) * 360.0;
    max_sweep * progress.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialMarker {
    pub label: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialGeometry {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

impl DialGeometry {
    /// Fit the dial into a `width` x `height` view.
    pub fn for_view(width: f32, height: f32) -> Self {
        Self {
            center_x: width / 2.0,
            center_y: height / 2.0,
            radius: width.min(height) / 2.0 * RADIUS_FRACTION,
        }
    }

    /// Minute markers `0, 5, ..., 55`, clockwise from the top.
    pub fn markers(&self) -> Vec<DialMarker> {
        let r = self.radius * MARKER_RADIUS_FRACTION;
        (0..DIAL_MARKER_COUNT)
            .map(|i| {
                let angle = (i as f32 * 30.0 + DIAL_START_DEGREES).to_radians();
                DialMarker {
                    label: (i * 5).to_string(),
                    x: self.center_x + r * angle.cos(),
                    y: self.center_y + r * angle.sin(),
                }
            })
            .collect()
    }
}
