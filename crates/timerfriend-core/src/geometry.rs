//! Screen-space geometry shared by the gesture controller and the presenter.
//!
//! Positions and rectangles are integer screen pixels, raw pointer samples are
//! floats. Rectangles are snapshots taken inside a single callback and are
//! never cached.

use serde::{Deserialize, Serialize};

/// Top-left corner of a surface in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a raw pointer delta. Each component is truncated toward zero
    /// before it is added, matching how hosts convert float deltas to pixels.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x.saturating_add(dx as i32),
            y: self.y.saturating_add(dy as i32),
        }
    }

    /// Linear interpolation towards `target`; `t = 0` is `self`, `t = 1` is `target`.
    pub fn lerp(self, target: Position, t: f32) -> Self {
        let x = self.x as f32 + (target.x as f32 - self.x as f32) * t;
        let y = self.y as f32 + (target.y as f32 - self.y as f32) * t;
        Self {
            x: x as i32,
            y: y as i32,
        }
    }
}

/// A raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `(self - origin)` per axis.
    pub fn delta_from(self, origin: TouchPoint) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }

    pub fn distance_from(self, origin: TouchPoint) -> f32 {
        let (dx, dy) = self.delta_from(origin);
        dx.hypot(dy)
    }
}

/// Axis-aligned bounding box, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(origin: Position, width: i32, height: i32) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x.saturating_add(width),
            bottom: origin.y.saturating_add(height),
        }
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn origin(&self) -> Position {
        Position::new(self.left, self.top)
    }

    /// Integer center, rounded toward the top-left.
    pub fn center(&self) -> Position {
        Position::new(
            self.left.saturating_add(self.width() / 2),
            self.top.saturating_add(self.height() / 2),
        )
    }

    /// Strict overlap test. Rects sharing only an edge do not intersect and
    /// an empty rect intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Scale around the center; used to model a shrinking surface.
    pub fn scaled_about_center(&self, scale: f32) -> Rect {
        let scale = scale.clamp(0.0, 1.0);
        let center = self.center();
        let half_w = (self.width() as f32 * scale / 2.0) as i32;
        let half_h = (self.height() as f32 * scale / 2.0) as i32;
        Rect::new(
            center.x.saturating_sub(half_w),
            center.y.saturating_sub(half_h),
            center.x.saturating_add(half_w),
            center.y.saturating_add(half_h),
        )
    }
}
