use super::prelude::*;
use super::{Rect, Vec2f};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2f,
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub fn new(center: Vec2f, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2f) -> bool {
        self.center.distance2(point) < self.radius * self.radius
    }

    /// Circles which only touch do not overlap.
    pub fn overlaps_circle(&self, other: &Circle) -> bool {
        let radii = self.radius + other.radius;
        self.center.distance2(other.center) < radii * radii
    }

    /// Tests against the point of `rect` closest to the circle's center.
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let closest = Vec2f::new(
            clamp(self.center.x, rect.x as f32, rect.right() as f32),
            clamp(self.center.y, rect.y as f32, rect.bottom() as f32),
        );
        self.contains_point(closest)
    }
}

#[inline]
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}
