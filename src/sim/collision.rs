//! Collision detection and response for circles and axis-aligned boxes
//!
//! Everything here is pure math on `Vec2`: the tick decides which pairs to
//! test and what to do with the result.

use glam::Vec2;

use crate::{rotate, unrotate};

/// Result of a circle-circle check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Unit vector from the first center toward the second
    pub normal: Vec2,
    /// Distance between the centers
    pub distance: f32,
    /// Sum of radii minus center distance (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            distance: 0.0,
            penetration: 0.0,
        }
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Closest point of the rectangle `[min, min + size]` to `point`
#[inline]
pub fn nearest_point_on_rect(point: Vec2, min: Vec2, size: Vec2) -> Vec2 {
    point.clamp(min, min + size)
}

/// Circle touches (or overlaps) a rectangle
///
/// Touching counts: the circle hits when the nearest rectangle point is at
/// most `radius` away from its center.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_min: Vec2, rect_size: Vec2) -> bool {
    let nearest = nearest_point_on_rect(center, rect_min, rect_size);
    distance(center, nearest) <= radius
}

/// Check two circles for overlap
///
/// Overlap is strict: circles that exactly touch do not collide. The normal
/// uses `atan2(dy, dx)`, so coincident centers resolve along +x.
pub fn circle_circle_collision(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> CollisionResult {
    let delta = p2 - p1;
    let dist = delta.length();

    if dist >= r1 + r2 {
        return CollisionResult::miss();
    }

    let angle = delta.y.atan2(delta.x);
    CollisionResult {
        hit: true,
        normal: Vec2::new(angle.cos(), angle.sin()),
        distance: dist,
        penetration: r1 + r2 - dist,
    }
}

/// One-dimensional elastic collision along `normal`
///
/// Both velocities are rotated into the frame whose x axis is the collision
/// normal, the x components are exchanged with the 1-D elastic formula, and the
/// result is rotated back. The tangential components are untouched.
///
/// Returns the velocities unchanged when the total mass is not positive.
pub fn elastic_response(v1: Vec2, m1: f32, v2: Vec2, m2: f32, normal: Vec2) -> (Vec2, Vec2) {
    let total = m1 + m2;
    if total <= 0.0 {
        return (v1, v2);
    }

    let (sin, cos) = (normal.y, normal.x);
    let r1 = unrotate(v1, sin, cos);
    let r2 = unrotate(v2, sin, cos);

    let u1 = ((m1 - m2) * r1.x + 2.0 * m2 * r2.x) / total;
    let u2 = ((m2 - m1) * r2.x + 2.0 * m1 * r1.x) / total;

    (
        rotate(Vec2::new(u1, r1.y), sin, cos),
        rotate(Vec2::new(u2, r2.y), sin, cos),
    )
}

/// Push two overlapping circles apart along `normal`, half the penetration each
pub fn separate(p1: Vec2, p2: Vec2, normal: Vec2, penetration: f32) -> (Vec2, Vec2) {
    let push = normal * (penetration / 2.0);
    (p1 - push, p2 + push)
}

/// Bounce a circle off the inside walls of the box `[min, max]`
///
/// Each axis is handled on its own: an edge past a wall is clamped back onto
/// it and that velocity component flips sign. Returns true if any wall was hit.
pub fn bounce_off_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    let mut hit = false;

    if pos.x - radius < min.x {
        pos.x = min.x + radius;
        vel.x = -vel.x;
        hit = true;
    }
    if pos.x + radius > max.x {
        pos.x = max.x - radius;
        vel.x = -vel.x;
        hit = true;
    }
    if pos.y - radius < min.y {
        pos.y = min.y + radius;
        vel.y = -vel.y;
        hit = true;
    }
    if pos.y + radius > max.y {
        pos.y = max.y - radius;
        vel.y = -vel.y;
        hit = true;
    }

    hit
}
