//! The box the balls live in
//!
//! An axis-aligned rectangle that can be shrunk or grown around its center.
//! Growth is capped by the size recorded when the bounds were last set.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_ARENA_SIZE;

/// Which dimensions a resize touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    Both,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
            Axis::Both => "box",
        }
    }

    /// Per-axis multiplier for a resize delta
    fn mask(&self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::X,
            Axis::Vertical => Vec2::Y,
            Axis::Both => Vec2::ONE,
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "horizontal" | "h" | "width" => Ok(Axis::Horizontal),
            "vertical" | "v" | "height" => Ok(Axis::Vertical),
            "box" | "both" => Ok(Axis::Both),
            _ => Err(format!("unknown resize axis: {s}")),
        }
    }
}

/// Axis-aligned arena bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Largest size growth may reach
    max_size: Vec2,
    /// Shrinking must stay strictly above this
    min_size: f32,
}

impl Arena {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::with_min_size(x, y, width, height, MIN_ARENA_SIZE)
    }

    pub fn with_min_size(x: f32, y: f32, width: f32, height: f32, min_size: f32) -> Self {
        let mut arena = Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            max_size: Vec2::ZERO,
            min_size: min_size.max(0.0),
        };
        arena.set_bounds(x, y, width, height);
        arena
    }

    /// Replace the bounds outright and make them the new growth cap
    pub fn set_bounds(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.x = x;
        self.y = y;
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.max_size = self.size();
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min() + self.size() / 2.0
    }

    pub fn max_size(&self) -> Vec2 {
        self.max_size
    }

    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    /// Circle lies entirely within the bounds
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        let min = self.min();
        let max = self.max();
        center.x - radius >= min.x
            && center.x + radius <= max.x
            && center.y - radius >= min.y
            && center.y + radius <= max.y
    }

    /// Shrink by `delta` along `axis`, keeping the center fixed
    ///
    /// Fails without changing anything if a resulting dimension would be at
    /// or below the minimum size.
    pub fn shrink(&mut self, axis: Axis, delta: f32) -> bool {
        if !delta.is_finite() || delta < 0.0 {
            return false;
        }
        let new_size = self.size() - axis.mask() * delta;
        if new_size.x <= self.min_size || new_size.y <= self.min_size {
            return false;
        }
        self.resize_centered(new_size);
        true
    }

    /// Grow by `delta` along `axis`, keeping the center fixed
    ///
    /// Fails without changing anything if a resulting dimension would exceed
    /// the recorded maximum.
    pub fn grow(&mut self, axis: Axis, delta: f32) -> bool {
        if !delta.is_finite() || delta < 0.0 {
            return false;
        }
        let new_size = self.size() + axis.mask() * delta;
        if new_size.x > self.max_size.x || new_size.y > self.max_size.y {
            return false;
        }
        self.resize_centered(new_size);
        true
    }

    fn resize_centered(&mut self, new_size: Vec2) {
        let center = self.center();
        self.width = new_size.x;
        self.height = new_size.y;
        self.x = center.x - new_size.x / 2.0;
        self.y = center.y - new_size.y / 2.0;
    }

    /// Uniform random top-left for a `size` rectangle that fits inside
    ///
    /// If the rectangle is larger than the arena on an axis, that axis pins to
    /// the arena's edge.
    pub fn random_rect_origin<R: rand::Rng>(&self, size: Vec2, rng: &mut R) -> Vec2 {
        let slack = (self.size() - size).max(Vec2::ZERO);
        Vec2::new(
            self.x + rng.random::<f32>() * slack.x,
            self.y + rng.random::<f32>() * slack.y,
        )
    }

    /// Uniform random center for a circle of `radius` that fits inside
    ///
    /// If the circle is wider than the arena on an axis, it sits on the center
    /// line of that axis.
    pub fn random_circle_center<R: rand::Rng>(&self, radius: f32, rng: &mut R) -> Vec2 {
        let diameter = Vec2::splat(2.0 * radius);
        let slack = self.size() - diameter;
        let center = self.center();
        let pick = |slack: f32, origin: f32, mid: f32, rng: &mut R| {
            if slack > 0.0 {
                origin + radius + rng.random::<f32>() * slack
            } else {
                mid
            }
        };
        let x = pick(slack.x, self.x, center.x, rng);
        let y = pick(slack.y, self.y, center.y, rng);
        Vec2::new(x, y)
    }

    /// Clamp a rectangle origin so the rectangle stays inside
    pub fn clamp_rect_origin(&self, origin: Vec2, size: Vec2) -> Vec2 {
        let max = (self.max() - size).max(self.min());
        origin.clamp(self.min(), max)
    }
}
