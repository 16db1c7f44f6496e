//! Ball and event types shared across the simulation

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pickup::PickupKind;

/// Opaque color token handed through to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Run state of the simulation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Not ticking; `frame` is a no-op
    #[default]
    Idle,
    /// Ticking once per `frame`
    Running,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: Color,
    /// Next ball this one overlaps gets cut
    pub has_knife: bool,
    /// Spawn-time mass; hearts never heal past it
    pub first_mass: f32,
    /// Spawn-time radius; hearts never heal past it
    pub first_radius: f32,
    /// Most recent knife holder that cut this ball
    pub last_hit_by: Option<u32>,
}

impl Ball {
    /// A ball at rest at `pos` with the given size; spawn caps match the size
    pub fn new(id: u32, pos: Vec2, radius: f32, mass: f32, color: Color) -> Self {
        let radius = radius.max(0.0);
        let mass = mass.max(0.0);
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            mass,
            color,
            has_knife: false,
            first_mass: mass,
            first_radius: radius,
            last_hit_by: None,
        }
    }

    /// Dead balls are removed by the next death scan
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.radius <= 0.0
    }

    /// Takes part in ball-ball and ball-pickup collisions
    ///
    /// A massless ball with some radius left still collides and can be cut.
    #[inline]
    pub fn is_collidable(&self) -> bool {
        !self.is_dead()
    }

    /// Take a knife cut from `attacker`, never dropping below zero
    pub fn take_cut(&mut self, attacker: u32, mass_damage: f32, radius_damage: f32) {
        self.mass = (self.mass - mass_damage).max(0.0);
        self.radius = (self.radius - radius_damage).max(0.0);
        self.last_hit_by = Some(attacker);
    }

    /// Heal toward the spawn size
    ///
    /// A value already at or above its cap is left alone.
    pub fn heal(&mut self, mass_gain: f32, radius_gain: f32) {
        if self.mass < self.first_mass {
            self.mass = (self.mass + mass_gain).min(self.first_mass);
        }
        if self.radius < self.first_radius {
            self.radius = (self.radius + radius_gain).min(self.first_radius);
        }
    }

    /// Momentum (mass × velocity)
    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }
}

/// Options for adding a ball; anything left `None` takes the default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: Option<f32>,
    pub mass: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub vx: Option<f32>,
    pub vy: Option<f32>,
    pub color: Option<Color>,
    pub has_knife: Option<bool>,
}

impl BallConfig {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = Some(vx);
        self.vy = Some(vy);
        self
    }

    pub fn with_size(mut self, radius: f32, mass: f32) -> Self {
        self.radius = Some(radius);
        self.mass = Some(mass);
        self
    }

    pub fn with_knife(mut self) -> Self {
        self.has_knife = Some(true);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(Color::new(color));
        self
    }
}

/// Partial update applied to an existing ball
///
/// Only the `Some` fields are written. Spawn caps and the id are not
/// updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BallUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub vx: Option<f32>,
    pub vy: Option<f32>,
    pub radius: Option<f32>,
    pub mass: Option<f32>,
    pub color: Option<Color>,
    pub has_knife: Option<bool>,
    /// `Some(None)` clears the attribution
    pub last_hit_by: Option<Option<u32>>,
}

impl BallUpdate {
    pub fn apply(self, ball: &mut Ball) {
        if let Some(x) = self.x {
            ball.pos.x = x;
        }
        if let Some(y) = self.y {
            ball.pos.y = y;
        }
        if let Some(vx) = self.vx {
            ball.vel.x = vx;
        }
        if let Some(vy) = self.vy {
            ball.vel.y = vy;
        }
        if let Some(radius) = self.radius {
            ball.radius = radius.max(0.0);
        }
        if let Some(mass) = self.mass {
            ball.mass = mass.max(0.0);
        }
        if let Some(color) = self.color {
            ball.color = color;
        }
        if let Some(has_knife) = self.has_knife {
            ball.has_knife = has_knife;
        }
        if let Some(last_hit_by) = self.last_hit_by {
            ball.last_hit_by = last_hit_by;
        }
    }
}

/// Kill notification delivered to the observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillNotice {
    pub killer_color: Color,
    pub victim_color: Color,
    /// Balls left after the victim was removed
    pub remaining: usize,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    PickupConsumed { kind: PickupKind, ball_id: u32 },
    PickupRespawned { kind: PickupKind },
    /// A knife hit landed
    BallCut { attacker_id: u32, victim_id: u32 },
    BallKilled { killer_id: u32, victim_id: u32 },
    BallRemoved { id: u32 },
}
