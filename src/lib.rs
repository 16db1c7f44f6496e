//! Knife Arena - balls bouncing around a box, fighting over knives and hearts
//!
//! Core modules:
//! - `sim`: Simulation core (physics, collisions, pickups, kill bookkeeping)
//! - `settings`: Construction options (palette, arena, pickups, RNG seed)
//! - `killfeed`: Append-only record of who killed whom
//! - `platform`: Browser/native platform abstraction
//!
//! Rendering is left to the host: it reads [`sim::Snapshot`] once per tick.

pub mod killfeed;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use killfeed::{KillFeed, KillFeedEntry};
pub use settings::{BallDefaults, PickupSettings, SettingsError, SimSettings};
pub use sim::{
    Arena, Axis, Ball, BallConfig, BallUpdate, Color, ImageHandle, KillNotice, Pickup,
    PickupKind, Rules, SimEvent, SimPhase, Simulation, Snapshot,
};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Ticks per second the host is expected to drive (one per animation frame)
    pub const TICK_RATE_HZ: u32 = 60;

    /// Canvas defaults (the arena is inset by `ARENA_MARGIN` on every side)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    pub const ARENA_MARGIN: f32 = 20.0;
    /// Shrinking stops before either arena dimension reaches this
    pub const MIN_ARENA_SIZE: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_MASS: f32 = 2.0;

    /// Knife hit: damage dealt to the victim
    pub const KNIFE_MASS_DAMAGE: f32 = 1.0;
    pub const KNIFE_RADIUS_DAMAGE: f32 = 10.0;

    /// Heart pickup: growth toward the ball's spawn size
    pub const HEART_MASS_GAIN: f32 = 1.0;
    pub const HEART_RADIUS_GAIN: f32 = 10.0;

    /// Pickup sprite size (square)
    pub const PICKUP_SIZE: f32 = 50.0;
    /// Knife comes back quickly (half a second)
    pub const KNIFE_RESPAWN_TICKS: u32 = TICK_RATE_HZ / 2;
    /// Heart is rarer (5 seconds)
    pub const HEART_RESPAWN_TICKS: u32 = 5 * TICK_RATE_HZ;
}

/// Default color palette, cycled by ball index
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF",
];

/// Rotate `v` by the angle whose sine/cosine are given
#[inline]
pub fn rotate(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
}

/// Rotate `v` by the inverse of the angle whose sine/cosine are given
#[inline]
pub fn unrotate(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(v.x * cos + v.y * sin, v.y * cos - v.x * sin)
}
