//! Simulation settings
//!
//! Everything a host can choose at construction time. Every field has a
//! default, so a partial JSON document (or `{}`) is a valid configuration.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_PALETTE;
use crate::consts::*;
use crate::sim::{Arena, Color, ImageHandle, Pickup, PickupKind, Rules};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Size and weight given to balls added without their own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallDefaults {
    pub radius: f32,
    pub mass: f32,
}

impl Default for BallDefaults {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            mass: BALL_MASS,
        }
    }
}

/// One pickup in play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupSettings {
    pub kind: PickupKind,
    #[serde(default = "default_pickup_size")]
    pub width: f32,
    #[serde(default = "default_pickup_size")]
    pub height: f32,
    /// Ticks between being taken and reappearing
    pub respawn_ticks: u32,
    /// Sprite handle; without one the pickup never appears
    #[serde(default)]
    pub image: Option<ImageHandle>,
}

fn default_pickup_size() -> f32 {
    PICKUP_SIZE
}

impl PickupSettings {
    pub fn knife() -> Self {
        Self {
            kind: PickupKind::Knife,
            width: PICKUP_SIZE,
            height: PICKUP_SIZE,
            respawn_ticks: KNIFE_RESPAWN_TICKS,
            image: None,
        }
    }

    pub fn heart() -> Self {
        Self {
            kind: PickupKind::Heart,
            width: PICKUP_SIZE,
            height: PICKUP_SIZE,
            respawn_ticks: HEART_RESPAWN_TICKS,
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self
    }

    pub fn build(&self) -> Pickup {
        let mut pickup = Pickup::new(
            self.kind,
            Vec2::new(self.width, self.height),
            self.respawn_ticks,
        );
        pickup.image = self.image;
        pickup
    }
}

/// Construction options for a [`crate::Simulation`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Canvas the arena is drawn on
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Gap between the canvas edge and the arena
    pub arena_margin: f32,
    /// Shrinking stops before either arena dimension reaches this
    pub min_arena_size: f32,
    /// Colors handed out round-robin to balls added without one
    pub palette: Vec<Color>,
    pub ball: BallDefaults,
    pub rules: Rules,
    /// Pickups in resolution order; may be empty
    pub pickups: Vec<PickupSettings>,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            arena_margin: ARENA_MARGIN,
            min_arena_size: MIN_ARENA_SIZE,
            palette: DEFAULT_PALETTE.iter().map(|&c| Color::from(c)).collect(),
            ball: BallDefaults::default(),
            rules: Rules::default(),
            pickups: vec![PickupSettings::knife(), PickupSettings::heart()],
            seed: None,
        }
    }
}

impl SimSettings {
    /// Default settings with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Default settings for a canvas of the given size
    pub fn for_canvas(width: f32, height: f32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// The arena these settings describe
    pub fn arena(&self) -> Arena {
        let margin = self.arena_margin;
        Arena::with_min_size(
            margin,
            margin,
            self.canvas_width - 2.0 * margin,
            self.canvas_height - 2.0 * margin,
            self.min_arena_size,
        )
    }

    /// Clamp nonsense values instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        if self.palette.is_empty() {
            log::warn!("Empty color palette, using the default one");
            self.palette = Self::default().palette;
        }
        if self.ball.radius < 0.0 || self.ball.mass < 0.0 {
            log::warn!(
                "Negative ball defaults (radius {}, mass {}) clamped to 0",
                self.ball.radius,
                self.ball.mass
            );
            self.ball.radius = self.ball.radius.max(0.0);
            self.ball.mass = self.ball.mass.max(0.0);
        }
        self.canvas_width = self.canvas_width.max(0.0);
        self.canvas_height = self.canvas_height.max(0.0);
        self.arena_margin = self.arena_margin.max(0.0);
        self.min_arena_size = self.min_arena_size.max(0.0);
        for pickup in &mut self.pickups {
            pickup.width = pickup.width.max(0.0);
            pickup.height = pickup.height.max(0.0);
        }
        self
    }
}
