//! Read-only view of the simulation for renderers

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::pickup::{ImageHandle, Pickup, PickupKind};
use super::state::{Ball, Color, SimPhase};

/// What a renderer needs to draw one ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color,
    pub has_knife: bool,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            x: ball.pos.x,
            y: ball.pos.y,
            radius: ball.radius,
            color: ball.color.clone(),
            has_knife: ball.has_knife,
        }
    }
}

/// What a renderer needs to draw one pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub kind: PickupKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub available: bool,
    pub image: Option<ImageHandle>,
}

impl From<&Pickup> for PickupView {
    fn from(pickup: &Pickup) -> Self {
        Self {
            kind: pickup.kind,
            x: pickup.pos.x,
            y: pickup.pos.y,
            width: pickup.size.x,
            height: pickup.size.y,
            available: pickup.is_available(),
            image: pickup.image,
        }
    }
}

/// Everything drawn in one frame, copied out of the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: SimPhase,
    pub arena: Arena,
    /// Registry order
    pub balls: Vec<BallView>,
    pub pickups: Vec<PickupView>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
