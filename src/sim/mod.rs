//! Simulation module
//!
//! All physics and game-state logic lives here. Nothing in this module draws:
//! - Velocities are in units per tick, one tick per host frame
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)

pub mod arena;
pub mod collision;
pub mod pickup;
pub mod registry;
pub mod simulation;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::{Arena, Axis};
pub use collision::{CollisionResult, circle_circle_collision, circle_rect_overlap};
pub use pickup::{ImageHandle, Pickup, PickupKind, PickupState, Pickups};
pub use registry::BallRegistry;
pub use simulation::{KillObserver, Simulation};
pub use snapshot::{BallView, PickupView, Snapshot};
pub use state::{Ball, BallConfig, BallUpdate, Color, KillNotice, SimEvent, SimPhase};
pub use tick::{Rules, physics_step};
