//! Pickup items lying around the arena
//!
//! Each pickup is its own little state machine:
//!
//! ```text
//! Available --(ball touches it)--> Consumed { respawn_in: Some(n) }
//!     ^                                   |
//!     +------(n ticks later, new spot)----+
//! ```
//!
//! Pickups never interact with each other and may overlap. A pickup without an
//! image handle is never available.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::circle_rect_overlap;
use super::state::{Ball, SimEvent};
use super::tick::Rules;

/// Opaque handle to a sprite owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(pub u32);

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Arms the ball; its next ball contact cuts the other ball
    Knife,
    /// Heals the ball toward its spawn size
    Heart,
}

impl PickupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PickupKind::Knife => "knife",
            PickupKind::Heart => "heart",
        }
    }

    /// Apply this pickup's effect to the ball that took it
    pub fn apply(&self, ball: &mut Ball, rules: &Rules) {
        match self {
            PickupKind::Knife => ball.has_knife = true,
            PickupKind::Heart => ball.heal(rules.heart_mass_gain, rules.heart_radius_gain),
        }
    }
}

/// Where a pickup is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupState {
    /// On the field and collidable
    Available,
    /// Taken; comes back once the timer runs out. `None` means no timer is
    /// pending (cancelled by a stop, or no image yet).
    Consumed { respawn_in: Option<u32> },
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub image: Option<ImageHandle>,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub state: PickupState,
    /// Delay between being taken and reappearing
    pub respawn_ticks: u32,
}

impl Pickup {
    pub fn new(kind: PickupKind, size: Vec2, respawn_ticks: u32) -> Self {
        Self {
            kind,
            image: None,
            pos: Vec2::ZERO,
            size: size.max(Vec2::ZERO),
            state: PickupState::Consumed { respawn_in: None },
            respawn_ticks,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.image.is_some() && self.state == PickupState::Available
    }

    /// Respawn timer is counting down
    pub fn is_pending(&self) -> bool {
        matches!(self.state, PickupState::Consumed { respawn_in: Some(_) })
    }

    /// Ball circle touches the pickup rectangle
    pub fn touches(&self, ball: &Ball) -> bool {
        circle_rect_overlap(ball.pos, ball.radius, self.pos, self.size)
    }

    /// Move to a random spot fully inside the arena and become available
    ///
    /// Does nothing (returns false) without an image.
    pub fn place_randomly<R: rand::Rng>(&mut self, arena: &Arena, rng: &mut R) -> bool {
        if self.image.is_none() {
            return false;
        }
        self.pos = arena.random_rect_origin(self.size, rng);
        self.state = PickupState::Available;
        true
    }

    /// Taken by a ball: hide and start the respawn timer
    pub fn consume(&mut self) {
        self.state = PickupState::Consumed {
            respawn_in: Some(self.respawn_ticks),
        };
    }

    /// Count the respawn timer down by one tick; true when it has run out
    fn tick_timer(&mut self) -> bool {
        match &mut self.state {
            PickupState::Consumed {
                respawn_in: Some(remaining),
            } => {
                if *remaining <= 1 {
                    true
                } else {
                    *remaining -= 1;
                    false
                }
            }
            _ => false,
        }
    }

    /// Drop a pending respawn timer; the pickup stays hidden
    pub fn cancel_timer(&mut self) {
        if self.is_pending() {
            self.state = PickupState::Consumed { respawn_in: None };
        }
    }

    /// Restart a full-length timer for a hidden pickup with none pending
    pub fn rearm_timer(&mut self) {
        if self.image.is_some() && self.state == (PickupState::Consumed { respawn_in: None }) {
            self.consume();
        }
    }
}

/// The set of pickups in play, in resolution order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pickups {
    items: Vec<Pickup>,
}

impl Pickups {
    pub fn new(items: Vec<Pickup>) -> Self {
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pickup> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First pickup of `kind`
    pub fn get(&self, kind: PickupKind) -> Option<&Pickup> {
        self.items.iter().find(|p| p.kind == kind)
    }

    /// Set (or clear) the image of every pickup of `kind`
    ///
    /// Setting a handle puts the pickup back on the field at a fresh spot;
    /// clearing it takes the pickup out of play. Returns false if there is no
    /// pickup of that kind.
    pub fn set_image<R: rand::Rng>(
        &mut self,
        kind: PickupKind,
        image: Option<ImageHandle>,
        arena: &Arena,
        rng: &mut R,
    ) -> bool {
        let mut found = false;
        for pickup in self.items.iter_mut().filter(|p| p.kind == kind) {
            found = true;
            pickup.image = image;
            if !pickup.place_randomly(arena, rng) {
                pickup.state = PickupState::Consumed { respawn_in: None };
            }
        }
        found
    }

    /// Put every pickup that has an image on the field at a fresh spot
    pub fn place_all<R: rand::Rng>(&mut self, arena: &Arena, rng: &mut R) {
        for pickup in &mut self.items {
            if !pickup.place_randomly(arena, rng) {
                pickup.state = PickupState::Consumed { respawn_in: None };
            }
        }
    }

    pub fn cancel_timers(&mut self) {
        self.items.iter_mut().for_each(Pickup::cancel_timer);
    }

    pub fn rearm_timers(&mut self) {
        self.items.iter_mut().for_each(Pickup::rearm_timer);
    }

    /// Pull every pickup back inside the arena after a resize
    pub fn clamp_into(&mut self, arena: &Arena) {
        for pickup in &mut self.items {
            pickup.pos = arena.clamp_rect_origin(pickup.pos, pickup.size);
        }
    }

    /// Advance respawn timers, respawning pickups whose timer ran out
    pub fn advance_timers<R: rand::Rng>(
        &mut self,
        arena: &Arena,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) {
        for pickup in &mut self.items {
            if pickup.tick_timer() && pickup.place_randomly(arena, rng) {
                log::debug!("{} respawned at {:?}", pickup.kind.as_str(), pickup.pos);
                events.push(SimEvent::PickupRespawned { kind: pickup.kind });
            }
        }
    }

    /// Let balls take available pickups
    ///
    /// For each available pickup, the first live ball in registry order that
    /// touches it takes it. Each pickup is taken at most once per tick.
    pub fn resolve(&mut self, balls: &mut [Ball], rules: &Rules, events: &mut Vec<SimEvent>) {
        for pickup in &mut self.items {
            if !pickup.is_available() {
                continue;
            }
            let Some(ball) = balls
                .iter_mut()
                .find(|b| b.is_collidable() && pickup.touches(b))
            else {
                continue;
            };

            pickup.kind.apply(ball, rules);
            pickup.consume();
            log::debug!("ball {} took the {}", ball.id, pickup.kind.as_str());
            events.push(SimEvent::PickupConsumed {
                kind: pickup.kind,
                ball_id: ball.id,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Color;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::new(0.0, 0.0, 400.0, 300.0)
    }

    fn knife(arena: &Arena, rng: &mut Pcg32) -> Pickup {
        let mut p = Pickup::new(PickupKind::Knife, Vec2::splat(50.0), 3);
        p.image = Some(ImageHandle(1));
        assert!(p.place_randomly(arena, rng));
        p
    }

    fn ball_at(id: u32, pos: Vec2) -> Ball {
        Ball::new(id, pos, 20.0, 2.0, Color::from("#FF0000"))
    }

    #[test]
    fn test_no_image_never_available() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = Pickup::new(PickupKind::Heart, Vec2::splat(50.0), 10);
        assert!(!p.place_randomly(&arena, &mut rng));
        assert!(!p.is_available());

        // Even if someone forces the state, no image means not collidable
        p.state = PickupState::Available;
        assert!(!p.is_available());
    }

    #[test]
    fn test_first_ball_in_order_takes_it() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut pickups = Pickups::new(vec![knife(&arena, &mut rng)]);
        let center = pickups.items[0].pos + Vec2::splat(25.0);

        let mut balls = vec![ball_at(1, center), ball_at(2, center)];
        let mut events = Vec::new();
        pickups.resolve(&mut balls, &Rules::default(), &mut events);

        assert!(balls[0].has_knife);
        assert!(!balls[1].has_knife);
        assert!(!pickups.items[0].is_available());
        assert_eq!(
            events,
            vec![SimEvent::PickupConsumed {
                kind: PickupKind::Knife,
                ball_id: 1
            }]
        );
    }

    #[test]
    fn test_respawn_after_delay() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pickups = Pickups::new(vec![knife(&arena, &mut rng)]);
        pickups.items[0].consume();

        let mut events = Vec::new();
        pickups.advance_timers(&arena, &mut rng, &mut events);
        pickups.advance_timers(&arena, &mut rng, &mut events);
        assert!(!pickups.items[0].is_available());
        assert!(events.is_empty());

        pickups.advance_timers(&arena, &mut rng, &mut events);
        let p = &pickups.items[0];
        assert!(p.is_available());
        assert!(p.pos.x >= 0.0 && p.pos.x + p.size.x <= 400.0);
        assert!(p.pos.y >= 0.0 && p.pos.y + p.size.y <= 300.0);
        assert_eq!(
            events,
            vec![SimEvent::PickupRespawned {
                kind: PickupKind::Knife
            }]
        );
    }

    #[test]
    fn test_cancel_and_rearm() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut pickups = Pickups::new(vec![knife(&arena, &mut rng)]);
        pickups.items[0].consume();

        pickups.cancel_timers();
        let mut events = Vec::new();
        for _ in 0..10 {
            pickups.advance_timers(&arena, &mut rng, &mut events);
        }
        assert!(!pickups.items[0].is_available());

        pickups.rearm_timers();
        assert_eq!(
            pickups.items[0].state,
            PickupState::Consumed {
                respawn_in: Some(3)
            }
        );
    }

    #[test]
    fn test_heart_heals_to_cap() {
        let mut b = ball_at(1, Vec2::ZERO);
        b.take_cut(2, 1.0, 10.0);
        PickupKind::Heart.apply(&mut b, &Rules::default());
        assert_eq!((b.mass, b.radius), (2.0, 20.0));
        PickupKind::Heart.apply(&mut b, &Rules::default());
        assert_eq!((b.mass, b.radius), (2.0, 20.0));
    }

    #[test]
    fn test_massless_ball_takes_heart() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut heart = Pickup::new(PickupKind::Heart, Vec2::splat(50.0), 3);
        heart.image = Some(ImageHandle(2));
        assert!(heart.place_randomly(&arena, &mut rng));
        let mut pickups = Pickups::new(vec![heart]);

        let mut b = ball_at(1, pickups.items[0].pos + Vec2::splat(25.0));
        b.take_cut(2, 5.0, 5.0);
        assert_eq!((b.mass, b.radius), (0.0, 15.0));

        let mut balls = vec![b];
        pickups.resolve(&mut balls, &Rules::default(), &mut Vec::new());
        assert!(!pickups.items[0].is_available());
        assert_eq!((balls[0].mass, balls[0].radius), (1.0, 20.0));
    }

    #[test]
    fn test_set_image_clears_and_restores() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pickups = Pickups::new(vec![knife(&arena, &mut rng)]);

        assert!(pickups.set_image(PickupKind::Knife, None, &arena, &mut rng));
        assert!(!pickups.items[0].is_available());
        assert!(!pickups.set_image(PickupKind::Heart, Some(ImageHandle(2)), &arena, &mut rng));

        assert!(pickups.set_image(PickupKind::Knife, Some(ImageHandle(9)), &arena, &mut rng));
        assert!(pickups.items[0].is_available());
        assert_eq!(pickups.get(PickupKind::Knife).and_then(|p| p.image), Some(ImageHandle(9)));
    }
}
