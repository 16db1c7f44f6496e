//! The simulation: owns every ball, the arena, the pickups and the kill feed
//!
//! The host drives it one tick at a time. `frame` ticks only while running,
//! `step` always ticks.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::{Arena, Axis};
use super::pickup::{ImageHandle, Pickup, PickupKind, Pickups};
use super::registry::BallRegistry;
use super::snapshot::{BallView, PickupView, Snapshot};
use super::state::{Ball, BallConfig, BallUpdate, Color, KillNotice, SimEvent, SimPhase};
use super::tick::{Rules, physics_step};
use crate::killfeed::{KillFeed, KillFeedEntry};
use crate::platform;
use crate::settings::{BallDefaults, SimSettings};

/// Called once per kill, inside the tick that detected it
pub type KillObserver = Box<dyn FnMut(&KillNotice)>;

pub struct Simulation {
    seed: u64,
    rng: Pcg32,
    phase: SimPhase,
    /// Ticks run so far
    time_ticks: u64,
    arena: Arena,
    balls: BallRegistry,
    pickups: Pickups,
    kill_feed: KillFeed,
    /// Events from the most recent tick
    events: Vec<SimEvent>,
    palette: Vec<Color>,
    ball_defaults: BallDefaults,
    rules: Rules,
    observer: Option<KillObserver>,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("seed", &self.seed)
            .field("phase", &self.phase)
            .field("time_ticks", &self.time_ticks)
            .field("arena", &self.arena)
            .field("balls", &self.balls.len())
            .field("pickups", &self.pickups)
            .field("kills", &self.kill_feed.len())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimSettings::default())
    }
}

impl Simulation {
    pub fn new(settings: SimSettings) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed.unwrap_or_else(platform::random_seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = settings.arena();
        let mut pickups = Pickups::new(settings.pickups.iter().map(|p| p.build()).collect());
        pickups.place_all(&arena, &mut rng);

        log::info!(
            "Simulation created: seed {}, arena {}x{}, {} pickups",
            seed,
            arena.width,
            arena.height,
            pickups.len()
        );

        Self {
            seed,
            rng,
            phase: SimPhase::Idle,
            time_ticks: 0,
            arena,
            balls: BallRegistry::new(),
            pickups,
            kill_feed: KillFeed::new(),
            events: Vec::new(),
            palette: settings.palette,
            ball_defaults: settings.ball,
            rules: settings.rules,
            observer: None,
        }
    }

    // === Read access ===

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Balls in registry order
    pub fn balls(&self) -> &[Ball] {
        self.balls.as_slice()
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.get(id)
    }

    /// Owned copy of every ball
    pub fn list_balls(&self) -> Vec<Ball> {
        self.balls.list()
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn pickups(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter()
    }

    pub fn pickup(&self, kind: PickupKind) -> Option<&Pickup> {
        self.pickups.get(kind)
    }

    pub fn kill_feed(&self) -> &KillFeed {
        &self.kill_feed
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Copy out everything a renderer draws
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            arena: self.arena.clone(),
            balls: self.balls.iter().map(BallView::from).collect(),
            pickups: self.pickups.iter().map(PickupView::from).collect(),
        }
    }

    // === Balls ===

    /// Add a ball, filling unset options with defaults; returns its id
    ///
    /// Without a position the ball lands at a random spot fully inside the
    /// arena. Without a color it takes the next palette entry.
    pub fn add_ball(&mut self, config: BallConfig) -> u32 {
        let radius = config.radius.unwrap_or(self.ball_defaults.radius).max(0.0);
        let mass = config.mass.unwrap_or(self.ball_defaults.mass).max(0.0);

        let mut pos = self.arena.random_circle_center(radius, &mut self.rng);
        if let Some(x) = config.x {
            pos.x = x;
        }
        if let Some(y) = config.y {
            pos.y = y;
        }

        let color = config.color.unwrap_or_else(|| self.next_palette_color());

        let id = self.balls.next_ball_id();
        let mut ball = Ball::new(id, pos, radius, mass, color);
        ball.vel.x = config.vx.unwrap_or(0.0);
        ball.vel.y = config.vy.unwrap_or(0.0);
        ball.has_knife = config.has_knife.unwrap_or(false);

        log::debug!("Added ball {} at {:?} ({})", id, ball.pos, ball.color);
        self.balls.insert(ball)
    }

    fn next_palette_color(&self) -> Color {
        if self.palette.is_empty() {
            return Color::from(crate::DEFAULT_PALETTE[0]);
        }
        self.palette[self.balls.len() % self.palette.len()].clone()
    }

    pub fn remove_ball(&mut self, id: u32) -> Option<Ball> {
        self.balls.remove(id)
    }

    /// Apply a partial update; false (and no change) if the id is unknown
    pub fn update_ball(&mut self, id: u32, update: BallUpdate) -> bool {
        self.balls.update(id, update)
    }

    pub fn clear_balls(&mut self) {
        self.balls.clear();
    }

    // === Arena ===

    /// Replace the arena bounds; they also become the new growth cap
    pub fn set_box_boundary(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.arena.set_bounds(x, y, width, height);
        self.pickups.clamp_into(&self.arena);
    }

    /// Shrink the arena around its center; false if it would get too small
    pub fn reduce_box_size(&mut self, axis: Axis, delta: f32) -> bool {
        let ok = self.arena.shrink(axis, delta);
        if ok {
            self.pickups.clamp_into(&self.arena);
            log::debug!("Arena shrunk to {}x{}", self.arena.width, self.arena.height);
        }
        ok
    }

    /// Grow the arena around its center; false past the original size
    pub fn increase_box_size(&mut self, axis: Axis, delta: f32) -> bool {
        let ok = self.arena.grow(axis, delta);
        if ok {
            log::debug!("Arena grown to {}x{}", self.arena.width, self.arena.height);
        }
        ok
    }

    // === Pickups ===

    /// Set or clear the sprite of every pickup of `kind`
    ///
    /// Setting one puts the pickup on the field; clearing it takes the pickup
    /// out of play. False if no pickup of that kind is configured.
    pub fn set_pickup_image(&mut self, kind: PickupKind, image: Option<ImageHandle>) -> bool {
        self.pickups
            .set_image(kind, image, &self.arena, &mut self.rng)
    }

    pub fn set_knife_image(&mut self, image: Option<ImageHandle>) -> bool {
        self.set_pickup_image(PickupKind::Knife, image)
    }

    pub fn set_heart_image(&mut self, image: Option<ImageHandle>) -> bool {
        self.set_pickup_image(PickupKind::Heart, image)
    }

    // === Kill observer ===

    pub fn set_kill_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&KillNotice) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_kill_observer(&mut self) {
        self.observer = None;
    }

    // === Lifecycle ===

    /// Start ticking; false if already running
    ///
    /// Pickups whose respawn was cancelled by a stop get a fresh timer.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = SimPhase::Running;
        self.pickups.rearm_timers();
        log::info!("Simulation started at tick {}", self.time_ticks);
        true
    }

    /// Stop ticking and cancel pending pickup respawns; false if not running
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = SimPhase::Idle;
        self.pickups.cancel_timers();
        log::info!("Simulation stopped at tick {}", self.time_ticks);
        true
    }

    /// Remove every ball and put the pickups back on the field
    ///
    /// Leaves the run state, arena, kill feed and id counter alone.
    pub fn reset(&mut self) {
        self.balls.clear();
        self.events.clear();
        self.pickups.place_all(&self.arena, &mut self.rng);
        log::info!("Simulation reset");
    }

    /// Advance one tick if running; returns whether a tick ran
    pub fn frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.step();
        true
    }

    /// Advance exactly one tick regardless of the run state
    pub fn step(&mut self) {
        self.events.clear();
        self.time_ticks += 1;

        self.pickups
            .advance_timers(&self.arena, &mut self.rng, &mut self.events);

        physics_step(
            self.balls.as_mut_slice(),
            &self.arena,
            &self.rules,
            &mut self.events,
        );

        self.pickups
            .resolve(self.balls.as_mut_slice(), &self.rules, &mut self.events);

        self.remove_dead();
    }

    /// Remove every ball with no radius left, crediting its last attacker
    ///
    /// Dead ids are collected first so removals can't shift the scan. A kill
    /// is credited only if the attacker is still in the registry when its
    /// victim is removed.
    fn remove_dead(&mut self) {
        let dead: Vec<u32> = self
            .balls
            .iter()
            .filter(|b| b.is_dead())
            .map(|b| b.id)
            .collect();

        for victim_id in dead {
            let Some(victim) = self.balls.remove(victim_id) else {
                continue;
            };
            self.events.push(SimEvent::BallRemoved { id: victim_id });

            let killer = victim
                .last_hit_by
                .and_then(|id| self.balls.get(id))
                .map(|k| (k.id, k.color.clone()));

            let Some((killer_id, killer_color)) = killer else {
                log::debug!("Ball {} died with no one to credit", victim_id);
                continue;
            };

            self.kill_feed.push(KillFeedEntry {
                killer_id,
                killer_color: killer_color.clone(),
                victim_id,
                victim_color: victim.color.clone(),
                tick: self.time_ticks,
                timestamp: platform::now_ms(),
            });
            self.events.push(SimEvent::BallKilled {
                killer_id,
                victim_id,
            });

            let notice = KillNotice {
                killer_color,
                victim_color: victim.color,
                remaining: self.balls.len(),
            };
            log::info!(
                "{} killed {} ({} left)",
                notice.killer_color,
                notice.victim_color,
                notice.remaining
            );
            if let Some(observer) = self.observer.as_mut() {
                observer(&notice);
            }
        }
    }
}
