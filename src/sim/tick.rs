//! Per-tick physics
//!
//! Moves every ball, bounces it off the arena walls, then resolves every
//! overlapping pair: knife cut first, elastic exchange second, separation last.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::{bounce_off_walls, circle_circle_collision, elastic_response, separate};
use super::state::{Ball, SimEvent};
use crate::consts::*;

/// Damage and healing amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub knife_mass_damage: f32,
    pub knife_radius_damage: f32,
    pub heart_mass_gain: f32,
    pub heart_radius_gain: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            knife_mass_damage: KNIFE_MASS_DAMAGE,
            knife_radius_damage: KNIFE_RADIUS_DAMAGE,
            heart_mass_gain: HEART_MASS_GAIN,
            heart_radius_gain: HEART_RADIUS_GAIN,
        }
    }
}

/// Run the physics part of one tick
pub fn physics_step(balls: &mut [Ball], arena: &Arena, rules: &Rules, events: &mut Vec<SimEvent>) {
    integrate(balls);
    resolve_walls(balls, arena);
    resolve_pairs(balls, rules, events);
}

/// position += velocity
pub fn integrate(balls: &mut [Ball]) {
    for ball in balls.iter_mut() {
        ball.pos += ball.vel;
    }
}

/// Reflect every ball off the arena walls
pub fn resolve_walls(balls: &mut [Ball], arena: &Arena) {
    let (min, max) = (arena.min(), arena.max());
    for ball in balls.iter_mut() {
        bounce_off_walls(&mut ball.pos, &mut ball.vel, ball.radius, min, max);
    }
}

/// Resolve every overlapping pair once, in index order
///
/// Balls with no size or no mass left sit out. Because pairs are handled
/// one after another, a ball cut to nothing by an earlier pair sits out the
/// rest of the tick.
pub fn resolve_pairs(balls: &mut [Ball], rules: &Rules, events: &mut Vec<SimEvent>) {
    let n = balls.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = balls.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            collide_pair(a, b, rules, events);
        }
    }
}

/// Resolve one pair; returns true if they overlapped
pub fn collide_pair(a: &mut Ball, b: &mut Ball, rules: &Rules, events: &mut Vec<SimEvent>) -> bool {
    if !a.is_collidable() || !b.is_collidable() {
        return false;
    }

    let hit = circle_circle_collision(a.pos, a.radius, b.pos, b.radius);
    if !hit.hit {
        return false;
    }

    knife_hook(a, b, rules, events);

    let (va, vb) = elastic_response(a.vel, a.mass, b.vel, b.mass, hit.normal);
    a.vel = va;
    b.vel = vb;

    let (pa, pb) = separate(a.pos, b.pos, hit.normal, hit.penetration);
    a.pos = pa;
    b.pos = pb;

    true
}

/// Knife effect for two touching balls
///
/// | a knife | b knife | effect                               |
/// |---------|---------|--------------------------------------|
/// | yes     | no      | b is cut, a drops its knife          |
/// | no      | yes     | a is cut, b drops its knife          |
/// | yes     | yes     | both knives are dropped, no damage   |
/// | no      | no      | nothing                              |
pub fn knife_hook(a: &mut Ball, b: &mut Ball, rules: &Rules, events: &mut Vec<SimEvent>) {
    match (a.has_knife, b.has_knife) {
        (true, false) => cut(a, b, rules, events),
        (false, true) => cut(b, a, rules, events),
        (true, true) => {
            a.has_knife = false;
            b.has_knife = false;
            log::debug!("balls {} and {} parried", a.id, b.id);
        }
        (false, false) => {}
    }
}

fn cut(attacker: &mut Ball, victim: &mut Ball, rules: &Rules, events: &mut Vec<SimEvent>) {
    victim.take_cut(attacker.id, rules.knife_mass_damage, rules.knife_radius_damage);
    attacker.has_knife = false;
    log::debug!(
        "ball {} cut ball {} (radius {}, mass {})",
        attacker.id,
        victim.id,
        victim.radius,
        victim.mass
    );
    events.push(SimEvent::BallCut {
        attacker_id: attacker.id,
        victim_id: victim.id,
    });
}
