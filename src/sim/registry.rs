//! Ball registry: id → ball, kept in insertion order
//!
//! Balls live in a contiguous `Vec` so the pairwise pass can index them; an
//! id → index map answers lookups and is rebuilt whenever a ball is removed.

use std::collections::HashMap;

use super::state::{Ball, BallUpdate};

#[derive(Debug, Clone, Default)]
pub struct BallRegistry {
    balls: Vec<Ball>,
    index: HashMap<u32, usize>,
    /// Next id to hand out; ids are never reused
    next_id: u32,
}

impl BallRegistry {
    pub fn new() -> Self {
        Self {
            balls: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh ball id
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert a ball built with an id from [`Self::next_ball_id`]
    pub fn insert(&mut self, ball: Ball) -> u32 {
        let id = ball.id;
        self.next_id = self.next_id.max(id + 1);
        self.index.insert(id, self.balls.len());
        self.balls.push(ball);
        id
    }

    pub fn remove(&mut self, id: u32) -> Option<Ball> {
        let idx = self.index.remove(&id)?;
        let ball = self.balls.remove(idx);
        self.reindex();
        Some(ball)
    }

    pub fn get(&self, id: u32) -> Option<&Ball> {
        self.index.get(&id).map(|&i| &self.balls[i])
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Ball> {
        let i = *self.index.get(&id)?;
        self.balls.get_mut(i)
    }

    /// Apply a partial update; false if the id is unknown
    pub fn update(&mut self, id: u32, update: BallUpdate) -> bool {
        match self.get_mut(id) {
            Some(ball) => {
                update.apply(ball);
                true
            }
            None => false,
        }
    }

    /// Remove every ball; the id counter keeps counting
    pub fn clear(&mut self) {
        self.balls.clear();
        self.index.clear();
    }

    /// Owned copy of every ball in registry order
    pub fn list(&self) -> Vec<Ball> {
        self.balls.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn as_slice(&self) -> &[Ball] {
        &self.balls
    }

    pub fn as_mut_slice(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, ball) in self.balls.iter().enumerate() {
            self.index.insert(ball.id, i);
        }
    }
}
