//! Kill feed
//!
//! Append-only log of knife kills for the lifetime of a simulation. Hosts that
//! want a cap or persistence can copy entries out.

use serde::{Deserialize, Serialize};

use crate::sim::Color;

/// A single kill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillFeedEntry {
    pub killer_id: u32,
    pub killer_color: Color,
    pub victim_id: u32,
    pub victim_color: Color,
    /// Simulation tick the victim was removed on
    pub tick: u64,
    /// Unix timestamp (ms) when recorded
    pub timestamp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KillFeed {
    entries: Vec<KillFeedEntry>,
}

impl KillFeed {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: KillFeedEntry) {
        self.entries.push(entry);
    }

    /// All kills, oldest first
    pub fn entries(&self) -> &[KillFeedEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&KillFeedEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of kills credited to `killer_id`
    pub fn kills_by(&self, killer_id: u32) -> usize {
        self.entries
            .iter()
            .filter(|e| e.killer_id == killer_id)
            .count()
    }

    /// Killers ranked by kill count (descending)
    ///
    /// Ties go to whoever scored their first kill earlier.
    pub fn leaderboard(&self) -> Vec<(u32, usize)> {
        let mut board: Vec<(u32, usize)> = Vec::new();
        for entry in &self.entries {
            match board.iter_mut().find(|(id, _)| *id == entry.killer_id) {
                Some((_, count)) => *count += 1,
                None => board.push((entry.killer_id, 1)),
            }
        }
        // Stable sort keeps first-kill order among equals
        board.sort_by(|a, b| b.1.cmp(&a.1));
        board
    }

    /// Render the most recent `n` kills as `"killer -> victim"` lines, newest first
    pub fn recent_lines(&self, n: usize) -> Vec<String> {
        self.entries
            .iter()
            .rev()
            .take(n)
            .map(|e| format!("{} -> {}", e.killer_color, e.victim_color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill(killer_id: u32, victim_id: u32) -> KillFeedEntry {
        KillFeedEntry {
            killer_id,
            killer_color: Color::new(format!("k{killer_id}")),
            victim_id,
            victim_color: Color::new(format!("v{victim_id}")),
            tick: 0,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_leaderboard_order() {
        let mut feed = KillFeed::new();
        feed.push(kill(3, 10));
        feed.push(kill(5, 11));
        feed.push(kill(5, 12));
        feed.push(kill(7, 13));

        assert_eq!(feed.leaderboard(), vec![(5, 2), (3, 1), (7, 1)]);
        assert_eq!(feed.kills_by(5), 2);
        assert_eq!(feed.kills_by(99), 0);
    }

    #[test]
    fn test_recent_lines() {
        let mut feed = KillFeed::new();
        assert!(feed.recent_lines(3).is_empty());
        feed.push(kill(1, 2));
        feed.push(kill(3, 4));
        assert_eq!(feed.recent_lines(1), vec!["k3 -> v4".to_string()]);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.last().map(|e| e.victim_id), Some(4));
    }
}
