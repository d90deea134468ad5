use serde::{Deserialize, Serialize};

/// Running totals for a session
/// - `score` only goes up until `reset`
/// - `best` survives resets within the same page load
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoreBoard {
    score: u32,
    kills: u32,
    best: u32,
}

/// Session summary printed under the pause and game-over menus
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub score: u32,
    pub kills: u32,
    pub best: u32,
    pub shards: usize,
    pub boss_spawned: bool,
}

impl ScoreBoard {
    pub fn new() -> Self {
        ScoreBoard::default()
    }

    /// Restore totals from a save
    pub fn with_totals(score: u32, kills: u32) -> Self {
        ScoreBoard {
            score,
            kills,
            best: score,
        }
    }

    pub fn record_kill(&mut self, points: u32) {
        self.kills = self.kills.saturating_add(1);
        self.add(points);
    }

    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.best = self.best.max(self.score);
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.kills = 0;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn best(&self) -> u32 {
        self.best
    }
}
