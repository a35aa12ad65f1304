//! Score board and per-resort leaderboard
//!
//! Pure aggregation and ranking. Everything here derives serde so the host
//! can persist it wherever it likes; no storage happens in the core.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CharacterType;

/// Maximum entries kept on the score board
pub const MAX_TOP_SCORES: usize = 10;

/// Maximum runs kept per resort
pub const MAX_RUNS_PER_RESORT: usize = 20;

/// A single finished-run score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: i64,
    /// Caller-supplied clock value (the core never reads a wall clock)
    pub timestamp: f64,
}

/// Lifetime score statistics plus the top-scores table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    high_score: i64,
    games_played: u32,
    total_coins: u64,
    total_distance: i64,
    best_distance: i64,
    top: Vec<ScoreEntry>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run's final score
    pub fn submit_score(&mut self, score: i64, timestamp: f64) {
        self.games_played += 1;

        if score > self.high_score {
            self.high_score = score;
        }

        // Insert sorted descending, trim to the cap
        let pos = self
            .top
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.top.len());
        self.top.insert(pos, ScoreEntry { score, timestamp });
        self.top.truncate(MAX_TOP_SCORES);
    }

    /// Whether a score would set a new high score
    pub fn is_high_score(&self, score: i64) -> bool {
        score > self.high_score
    }

    pub fn add_coins(&mut self, count: u32) {
        self.total_coins += u64::from(count);
    }

    /// Accumulate a run's distance and track the single-run best
    pub fn update_distance(&mut self, distance: i64) {
        self.total_distance += distance;
        if distance > self.best_distance {
            self.best_distance = distance;
        }
    }

    pub fn high_score(&self) -> i64 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn total_coins(&self) -> u64 {
        self.total_coins
    }

    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    pub fn best_distance(&self) -> i64 {
        self.best_distance
    }

    /// Top scores, best first
    pub fn top_scores(&self) -> &[ScoreEntry] {
        &self.top
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}

/// A completed run on one resort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEntry {
    pub resort_id: String,
    pub character: CharacterType,
    pub distance: i64,
    pub score: i64,
    /// Run duration in seconds
    pub run_time: f64,
    pub timestamp: f64,
}

/// Per-resort run rankings, longest distance first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    runs: BTreeMap<String, Vec<RunEntry>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_run(
        &mut self,
        resort_id: &str,
        character: CharacterType,
        distance: i64,
        score: i64,
        run_time: f64,
        timestamp: f64,
    ) {
        let runs = self.runs.entry(resort_id.to_owned()).or_default();
        let entry = RunEntry {
            resort_id: resort_id.to_owned(),
            character,
            distance,
            score,
            run_time,
            timestamp,
        };
        let pos = runs
            .iter()
            .position(|r| distance > r.distance)
            .unwrap_or(runs.len());
        runs.insert(pos, entry);
        runs.truncate(MAX_RUNS_PER_RESORT);
    }

    /// All recorded runs for a resort, best first
    pub fn runs_for(&self, resort_id: &str) -> &[RunEntry] {
        self.runs.get(resort_id).map_or(&[], Vec::as_slice)
    }

    pub fn top_runs(&self, resort_id: &str, limit: usize) -> &[RunEntry] {
        let runs = self.runs_for(resort_id);
        &runs[..runs.len().min(limit)]
    }

    pub fn best_run(&self, resort_id: &str) -> Option<&RunEntry> {
        self.runs_for(resort_id).first()
    }

    /// The best run on every resort that has one
    pub fn all_resort_bests(&self) -> impl Iterator<Item = (&str, &RunEntry)> {
        self.runs
            .iter()
            .filter_map(|(id, runs)| runs.first().map(|best| (id.as_str(), best)))
    }

    pub fn clear_resort(&mut self, resort_id: &str) {
        self.runs.remove(resort_id);
    }

    pub fn clear_all(&mut self) {
        self.runs.clear();
    }
}
