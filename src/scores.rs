//! Session scoreboard
//!
//! Lives for the lifetime of the process only; nothing is written to disk.
//! Tracks the best score and the top finished runs of this session.

use serde::{Deserialize, Serialize};

use crate::consts::SCOREBOARD_SIZE;

/// A single finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Pipes cleared
    pub score: u32,
    /// Simulated seconds survived
    pub duration_secs: f32,
}

/// Best runs of this session, sorted by score (descending)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScores {
    best: u32,
    entries: Vec<RunRecord>,
    runs: u32,
}

impl SessionScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest score this session (0 before any scoring run)
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Number of runs finished this session, scoring or not
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn entries(&self) -> &[RunRecord] {
        &self.entries
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < SCOREBOARD_SIZE {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Record a finished run
    ///
    /// Returns the board rank achieved (1-indexed) or None if it didn't qualify.
    /// The best score is updated regardless of board placement.
    pub fn record(&mut self, score: u32, duration_secs: f32) -> Option<usize> {
        self.runs += 1;
        self.best = self.best.max(score);

        if !self.qualifies(score) {
            return None;
        }

        let entry = RunRecord {
            score,
            duration_secs,
        };

        // Ties rank below earlier runs
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(SCOREBOARD_SIZE);
        log::debug!("Run recorded: score {} at rank {}", score, rank);

        Some(rank)
    }
}
