use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of a session for a presentation layer to draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub size: Coord2,
    pub tiles: Vec<Tile>,
    pub score: u32,
    pub time_remaining: u32,
    pub initial_seconds: u32,
    pub state: SessionState,
    pub difficulty: Difficulty,
    pub special_counts: SpecialCounts,
    pub generation: Generation,
}

impl SessionSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            size: session.board().size(),
            tiles: session.board().iter_tiles().collect(),
            score: session.score(),
            time_remaining: session.time_remaining(),
            initial_seconds: session.initial_seconds(),
            state: session.state(),
            difficulty: session.difficulty(),
            special_counts: session.special_counts(),
            generation: session.generation(),
        }
    }

    /// Fraction of the starting time still on the clock, in `[0, 1]`.
    pub fn time_progress(&self) -> f64 {
        if self.initial_seconds == 0 {
            return 0.0;
        }
        f64::from(self.time_remaining.min(self.initial_seconds)) / f64::from(self.initial_seconds)
    }

    pub fn clock(&self) -> String {
        format_time(self.time_remaining)
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.coords == coords)
    }
}

/// Formats seconds as `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write!(out, "{:02}:{:02}", seconds / 60, seconds % 60);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(150), "02:30");
    }

    #[test]
    fn snapshot_mirrors_session() {
        let mut session = GameSession::new(DifficultyTable::default(), 4).unwrap();
        session.start(Difficulty::Hard).unwrap();

        let snapshot = session.snapshot();

        assert_eq!(snapshot.size, (23, 15));
        assert_eq!(snapshot.tiles.len(), 224);
        assert_eq!(snapshot.state, SessionState::Playing);
        assert_eq!(snapshot.clock(), "01:30");
        assert_eq!(snapshot.time_progress(), 1.0);
        let first = snapshot.tiles[0];
        assert_eq!(snapshot.tile_at(first.coords), Some(&first));
    }

    #[test]
    fn snapshot_survives_json() {
        let mut session = GameSession::new(DifficultyTable::default(), 8).unwrap();
        session.start(Difficulty::Easy).unwrap();
        let snapshot = session.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back, snapshot);
    }
}
