use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    NotStarted,
    Playing,
    Ended,
}

impl SessionState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Ended)
    }
}

/// Identifies one run of a session; every (re)start gets a new one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivateOutcome {
    /// Not playing, or the slot already holds a tile.
    Ignored,
    Missed { time_delta: i32 },
    Matched(MatchResult),
}

impl ActivateOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickOutcome {
    /// The tick belongs to an earlier run or the session is not playing.
    Stale,
    Counting { time_remaining: u32 },
    Ended,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }
}

/// Owns the board, score and clock of a single player and applies every mutation to them.
#[derive(Clone, Debug)]
pub struct GameSession {
    table: DifficultyTable,
    difficulty: Difficulty,
    board: Board,
    special_counts: SpecialCounts,
    score: u32,
    time_remaining: u32,
    state: SessionState,
    generation: Generation,
    rng: SmallRng,
}

impl GameSession {
    /// Fails when the table does not validate, so a bad configuration never reaches generation.
    pub fn new(table: DifficultyTable, seed: u64) -> Result<Self> {
        table.validate()?;
        Ok(Self {
            board: Board::empty(table.rules.size),
            table,
            difficulty: Difficulty::default(),
            special_counts: SpecialCounts::new(),
            score: 0,
            time_remaining: table.get(Difficulty::default()).initial_seconds,
            state: SessionState::NotStarted,
            generation: Generation::default(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn table(&self) -> &DifficultyTable {
        &self.table
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn initial_seconds(&self) -> u32 {
        self.table.get(self.difficulty).initial_seconds
    }

    pub fn special_counts(&self) -> SpecialCounts {
        self.special_counts
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Starts a fresh run at `difficulty`, discarding any run in progress.
    pub fn start(&mut self, difficulty: Difficulty) -> Result<Generation> {
        let seed = self.rng.random();
        let generated = RandomBoardGenerator::new(seed).generate(&self.table, difficulty)?;

        self.difficulty = difficulty;
        self.board = generated.board;
        self.special_counts = generated.special_counts;
        self.score = 0;
        self.time_remaining = self.initial_seconds();
        self.state = SessionState::Playing;
        self.generation = Generation(self.generation.0.wrapping_add(1));

        log::debug!(
            "Session started at {} ({:?}), {}s on the clock",
            difficulty,
            self.generation,
            self.time_remaining
        );
        Ok(self.generation)
    }

    pub fn restart(&mut self) -> Result<Generation> {
        self.start(self.difficulty)
    }

    /// Selects a new difficulty, restarting right away when a run is in progress.
    ///
    /// An ended run keeps its empty clock until the next start.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<Option<Generation>> {
        match self.state {
            SessionState::Playing => self.start(difficulty).map(Some),
            SessionState::NotStarted => {
                self.difficulty = difficulty;
                self.time_remaining = self.initial_seconds();
                Ok(None)
            }
            SessionState::Ended => {
                self.difficulty = difficulty;
                Ok(None)
            }
        }
    }

    /// Activates an empty slot, removing matched tiles or charging the miss penalty.
    pub fn activate(&mut self, coords: Coord2) -> Result<ActivateOutcome> {
        if !self.state.is_playing() {
            return Ok(ActivateOutcome::Ignored);
        }

        let coords = self.board.validate_coords(coords)?;
        if self.board.is_occupied(coords) {
            return Ok(ActivateOutcome::Ignored);
        }

        let neighbors = find_neighbors(&self.board, coords);
        let result = evaluate(&self.board, &neighbors, coords, &self.table.rules);
        self.apply(&result);

        Ok(if result.is_miss() {
            ActivateOutcome::Missed {
                time_delta: result.time_delta,
            }
        } else {
            ActivateOutcome::Matched(result)
        })
    }

    /// Advances the clock by one second for the run identified by `generation`.
    pub fn tick(&mut self, generation: Generation) -> TickOutcome {
        if generation != self.generation || !self.state.is_playing() {
            return TickOutcome::Stale;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.state = SessionState::Ended;
            log::debug!("Session ended with score {}", self.score);
            TickOutcome::Ended
        } else {
            TickOutcome::Counting {
                time_remaining: self.time_remaining,
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_session(self)
    }

    fn apply(&mut self, result: &MatchResult) {
        self.score = self.score.saturating_add(result.score_delta);

        let time = i64::from(self.time_remaining) + i64::from(result.time_delta);
        let clamped = time.clamp(0, i64::from(self.initial_seconds()));
        self.time_remaining = clamped.try_into().unwrap_or(0);

        for tile in &result.removed {
            if let Some(removed) = self.board.remove(tile.coords) {
                if let Some(special) = removed.special {
                    self.special_counts.decrement(special);
                }
            }
        }
    }
}
