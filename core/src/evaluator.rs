use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// A special tile whose effect fired during a turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub special: Special,
    pub coords: Coord2,
}

/// Connection drawn from the activated slot to a matched tile, horizontal leg first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub start: Coord2,
    pub end: Coord2,
}

impl PathSegment {
    pub const fn corner(&self) -> Coord2 {
        (self.end.0, self.start.1)
    }

    /// Whether every slot strictly between the end points is empty.
    pub fn is_clear(&self, board: &Board) -> bool {
        let corner = self.corner();
        let horizontal = span(self.start.0, corner.0).map(|x| (x, self.start.1));
        let vertical = span(corner.1, self.end.1).map(|y| (corner.0, y));

        horizontal
            .chain(vertical)
            .filter(|&pos| pos != self.start && pos != self.end)
            .all(|pos| !board.is_occupied(pos))
    }
}

fn span(a: Coord, b: Coord) -> impl Iterator<Item = Coord> {
    a.min(b)..=a.max(b)
}

/// Everything a single activation does to the session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Matching direction pairs, in enumeration order.
    pub pairs: SmallVec<[(Direction, Direction); 6]>,
    /// Tiles to take off the board, each at most once.
    pub removed: Vec<Tile>,
    pub score_delta: u32,
    pub time_delta: i32,
    pub effects: Vec<AppliedEffect>,
    /// Tiles caught by bomb blasts, counted per bomb before deduplication.
    pub bomb_cleared: u32,
    pub multiplied: bool,
    pub paths: SmallVec<[PathSegment; 4]>,
}

impl MatchResult {
    pub fn is_miss(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn base_score(&self) -> u32 {
        self.pairs.len() as u32
    }

    pub fn removed_ids(&self) -> BTreeSet<TileId> {
        self.removed.iter().map(|tile| tile.id).collect()
    }

    fn push_removed(&mut self, tile: Tile) {
        if !self.removed.iter().any(|removed| removed.id == tile.id) {
            self.removed.push(tile);
        }
    }
}

/// Resolves the outcome of activating `activated` given its nearest `neighbors`.
///
/// A pair of neighbors matches when both share a color or either is a wildcard. Special effects are triggered by
/// the directly matched tiles only; tiles swept up by a bomb blast are removed without firing their own effect.
pub fn evaluate(board: &Board, neighbors: &Neighbors, activated: Coord2, rules: &Rules) -> MatchResult {
    let present: SmallVec<[(Direction, Tile); 4]> = neighbors.iter().collect();

    let mut result = MatchResult::default();
    for (i, &(first_dir, first)) in present.iter().enumerate() {
        for &(second_dir, second) in &present[i + 1..] {
            if first.matches(&second) {
                result.pairs.push((first_dir, second_dir));
            }
        }
    }

    if result.is_miss() {
        result.time_delta = -seconds(rules.time_penalty);
        log::trace!("Miss at {:?}, {}s penalty", activated, rules.time_penalty);
        return result;
    }

    let matched: SmallVec<[Tile; 4]> = present
        .iter()
        .filter(|(direction, _)| {
            result
                .pairs
                .iter()
                .any(|&(a, b)| a == *direction || b == *direction)
        })
        .map(|&(_, tile)| tile)
        .collect();

    for tile in &matched {
        result.push_removed(*tile);
        result.paths.push(PathSegment {
            start: activated,
            end: tile.coords,
        });
        if let Some(special) = tile.special {
            result.effects.push(AppliedEffect {
                special,
                coords: tile.coords,
            });
        }
    }

    result.multiplied = matched.iter().any(|tile| tile.is(Special::Multiplier));
    if matched.iter().any(|tile| tile.is(Special::TimeBonus)) {
        result.time_delta = seconds(rules.time_bonus);
    }

    for bomb in matched.iter().filter(|tile| tile.is(Special::Bomb)) {
        for caught in board.blast_area(bomb.coords) {
            result.bomb_cleared += 1;
            result.push_removed(caught);
        }
    }

    // neighbors caught by a blast get a line too
    for &(_, tile) in &present {
        let blasted = !matched.iter().any(|m| m.id == tile.id)
            && result.removed.iter().any(|removed| removed.id == tile.id);
        if blasted {
            result.paths.push(PathSegment {
                start: activated,
                end: tile.coords,
            });
        }
    }

    let factor = if result.multiplied { 2 } else { 1 };
    result.score_delta = (result.base_score() + result.bomb_cleared) * factor;

    log::trace!(
        "Match at {:?}: {} pairs, {} blasted, {} removed, +{} points",
        activated,
        result.pairs.len(),
        result.bomb_cleared,
        result.removed.len(),
        result.score_delta
    );
    result
}

fn seconds(value: u32) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}
