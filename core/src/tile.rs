use core::fmt;
use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

use crate::*;

/// Identity of a tile, unique on the board it was generated for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    Teal,
    Yellow,
    Gray,
}

impl TileColor {
    pub const ALL: [TileColor; 8] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Orange,
        Self::Teal,
        Self::Yellow,
        Self::Gray,
    ];

    /// Single-letter tag, handy for text renderings of the board.
    pub const fn symbol(self) -> char {
        match self {
            Self::Red => 'r',
            Self::Blue => 'b',
            Self::Green => 'g',
            Self::Purple => 'p',
            Self::Orange => 'o',
            Self::Teal => 't',
            Self::Yellow => 'y',
            Self::Gray => 'a',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Special {
    /// Matches any color.
    Wildcard,
    /// Adds time to the clock when removed.
    TimeBonus,
    /// Doubles the score of the turn it is removed in.
    Multiplier,
    /// Clears the eight surrounding slots when removed.
    Bomb,
}

impl Special {
    pub const ALL: [Special; 4] = [
        Self::Wildcard,
        Self::TimeBonus,
        Self::Multiplier,
        Self::Bomb,
    ];

    const fn slot(self) -> usize {
        match self {
            Self::Wildcard => 0,
            Self::TimeBonus => 1,
            Self::Multiplier => 2,
            Self::Bomb => 3,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Wildcard => 'W',
            Self::TimeBonus => 'T',
            Self::Multiplier => 'X',
            Self::Bomb => 'B',
        }
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wildcard => "wildcard",
            Self::TimeBonus => "time bonus",
            Self::Multiplier => "multiplier",
            Self::Bomb => "bomb",
        })
    }
}

/// A placed tile. Position and special kind never change once placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub color: TileColor,
    pub coords: Coord2,
    pub special: Option<Special>,
}

impl Tile {
    pub const fn plain(id: u32, color: TileColor, coords: Coord2) -> Self {
        Self {
            id: TileId(id),
            color,
            coords,
            special: None,
        }
    }

    pub const fn with_special(mut self, special: Special) -> Self {
        self.special = Some(special);
        self
    }

    pub fn is(&self, special: Special) -> bool {
        self.special == Some(special)
    }

    pub fn is_wildcard(&self) -> bool {
        self.is(Special::Wildcard)
    }

    /// Two tiles match when they share a color or either one is a wildcard.
    pub fn matches(&self, other: &Tile) -> bool {
        self.color == other.color || self.is_wildcard() || other.is_wildcard()
    }
}

/// Number of tiles per special kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCounts([CellCount; 4]);

impl SpecialCounts {
    pub const fn new() -> Self {
        Self([0; 4])
    }

    pub fn get(&self, special: Special) -> CellCount {
        self[special]
    }

    pub fn total(&self) -> CellCount {
        self.0.iter().copied().fold(0, CellCount::saturating_add)
    }

    pub fn increment(&mut self, special: Special) {
        self[special] = self[special].saturating_add(1);
    }

    /// Never goes below zero.
    pub fn decrement(&mut self, special: Special) {
        self[special] = self[special].saturating_sub(1);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Special, CellCount)> + '_ {
        Special::ALL.into_iter().map(|special| (special, self[special]))
    }
}

impl Index<Special> for SpecialCounts {
    type Output = CellCount;

    fn index(&self, special: Special) -> &Self::Output {
        &self.0[special.slot()]
    }
}

impl IndexMut<Special> for SpecialCounts {
    fn index_mut(&mut self, special: Special) -> &mut Self::Output {
        &mut self.0[special.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_any_color() {
        let wild = Tile::plain(1, TileColor::Red, (0, 0)).with_special(Special::Wildcard);
        for color in TileColor::ALL {
            let other = Tile::plain(2, color, (1, 0));
            assert!(wild.matches(&other));
            assert!(other.matches(&wild));
        }
    }

    #[test]
    fn plain_tiles_match_only_same_color() {
        let red = Tile::plain(1, TileColor::Red, (0, 0));
        let blue = Tile::plain(2, TileColor::Blue, (1, 0));
        let bomb_red = Tile::plain(3, TileColor::Red, (2, 0)).with_special(Special::Bomb);

        assert!(!red.matches(&blue));
        assert!(red.matches(&bomb_red));
    }

    #[test]
    fn counts_saturate_at_zero() {
        let mut counts = SpecialCounts::new();
        counts.increment(Special::Bomb);
        counts.decrement(Special::Bomb);
        counts.decrement(Special::Bomb);

        assert_eq!(counts[Special::Bomb], 0);
        assert_eq!(counts.total(), 0);
    }
}
