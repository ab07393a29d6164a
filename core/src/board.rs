use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of slots, each either empty or holding one tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    slots: Array2<Option<Tile>>,
    occupied: CellCount,
}

impl Board {
    pub fn empty(size: Coord2) -> Self {
        Self {
            slots: Array2::default(size.to_nd_index()),
            occupied: 0,
        }
    }

    /// Builds a board from already placed tiles, mostly useful for fixed layouts.
    ///
    /// Tile ids must be unique among the tiles that end up on the board.
    pub fn from_tiles(size: Coord2, tiles: &[Tile]) -> Result<Self> {
        let mut board = Self::empty(size);
        for &tile in tiles {
            let coords = board.validate_coords(tile.coords)?;
            if board
                .iter_tiles()
                .any(|placed| placed.id == tile.id && placed.coords != coords)
            {
                return Err(GameError::DuplicateTileId(tile.id));
            }
            if board.is_occupied(coords) {
                log::warn!("Slot {:?} given twice, keeping the last tile", coords);
                board.remove(coords);
            }
            board.place(tile);
        }
        Ok(board)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.slots.dim();
        (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.validate_coords(coords).is_ok()
    }

    pub fn total_slots(&self) -> CellCount {
        self.slots.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn occupied_count(&self) -> CellCount {
        self.occupied
    }

    pub fn get(&self, coords: Coord2) -> Option<Tile> {
        self.slots.get(coords.to_nd_index()).copied().flatten()
    }

    pub fn is_occupied(&self, coords: Coord2) -> bool {
        self.get(coords).is_some()
    }

    /// Empty slots are counted in storage order, which is the order generation picks them in.
    pub fn nth_empty_slot(&self, n: CellCount) -> Option<Coord2> {
        self.slots
            .indexed_iter()
            .filter(|(_, slot)| slot.is_none())
            .nth(n.into())
            .and_then(|((x, y), _)| Some((x.try_into().ok()?, y.try_into().ok()?)))
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Occupied slots among the 8 surrounding `coords`.
    pub fn blast_area(&self, coords: Coord2) -> impl Iterator<Item = Tile> + '_ {
        self.slots
            .iter_neighbors(coords)
            .filter_map(|pos| self.get(pos))
    }

    pub(crate) fn place(&mut self, tile: Tile) {
        let slot = &mut self.slots[tile.coords.to_nd_index()];
        if slot.is_none() {
            self.occupied += 1;
        }
        *slot = Some(tile);
    }

    /// Empties a slot, returning the tile it held.
    pub(crate) fn remove(&mut self, coords: Coord2) -> Option<Tile> {
        let removed = self.slots.get_mut(coords.to_nd_index())?.take();
        if removed.is_some() {
            self.occupied -= 1;
        }
        removed
    }
}

impl Index<Coord2> for Board {
    type Output = Option<Tile>;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.slots[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn from_tiles_rejects_out_of_bounds() {
        let tiles = [Tile::plain(1, TileColor::Red, (3, 0))];

        assert_eq!(
            Board::from_tiles((3, 3), &tiles),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn from_tiles_rejects_shared_ids() {
        let tiles = [
            Tile::plain(7, TileColor::Red, (0, 0)),
            Tile::plain(7, TileColor::Blue, (1, 0)),
        ];

        assert_eq!(
            Board::from_tiles((3, 3), &tiles),
            Err(GameError::DuplicateTileId(TileId(7)))
        );
    }

    #[test]
    fn from_tiles_allows_replacing_a_slot_with_the_same_id() {
        let tiles = [
            Tile::plain(7, TileColor::Red, (0, 0)),
            Tile::plain(7, TileColor::Blue, (0, 0)),
        ];

        let board = Board::from_tiles((3, 3), &tiles).unwrap();

        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board[(0, 0)], Some(tiles[1]));
    }

    #[test]
    fn remove_tracks_occupancy() {
        let tiles = [
            Tile::plain(1, TileColor::Red, (0, 0)),
            Tile::plain(2, TileColor::Blue, (2, 1)),
        ];
        let mut board = Board::from_tiles((3, 2), &tiles).unwrap();

        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.remove((0, 0)), Some(tiles[0]));
        assert_eq!(board.remove((0, 0)), None);
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board[(2, 1)], Some(tiles[1]));
    }

    #[test]
    fn blast_area_skips_empty_slots() {
        let tiles = [
            Tile::plain(1, TileColor::Red, (1, 1)),
            Tile::plain(2, TileColor::Blue, (0, 0)),
            Tile::plain(3, TileColor::Green, (2, 2)),
            Tile::plain(4, TileColor::Green, (3, 3)),
        ];
        let board = Board::from_tiles((4, 4), &tiles).unwrap();

        let ids: Vec<_> = board.blast_area((1, 1)).map(|tile| tile.id).collect();

        assert_eq!(ids, [TileId(2), TileId(3)]);
    }

    #[test]
    fn nth_empty_slot_skips_occupied() {
        let tiles = [Tile::plain(1, TileColor::Red, (0, 0))];
        let board = Board::from_tiles((2, 2), &tiles).unwrap();

        assert_eq!(board.nth_empty_slot(0), Some((0, 1)));
        assert_eq!(board.nth_empty_slot(2), Some((1, 1)));
        assert_eq!(board.nth_empty_slot(3), None);
    }
}
