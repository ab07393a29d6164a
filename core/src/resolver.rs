use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Nearest tile in each cardinal direction from an activated slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub up: Option<Tile>,
    pub right: Option<Tile>,
    pub down: Option<Tile>,
    pub left: Option<Tile>,
}

impl Neighbors {
    pub const fn get(&self, direction: Direction) -> Option<Tile> {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    pub fn set(&mut self, direction: Direction, tile: Option<Tile>) {
        let slot = match direction {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        };
        *slot = tile;
    }

    /// Present neighbors in `Direction::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Tile)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| Some((direction, self.get(direction)?)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Scans outward from `coords` in each cardinal direction, stopping at the first occupied slot or the board edge.
///
/// The activated slot itself is expected to be empty; callers skip occupied slots before resolving.
pub fn find_neighbors(board: &Board, coords: Coord2) -> Neighbors {
    let mut neighbors = Neighbors::default();
    for direction in Direction::ALL {
        neighbors.set(direction, nearest_in_direction(board, coords, direction));
    }
    neighbors
}

fn nearest_in_direction(board: &Board, coords: Coord2, direction: Direction) -> Option<Tile> {
    let bounds = board.size();
    let mut pos = coords;
    loop {
        pos = apply_delta(pos, direction.delta(), bounds)?;
        if let Some(tile) = board.get(pos) {
            return Some(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //   0 1 2 3 4
    // 0 . . r . .
    // 1 . . . . .
    // 2 b . * . g
    // 3 . . . . .
    // 4 . . . . .
    fn cross_board() -> Board {
        Board::from_tiles(
            (5, 5),
            &[
                Tile::plain(1, TileColor::Red, (2, 0)),
                Tile::plain(2, TileColor::Blue, (0, 2)),
                Tile::plain(3, TileColor::Green, (4, 2)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn finds_nearest_tile_at_any_distance() {
        let neighbors = find_neighbors(&cross_board(), (2, 2));

        assert_eq!(neighbors.up.map(|t| t.id), Some(TileId(1)));
        assert_eq!(neighbors.left.map(|t| t.id), Some(TileId(2)));
        assert_eq!(neighbors.right.map(|t| t.id), Some(TileId(3)));
        assert_eq!(neighbors.down, None);
    }

    #[test]
    fn stops_at_first_occupied_slot() {
        let mut board = cross_board();
        board.place(Tile::plain(4, TileColor::Teal, (3, 2)));

        let neighbors = find_neighbors(&board, (2, 2));

        assert_eq!(neighbors.right.map(|t| t.id), Some(TileId(4)));
    }

    #[test]
    fn ignores_diagonals() {
        let board = Board::from_tiles((3, 3), &[Tile::plain(1, TileColor::Red, (0, 0))]).unwrap();

        assert!(find_neighbors(&board, (1, 1)).is_empty());
    }

    #[test]
    fn edge_slot_has_no_neighbor_past_the_edge() {
        let neighbors = find_neighbors(&cross_board(), (0, 0));

        assert_eq!(neighbors.up, None);
        assert_eq!(neighbors.left, None);
        assert_eq!(neighbors.right.map(|t| t.id), Some(TileId(1)));
        assert_eq!(neighbors.down.map(|t| t.id), Some(TileId(2)));
    }
}
