use crate::*;

/// Upper bound per special kind for a board holding `total_placed` tiles.
pub fn max_special_tiles(config: &DifficultyConfig, total_placed: CellCount) -> SpecialCounts {
    let mut max = SpecialCounts::new();
    for special in Special::ALL {
        max[special] = scale_count(total_placed, config.special.get(special));
    }
    max
}

/// Tallies the special tiles currently on `board`.
pub fn count_special_tiles(board: &Board) -> SpecialCounts {
    let mut counts = SpecialCounts::new();
    for special in board.iter_tiles().filter_map(|tile| tile.special) {
        counts.increment(special);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_special_tiles_for_normal_preset() {
        let max = max_special_tiles(&DifficultyConfig::normal(), 207);

        assert_eq!(max[Special::Wildcard], 6);
        assert_eq!(max[Special::TimeBonus], 3);
        assert_eq!(max[Special::Multiplier], 5);
        assert_eq!(max[Special::Bomb], 2);
    }

    #[test]
    fn count_special_tiles_ignores_plain_tiles() {
        let tiles = [
            Tile::plain(1, TileColor::Red, (0, 0)).with_special(Special::Bomb),
            Tile::plain(2, TileColor::Red, (1, 0)),
            Tile::plain(3, TileColor::Red, (2, 0)).with_special(Special::Bomb),
            Tile::plain(4, TileColor::Red, (0, 1)).with_special(Special::Wildcard),
        ];
        let board = Board::from_tiles((3, 2), &tiles).unwrap();

        let counts = count_special_tiles(&board);

        assert_eq!(counts[Special::Bomb], 2);
        assert_eq!(counts[Special::Wildcard], 1);
        assert_eq!(counts[Special::Multiplier], 0);
        assert_eq!(counts.total(), 3);
    }
}
