use smallvec::SmallVec;

use super::*;

/// Generation strategy that scatters tiles over uniformly random empty slots, with special tiles capped per kind
/// relative to the number of tiles placed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, table: &DifficultyTable, difficulty: Difficulty) -> Result<GeneratedBoard> {
        use rand::distr::weighted::WeightedIndex;
        use rand::prelude::*;

        let rules = &table.rules;
        let config = table.get(difficulty);
        rules.validate()?;
        config.validate(difficulty)?;

        let total_slots = rules.total_slots();
        let tiles_to_place = config.tiles_to_place(rules);
        if tiles_to_place >= total_slots {
            // unreachable with a validated fill rate, but never spin on a full board
            return Err(GameError::InvalidFillRate(difficulty));
        }

        let max_special = max_special_tiles(config, tiles_to_place);
        let special_chance = config.special.total();

        let mut board = Board::empty(rules.size);
        let mut special_counts = SpecialCounts::new();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        for placed in 0..tiles_to_place {
            let free_slots = total_slots - placed;
            let place = rng.random_range(0..free_slots);
            let Some(coords) = board.nth_empty_slot(place) else {
                log::warn!(
                    "Ran out of empty slots after placing {} of {} tiles",
                    placed,
                    tiles_to_place
                );
                break;
            };

            let color = TileColor::ALL[rng.random_range(0..TileColor::ALL.len())];
            let mut tile = Tile::plain(u32::from(placed) + 1, color, coords);

            if rng.random::<f64>() < special_chance {
                let eligible: SmallVec<[Special; 4]> = Special::ALL
                    .into_iter()
                    .filter(|&special| special_counts[special] < max_special[special])
                    .collect();

                if !eligible.is_empty() {
                    match WeightedIndex::new(
                        eligible.iter().map(|&special| config.special.get(special)),
                    ) {
                        Ok(weights) => {
                            let special = eligible[weights.sample(&mut rng)];
                            special_counts.increment(special);
                            tile = tile.with_special(special);
                        }
                        Err(err) => {
                            log::warn!("Could not weigh special tiles, placing plain: {}", err);
                        }
                    }
                }
            }

            board.place(tile);
        }

        // double check tile count
        if board.occupied_count() != tiles_to_place {
            log::warn!(
                "Generated board count mismatch, actual: {}, requested: {}",
                board.occupied_count(),
                tiles_to_place
            );
        }
        log::debug!(
            "Generated {} board with {} tiles, specials: {:?}",
            difficulty,
            board.occupied_count(),
            special_counts
        );

        Ok(GeneratedBoard {
            board,
            special_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64, table: &DifficultyTable, difficulty: Difficulty) -> GeneratedBoard {
        RandomBoardGenerator::new(seed)
            .generate(table, difficulty)
            .unwrap()
    }

    #[test]
    fn places_exact_tile_count_for_every_difficulty() {
        let table = DifficultyTable::default();
        for difficulty in Difficulty::ALL {
            for seed in 0..8 {
                let generated = generate(seed, &table, difficulty);
                let expected = table.get(difficulty).tiles_to_place(&table.rules);

                assert_eq!(generated.board.occupied_count(), expected);
                assert_eq!(generated.board.iter_tiles().count(), usize::from(expected));
            }
        }
    }

    #[test]
    fn special_tiles_stay_under_their_caps() {
        let table = DifficultyTable::default();
        for difficulty in Difficulty::ALL {
            let config = table.get(difficulty);
            let max = max_special_tiles(config, config.tiles_to_place(&table.rules));
            for seed in 0..16 {
                let generated = generate(seed, &table, difficulty);
                let counted = count_special_tiles(&generated.board);

                assert_eq!(counted, generated.special_counts);
                for special in Special::ALL {
                    assert!(counted[special] <= max[special]);
                }
            }
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        let table = DifficultyTable::default();

        assert_eq!(
            generate(42, &table, Difficulty::Hard),
            generate(42, &table, Difficulty::Hard)
        );
    }

    #[test]
    fn tile_ids_are_unique_and_positions_match_slots() {
        let table = DifficultyTable::default();
        let generated = generate(7, &table, Difficulty::Easy);

        let mut ids: alloc::vec::Vec<_> = generated.board.iter_tiles().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), usize::from(generated.board.occupied_count()));

        for tile in generated.board.iter_tiles() {
            assert_eq!(generated.board.get(tile.coords), Some(tile));
        }
    }

    #[test]
    fn all_special_probability_produces_capped_specials() {
        let mut table = DifficultyTable::default();
        table.normal.special = SpecialRates {
            wildcard: 0.25,
            time_bonus: 0.25,
            multiplier: 0.25,
            bomb: 0.25,
        };
        let placed = table.normal.tiles_to_place(&table.rules);
        let max = max_special_tiles(&table.normal, placed);

        let generated = generate(3, &table, Difficulty::Normal);

        // every placement rolls special, so each kind fills up to its cap
        assert_eq!(generated.special_counts, max);
    }

    #[test]
    fn zero_probabilities_produce_plain_board() {
        let mut table = DifficultyTable::default();
        table.easy.special = SpecialRates {
            wildcard: 0.0,
            time_bonus: 0.0,
            multiplier: 0.0,
            bomb: 0.0,
        };

        let generated = generate(11, &table, Difficulty::Easy);

        assert_eq!(generated.special_counts.total(), 0);
    }

    #[test]
    fn misconfigured_fill_rate_fails_fast() {
        let mut table = DifficultyTable::default();
        table.hard.fill_rate = 1.5;

        assert_eq!(
            RandomBoardGenerator::new(0).generate(&table, Difficulty::Hard),
            Err(GameError::InvalidFillRate(Difficulty::Hard))
        );
    }
}
