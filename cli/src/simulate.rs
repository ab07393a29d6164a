use rand::prelude::*;
use tilematch_core::*;

/// Result of a headless run.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Summary {
    pub activations: u32,
    pub matches: u32,
    pub misses: u32,
    pub tiles_removed: u32,
    pub score: u32,
    pub seconds_played: u32,
}

/// Picks the empty slot whose activation would score the most right now, if any scores at all.
pub(crate) fn best_move(session: &GameSession) -> Option<Coord2> {
    let board = session.board();
    let rules = &session.table().rules;
    let (width, height) = board.size();

    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&coords| !board.is_occupied(coords))
        .map(|coords| {
            let result = evaluate(board, &find_neighbors(board, coords), coords, rules);
            (result.score_delta, coords)
        })
        .filter(|&(score, _)| score > 0)
        .max_by_key(|&(score, coords)| (score, std::cmp::Reverse(coords)))
        .map(|(_, coords)| coords)
}

/// Plays one run with a bot making `moves_per_second` activations per clock second.
///
/// With `greedy` the bot always takes the best scoring slot and only guesses once nothing scores.
pub(crate) fn run(
    session: &mut GameSession,
    difficulty: Difficulty,
    moves_per_second: u32,
    greedy: bool,
    seed: u64,
) -> anyhow::Result<Summary> {
    let generation = session.start(difficulty)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut summary = Summary::default();
    let (width, height) = session.board().size();

    while session.state().is_playing() {
        for _ in 0..moves_per_second.max(1) {
            let best = if greedy { best_move(session) } else { None };
            let coords =
                best.unwrap_or_else(|| (rng.random_range(0..width), rng.random_range(0..height)));

            match session.activate(coords)? {
                ActivateOutcome::Ignored => {}
                ActivateOutcome::Missed { .. } => {
                    summary.activations += 1;
                    summary.misses += 1;
                }
                ActivateOutcome::Matched(result) => {
                    summary.activations += 1;
                    summary.matches += 1;
                    summary.tiles_removed += result.removed.len() as u32;
                }
            }
        }

        if session.tick(generation).has_update() {
            summary.seconds_played += 1;
        }
    }

    summary.score = session.score();
    log::info!(
        "Simulated {} run: {} activations, {} matches, {} misses, score {}",
        difficulty,
        summary.activations,
        summary.matches,
        summary.misses,
        summary.score
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(DifficultyTable::default(), 21).unwrap()
    }

    #[test]
    fn run_ends_when_clock_runs_out() {
        let mut session = session();

        let summary = run(&mut session, Difficulty::TimeAttack, 2, true, 5).unwrap();

        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(session.time_remaining(), 0);
        assert_eq!(summary.score, session.score());
        assert!(summary.seconds_played >= 1);
    }

    #[test]
    fn random_bot_plays_to_the_end() {
        let mut session = session();

        let summary = run(&mut session, Difficulty::TimeAttack, 3, false, 8).unwrap();

        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(summary.activations, summary.matches + summary.misses);
        assert_eq!(summary.score, session.score());
    }

    #[test]
    fn greedy_bot_never_misses_while_moves_remain() {
        let mut session = session();
        session.start(Difficulty::Easy).unwrap();

        while let Some(coords) = best_move(&session) {
            let outcome = session.activate(coords).unwrap();
            assert!(matches!(outcome, ActivateOutcome::Matched(_)));
        }

        assert!(session.score() > 0);
        assert_eq!(
            session.special_counts(),
            count_special_tiles(session.board())
        );
    }
}
