use std::fmt::Write;
use tilematch_core::*;

/// Plain text rendering of a snapshot: a status line followed by one line per row.
///
/// Plain tiles show their color letter, special tiles their special letter, empty slots a dot.
pub(crate) fn board(snapshot: &SessionSnapshot) -> String {
    let (width, height) = snapshot.size;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} | score {} | {} | W{} T{} X{} B{}",
        snapshot.difficulty,
        snapshot.score,
        snapshot.clock(),
        snapshot.special_counts[Special::Wildcard],
        snapshot.special_counts[Special::TimeBonus],
        snapshot.special_counts[Special::Multiplier],
        snapshot.special_counts[Special::Bomb],
    );

    out.push_str("   ");
    for x in 0..width {
        out.push(char::from(b'0' + x % 10));
    }
    out.push('\n');

    let mut rows = vec![vec!['.'; usize::from(width)]; usize::from(height)];
    for tile in &snapshot.tiles {
        let symbol = match tile.special {
            Some(special) => special.symbol(),
            None => tile.color.symbol(),
        };
        rows[usize::from(tile.coords.1)][usize::from(tile.coords.0)] = symbol;
    }
    for (y, row) in rows.into_iter().enumerate() {
        let _ = writeln!(out, "{y:>2} {}", row.into_iter().collect::<String>());
    }
    out
}

pub(crate) fn outcome(outcome: &ActivateOutcome) -> Option<String> {
    match outcome {
        ActivateOutcome::Ignored => None,
        ActivateOutcome::Missed { time_delta } => Some(format!("miss, {time_delta}s")),
        ActivateOutcome::Matched(result) => {
            let mut line = format!(
                "{} pair(s), {} tile(s) removed, +{}",
                result.pairs.len(),
                result.removed.len(),
                result.score_delta
            );
            if result.multiplied {
                line.push_str(" (x2)");
            }
            if result.bomb_cleared > 0 {
                let _ = write!(line, ", bomb cleared {}", result.bomb_cleared);
            }
            if result.time_delta > 0 {
                let _ = write!(line, ", +{}s", result.time_delta);
            }
            Some(line)
        }
    }
}
