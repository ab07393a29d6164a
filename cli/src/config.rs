use anyhow::Context;
use std::fs;
use std::path::Path;
use tilematch_core::*;

/// Loads the difficulty table from `path`, or the built-in presets when no path is given.
///
/// The table is validated here so a broken file is reported before any session starts.
pub(crate) fn load_table(path: Option<&Path>) -> anyhow::Result<DifficultyTable> {
    let Some(path) = path else {
        return Ok(DifficultyTable::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read difficulty table {}", path.display()))?;
    let table = parse_table(&text)
        .with_context(|| format!("Invalid difficulty table {}", path.display()))?;
    log::debug!("Loaded difficulty table from {}", path.display());
    Ok(table)
}

pub(crate) fn parse_table(text: &str) -> anyhow::Result<DifficultyTable> {
    let table: DifficultyTable = toml::from_str(text)?;
    Ok(table.validated()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_presets_match_builtin_table() {
        let table = parse_table(include_str!("../presets.toml")).unwrap();

        assert_eq!(table, DifficultyTable::default());
    }

    #[test]
    fn partial_file_keeps_other_presets() {
        let table = parse_table(
            r#"
            [hard]
            fill_rate = 0.5
            initial_seconds = 45
            special = { wildcard = 0.1, time_bonus = 0.0, multiplier = 0.0, bomb = 0.0 }
            "#,
        )
        .unwrap();

        assert_eq!(table.hard.initial_seconds, 45);
        assert_eq!(table.easy, DifficultyConfig::easy());
        assert_eq!(table.rules, Rules::default());
    }

    #[test]
    fn full_fill_rate_is_reported() {
        let err = parse_table(
            r#"
            [normal]
            fill_rate = 1.0
            initial_seconds = 120
            special = { wildcard = 0.0, time_bonus = 0.0, multiplier = 0.0, bomb = 0.0 }
            "#,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::InvalidFillRate(Difficulty::Normal))
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_table(Some(Path::new("/nonexistent/tilematch.toml"))).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/tilematch.toml"));
    }
}
