use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, table: &DifficultyTable, difficulty: Difficulty) -> Result<GeneratedBoard>;
}

/// Freshly generated board together with the special tiles it was seeded with.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedBoard {
    pub board: Board,
    pub special_counts: SpecialCounts,
}
