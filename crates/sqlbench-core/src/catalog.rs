//! Problem catalog grouping

use serde::Serialize;

use crate::types::{Difficulty, Problem};

/// Problems of one difficulty, in backend order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyGroup {
    pub difficulty: Difficulty,
    pub problems: Vec<Problem>,
}

/// Group problems into easy, medium, hard (always all three, possibly empty).
pub fn group_by_difficulty(problems: &[Problem]) -> Vec<DifficultyGroup> {
    Difficulty::ALL
        .iter()
        .map(|&difficulty| DifficultyGroup {
            difficulty,
            problems: problems
                .iter()
                .filter(|p| p.difficulty == difficulty)
                .cloned()
                .collect(),
        })
        .collect()
}
