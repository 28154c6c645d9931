use std::cmp::Ordering;

use super::state::{Score, Side};

/// Outcome shown by the winner announcement before a restart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Winner(Side),
    Tie,
}

impl Verdict {
    pub const SUBTITLE: &'static str = "Restarting...";

    pub fn from_score(score: &Score) -> Self {
        match score.left.cmp(&score.right) {
            Ordering::Greater => Verdict::Winner(Side::Left),
            Ordering::Less => Verdict::Winner(Side::Right),
            Ordering::Equal => Verdict::Tie,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Winner(Side::Left) => "Player 1 Wins!",
            Verdict::Winner(Side::Right) => "Player 2 Wins!",
            Verdict::Tie => "It's a Tie!",
        }
    }
}
