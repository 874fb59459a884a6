use crate::chess::Color;
use derive_more::Display;

/// One of the possible outcomes of a Xiangqi game.
///
/// There are no draws: a side left without any move that keeps its general safe loses,
/// whether or not it is in check.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    #[display(fmt = "checkmate by the {_0} player")]
    Checkmate(Color),

    #[display(fmt = "stalemate by the {_0} player")]
    Stalemate(Color),
}

impl Outcome {
    /// The winning side.
    #[inline(always)]
    pub fn winner(&self) -> Color {
        match *self {
            Outcome::Checkmate(c) | Outcome::Stalemate(c) => c,
        }
    }

    /// The losing side.
    #[inline(always)]
    pub fn loser(&self) -> Color {
        !self.winner()
    }
}
