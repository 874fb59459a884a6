use crate::chess::{ParseSquareError, Square};
use derive_more::{Display, Error, From};
use std::str::FromStr;

/// A Xiangqi move in coordinate notation, e.g. `b3e3` or `a10a9`.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{_0}{_1}")]
pub struct Move(pub Square, pub Square);

impl Move {
    /// Constructs [`Move`] from its source and destination [`Square`]s.
    #[inline(always)]
    pub fn new(whence: Square, whither: Square) -> Self {
        Move(whence, whither)
    }

    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
#[display(fmt = "failed to parse move; {_0}")]
pub struct ParseMoveError(ParseSquareError);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or_else(|| s.len(), |(i, _)| i);

        Ok(Move(s[..i].parse()?, s[i..].parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{ParseFileError, ParseRankError};
    use test_strategy::proptest;

    #[proptest]
    fn move_has_a_source_and_a_destination(a: Square, b: Square) {
        assert_eq!(Move::new(a, b).whence(), a);
        assert_eq!(Move::new(a, b).whither(), b);
    }

    #[proptest]
    fn parsing_printed_move_is_an_identity(m: Move) {
        assert_eq!(m.to_string().parse(), Ok(m));
    }

    #[test]
    fn parsing_move_handles_two_digit_ranks() {
        let a10 = "a10".parse().unwrap();
        let a9 = "a9".parse().unwrap();
        assert_eq!("a10a9".parse(), Ok(Move(a10, a9)));
    }

    #[test]
    fn parsing_move_fails_if_destination_missing() {
        assert_eq!(
            "b3".parse::<Move>(),
            Err(ParseMoveError(ParseSquareError::InvalidFile(ParseFileError::NotALetter)))
        );
    }

    #[proptest]
    fn parsing_move_fails_if_source_invalid(sq: Square) {
        assert_eq!(
            ["a0", &sq.to_string()].concat().parse::<Move>(),
            Err(ParseMoveError(ParseSquareError::InvalidRank(ParseRankError::OutOfRange)))
        );
    }
}
