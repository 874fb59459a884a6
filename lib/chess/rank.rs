use derive_more::{Display, Error};
use std::{ops::Sub, str::FromStr};

/// A row on the Xiangqi board.
///
/// Ranks are numbered from Red's side of the board, so that the river lies between the
/// [fifth][`Rank::Fifth`] and the [sixth][`Rank::Sixth`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Rank {
    #[display(fmt = "1")]
    First,
    #[display(fmt = "2")]
    Second,
    #[display(fmt = "3")]
    Third,
    #[display(fmt = "4")]
    Fourth,
    #[display(fmt = "5")]
    Fifth,
    #[display(fmt = "6")]
    Sixth,
    #[display(fmt = "7")]
    Seventh,
    #[display(fmt = "8")]
    Eighth,
    #[display(fmt = "9")]
    Ninth,
    #[display(fmt = "10")]
    Tenth,
}

impl Rank {
    pub(crate) const ALL: [Rank; 10] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
        Rank::Ninth,
        Rank::Tenth,
    ];

    /// Constructs [`Rank`] from its index in the range (0..=9), if in range.
    #[inline(always)]
    pub fn from_index(i: u8) -> Option<Self> {
        Self::ALL.get(i as usize).copied()
    }

    /// This rank's index in the range (0..=9).
    #[inline(always)]
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Returns an iterator over [`Rank`]s ordered by [index][`Rank::index`].
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }
}

impl Sub for Rank {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.index() as i8 - rhs.index() as i8
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseRankError {
    #[display(fmt = "failed to parse rank, expected decimal digits")]
    NotADigit,
    #[display(fmt = "failed to parse rank, expected integer in the range `(1..=10)`")]
    OutOfRange,
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseRankError::NotADigit);
        }

        // Leading zeros are harmless, but the value may not fit any integer type.
        let digits = s.trim_start_matches('0');
        match digits.parse::<u8>() {
            Ok(n @ 1..=10) => Rank::from_index(n - 1).ok_or(ParseRankError::OutOfRange),
            _ => Err(ParseRankError::OutOfRange),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn rank_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Rank>>(), size_of::<Rank>());
    }

    #[test]
    fn iter_returns_iterator_over_ranks_in_order() {
        assert_eq!(
            Vec::from_iter(Rank::iter()),
            Vec::from_iter((0..10).filter_map(Rank::from_index))
        );
    }

    #[proptest]
    fn from_index_constructs_rank_by_index(#[strategy(0u8..10)] i: u8) {
        assert_eq!(Rank::from_index(i).map(|r| r.index()), Some(i));
    }

    #[proptest]
    fn from_index_fails_if_index_out_of_range(#[strategy(10u8..)] i: u8) {
        assert_eq!(Rank::from_index(i), None);
    }

    #[proptest]
    fn subtracting_ranks_returns_distance(a: Rank, b: Rank) {
        assert_eq!(a - b, a.index() as i8 - b.index() as i8);
    }

    #[proptest]
    fn parsing_printed_rank_is_an_identity(r: Rank) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[test]
    fn parsing_rank_accepts_ten() {
        assert_eq!("10".parse(), Ok(Rank::Tenth));
    }

    #[proptest]
    fn parsing_rank_fails_if_out_of_range(#[filter(!(1..=10).contains(&#n))] n: u64) {
        assert_eq!(n.to_string().parse::<Rank>(), Err(ParseRankError::OutOfRange));
    }

    #[test]
    fn parsing_rank_fails_for_very_long_numbers() {
        assert_eq!(
            "100000000000000000000000000000".parse::<Rank>(),
            Err(ParseRankError::OutOfRange)
        );
    }

    #[proptest]
    fn parsing_rank_fails_if_not_all_digits(#[filter(!#s.bytes().all(|b| b.is_ascii_digit()))] s: String) {
        assert_eq!(s.parse::<Rank>(), Err(ParseRankError::NotADigit));
    }

    #[test]
    fn parsing_rank_fails_if_empty() {
        assert_eq!("".parse::<Rank>(), Err(ParseRankError::NotADigit));
    }
}
