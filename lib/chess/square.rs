use crate::chess::{Bitboard, File, ParseFileError, ParseRankError, Rank};
use derive_more::{Display, Error, From};
use std::{convert::TryFrom, str::FromStr};

/// A square on the Xiangqi board.
///
/// Pieces stand on the intersections of the board's lines, a square is one such point.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}{}", file, rank)]
pub struct Square {
    pub rank: Rank,
    pub file: File,
}

impl Square {
    /// The number of squares on the board.
    pub const COUNT: usize = 90;

    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub fn new(file: File, rank: Rank) -> Self {
        Square { rank, file }
    }

    /// Constructs [`Square`] from zero-based column and row coordinates.
    ///
    /// The square `(0, 0)` is the left corner on Red's side of the board.
    #[inline(always)]
    pub fn from_coords(column: u8, row: u8) -> Result<Self, SquareOutOfRange> {
        match (File::from_index(column), Rank::from_index(row)) {
            (Some(f), Some(r)) => Ok(Square::new(f, r)),
            _ => Err(SquareOutOfRange),
        }
    }

    /// Constructs [`Square`] from its index in the range (0..90), if in range.
    #[inline(always)]
    pub fn from_index(i: u8) -> Option<Self> {
        Square::from_coords(i % 9, i / 9).ok()
    }

    /// This square's [`File`].
    #[inline(always)]
    pub fn file(&self) -> File {
        self.file
    }

    /// This square's [`Rank`].
    #[inline(always)]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// This square's zero-based `(column, row)` coordinates.
    #[inline(always)]
    pub fn coords(&self) -> (u8, u8) {
        (self.file.index(), self.rank.index())
    }

    /// This square's index in the range (0..90).
    #[inline(always)]
    pub fn index(&self) -> u8 {
        self.rank.index() * 9 + self.file.index()
    }

    /// The square reached by stepping `dc` columns and `dr` rows, unless off the board.
    #[inline(always)]
    pub fn offset(&self, dc: i8, dr: i8) -> Option<Self> {
        let column = u8::try_from(self.file.index() as i8 + dc).ok()?;
        let row = u8::try_from(self.rank.index() as i8 + dr).ok()?;
        Square::from_coords(column, row).ok()
    }

    /// Returns a [`Bitboard`] that only contains this square.
    #[inline(always)]
    pub fn bitboard(self) -> Bitboard {
        Bitboard::new(1 << self.index())
    }

    /// Returns an iterator over all [`Square`]s ordered by [index][`Square::index`].
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT).map(|i| Square::new(File::ALL[i % 9], Rank::ALL[i / 9]))
    }
}

/// The reason why converting [`Square`] from coordinates failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "expected coordinates in the range `(0..=8, 0..=9)`")]
pub struct SquareOutOfRange;

impl TryFrom<(u8, u8)> for Square {
    type Error = SquareOutOfRange;

    #[inline(always)]
    fn try_from((column, row): (u8, u8)) -> Result<Self, Self::Error> {
        Square::from_coords(column, row)
    }
}

impl From<Square> for (u8, u8) {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        sq.coords()
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
#[display(fmt = "unable to parse square; {}")]
pub enum ParseSquareError {
    #[display(fmt = "invalid file")]
    InvalidFile(ParseFileError),
    #[display(fmt = "invalid rank")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        let file = s[..i].parse()?;
        let rank = s[i..].parse()?;
        Ok(Square::new(file, rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn square_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Square>>(), size_of::<Square>());
    }

    #[test]
    fn iter_returns_every_square_once() {
        assert_eq!(Square::iter().len(), Square::COUNT);
        assert!(Square::iter().enumerate().all(|(i, sq)| sq.index() as usize == i));
    }

    #[proptest]
    fn new_constructs_square_from_pair_of_file_and_rank(sq: Square) {
        assert_eq!(Square::new(sq.file(), sq.rank()), sq);
    }

    #[proptest]
    fn square_has_an_index(sq: Square) {
        assert_eq!(Square::from_index(sq.index()), Some(sq));
    }

    #[proptest]
    fn from_index_fails_if_index_out_of_range(#[strategy(90u8..)] i: u8) {
        assert_eq!(Square::from_index(i), None);
    }

    #[proptest]
    fn square_has_coordinates(sq: Square) {
        let (column, row): (u8, u8) = sq.into();
        assert_eq!(Square::try_from((column, row)), Ok(sq));
        assert_eq!(column, sq.file().index());
        assert_eq!(row, sq.rank().index());
    }

    #[proptest]
    fn converting_square_from_coordinates_out_of_range_fails(
        column: u8,
        #[filter(#column > 8 || #row > 9)] row: u8,
    ) {
        assert_eq!(Square::from_coords(column, row), Err(SquareOutOfRange));
    }

    #[proptest]
    fn offset_steps_by_the_given_distance(sq: Square, #[strategy(-9i8..=9)] dc: i8, #[strategy(-10i8..=10)] dr: i8) {
        let (column, row) = sq.coords();
        match sq.offset(dc, dr) {
            Some(t) => assert_eq!((t.file() - sq.file(), t.rank() - sq.rank()), (dc, dr)),
            None => assert!(
                !(0..9).contains(&(column as i8 + dc)) || !(0..10).contains(&(row as i8 + dr))
            ),
        }
    }

    #[proptest]
    fn square_has_an_equivalent_bitboard(sq: Square) {
        assert_eq!(Vec::from_iter(sq.bitboard()), vec![sq]);
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(sq.to_string().parse(), Ok(sq));
    }

    #[test]
    fn notation_starts_at_reds_left_corner() {
        assert_eq!("a1".parse::<Square>().map(|sq| sq.coords()), Ok((0, 0)));
        assert_eq!("i10".parse::<Square>().map(|sq| sq.coords()), Ok((8, 9)));
        assert_eq!("E3".parse::<Square>().map(|sq| sq.coords()), Ok((4, 2)));
    }

    #[test]
    fn parsing_square_fails_if_off_board() {
        assert_eq!(
            "j1".parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError::OutOfRange))
        );

        assert_eq!(
            "a11".parse::<Square>(),
            Err(ParseSquareError::InvalidRank(ParseRankError::OutOfRange))
        );

        assert_eq!(
            "a0".parse::<Square>(),
            Err(ParseSquareError::InvalidRank(ParseRankError::OutOfRange))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_file_is_not_a_letter(
        #[filter(!#c.is_alphabetic())] c: char,
        r: Rank,
    ) {
        assert_eq!(
            [c.to_string(), r.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError::NotALetter))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_rank_is_not_all_digits(
        f: File,
        #[filter(!#s.bytes().all(|b| b.is_ascii_digit()))] s: String,
    ) {
        assert_eq!(
            [f.to_string(), s].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidRank(ParseRankError::NotADigit))
        );
    }

    #[test]
    fn parsing_square_fails_if_empty() {
        assert_eq!(
            "".parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError::NotALetter))
        );
    }
}
