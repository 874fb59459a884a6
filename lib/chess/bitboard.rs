use crate::chess::{Color, File, Rank, Square};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Constructor, Deref};
use std::fmt::{self, Write};

/// A set of squares on a Xiangqi board.
///
/// Bit `i` stands for the [`Square`] of [index][`Square::index`] `i`, bits past the 90th are
/// always clear.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Constructor,
    Deref,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
)]
#[repr(transparent)]
pub struct Bitboard(u128);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let sq = Square::new(file, rank);
                f.write_char(if self.contains(sq) { '■' } else { '◻' })?;
                f.write_char(if file < File::I { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

impl Bitboard {
    /// An empty board.
    #[inline(always)]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// A full board.
    #[inline(always)]
    pub const fn full() -> Self {
        Bitboard((1 << Square::COUNT) - 1)
    }

    /// The palace of a [`Color`], where its general and advisors are confined.
    ///
    /// # Example
    /// ```
    /// # use lib::chess::*;
    /// let palace = Bitboard::palace(Color::Red);
    /// assert_eq!(palace.len(), 9);
    /// assert!(palace.contains("e2".parse().unwrap()));
    /// assert!(!palace.contains("e4".parse().unwrap()));
    /// ```
    #[inline(always)]
    pub const fn palace(side: Color) -> Self {
        match side {
            Color::Red => Bitboard(0b111 << 3 | 0b111 << 12 | 0b111 << 21),
            Color::Black => Bitboard(0b111 << 66 | 0b111 << 75 | 0b111 << 84),
        }
    }

    /// The half of the board on a [`Color`]'s side of the river.
    #[inline(always)]
    pub const fn territory(side: Color) -> Self {
        match side {
            Color::Red => Bitboard((1 << 45) - 1),
            Color::Black => Bitboard(((1 << 45) - 1) << 45),
        }
    }

    /// The number of [`Square`]s in the set.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the board is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this [`Square`] is in the set.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        !(*self & sq.bitboard()).is_empty()
    }

    /// Adds a [`Square`] to this bitboard.
    #[inline(always)]
    pub fn with(&self, sq: Square) -> Self {
        *self | sq.bitboard()
    }

    /// Removes a [`Square`] from this bitboard.
    #[inline(always)]
    pub fn without(&self, sq: Square) -> Self {
        self.intersection(sq.bitboard().inverse())
    }

    /// The set of [`Square`]s not in this bitboard.
    #[inline(always)]
    pub const fn inverse(&self) -> Self {
        Bitboard(!self.0 & Bitboard::full().0)
    }

    /// The set of [`Square`]s in both bitboards.
    #[inline(always)]
    pub const fn intersection(&self, bb: Bitboard) -> Self {
        Bitboard(self.0 & bb.0)
    }

    /// The set of [`Square`]s in either bitboard.
    #[inline(always)]
    pub const fn union(&self, bb: Bitboard) -> Self {
        Bitboard(self.0 | bb.0)
    }

    /// An iterator over the [`Square`]s in this bitboard.
    #[inline(always)]
    pub fn iter(&self) -> Squares {
        Squares::new(*self)
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        sq.bitboard()
    }
}

impl FromIterator<Square> for Bitboard {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = Square>>(squares: I) -> Self {
        squares.into_iter().fold(Bitboard::empty(), |bb, sq| bb.with(sq))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        Squares::new(self)
    }
}

/// An iterator over the [`Square`]s in a [`Bitboard`].
#[derive(Debug, Constructor)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let sq = Square::from_index(self.0.trailing_zeros() as u8)?;
        self.0 ^= sq.bitboard();
        Some(sq)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for Squares {
    #[inline(always)]
    fn len(&self) -> usize {
        self.0.len()
    }
}
