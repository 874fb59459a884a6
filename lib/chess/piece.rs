use crate::chess::{Color, Role, Square};
use derive_more::Display;

/// Identifies a [`Piece`] on a [`Board`][`crate::chess::Board`] for as long as the board lives.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[display(fmt = "#{_0}")]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    /// This identifier's index in the range (0..32).
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A Xiangqi [piece][`Role`] of a certain [`Color`] and where it currently stands.
///
/// The role and color of a piece are fixed at creation,
/// its square changes as the game progresses and is cleared once captured.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "{} {}", color, role)]
pub struct Piece {
    color: Color,
    role: Role,
    square: Option<Square>,
}

impl Piece {
    #[inline(always)]
    pub(crate) fn new(role: Role, color: Color, square: Square) -> Self {
        Piece {
            color,
            role,
            square: Some(square),
        }
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        self.color
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The [`Square`] this piece stands on, unless it has been captured.
    #[inline(always)]
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    /// Whether this piece is still on the board.
    #[inline(always)]
    pub fn is_alive(&self) -> bool {
        self.square.is_some()
    }

    #[inline(always)]
    pub(crate) fn set_square(&mut self, square: Option<Square>) {
        self.square = square;
    }
}
