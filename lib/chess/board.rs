use crate::chess::{Bitboard, Color, File, Move, Piece, PieceId, Rank, Role, Square};
use arrayvec::ArrayVec;
use derive_more::{Display, Error};
use std::fmt::{self, Write};
use std::ops::Index;

/// The Xiangqi board.
///
/// Pieces live in an arena owned by the board and are addressed by [`PieceId`],
/// while each [`Square`] maps back to the piece that stands on it, if any.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<PieceId>; Square::COUNT],
    pieces: ArrayVec<Piece, 32>,
}

impl Default for Board {
    fn default() -> Self {
        use Role::*;

        const BACK: [Role; 9] = [
            Chariot, Horse, Elephant, Advisor, General, Advisor, Elephant, Horse, Chariot,
        ];

        let mut pieces = ArrayVec::new();
        for c in Color::iter() {
            let (back, cannons, soldiers) = match c {
                Color::Red => (Rank::First, Rank::Third, Rank::Fourth),
                Color::Black => (Rank::Tenth, Rank::Eighth, Rank::Seventh),
            };

            for (f, r) in File::iter().zip(BACK) {
                pieces.push(Piece::new(r, c, Square::new(f, back)));
            }

            for f in [File::B, File::H] {
                pieces.push(Piece::new(Cannon, c, Square::new(f, cannons)));
            }

            for f in [File::A, File::C, File::E, File::G, File::I] {
                pieces.push(Piece::new(Soldier, c, Square::new(f, soldiers)));
            }
        }

        let mut squares = [None; Square::COUNT];
        for (i, p) in pieces.iter().enumerate() {
            if let Some(sq) = p.square() {
                squares[sq.index() as usize] = Some(PieceId(i as u8));
            }
        }

        Board { squares, pieces }
    }
}

/// The reason why spawning a [`Piece`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum SpawnError {
    #[display(fmt = "square `{_0}` is already occupied")]
    Occupied(#[error(not(source))] Square),
    #[display(fmt = "the board cannot hold more than 32 pieces")]
    TooManyPieces,
}

/// Everything needed to take back a [`Move`] applied to a [`Board`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Undo {
    mover: PieceId,
    played: Move,
    captured: Option<PieceId>,
}

impl Undo {
    /// The [`Move`] this record takes back.
    #[inline(always)]
    pub fn played(&self) -> Move {
        self.played
    }

    /// The piece captured by the move, if any.
    #[inline(always)]
    pub fn captured(&self) -> Option<PieceId> {
        self.captured
    }
}

impl Board {
    /// A board without any pieces.
    #[inline(always)]
    pub fn empty() -> Self {
        Board {
            squares: [None; Square::COUNT],
            pieces: ArrayVec::new(),
        }
    }

    /// Adds a new [`Piece`] to the board.
    pub fn spawn(&mut self, role: Role, color: Color, sq: Square) -> Result<PieceId, SpawnError> {
        if self.squares[sq.index() as usize].is_some() {
            return Err(SpawnError::Occupied(sq));
        }

        let id = PieceId(self.pieces.len() as u8);
        self.pieces
            .try_push(Piece::new(role, color, sq))
            .map_err(|_| SpawnError::TooManyPieces)?;

        self.squares[sq.index() as usize] = Some(id);
        debug_assert!(self.is_consistent());
        Ok(id)
    }

    /// The identifier of the [`Piece`] on a [`Square`], if any.
    #[inline(always)]
    pub fn id_at(&self, sq: Square) -> Option<PieceId> {
        self.squares[sq.index() as usize]
    }

    /// The [`Piece`] on a [`Square`], if any.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        Some(&self[self.id_at(sq)?])
    }

    /// Places a piece on a [`Square`], vacating the square it stood on before.
    ///
    /// Returns the piece previously on the square, which is now captured.
    pub fn place(&mut self, id: PieceId, sq: Square) -> Option<PieceId> {
        let captured = self.squares[sq.index() as usize]
            .replace(id)
            .filter(|&c| c != id);

        if let Some(c) = captured {
            self.pieces[c.index()].set_square(None);
        }

        match self.pieces[id.index()].square() {
            Some(old) if old != sq => self.squares[old.index() as usize] = None,
            _ => {}
        }

        self.pieces[id.index()].set_square(Some(sq));
        debug_assert!(self.is_consistent());
        captured
    }

    /// Takes the piece off a [`Square`], if any.
    pub fn remove(&mut self, sq: Square) -> Option<PieceId> {
        let id = self.squares[sq.index() as usize].take()?;
        self.pieces[id.index()].set_square(None);
        debug_assert!(self.is_consistent());
        Some(id)
    }

    /// Moves the piece on the source square of a [`Move`] to its destination.
    ///
    /// Whatever stands on the destination is captured.
    /// Returns [`None`] and leaves the board untouched if the source square is empty.
    pub fn apply(&mut self, m: Move) -> Option<Undo> {
        let mover = self.id_at(m.whence())?;
        let captured = self.place(mover, m.whither());

        Some(Undo {
            mover,
            played: m,
            captured,
        })
    }

    /// Takes back a [`Move`], restoring any captured piece.
    pub fn revert(&mut self, undo: Undo) {
        let Undo {
            mover,
            played: Move(whence, whither),
            captured,
        } = undo;

        self.squares[whither.index() as usize] = captured;
        if let Some(c) = captured {
            self.pieces[c.index()].set_square(Some(whither));
        }

        self.squares[whence.index() as usize] = Some(mover);
        self.pieces[mover.index()].set_square(Some(whence));
        debug_assert!(self.is_consistent());
    }

    /// [`Square`]s occupied by any piece.
    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.iter().filter_map(|(_, p)| p.square()).collect()
    }

    /// [`Square`]s occupied by pieces of a [`Color`].
    #[inline(always)]
    pub fn by_color(&self, c: Color) -> Bitboard {
        self.iter()
            .filter(|(_, p)| p.color() == c)
            .filter_map(|(_, p)| p.square())
            .collect()
    }

    /// An iterator over the pieces still on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive())
            .map(|(i, p)| (PieceId(i as u8), p))
    }

    fn is_consistent(&self) -> bool {
        let forward = self.pieces.iter().enumerate().all(|(i, p)| match p.square() {
            Some(sq) => self.squares[sq.index() as usize] == Some(PieceId(i as u8)),
            None => true,
        });

        let backward = Square::iter().all(|sq| match self.squares[sq.index() as usize] {
            Some(id) => self.pieces.get(id.index()).and_then(Piece::square) == Some(sq),
            None => true,
        });

        forward && backward
    }
}

impl Index<PieceId> for Board {
    type Output = Piece;

    #[inline(always)]
    fn index(&self, id: PieceId) -> &Self::Output {
        &self.pieces[id.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    None => f.write_char('.')?,
                    Some(p) if p.color() == Color::Red => f.write_char(p.role().symbol())?,
                    Some(p) => f.write_char(p.role().symbol().to_ascii_lowercase())?,
                }

                f.write_char(if file < File::I { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, prelude::*};

        vec(any::<(Role, Color, Square)>(), 0..=32)
            .prop_map(|pieces| {
                let mut board = Board::empty();
                for (r, c, sq) in pieces {
                    board.spawn(r, c, sq).ok();
                }

                board
            })
            .boxed()
    }
}
