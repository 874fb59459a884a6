use crate::chess::{Bitboard, Board, Color, Move, Outcome, ParseSquareError, Piece, PieceId, Role, Square};
use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument};

/// The reason why a [`Board`] cannot host a [`Game`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum IllegalSetup {
    #[display(fmt = "the {_0} player has no general")]
    MissingGeneral(#[error(not(source))] Color),
    #[display(fmt = "the {_0} player has more than one general")]
    TooManyGenerals(#[error(not(source))] Color),
}

/// The reason why a [`Move`] was refused.
///
/// A refused move leaves the [`Game`] exactly as it was.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Rejection {
    #[display(fmt = "the game is over, {_0}")]
    GameOver(#[error(not(source))] Outcome),
    #[display(fmt = "there is no piece on square `{_0}`")]
    NoPiece(#[error(not(source))] Square),
    #[display(fmt = "the piece on square `{_0}` belongs to the {_1} player")]
    WrongOwner(Square, Color),
    #[display(fmt = "move `{_0}` does not follow the rules of its piece")]
    IllegalDestination(#[error(not(source))] Move),
    #[display(fmt = "move `{_0}` would leave the general in check")]
    SelfCheck(#[error(not(source))] Move),
}

/// The reason why [`Game::play`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
pub enum PlayError {
    #[display(fmt = "{_0}")]
    InvalidSquare(ParseSquareError),
    #[display(fmt = "{_0}")]
    Rejected(Rejection),
}

/// The effect of a [`Move`] accepted by [`Game::request_move`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Played {
    /// The turn passed on to the opponent.
    #[display(fmt = "moved")]
    Moved,

    /// The move decided the game.
    #[display(fmt = "won by {_0}")]
    Won(Outcome),
}

/// A game of Xiangqi.
///
/// This type guarantees that both sides have exactly one general and that
/// only moves allowed by the rules are ever committed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Game {
    board: Board,
    turn: Color,
    generals: [PieceId; 2],
    outcome: Option<Outcome>,
}

impl Default for Game {
    fn default() -> Self {
        let board = Board::default();
        let generals = [PieceId(4), PieceId(20)];

        debug_assert!(Color::iter()
            .zip(generals)
            .all(|(c, id)| board[id].role() == Role::General && board[id].color() == c));

        Game {
            board,
            turn: Color::Red,
            generals,
            outcome: None,
        }
    }
}

impl Game {
    /// Starts a game from an arbitrary arrangement of pieces.
    pub fn new(board: Board, turn: Color) -> Result<Self, IllegalSetup> {
        let mut generals = [None; 2];

        for (id, p) in board.iter().filter(|(_, p)| p.role() == Role::General) {
            if generals[p.color() as usize].replace(id).is_some() {
                return Err(IllegalSetup::TooManyGenerals(p.color()));
            }
        }

        let [red, black] = generals;
        Ok(Game {
            generals: [
                red.ok_or(IllegalSetup::MissingGeneral(Color::Red))?,
                black.ok_or(IllegalSetup::MissingGeneral(Color::Black))?,
            ],
            board,
            turn,
            outcome: None,
        })
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The result of the game if it has ended.
    #[inline(always)]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The current arrangement of pieces.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Piece`] on a [`Square`], if any.
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.piece_at(sq)
    }

    /// The general of a [`Color`], captured or not.
    #[inline(always)]
    pub fn general(&self, c: Color) -> &Piece {
        &self.board[self.generals[c as usize]]
    }

    /// An iterator over the pieces still on the board.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.board.iter().map(|(_, p)| p)
    }

    /// The [`Square`]s the piece on a [`Square`] could move to.
    ///
    /// Whether the move would leave its own general in check is not taken into account.
    pub fn candidates(&self, sq: Square) -> Bitboard {
        match self.board.id_at(sq) {
            Some(id) => self.board.candidates(id),
            None => Bitboard::empty(),
        }
    }

    /// Whether the general of a [`Color`] is attacked by any opposing piece.
    ///
    /// A general that has already been captured is considered in check.
    pub fn is_in_check(&self, c: Color) -> bool {
        self.exposes(&self.board, c)
    }

    /// Whether a [`Color`] has any move that leaves its general out of check.
    pub fn has_escaping_move(&self, c: Color) -> bool {
        let mut scratch = self.board.clone();
        self.candidate_moves(c)
            .any(|m| self.keeps_general_safe(&mut scratch, m))
    }

    /// Whether a [`Color`] is in check without any means to escape it.
    pub fn is_in_checkmate(&self, c: Color) -> bool {
        self.is_in_check(c) && !self.has_escaping_move(c)
    }

    /// An iterator over the moves the side to move may play.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        let mut scratch = self.board.clone();
        self.candidate_moves(self.turn)
            .filter(move |_| self.outcome.is_none())
            .filter(move |&m| self.keeps_general_safe(&mut scratch, m))
    }

    /// Plays a [`Move`] if allowed, otherwise returns the reason why not.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn request_move(&mut self, m: Move) -> Result<Played, Rejection> {
        if let Some(o) = self.outcome {
            return Err(Rejection::GameOver(o));
        }

        let id = match self.board.id_at(m.whence()) {
            Some(id) => id,
            None => return Err(Rejection::NoPiece(m.whence())),
        };

        let owner = self.board[id].color();
        if owner != self.turn {
            return Err(Rejection::WrongOwner(m.whence(), owner));
        }

        if !self.board.candidates(id).contains(m.whither()) {
            return Err(Rejection::IllegalDestination(m));
        }

        let undo = match self.board.apply(m) {
            Some(undo) => undo,
            None => return Err(Rejection::NoPiece(m.whence())),
        };

        if self.exposes(&self.board, self.turn) {
            self.board.revert(undo);
            debug!(%m, "rolled back move that exposes the general");
            return Err(Rejection::SelfCheck(m));
        }

        if let Some(captured) = undo.captured() {
            debug!(%m, piece = %self.board[captured], "captured");
        }

        let opponent = !self.turn;
        if self.has_escaping_move(opponent) {
            self.turn = opponent;
            return Ok(Played::Moved);
        }

        let outcome = if self.is_in_check(opponent) {
            Outcome::Checkmate(self.turn)
        } else {
            Outcome::Stalemate(self.turn)
        };

        info!(%outcome, "game over");
        self.outcome = Some(outcome);
        Ok(Played::Won(outcome))
    }

    /// Plays a move given in square notation, e.g. `game.play("b3", "e3")`.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn play(&mut self, whence: &str, whither: &str) -> Result<Played, PlayError> {
        let m = Move(whence.parse()?, whither.parse()?);
        Ok(self.request_move(m)?)
    }

    /// Every move of a [`Color`]'s pieces to one of their candidates.
    fn candidate_moves(&self, c: Color) -> impl Iterator<Item = Move> + '_ {
        self.board
            .iter()
            .filter(move |(_, p)| p.color() == c)
            .filter_map(|(id, p)| Some((id, p.square()?)))
            .flat_map(move |(id, whence)| {
                self.board
                    .candidates(id)
                    .into_iter()
                    .map(move |whither| Move(whence, whither))
            })
    }

    /// Whether the general of a [`Color`] is attacked on a [`Board`].
    fn exposes(&self, board: &Board, c: Color) -> bool {
        match board[self.generals[c as usize]].square() {
            Some(sq) => board.attacks(!c).contains(sq),
            None => true,
        }
    }

    /// Speculatively plays a [`Move`] on a scratch board and takes it back.
    fn keeps_general_safe(&self, scratch: &mut Board, m: Move) -> bool {
        let c = match scratch.piece_at(m.whence()) {
            Some(p) => p.color(),
            None => return false,
        };

        match scratch.apply(m) {
            None => false,
            Some(undo) => {
                let safe = !self.exposes(scratch, c);
                scratch.revert(undo);
                safe
            }
        }
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Game {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{prelude::*, sample::Selector};

        (0..64usize, any::<Selector>())
            .prop_map(|(n, selector)| {
                let mut game = Game::default();

                for _ in 0..n {
                    match selector.try_select(Vec::from_iter(game.moves())) {
                        None => break,
                        Some(m) => {
                            game.request_move(m).ok();
                        }
                    }
                }

                game
            })
            .boxed()
    }
}
