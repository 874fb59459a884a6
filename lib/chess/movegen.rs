use crate::chess::{Bitboard, Board, Color, PieceId, Role, Square};

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

impl Board {
    /// The [`Square`]s a piece could move to, ignoring whether its own general is left in check.
    ///
    /// Squares occupied by pieces of the same color are never candidates,
    /// nor are there any candidates for a captured piece.
    pub fn candidates(&self, id: PieceId) -> Bitboard {
        let p = &self[id];
        let (c, sq) = match p.square() {
            Some(sq) => (p.color(), sq),
            None => return Bitboard::empty(),
        };

        let targets = match p.role() {
            Role::General => self.general(c, sq),
            Role::Advisor => advisor(c, sq),
            Role::Elephant => self.elephant(sq),
            Role::Horse => self.horse(sq),
            Role::Chariot => self.chariot(sq),
            Role::Cannon => self.cannon(sq),
            Role::Soldier => soldier(c, sq),
        };

        targets.intersection(self.by_color(c).inverse())
    }

    /// The union of the [candidates][`Board::candidates`] of every piece of a [`Color`].
    pub fn attacks(&self, by: Color) -> Bitboard {
        self.iter()
            .filter(|(_, p)| p.color() == by)
            .fold(Bitboard::empty(), |bb, (id, _)| bb | self.candidates(id))
    }

    fn general(&self, c: Color, sq: Square) -> Bitboard {
        let steps: Bitboard = ORTHOGONAL
            .into_iter()
            .filter_map(|(dc, dr)| sq.offset(dc, dr))
            .collect();

        let forward = match c {
            Color::Red => 1,
            Color::Black => -1,
        };

        // The generals may never face each other on an open file.
        let facing = ray(sq, 0, forward)
            .find_map(|s| self.piece_at(s).map(|p| (s, p)))
            .filter(|(_, p)| p.role() == Role::General && p.color() != c)
            .map_or_else(Bitboard::empty, |(s, _)| s.bitboard());

        steps.intersection(Bitboard::palace(c)) | facing
    }

    fn elephant(&self, sq: Square) -> Bitboard {
        DIAGONAL
            .into_iter()
            .filter(|&(dc, dr)| matches!(sq.offset(dc, dr), Some(eye) if self.id_at(eye).is_none()))
            .filter_map(|(dc, dr)| sq.offset(2 * dc, 2 * dr))
            .collect()
    }

    fn horse(&self, sq: Square) -> Bitboard {
        ORTHOGONAL
            .into_iter()
            .filter(|&(dc, dr)| matches!(sq.offset(dc, dr), Some(leg) if self.id_at(leg).is_none()))
            .flat_map(|(dc, dr)| match (dc, dr) {
                (0, _) => [(1, 2 * dr), (-1, 2 * dr)],
                _ => [(2 * dc, 1), (2 * dc, -1)],
            })
            .filter_map(|(dc, dr)| sq.offset(dc, dr))
            .collect()
    }

    fn chariot(&self, sq: Square) -> Bitboard {
        let mut bb = Bitboard::empty();

        for (dc, dr) in ORTHOGONAL {
            for s in ray(sq, dc, dr) {
                bb = bb.with(s);
                if self.id_at(s).is_some() {
                    break;
                }
            }
        }

        bb
    }

    fn cannon(&self, sq: Square) -> Bitboard {
        let mut bb = Bitboard::empty();

        for (dc, dr) in ORTHOGONAL {
            let mut line = ray(sq, dc, dr);

            for s in line.by_ref() {
                if self.id_at(s).is_some() {
                    break;
                }

                bb = bb.with(s);
            }

            if let Some(s) = line.find(|&s| self.id_at(s).is_some()) {
                bb = bb.with(s);
            }
        }

        bb
    }
}

/// The squares stepping away from `sq` in a straight line, up to the edge of the board.
fn ray(sq: Square, dc: i8, dr: i8) -> impl Iterator<Item = Square> {
    std::iter::successors(sq.offset(dc, dr), move |s| s.offset(dc, dr))
}

fn advisor(c: Color, sq: Square) -> Bitboard {
    DIAGONAL
        .into_iter()
        .filter_map(|(dc, dr)| sq.offset(dc, dr))
        .collect::<Bitboard>()
        .intersection(Bitboard::palace(c))
}

fn soldier(c: Color, sq: Square) -> Bitboard {
    let forward = match c {
        Color::Red => sq.offset(0, 1),
        Color::Black => sq.offset(0, -1),
    };

    let crossed = !Bitboard::territory(c).contains(sq);
    let sideways = [sq.offset(-1, 0), sq.offset(1, 0)]
        .into_iter()
        .filter(|_| crossed);

    [forward].into_iter().chain(sideways).flatten().collect()
}
