use super::kind::PieceType;
use super::piece::Piece;
use super::placement::Placement;
use super::side::Side;
use super::square::Square;
use crate::Arbitrary;
use crate::AREA;

/// The board plus the side to move: everything a ply starts from.
///
/// No side ever holds more pieces of a type than its starting
/// allotment; [`Position::place`] enforces this for every piece
/// put on the board.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Position {
    side: Side,
    board: [Option<Piece>; AREA],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty(Side::Gold)
    }
}

impl Position {
    pub fn empty(side: Side) -> Self {
        Self {
            side,
            board: [None; AREA],
        }
    }
    pub fn side(&self) -> Side {
        self.side
    }
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.board[u8::from(square) as usize]
    }
    pub fn is_empty(&self) -> bool {
        self.board.iter().all(Option::is_none)
    }
    /// Same pieces on the same squares, regardless of side to move.
    pub fn same_board(&self, other: &Self) -> bool {
        self.board == other.board
    }
    pub fn pieces(&self) -> impl Iterator<Item = Placement> + '_ {
        Square::all().filter_map(|s| self.at(s).map(|p| Placement::from((s, p))))
    }
    pub fn count(&self, piece: Piece) -> usize {
        self.board.iter().filter(|p| **p == Some(piece)).count()
    }
    /// Pieces of this type and side not yet on the board.
    pub fn remaining(&self, piece: Piece) -> usize {
        piece.kind().allotment().saturating_sub(self.count(piece))
    }
    pub fn rabbits(&self, side: Side) -> usize {
        self.count(Piece::from((side, PieceType::Rabbit)))
    }

    /// A piece is supported by any adjacent friendly piece.
    pub fn is_supported(&self, square: Square) -> bool {
        match self.at(square) {
            None => false,
            Some(piece) => square
                .neighbors()
                .filter_map(|n| self.at(n))
                .any(|n| n.side() == piece.side()),
        }
    }
    /// Frozen iff unsupported and next to a stronger enemy.
    pub fn is_frozen(&self, square: Square) -> bool {
        match self.at(square) {
            None => false,
            Some(piece) => {
                !self.is_supported(square)
                    && square
                        .neighbors()
                        .filter_map(|n| self.at(n))
                        .any(|n| n.dominates(&piece))
            }
        }
    }

    /// Setup placement is legal for the side to move on its two
    /// home ranks, onto an empty square, within the allotment.
    pub fn is_placeable(&self, placement: &Placement) -> bool {
        placement.piece.side() == self.side
            && self.side.camp().contains(&placement.square.rank())
            && self.at(placement.square).is_none()
            && self.remaining(placement.piece) > 0
    }
    pub fn place(&mut self, placement: Placement) {
        assert!(
            self.at(placement.square).is_none() && self.remaining(placement.piece) > 0,
            "cannot place {}",
            placement
        );
        self.board[u8::from(placement.square) as usize] = Some(placement.piece);
    }
    /// Every piece of the side to move is on the board.
    pub fn is_set_up(&self) -> bool {
        PieceType::ALL
            .into_iter()
            .map(|k| Piece::from((self.side, k)))
            .all(|p| self.remaining(p) == 0)
    }

    /// Moves a piece and removes the unsupported trap occupant, if any.
    pub(crate) fn relocate(&mut self, origin: Square, destination: Square) -> Option<Placement> {
        let piece = self.board[u8::from(origin) as usize].take();
        assert!(piece.is_some(), "no piece on {}", origin);
        assert!(self.at(destination).is_none(), "{} is occupied", destination);
        self.board[u8::from(destination) as usize] = piece;
        self.capture()
    }
    fn capture(&mut self) -> Option<Placement> {
        let captured = Square::traps()
            .filter(|t| self.at(*t).is_some())
            .filter(|t| !self.is_supported(*t))
            .collect::<Vec<Square>>();
        debug_assert!(captured.len() <= 1);
        captured.into_iter().next().map(|trap| {
            let piece = self.board[u8::from(trap) as usize]
                .take()
                .expect("trap is occupied");
            log::trace!("captured {}{}", piece, trap);
            Placement::from((trap, piece))
        })
    }
    /// Hands the board to the other side.
    pub fn pass(&self) -> Self {
        Self {
            side: self.side.opponent(),
            board: self.board,
        }
    }
}

impl From<(Side, Vec<Placement>)> for Position {
    fn from((side, placements): (Side, Vec<Placement>)) -> Self {
        let mut position = Self::empty(side);
        for placement in placements {
            position.place(placement);
        }
        position
    }
}

/// A random full setup for both sides, gold to move.
impl Arbitrary for Position {
    fn random() -> Self {
        use rand::seq::SliceRandom;
        let ref mut rng = rand::rng();
        let mut position = Self::empty(Side::Gold);
        for side in Side::ALL {
            let mut squares = Square::all()
                .filter(|s| side.camp().contains(&s.rank()))
                .collect::<Vec<Square>>();
            squares.shuffle(rng);
            let pieces = PieceType::ALL
                .into_iter()
                .flat_map(|k| std::iter::repeat_n(Piece::from((side, k)), k.allotment()));
            for (square, piece) in squares.into_iter().zip(pieces) {
                position.place(Placement::from((square, piece)));
            }
        }
        position
    }
}

/// rank 8 on top, dots for empty squares, x for empty traps
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in (0..crate::WIDTH).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..crate::WIDTH {
                let square = Square::from((file, rank));
                match self.at(square) {
                    Some(piece) => write!(f, "{}", piece)?,
                    None if square.is_trap() => write!(f, "x")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh {} to move", self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(side: Side, words: &str) -> Position {
        Position::from((
            side,
            words
                .split_whitespace()
                .map(|w| Placement::try_from(w).unwrap())
                .collect::<Vec<_>>(),
        ))
    }
    fn sq(s: &str) -> Square {
        Square::try_from(s).unwrap()
    }

    #[test]
    fn random_setup_is_complete() {
        let position = Position::random();
        assert!(position.is_set_up());
        assert!(position.pass().is_set_up());
        assert_eq!(position.pieces().count(), 2 * crate::SETUP_SIZE);
    }

    #[test]
    fn support_prevents_freezing() {
        let lone = position(Side::Gold, "Rd4 ed5");
        assert!(lone.is_frozen(sq("d4")));
        assert!(!lone.is_frozen(sq("d5")));
        let backed = position(Side::Gold, "Rd4 Rc4 ed5 md3");
        assert!(!backed.is_frozen(sq("d4")));
    }

    #[test]
    fn equal_strength_does_not_freeze() {
        let equal = position(Side::Gold, "Dd4 dd5");
        assert!(!equal.is_frozen(sq("d4")));
        assert!(!equal.is_frozen(sq("d5")));
    }

    #[test]
    fn unsupported_trap_piece_is_captured() {
        let mut board = position(Side::Gold, "Rc2 Dd3");
        let captured = board.relocate(sq("c2"), sq("c3"));
        assert_eq!(captured, None);
        let captured = board.relocate(sq("d3"), sq("d4"));
        assert_eq!(captured.map(|c| c.to_string()), Some("Rc3".into()));
        assert_eq!(board.at(sq("c3")), None);
    }

    #[test]
    fn placement_respects_camp_and_allotment() {
        let mut board = Position::empty(Side::Gold);
        assert!(board.is_placeable(&Placement::try_from("Ea2").unwrap()));
        assert!(!board.is_placeable(&Placement::try_from("Ea3").unwrap()));
        assert!(!board.is_placeable(&Placement::try_from("ea2").unwrap()));
        board.place(Placement::try_from("Ea2").unwrap());
        assert!(!board.is_placeable(&Placement::try_from("Eb2").unwrap()));
        assert!(!board.is_placeable(&Placement::try_from("Ma2").unwrap()));
    }
}
