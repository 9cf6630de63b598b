use super::direction::Direction;
use super::piece::Piece;
use super::placement::Placement;
use super::square::Square;

/// One piece moving one square, e.g. `Ee2n`.
///
/// A step names the piece it moves so that the word can be checked
/// against the board it is replayed on.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub piece: Piece,
    pub origin: Square,
    pub direction: Direction,
}

impl Step {
    pub fn destination(&self) -> Square {
        self.origin
            .shift(self.direction)
            .expect("step stays on the board")
    }
}

impl From<(Piece, Square, Direction)> for Step {
    fn from((piece, origin, direction): (Piece, Square, Direction)) -> Self {
        assert!(origin.shift(direction).is_some(), "{}{} leaves the board", origin, direction);
        Self {
            piece,
            origin,
            direction,
        }
    }
}

/// str isomorphism
/// four characters: piece, file, rank, direction
impl TryFrom<&str> for Step {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if !s.is_ascii() || s.len() != 4 {
            return Err(format!("invalid step {}", s));
        }
        let (head, tail) = s.split_at(3);
        let placement = Placement::try_from(head)?;
        let direction = tail
            .chars()
            .next()
            .ok_or_else(|| format!("invalid step {}", s))
            .and_then(Direction::try_from)?;
        match placement.square.shift(direction) {
            Some(_) => Ok(Self::from((placement.piece, placement.square, direction))),
            None => Err(format!("step leaves the board {}", s)),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}{}", self.piece, self.origin, self.direction)
    }
}
