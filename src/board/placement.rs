use super::piece::Piece;
use super::square::Square;

/// A piece on a square: a setup word like `Ra1`, or the subject
/// of a capture word like `Rc3x`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub square: Square,
    pub piece: Piece,
}

impl Placement {
    /// Word announcing this piece was removed from its trap.
    pub fn capture(&self) -> String {
        format!("{}x", self)
    }
}

impl From<(Square, Piece)> for Placement {
    fn from((square, piece): (Square, Piece)) -> Self {
        Self { square, piece }
    }
}

impl TryFrom<&str> for Placement {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let piece = chars
            .next()
            .ok_or_else(|| format!("empty placement"))
            .and_then(Piece::try_from)?;
        let square = Square::try_from(chars.as_str())?;
        Ok(Self { square, piece })
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.piece, self.square)
    }
}
