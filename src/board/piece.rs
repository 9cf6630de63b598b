use super::kind::PieceType;
use super::side::Side;

/// A piece of a given type belonging to a given side.
///
/// Gold pieces print uppercase (`E`), silver pieces lowercase (`e`).
/// The ordinal `side * 6 + type` in `0..12` is the compact form used
/// by packed puzzle records.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    side: Side,
    kind: PieceType,
}

impl Piece {
    pub fn side(&self) -> Side {
        self.side
    }
    pub fn kind(&self) -> PieceType {
        self.kind
    }
    pub fn is_rabbit(&self) -> bool {
        self.kind == PieceType::Rabbit
    }
    /// A dominates B iff they are enemies and A is strictly stronger.
    pub fn dominates(&self, other: &Self) -> bool {
        self.side != other.side && self.kind > other.kind
    }
    pub fn letter(&self) -> char {
        match self.side {
            Side::Gold => self.kind.letter(),
            Side::Silver => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

impl From<(Side, PieceType)> for Piece {
    fn from((side, kind): (Side, PieceType)) -> Self {
        Self { side, kind }
    }
}

/// u8 isomorphism
/// 0..6 gold rabbit..elephant, 6..12 silver rabbit..elephant
impl From<Piece> for u8 {
    fn from(p: Piece) -> u8 {
        u8::from(p.side) * 6 + u8::from(p.kind)
    }
}
impl From<u8> for Piece {
    fn from(n: u8) -> Self {
        assert!(n < 12, "invalid piece ordinal {}", n);
        Self::from((Side::from(n / 6), PieceType::from(n % 6)))
    }
}

impl TryFrom<char> for Piece {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = PieceType::try_from(c)?;
        let side = if c.is_ascii_uppercase() {
            Side::Gold
        } else {
            Side::Silver
        };
        Ok(Self::from((side, kind)))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
