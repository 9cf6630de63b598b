use crate::Illegal;

/// Text that could not be turned into tree mutations.
///
/// Every variant carries the offending token so the boundary that
/// received the text can point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Not a word of the notation, or not one that fits here.
    InvalidWord(String),
    /// A placement outside the mover's two home ranks.
    IllegalSetupSquare(String),
    /// A placement onto an occupied square.
    DuplicateSquare(String),
    /// A placement beyond the piece type's starting allotment.
    OutOfPieces(String),
    /// A step the board does not allow.
    IllegalStep(String),
    /// A capture word no step accounts for.
    CaptureWithoutStep(String),
    /// A ply label naming the side not to move.
    WrongSide(String),
    /// A takeback with nothing to take back.
    TakebackAtRoot(String),
    /// The accumulated ply is not a legal ply.
    IllegalPly(String, Illegal),
}

impl NotationError {
    pub fn token(&self) -> &str {
        match self {
            Self::InvalidWord(t)
            | Self::IllegalSetupSquare(t)
            | Self::DuplicateSquare(t)
            | Self::OutOfPieces(t)
            | Self::IllegalStep(t)
            | Self::CaptureWithoutStep(t)
            | Self::WrongSide(t)
            | Self::TakebackAtRoot(t)
            | Self::IllegalPly(t, _) => t,
        }
    }
}

impl std::fmt::Display for NotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWord(t) => write!(f, "invalid word: {}", t),
            Self::IllegalSetupSquare(t) => write!(f, "cannot set up there: {}", t),
            Self::DuplicateSquare(t) => write!(f, "square already taken: {}", t),
            Self::OutOfPieces(t) => write!(f, "no such piece left to place: {}", t),
            Self::IllegalStep(t) => write!(f, "illegal step: {}", t),
            Self::CaptureWithoutStep(t) => write!(f, "capture without a step: {}", t),
            Self::WrongSide(t) => write!(f, "not that side's turn: {}", t),
            Self::TakebackAtRoot(t) => write!(f, "nothing to take back: {}", t),
            Self::IllegalPly(t, why) => write!(f, "{} at {}", why, t),
        }
    }
}

impl std::error::Error for NotationError {}
