use crate::Side;

/// How a game ended.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Reason {
    /// A rabbit reached the far row.
    Goal,
    /// A side lost all of its rabbits.
    Elimination,
    /// The side to move has no legal ply.
    Immobilization,
    /// Declared by a session, not detectable from the board.
    Resignation,
    Timeout,
    Forfeit,
}

impl Reason {
    pub fn letter(&self) -> char {
        match self {
            Reason::Goal => 'g',
            Reason::Elimination => 'e',
            Reason::Immobilization => 'm',
            Reason::Resignation => 'r',
            Reason::Timeout => 't',
            Reason::Forfeit => 'f',
        }
    }
}

impl TryFrom<char> for Reason {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'g' => Ok(Reason::Goal),
            'e' => Ok(Reason::Elimination),
            'm' => Ok(Reason::Immobilization),
            'r' => Ok(Reason::Resignation),
            't' => Ok(Reason::Timeout),
            'f' => Ok(Reason::Forfeit),
            _ => Err(format!("invalid end reason {}", c)),
        }
    }
}

/// The winner of a finished game and why they won.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub winner: Side,
    pub reason: Reason,
}

impl From<(Side, Reason)> for Outcome {
    fn from((winner, reason): (Side, Reason)) -> Self {
        Self { winner, reason }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wins by {:?}", self.winner, self.reason)
    }
}
