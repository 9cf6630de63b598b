/// Why a completed accumulation of steps or placements is not a ply.
///
/// These are ordinary results, not faults: the caller reports them
/// and keeps its scratch state untouched.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Illegal {
    /// The second step of a push has not been taken.
    IncompletePush,
    /// The board is unchanged from the start of the ply.
    Pass,
    /// The position has already occurred twice with the same side to move.
    Repetition,
    /// Setup ended before every piece was placed.
    IncompleteSetup,
}

impl std::fmt::Display for Illegal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompletePush => write!(f, "push is not finished"),
            Self::Pass => write!(f, "a move must change the board"),
            Self::Repetition => write!(f, "position would repeat a third time"),
            Self::IncompleteSetup => write!(f, "setup must place every piece"),
        }
    }
}

impl std::error::Error for Illegal {}
