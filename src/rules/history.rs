use super::illegal::Illegal;
use crate::GameState;
use crate::Position;

/// A line of play ending at the state a ply starts from.
///
/// Implemented by [`crate::Node`]; the seam lets the rules classify
/// plies and search for moves without knowing how history is stored.
pub trait History {
    /// State at the start of the ply being judged.
    fn start(&self) -> &GameState;
    /// How often this board with this side to move has occurred
    /// along the line, including at its end.
    fn occurrences(&self, position: &Position) -> usize;

    /// Classifies an accumulation of steps taken from [`History::start`].
    fn legal_move(&self, state: &GameState) -> Result<(), Illegal> {
        if state.in_push() {
            Err(Illegal::IncompletePush)
        } else if state.position().same_board(self.start().position()) {
            Err(Illegal::Pass)
        } else if self.occurrences(state.finish().position()) >= crate::REPETITION_LIMIT {
            Err(Illegal::Repetition)
        } else {
            Ok(())
        }
    }
}
