use crate::GameState;
use crate::Placement;
use crate::Position;
use crate::Step;

/// What one side did in one turn: a full setup or up to four steps.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Ply {
    Setup(Vec<Placement>),
    Steps(Vec<Step>),
}

impl Ply {
    pub fn len(&self) -> usize {
        match self {
            Ply::Setup(placements) => placements.len(),
            Ply::Steps(steps) => steps.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn is_setup(&self) -> bool {
        matches!(self, Ply::Setup(_))
    }
    /// Partial input this ply continues. Placement order is
    /// immaterial, step order is not.
    pub fn starts_with(&self, prefix: &Ply) -> bool {
        match (self, prefix) {
            (Ply::Setup(all), Ply::Setup(some)) => some.iter().all(|p| all.contains(p)),
            (Ply::Steps(all), Ply::Steps(some)) => all.starts_with(some),
            _ => false,
        }
    }
    /// Replays this ply from `before`, yielding the next ply's start.
    /// Panics if the ply cannot be played from there.
    pub fn replay(&self, before: &GameState) -> GameState {
        match self {
            Ply::Setup(placements) => {
                let mut position = *before.position();
                for placement in placements {
                    assert!(position.is_placeable(placement), "cannot place {}", placement);
                    position.place(*placement);
                }
                GameState::from(position).finish()
            }
            Ply::Steps(steps) => {
                let mut state = *before;
                for step in steps {
                    assert!(state.is_playable(step), "cannot play {}", step);
                    state.apply(step);
                }
                state.finish()
            }
        }
    }
}

impl From<Vec<Step>> for Ply {
    fn from(steps: Vec<Step>) -> Self {
        Ply::Steps(steps)
    }
}
impl From<Vec<Placement>> for Ply {
    fn from(placements: Vec<Placement>) -> Self {
        Ply::Setup(placements)
    }
}

/// setup plies as laid out on the board
impl From<&Position> for Ply {
    fn from(position: &Position) -> Self {
        Ply::Setup(position.pieces().collect())
    }
}
