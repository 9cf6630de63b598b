use super::error::NotationError;
use crate::GameState;
use crate::History;
use crate::Illegal;
use crate::Node;
use crate::Order;
use crate::Placement;
use crate::Ply;
use crate::Position;
use crate::Step;
use std::sync::Arc;

/// Input read since the last committed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Idle,
    /// Placements so far and the board they build.
    Setup(Position, Vec<Placement>),
    /// Steps so far and the scratch state they lead to.
    Steps(GameState, Vec<Step>),
}

/// A node plus whatever part of the next ply has been read.
///
/// Cheap to clone and never shared: the parser hands back a new one
/// for every token instead of mutating in place, so a failed token
/// leaves the caller's accumulator as it was.
#[derive(Debug, Clone)]
pub struct Partial {
    node: Arc<Node>,
    pending: Pending,
}

impl From<Arc<Node>> for Partial {
    fn from(node: Arc<Node>) -> Self {
        Self {
            node,
            pending: Pending::Idle,
        }
    }
}

impl Partial {
    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }
    pub fn pending(&self) -> &Pending {
        &self.pending
    }
    pub fn is_idle(&self) -> bool {
        self.pending == Pending::Idle
    }
    pub fn in_setup(&self) -> bool {
        self.node.in_setup()
    }
    /// The board as the input so far leaves it.
    pub fn state(&self) -> GameState {
        match &self.pending {
            Pending::Idle => *self.node.state(),
            Pending::Setup(position, _) => GameState::from(*position),
            Pending::Steps(state, _) => *state,
        }
    }
    /// The pending input as a ply, if any.
    pub fn ply(&self) -> Option<Ply> {
        match &self.pending {
            Pending::Idle => None,
            Pending::Setup(_, placements) => Some(Ply::Setup(placements.clone())),
            Pending::Steps(_, steps) => Some(Ply::Steps(steps.clone())),
        }
    }
    /// The one existing child the pending input is heading towards.
    pub fn continuation(&self) -> Option<Arc<Node>> {
        self.ply()
            .and_then(|ply| self.node.find_partial_matching_child(&ply))
    }
}

/// Accumulation.
impl Partial {
    /// Adds a setup placement for the side to move.
    pub fn place(&self, placement: Placement, token: &str) -> Result<Self, NotationError> {
        let (mut position, mut placements) = match &self.pending {
            Pending::Idle => (*self.node.state().position(), Vec::new()),
            Pending::Setup(position, placements) => (*position, placements.clone()),
            Pending::Steps(..) => return Err(NotationError::InvalidWord(token.to_string())),
        };
        if !self.in_setup() || placement.piece.side() != position.side() {
            return Err(NotationError::InvalidWord(token.to_string()));
        }
        if !position.side().camp().contains(&placement.square.rank()) {
            return Err(NotationError::IllegalSetupSquare(token.to_string()));
        }
        if position.at(placement.square).is_some() {
            return Err(NotationError::DuplicateSquare(token.to_string()));
        }
        if position.remaining(placement.piece) == 0 {
            return Err(NotationError::OutOfPieces(token.to_string()));
        }
        position.place(placement);
        placements.push(placement);
        Ok(Self {
            node: Arc::clone(&self.node),
            pending: Pending::Setup(position, placements),
        })
    }
    /// Whether the pending setup has placed every piece.
    pub fn is_set_up(&self) -> bool {
        matches!(&self.pending, Pending::Setup(position, _) if position.is_set_up())
    }
    /// Adds a step, or `None` if the board does not allow it here.
    pub fn step(&self, step: &Step) -> Option<(Self, Option<Placement>)> {
        if self.in_setup() {
            return None;
        }
        let (mut state, mut steps) = match &self.pending {
            Pending::Idle => (*self.node.state(), Vec::new()),
            Pending::Steps(state, steps) => (*state, steps.clone()),
            Pending::Setup(..) => return None,
        };
        if !state.is_playable(step) {
            return None;
        }
        let captured = state.apply(step);
        steps.push(*step);
        Some((
            Self {
                node: Arc::clone(&self.node),
                pending: Pending::Steps(state, steps),
            },
            captured,
        ))
    }
}

/// Commitment.
impl Partial {
    /// The state the next ply starts from, if the pending input is a
    /// complete legal ply. Nothing is inserted.
    pub fn closing(&self) -> Result<GameState, Illegal> {
        match &self.pending {
            Pending::Idle if self.in_setup() => Err(Illegal::IncompleteSetup),
            Pending::Idle => Err(Illegal::Pass),
            Pending::Setup(position, _) => match position.is_set_up() {
                true => Ok(GameState::from(*position).finish()),
                false => Err(Illegal::IncompleteSetup),
            },
            Pending::Steps(state, _) => self.node.legal_move(state).map(|_| state.finish()),
        }
    }
    /// Inserts the pending ply and moves on to the node it reaches.
    /// The flag reports whether that node is new to the tree.
    pub fn commit(&self, token: &str) -> Result<(Self, bool), NotationError> {
        let state = self
            .closing()
            .map_err(|why| NotationError::IllegalPly(token.to_string(), why))?;
        let ply = self.ply().expect("closing implies pending input");
        let (node, created) = self.node.add_child(ply, state, Order::Last);
        log::debug!(
            "committed ply at depth {} ({})",
            node.depth(),
            if created { "new" } else { "existing" }
        );
        Ok((Self::from(node), created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use crate::Side;

    fn placements(side: Side) -> Vec<Placement> {
        Position::random()
            .pieces()
            .filter(|p| p.piece.side() == side)
            .collect()
    }
    fn word(s: &str) -> Placement {
        Placement::try_from(s).unwrap()
    }

    #[test]
    fn setup_errors_name_the_token() {
        let partial = Partial::from(Node::start());
        assert_eq!(
            partial.place(word("Ra3"), "Ra3").unwrap_err(),
            NotationError::IllegalSetupSquare("Ra3".into())
        );
        assert_eq!(
            partial.place(word("ra1"), "ra1").unwrap_err(),
            NotationError::InvalidWord("ra1".into())
        );
        let once = partial.place(word("Ea1"), "Ea1").unwrap();
        assert_eq!(
            once.place(word("Ra1"), "Ra1").unwrap_err(),
            NotationError::DuplicateSquare("Ra1".into())
        );
        assert_eq!(
            once.place(word("Eb1"), "Eb1").unwrap_err(),
            NotationError::OutOfPieces("Eb1".into())
        );
        assert!(partial.is_idle());
        assert!(!once.is_set_up());
    }

    #[test]
    fn incomplete_setup_does_not_commit() {
        let partial = Partial::from(Node::start())
            .place(word("Ea1"), "Ea1")
            .unwrap();
        assert_eq!(
            partial.commit("pass").unwrap_err(),
            NotationError::IllegalPly("pass".into(), Illegal::IncompleteSetup)
        );
        assert!(partial.node().children().is_empty());
    }

    #[test]
    fn full_setup_commits_once() {
        let start = Node::start();
        let mut partial = Partial::from(Arc::clone(&start));
        for placement in placements(Side::Gold) {
            partial = partial.place(placement, "").unwrap();
        }
        assert!(partial.is_set_up());
        let (next, created) = partial.commit("").unwrap();
        assert!(created);
        assert_eq!(next.node().state().side(), Side::Silver);
        assert!(next.in_setup());
        let (again, created) = partial.commit("").unwrap();
        assert!(!created);
        assert!(Arc::ptr_eq(again.node(), next.node()));
        assert_eq!(start.children().len(), 1);
    }

    #[test]
    fn steps_accumulate_and_commit() {
        let root = Node::root(GameState::from(Position::from((
            Side::Gold,
            vec![word("Ed4"), word("Ra2"), word("rh7")],
        ))));
        let partial = Partial::from(Arc::clone(&root));
        assert!(partial.step(&Step::try_from("Ed4s").unwrap()).is_some());
        assert!(partial.step(&Step::try_from("Ra2s").unwrap()).is_none());
        let (one, captured) = partial.step(&Step::try_from("Ed4n").unwrap()).unwrap();
        assert_eq!(captured, None);
        let (two, _) = one.step(&Step::try_from("Ed5s").unwrap()).unwrap();
        assert_eq!(two.closing(), Err(Illegal::Pass));
        assert!(one.continuation().is_none());
        let (next, created) = one.commit("").unwrap();
        assert!(created);
        assert_eq!(next.node().state().side(), Side::Silver);
        let later = Partial::from(Arc::clone(&root))
            .step(&Step::try_from("Ed4n").unwrap())
            .unwrap()
            .0;
        assert!(later.continuation().is_some_and(|n| Arc::ptr_eq(&n, next.node())));
    }
}
