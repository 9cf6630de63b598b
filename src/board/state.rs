use super::placement::Placement;
use super::position::Position;
use super::side::Side;
use super::square::Square;
use super::squares::Squares;
use super::step::Step;
use super::direction::Direction;

/// A [`Position`] part way through a ply.
///
/// Besides the board it tracks the steps left and the bookkeeping
/// that lets a push or pull span two steps:
/// - `followup` is the square just vacated
/// - `origins` are the pieces that may step into it next
/// - `in_push` is set only between the two steps of a push,
///   when the followup is mandatory
///
/// `origins` is only non-empty while `followup` is set.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct GameState {
    position: Position,
    steps: usize,
    in_push: bool,
    followup: Option<Square>,
    origins: Squares,
}

impl From<Position> for GameState {
    fn from(position: Position) -> Self {
        Self {
            position,
            steps: crate::STEPS_PER_PLY,
            in_push: false,
            followup: None,
            origins: Squares::empty(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::from(Position::default())
    }
}

impl GameState {
    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn side(&self) -> Side {
        self.position.side()
    }
    pub fn steps_available(&self) -> usize {
        self.steps
    }
    pub fn in_push(&self) -> bool {
        self.in_push
    }
    pub fn followup_destination(&self) -> Option<Square> {
        self.followup
    }
    pub fn followup_origins(&self) -> Squares {
        self.origins
    }
    /// The state the next ply starts from.
    pub fn finish(&self) -> Self {
        Self::from(self.position.pass())
    }
    /// True when no step has been taken yet this ply.
    pub fn is_fresh(&self) -> bool {
        self.steps == crate::STEPS_PER_PLY
    }
}

/// Step legality.
impl GameState {
    pub fn legal_step(&self, origin: Square, destination: Square) -> bool {
        if self.steps == 0 {
            return false;
        }
        if !origin.is_adjacent(&destination) {
            return false;
        }
        if self.position.at(destination).is_some() {
            return false;
        }
        match self.position.at(origin) {
            None => false,
            Some(piece) if piece.side() == self.side() => {
                if self.in_push {
                    self.completes(origin, destination)
                } else if self.position.is_frozen(origin) {
                    false
                } else if piece.is_rabbit() {
                    origin.toward(&destination) != Some(Self::backward(piece.side()))
                } else {
                    true
                }
            }
            Some(piece) => {
                if self.in_push {
                    false
                } else if self.completes(origin, destination) {
                    true
                } else {
                    self.steps > 1
                        && origin
                            .neighbors()
                            .filter(|n| !self.position.is_frozen(*n))
                            .filter_map(|n| self.position.at(n))
                            .any(|n| n.side() == self.side() && n.dominates(&piece))
                }
            }
        }
    }
    pub fn legal_destinations(&self, origin: Square) -> Squares {
        origin
            .neighbors()
            .filter(|d| self.legal_step(origin, *d))
            .collect()
    }
    pub fn legal_origin(&self, square: Square) -> bool {
        !self.legal_destinations(square).is_empty()
    }
    /// Every legal (origin, destination) pair.
    pub fn legal_steps(&self) -> Vec<(Square, Square)> {
        self.position
            .pieces()
            .map(|p| p.square)
            .flat_map(|o| self.legal_destinations(o).map(move |d| (o, d)))
            .collect()
    }
    /// Whether a notated step names the piece on its origin and is legal.
    pub fn is_playable(&self, step: &Step) -> bool {
        self.position.at(step.origin) == Some(step.piece)
            && self.legal_step(step.origin, step.destination())
    }
    /// Names the piece on `origin` moving in `direction`, if there is one.
    pub fn piece_step(&self, origin: Square, direction: Direction) -> Option<Step> {
        let piece = self.position.at(origin)?;
        origin.shift(direction)?;
        Some(Step::from((piece, origin, direction)))
    }

    fn completes(&self, origin: Square, destination: Square) -> bool {
        self.followup == Some(destination) && self.origins.contains(&origin)
    }
    fn backward(side: Side) -> Direction {
        match side {
            Side::Gold => Direction::South,
            Side::Silver => Direction::North,
        }
    }
}

/// Step mutation.
impl GameState {
    /// Takes a legal step, returning the piece it captured, if any.
    pub fn take_step(&mut self, origin: Square, destination: Square) -> Option<Placement> {
        assert!(self.legal_step(origin, destination), "illegal step {}{}", origin, destination);
        let piece = self.position.at(origin).expect("legal step has a piece");
        let own = piece.side() == self.side();
        let pushing = self.in_push;
        let pulling = !own && self.completes(origin, destination);
        let neighbors = origin
            .neighbors()
            .filter_map(|n| self.position.at(n).map(|p| (n, p)))
            .collect::<Vec<_>>();
        let pushers = neighbors
            .iter()
            .filter(|(n, _)| !self.position.is_frozen(*n))
            .filter(|(_, p)| p.side() == self.side() && p.dominates(&piece))
            .map(|(n, _)| *n)
            .collect::<Squares>();
        let pullees = neighbors
            .iter()
            .filter(|(_, p)| piece.dominates(p))
            .map(|(n, _)| *n)
            .collect::<Squares>();
        let captured = self.position.relocate(origin, destination);
        self.steps -= 1;
        if pushing {
            self.in_push = false;
            self.clear();
        } else if own {
            self.followup = Some(origin);
            self.origins = pullees;
        } else if pulling {
            self.clear();
        } else {
            self.in_push = true;
            self.followup = Some(origin);
            self.origins = pushers;
        }
        log::trace!(
            "{}{}{} steps={} push={} followup={:?} origins={}",
            piece,
            origin,
            destination,
            self.steps,
            self.in_push,
            self.followup.map(|s| s.to_string()),
            self.origins
        );
        captured
    }
    /// Takes a notated step; see [`GameState::is_playable`].
    pub fn apply(&mut self, step: &Step) -> Option<Placement> {
        self.take_step(step.origin, step.destination())
    }
    fn clear(&mut self) {
        self.followup = None;
        self.origins = Squares::empty();
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.position)?;
        write!(f, "{} steps left", self.steps)?;
        if self.in_push {
            write!(f, ", pushing")?;
        }
        Ok(())
    }
}
