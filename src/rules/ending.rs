use super::history::History;
use super::outcome::Outcome;
use super::outcome::Reason;
use crate::GameState;
use crate::PieceType;
use crate::Position;
use crate::Side;
use std::collections::HashSet;

impl Position {
    /// A rabbit of `side` stands on its goal row.
    pub fn is_goal(&self, side: Side) -> bool {
        self.pieces()
            .filter(|p| p.piece.side() == side)
            .filter(|p| p.piece.kind() == PieceType::Rabbit)
            .any(|p| p.square.rank() == side.goal())
    }
    /// `side` has no rabbits left.
    pub fn is_eliminated(&self, side: Side) -> bool {
        self.rabbits(side) == 0
    }
}

/// Checks the state a finished ply left behind for a decided game.
///
/// Goals are checked first, mover then opponent; then elimination,
/// opponent's rabbits then mover's. Failing both, the side to move
/// loses if it has no legal ply at all.
pub fn detect_game_end<H: History>(history: &H) -> Option<Outcome> {
    let position = history.start().position();
    let next = position.side();
    let last = next.opponent();
    for side in [last, next] {
        if position.is_goal(side) {
            return Some(Outcome::from((side, Reason::Goal)));
        }
    }
    for side in [next, last] {
        if position.is_eliminated(side) {
            return Some(Outcome::from((side.opponent(), Reason::Elimination)));
        }
    }
    if has_legal_move(history) {
        None
    } else {
        Some(Outcome::from((last, Reason::Immobilization)))
    }
}

/// Depth-first search over step sequences from the start of the ply,
/// stopping at the first accumulation that is a legal ply.
///
/// Reaching a state by some sequence is enough to judge it, so each
/// distinct intermediate state is expanded once.
pub fn has_legal_move<H: History>(history: &H) -> bool {
    let mut seen = HashSet::<GameState>::new();
    let mut stack = vec![*history.start()];
    while let Some(state) = stack.pop() {
        for (origin, destination) in state.legal_steps() {
            let mut child = state;
            child.take_step(origin, destination);
            if history.legal_move(&child).is_ok() {
                return true;
            }
            if child.steps_available() > 0 && seen.insert(child) {
                stack.push(child);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::tests::state;
    use crate::Illegal;
    use crate::Square;

    /// A bare line with no earlier positions.
    struct Line {
        start: GameState,
        earlier: Vec<Position>,
    }
    impl History for Line {
        fn start(&self) -> &GameState {
            &self.start
        }
        fn occurrences(&self, position: &Position) -> usize {
            self.earlier
                .iter()
                .chain(std::iter::once(self.start.position()))
                .filter(|p| *p == position)
                .count()
        }
    }
    fn line(side: Side, words: &str) -> Line {
        Line {
            start: state(side, words),
            earlier: Vec::new(),
        }
    }

    #[test]
    fn goal_beats_elimination() {
        let game = line(Side::Silver, "Ra8 Ed1");
        assert_eq!(
            detect_game_end(&game),
            Some(Outcome::from((Side::Gold, Reason::Goal)))
        );
    }

    #[test]
    fn mover_goal_checked_first() {
        let game = line(Side::Silver, "Ra8 ra1");
        assert_eq!(
            detect_game_end(&game).map(|o| o.winner),
            Some(Side::Gold)
        );
    }

    #[test]
    fn elimination_of_opponent() {
        let game = line(Side::Silver, "Ra2 ed7");
        assert_eq!(
            detect_game_end(&game),
            Some(Outcome::from((Side::Gold, Reason::Elimination)))
        );
    }

    #[test]
    fn immobilized_side_loses() {
        // silver's only rabbit is frozen by the elephant and walled in
        let game = line(Side::Silver, "Ra2 Ea7 Mb8 ra8");
        assert!(!has_legal_move(&game));
        assert_eq!(
            detect_game_end(&game),
            Some(Outcome::from((Side::Gold, Reason::Immobilization)))
        );
    }

    #[test]
    fn mobile_side_plays_on() {
        let game = line(Side::Silver, "Ra2 rh7");
        assert!(has_legal_move(&game));
        assert_eq!(detect_game_end(&game), None);
    }

    #[test]
    fn third_occurrence_is_repetition() {
        let start = state(Side::Silver, "Ra2 rh7");
        let mut shuffled = start;
        shuffled.take_step(Square::try_from("h7").unwrap(), Square::try_from("h6").unwrap());
        let far = *shuffled.finish().position();
        let twice = Line {
            start,
            earlier: vec![far, far],
        };
        assert_eq!(twice.legal_move(&shuffled), Err(Illegal::Repetition));
        let once = Line {
            start,
            earlier: vec![far],
        };
        assert_eq!(once.legal_move(&shuffled), Ok(()));
    }

    #[test]
    fn only_move_repeats_so_immobilized() {
        // the silver rabbit's single legal ply is a7-a6
        let start = state(Side::Silver, "Rb7 Ra5 Rb6 ra7");
        let mut only = start;
        only.take_step(Square::try_from("a7").unwrap(), Square::try_from("a6").unwrap());
        let repeated = *only.finish().position();
        let fresh = Line {
            start,
            earlier: vec![repeated],
        };
        assert!(has_legal_move(&fresh));
        let stale = Line {
            start,
            earlier: vec![repeated, repeated],
        };
        assert!(!has_legal_move(&stale));
        assert_eq!(
            detect_game_end(&stale),
            Some(Outcome::from((Side::Gold, Reason::Immobilization)))
        );
    }

    #[test]
    fn back_and_forth_is_a_pass() {
        let game = line(Side::Gold, "Ed4 rh7");
        let mut state = game.start;
        state.take_step(Square::try_from("d4").unwrap(), Square::try_from("d5").unwrap());
        state.take_step(Square::try_from("d5").unwrap(), Square::try_from("d4").unwrap());
        assert_eq!(game.legal_move(&state), Err(Illegal::Pass));
    }

    #[test]
    fn unfinished_push_is_incomplete() {
        let game = line(Side::Gold, "Ed4 rd5");
        let mut state = game.start;
        state.take_step(Square::try_from("d5").unwrap(), Square::try_from("d6").unwrap());
        assert_eq!(game.legal_move(&state), Err(Illegal::IncompletePush));
    }
}
