use crate::Direction;
use crate::GameState;
use crate::Piece;
use crate::Placement;
use crate::Ply;
use crate::Position;
use crate::Side;
use crate::Square;
use crate::Step;
use crate::RECORD_BOARD_BYTES;
use crate::RECORD_EMPTY;
use crate::RECORD_SIZE;
use crate::AREA;
use anyhow::Context;

/// A stored puzzle: a position and the steps that solve it.
///
/// On disk a record is 32 bytes of board, two squares per byte with the
/// even square in the low nibble (a piece ordinal, or 15 for empty),
/// followed by 4 step bytes of `origin + 64 * direction`, where 0 ends
/// the solution early. The side to move owns the first step's piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    state: GameState,
    steps: Vec<Step>,
}

impl Record {
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
    pub fn ply(&self) -> Ply {
        Ply::Steps(self.steps.clone())
    }
    /// Reads every record in a file of back-to-back records.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Vec<Self>> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        anyhow::ensure!(
            bytes.len() % RECORD_SIZE == 0,
            "{} is not a whole number of {}-byte records",
            path.display(),
            RECORD_SIZE
        );
        bytes
            .chunks_exact(RECORD_SIZE)
            .enumerate()
            .map(|(i, chunk)| Self::try_from(chunk).with_context(|| format!("record {}", i)))
            .collect()
    }
    /// The packed form.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        for (i, square) in Square::all().enumerate() {
            let nibble = self
                .state
                .position()
                .at(square)
                .map(u8::from)
                .unwrap_or(RECORD_EMPTY);
            bytes[i / 2] |= nibble << (4 * (i % 2));
        }
        for (i, step) in self.steps.iter().enumerate() {
            bytes[RECORD_BOARD_BYTES + i] = u8::from(step.origin) + 64 * u8::from(step.direction);
        }
        bytes
    }
}

impl TryFrom<&[u8]> for Record {
    type Error = anyhow::Error;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        anyhow::ensure!(bytes.len() == RECORD_SIZE, "record is {} bytes", bytes.len());
        let (board, moves) = bytes.split_at(RECORD_BOARD_BYTES);
        let mut cells = [None; AREA];
        for (i, cell) in cells.iter_mut().enumerate() {
            let nibble = (board[i / 2] >> (4 * (i % 2))) & 0x0F;
            *cell = match nibble {
                RECORD_EMPTY => None,
                0..12 => Some(Piece::from(nibble)),
                _ => anyhow::bail!("square {} holds nibble {}", Square::from(i as u8), nibble),
            };
        }
        let moves = moves
            .iter()
            .take_while(|b| **b != 0)
            .map(|b| (Square::from(b % 64), Direction::from(b / 64)))
            .collect::<Vec<_>>();
        let side = moves
            .first()
            .and_then(|(origin, _)| cells[u8::from(*origin) as usize])
            .map(|piece| piece.side())
            .unwrap_or(Side::Gold);
        let mut position = Position::empty(side);
        for (square, piece) in Square::all().zip(cells) {
            if let Some(piece) = piece {
                anyhow::ensure!(position.remaining(piece) > 0, "too many {}", piece);
                position.place(Placement::from((square, piece)));
            }
        }
        let start = GameState::from(position);
        let mut state = start;
        let mut steps = Vec::new();
        for (origin, direction) in moves {
            let step = state
                .piece_step(origin, direction)
                .with_context(|| format!("no step from {} {}", origin, direction))?;
            anyhow::ensure!(state.is_playable(&step), "illegal step {}", step);
            state.apply(&step);
            steps.push(step);
        }
        Ok(Self {
            state: start,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;
    use crate::Outcome;
    use crate::Reason;

    fn record(side: Side, words: &str, steps: &str) -> Record {
        let state = GameState::from(Position::from((
            side,
            words
                .split_whitespace()
                .map(|w| Placement::try_from(w).unwrap())
                .collect::<Vec<_>>(),
        )));
        Record {
            state,
            steps: steps
                .split_whitespace()
                .map(|w| Step::try_from(w).unwrap())
                .collect(),
        }
    }

    #[test]
    fn decodes_packed_bytes() {
        let original = record(Side::Silver, "Ra2 Ec4 eh5 rb2", "rb2s rb1e");
        let bytes = original.to_bytes();
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(bytes[RECORD_BOARD_BYTES + 2], 0);
        let decoded = Record::try_from(&bytes[..]).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.state().side(), Side::Silver);
    }

    #[test]
    fn solution_reaches_goal() {
        let puzzle = record(Side::Gold, "Ra7 Ee4 eh5 rh2", "Ra7n");
        let bytes = puzzle.to_bytes();
        let decoded = Record::try_from(&bytes[..]).unwrap();
        let node = Node::root(*decoded.state())
            .make_move(decoded.steps().to_vec())
            .unwrap();
        assert_eq!(node.result(), Some(Outcome::from((Side::Gold, Reason::Goal))));
    }

    #[test]
    fn rejects_bad_records() {
        let mut bytes = record(Side::Gold, "Ra2 rh7", "").to_bytes();
        assert!(Record::try_from(&bytes[..RECORD_SIZE - 1]).is_err());
        bytes[RECORD_BOARD_BYTES] = 8;
        assert!(Record::try_from(&bytes[..]).is_err());
        bytes[RECORD_BOARD_BYTES] = 0;
        bytes[5] = 0xCC;
        assert!(Record::try_from(&bytes[..]).is_err());
    }
}
