use super::cursor::Cursor;
use super::error::NotationError;
use super::partial::Partial;
use super::word::Word;
use crate::Illegal;
use crate::Node;
use crate::Step;
use std::sync::Arc;

/// The outcome of reading one token.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Accumulator after the token.
    pub partial: Partial,
    /// Text consumed: the token, the token and its capture word, or
    /// nothing when a ply marker was handed back to be read again.
    pub token: String,
    /// Nodes entered while reading, each flagged if it was created.
    pub visited: Vec<(Arc<Node>, bool)>,
}

impl Chunk {
    fn stay(partial: Partial, token: String) -> Self {
        Self {
            partial,
            token,
            visited: Vec::new(),
        }
    }
    fn enter(partial: Partial, token: String, created: bool) -> Self {
        let visited = vec![(Arc::clone(partial.node()), created)];
        Self {
            partial,
            token,
            visited,
        }
    }
}

/// Reads one token from `cursor` against `partial`.
///
/// `Ok(None)` means the cursor is exhausted. An error leaves the tree
/// untouched and consumes only the offending token.
pub fn parse_chunk<C: Cursor>(
    cursor: &mut C,
    partial: &Partial,
) -> Result<Option<Chunk>, NotationError> {
    let Some(token) = cursor.next_word() else {
        return Ok(None);
    };
    log::trace!("token {}", token);
    let chunk = match Word::from(token.as_str()) {
        Word::Takeback => takeback(partial, token),
        Word::Placement(placement) if partial.in_setup() => {
            let placed = partial.place(placement, &token)?;
            match placed.is_set_up() {
                false => Ok(Chunk::stay(placed, token)),
                true => {
                    let (next, created) = placed.commit(&token)?;
                    Ok(Chunk::enter(next, token, created))
                }
            }
        }
        Word::Marker(_, side) if partial.is_idle() => match side == partial.state().side() {
            true => Ok(Chunk::stay(partial.clone(), token)),
            false => Err(NotationError::WrongSide(token)),
        },
        Word::Marker(..) => {
            let (next, created) = partial.commit(&token)?;
            cursor.push_back(token);
            Ok(Chunk::enter(next, String::new(), created))
        }
        Word::Pass if partial.is_idle() && !partial.in_setup() => {
            Err(NotationError::IllegalPly(token, Illegal::Pass))
        }
        Word::Pass => {
            let (next, created) = partial.commit(&token)?;
            Ok(Chunk::enter(next, token, created))
        }
        Word::Step(step) if !partial.in_setup() => step_chunk(cursor, partial, &step, token),
        Word::Capture(_) => Err(NotationError::CaptureWithoutStep(token)),
        Word::Placement(_) | Word::Step(_) | Word::Unknown => Err(NotationError::InvalidWord(token)),
    };
    chunk.map(Some)
}

/// Drops the pending ply, or steps back to the parent with nothing pending.
fn takeback(partial: &Partial, token: String) -> Result<Chunk, NotationError> {
    let node = partial.node();
    match (partial.is_idle(), node.parent()) {
        (false, _) => Ok(Chunk::stay(Partial::from(Arc::clone(node)), token)),
        (true, Some(parent)) => Ok(Chunk::enter(Partial::from(Arc::clone(parent)), token, false)),
        (true, None) => Err(NotationError::TakebackAtRoot(token)),
    }
}

/// Extends the pending ply with `step`, or closes the pending ply and
/// starts the next one with it. The capture word the step implies is
/// consumed if it follows.
fn step_chunk<C: Cursor>(
    cursor: &mut C,
    partial: &Partial,
    step: &Step,
    token: String,
) -> Result<Chunk, NotationError> {
    let mut visited = Vec::new();
    let (next, captured) = match partial.step(step) {
        Some(extended) => extended,
        None => {
            let fits = !partial.is_idle()
                && partial
                    .closing()
                    .is_ok_and(|state| state.is_playable(step));
            if !fits {
                return Err(NotationError::IllegalStep(token));
            }
            let (closed, created) = partial.commit(&token)?;
            visited.push((Arc::clone(closed.node()), created));
            closed
                .step(step)
                .ok_or_else(|| NotationError::IllegalStep(token.clone()))?
        }
    };
    let mut text = token;
    if let Some(capture) = captured.map(|c| c.capture()) {
        match cursor.next_word() {
            Some(word) if word == capture => {
                text.push(' ');
                text.push_str(&word);
            }
            Some(word) => cursor.push_back(word),
            None => {}
        }
    }
    Ok(Chunk {
        partial: next,
        token: text,
        visited,
    })
}
