use super::cursor::Words;
use super::parser::parse_chunk;
use super::partial::Partial;
use crate::Node;
use std::sync::Arc;

/// A run of annotated engine output.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Text passed through as it came.
    Text(String),
    /// Notation that was read, with the position it leads to.
    Move { text: String, partial: Partial },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Text(text) | Segment::Move { text, .. } => text,
        }
    }
}

/// Follows an engine's streamed output against the node it analyses.
///
/// Output arrives in arbitrary chunks; only complete lines are read,
/// and every line starts again from the analysed node.
#[derive(Debug)]
pub struct Annotator {
    base: Arc<Node>,
    buffer: String,
}

impl Annotator {
    pub fn new(base: Arc<Node>) -> Self {
        Self {
            base,
            buffer: String::new(),
        }
    }
    pub fn base(&self) -> &Arc<Node> {
        &self.base
    }
    /// Takes a chunk of output and annotates every line it completes.
    pub fn feed(&mut self, chunk: &str) -> Vec<Segment> {
        self.buffer.push_str(chunk);
        let mut segments = Vec::new();
        while let Some(end) = self.buffer.find('\n') {
            let line = self.buffer.drain(..=end).collect::<String>();
            segments.extend(self.line(&line[..end]));
            push_text(&mut segments, "\n");
        }
        segments
    }
    /// Annotates whatever is left of an unterminated last line.
    pub fn flush(&mut self) -> Vec<Segment> {
        let line = std::mem::take(&mut self.buffer);
        self.line(&line)
    }

    fn line(&self, line: &str) -> Vec<Segment> {
        let (tokens, trailing) = split(line);
        let mut words = tokens.iter().map(|(_, w)| w.to_string()).collect::<Words>();
        let mut partial = Partial::from(Arc::clone(&self.base));
        let mut segments = Vec::new();
        let mut next = 0;
        loop {
            let before = words.len();
            let read = parse_chunk(&mut words, &partial);
            let taken = &tokens[next..next + before - words.len()];
            next += taken.len();
            match read {
                Ok(None) => break,
                Ok(Some(chunk)) => {
                    if let Some(((gap, _), _)) = taken.split_first() {
                        push_text(&mut segments, gap);
                        segments.push(Segment::Move {
                            text: joined(taken),
                            partial: chunk.partial.clone(),
                        });
                    }
                    partial = chunk.partial;
                }
                Err(error) => {
                    log::trace!("passing through {}", error.token());
                    for (gap, word) in taken {
                        push_text(&mut segments, gap);
                        push_text(&mut segments, word);
                    }
                }
            }
        }
        push_text(&mut segments, trailing);
        segments
    }
}

/// Tokens with the whitespace before each, then the whitespace after the last.
fn split(line: &str) -> (Vec<(&str, &str)>, &str) {
    let mut tokens = Vec::new();
    let mut rest = line;
    loop {
        let start = rest.len() - rest.trim_start().len();
        let (gap, tail) = rest.split_at(start);
        if tail.is_empty() {
            return (tokens, gap);
        }
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, after) = tail.split_at(end);
        tokens.push((gap, word));
        rest = after;
    }
}

/// The consumed words as they appeared, minus the leading gap.
fn joined(taken: &[(&str, &str)]) -> String {
    let mut text = String::new();
    for (i, (gap, word)) in taken.iter().enumerate() {
        if i > 0 {
            text.push_str(gap);
        }
        text.push_str(word);
    }
    text
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(Segment::Text(last)) => last.push_str(text),
        _ => segments.push(Segment::Text(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;
    use crate::Placement;
    use crate::Position;
    use crate::Side;

    fn base() -> Arc<Node> {
        Node::root(GameState::from(Position::from((
            Side::Gold,
            ["Rc2", "Dd3", "Ee4", "eh5", "rh7"]
                .into_iter()
                .map(|w| Placement::try_from(w).unwrap())
                .collect::<Vec<_>>(),
        ))))
    }
    fn moves(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter(|s| matches!(s, Segment::Move { .. }))
            .map(Segment::text)
            .collect()
    }

    #[test]
    fn splits_words_and_gaps() {
        let (tokens, trailing) = split("  a\tbb  c ");
        assert_eq!(tokens, vec![("  ", "a"), ("\t", "bb"), ("  ", "c")]);
        assert_eq!(trailing, " ");
        assert_eq!(split(""), (vec![], ""));
    }

    #[test]
    fn text_survives_verbatim() {
        let mut annotator = Annotator::new(base());
        let line = "info  score 12 pv Rc2n Dd3n Rc3x  Ee4n\tnonsense\n";
        let segments = annotator.feed(line);
        let echoed = segments.iter().map(Segment::text).collect::<String>();
        assert_eq!(echoed, line);
        assert_eq!(moves(&segments), vec!["Rc2n", "Dd3n Rc3x", "Ee4n"]);
    }

    #[test]
    fn lines_wait_for_newline_and_reset() {
        let mut annotator = Annotator::new(base());
        assert!(annotator.feed("pv Rc2").is_empty());
        let first = annotator.feed("n\npv Rc2n");
        assert_eq!(moves(&first), vec!["Rc2n"]);
        let rest = annotator.flush();
        assert_eq!(moves(&rest), vec!["Rc2n"]);
        let Some(Segment::Move { partial, .. }) = rest.last() else {
            panic!("expected a move");
        };
        assert!(Arc::ptr_eq(partial.node(), annotator.base()));
        assert!(annotator.flush().is_empty());
    }

    #[test]
    fn moves_address_positions_past_ply_ends() {
        let mut annotator = Annotator::new(base());
        let segments = annotator.feed("Ee4n Ee5n eh5s\n");
        let Some(Segment::Move { partial, .. }) = segments.iter().rev().nth(1) else {
            panic!("expected a move");
        };
        assert_eq!(partial.node().depth(), 1);
        assert_eq!(partial.state().side(), Side::Silver);
    }
}
