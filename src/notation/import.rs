use super::cursor::Cursor;
use super::cursor::Words;
use super::error::NotationError;
use super::parser::parse_chunk;
use super::partial::Partial;
use crate::Node;
use std::sync::Arc;

/// What reading a whole text into the tree did.
#[derive(Debug, Clone)]
pub struct Import {
    /// The starting node and every node entered after it, in order.
    pub path: Vec<Arc<Node>>,
    /// How many of those nodes the text added to the tree.
    pub created: usize,
    /// Whether the text ended on a ply boundary or a complete ply.
    pub complete: bool,
    /// The accumulator where reading stopped.
    pub partial: Partial,
    /// The token that stopped reading early, if one did.
    pub error: Option<NotationError>,
}

impl Import {
    pub fn last(&self) -> &Arc<Node> {
        self.partial.node()
    }
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Reads `text` into the tree below `start`.
pub fn to_tree(text: &str, start: &Arc<Node>) -> Import {
    to_tree_from(&mut Words::from(text), start)
}

/// Reads tokens until the cursor runs dry or a token fails. A
/// trailing ply that is complete and legal is committed as well.
pub fn to_tree_from<C: Cursor>(cursor: &mut C, start: &Arc<Node>) -> Import {
    let mut import = Import {
        path: vec![Arc::clone(start)],
        created: 0,
        complete: false,
        partial: Partial::from(Arc::clone(start)),
        error: None,
    };
    loop {
        match parse_chunk(cursor, &import.partial) {
            Ok(Some(chunk)) => {
                import.visit(chunk.visited);
                import.partial = chunk.partial;
            }
            Ok(None) => break,
            Err(error) => {
                log::debug!("stopped reading at {}", error);
                import.error = Some(error);
                return import;
            }
        }
    }
    import.complete = match import.partial.is_idle() {
        true => true,
        false => match import.partial.commit("") {
            Ok((next, created)) => {
                import.visit(vec![(Arc::clone(next.node()), created)]);
                import.partial = next;
                true
            }
            Err(_) => false,
        },
    };
    import
}

impl Import {
    fn visit(&mut self, visited: Vec<(Arc<Node>, bool)>) {
        for (node, created) in visited {
            self.created += created as usize;
            self.path.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use crate::GameState;
    use crate::Illegal;
    use crate::Placement;
    use crate::Position;
    use crate::Side;
    use crate::Style;

    fn setup_words(position: &Position, side: Side) -> String {
        position
            .pieces()
            .filter(|p| p.piece.side() == side)
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
    fn root(side: Side, words: &str) -> Arc<Node> {
        Node::root(GameState::from(Position::from((
            side,
            words
                .split_whitespace()
                .map(|w| Placement::try_from(w).unwrap())
                .collect::<Vec<_>>(),
        ))))
    }

    #[test]
    fn setup_creates_two_nodes() {
        let position = Position::random();
        let start = Node::start();
        let gold = setup_words(&position, Side::Gold);
        let import = to_tree(&format!("1g {}", gold), &start);
        assert!(import.is_ok());
        assert!(import.complete);
        assert_eq!(import.created, 1);
        assert_eq!(import.path.len(), 2);
        assert!(import.last().in_setup());
        assert_eq!(start.children().len(), 1);
        let silver = setup_words(&position, Side::Silver);
        let import = to_tree(&format!("1g {} 1s {}", gold, silver), &start);
        assert!(import.is_ok());
        assert_eq!(import.created, 1);
        assert_eq!(import.path.len(), 3);
        let play = import.last();
        assert!(!play.in_setup());
        assert_eq!(play.state().side(), Side::Gold);
        assert_eq!(play.state().position(), &position);
    }

    #[test]
    fn one_ply_round_trip() {
        let start = root(Side::Gold, "Rc2 Dd3 eh8 Ra1");
        let text = "Rc2n Dd3n Rc3x Ra1n";
        let import = to_tree(text, &start);
        assert!(import.is_ok());
        assert!(import.complete);
        assert_eq!(import.created, 1);
        assert_eq!(import.last().notation().as_deref(), Some(text));
        assert_eq!(
            import.last().move_list(Style::Modern, " "),
            format!("1g {}", text)
        );
    }

    #[test]
    fn reimport_traverses_without_creating() {
        let start = root(Side::Gold, "Ed4 Ra2 eh5 rh7");
        let text = "1g Ed4n Ed5n 1s eh5s 2g Ra2n";
        let first = to_tree(text, &start);
        assert_eq!(first.created, 3);
        let again = to_tree(text, &start);
        assert!(again.is_ok());
        assert_eq!(again.created, 0);
        assert!(Arc::ptr_eq(first.last(), again.last()));
        assert_eq!(again.path.len(), 4);
    }

    #[test]
    fn transposed_text_merges() {
        let start = root(Side::Gold, "Ed4 Ra2 eh5 rh7");
        let one = to_tree("Ed4n Ra2n", &start);
        let two = to_tree("Ra2n Ed4n", &start);
        assert_eq!(two.created, 0);
        assert!(Arc::ptr_eq(one.last(), two.last()));
        assert_eq!(start.children().len(), 1);
    }

    #[test]
    fn stops_at_first_bad_token() {
        let start = root(Side::Gold, "Ed4 Ra2 eh5 rh7");
        let import = to_tree("1g Ed4n 1s eh5s rc6x", &start);
        assert_eq!(
            import.error,
            Some(NotationError::CaptureWithoutStep("rc6x".into()))
        );
        assert!(!import.complete);
        assert_eq!(import.created, 1);
        assert!(!import.partial.is_idle());
    }

    #[test]
    fn trailing_incomplete_ply() {
        let start = root(Side::Gold, "Ed4 rd5 Ra2 rh7");
        let import = to_tree("rd5n", &start);
        assert!(import.is_ok());
        assert!(!import.complete);
        assert_eq!(import.created, 0);
        assert_eq!(import.partial.closing(), Err(Illegal::IncompletePush));
        assert!(start.children().is_empty());
    }
}
