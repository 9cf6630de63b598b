use super::style::Style;
use crate::GameState;
use crate::Node;
use crate::Ply;
use crate::Side;
use crate::Step;
use std::sync::Arc;

/// Space-separated words for steps taken from `before`, each capture
/// announced right after the step that caused it.
pub fn step_words(before: &GameState, steps: &[Step]) -> String {
    let mut state = *before;
    let mut words = Vec::new();
    for step in steps {
        words.push(step.to_string());
        if let Some(captured) = state.apply(step) {
            words.push(captured.capture());
        }
    }
    words.join(" ")
}

impl Ply {
    /// Canonical text of this ply played from `before`.
    pub fn words(&self, before: &GameState) -> String {
        match self {
            Ply::Setup(placements) => placements
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            Ply::Steps(steps) => step_words(before, steps),
        }
    }
}

impl Node {
    /// `<N><side-letter>` for the ply played from this node, counting
    /// the root's ply as move 1.
    pub fn label(&self, style: Style) -> String {
        let side = self.state().side();
        let root = match self.depth() % 2 {
            0 => side,
            _ => side.opponent(),
        };
        let offset = match root {
            Side::Gold => 0,
            Side::Silver => 1,
        };
        format!("{}{}", (self.depth() + offset) / 2 + 1, side.letter(style))
    }
    /// Text of the ply that produced this node.
    pub fn notation(&self) -> Option<String> {
        let parent = self.parent()?;
        self.ply().map(|ply| ply.words(parent.state()))
    }
    /// Every ply from the root to this node as `<label> <words>`.
    pub fn move_list(self: &Arc<Self>, style: Style, separator: &str) -> String {
        self.lineage()
            .windows(2)
            .map(|pair| {
                let ply = pair[1].ply().expect("non-root has a ply");
                format!("{} {}", pair[0].label(style), ply.words(pair[0].state()))
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}
