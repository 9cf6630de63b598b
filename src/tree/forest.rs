use super::node::Node;
use super::ply::Ply;
use crate::Outcome;
use anyhow::Context;
use std::sync::Arc;

/// The nodes a view keeps alive, one per line of play it shows.
///
/// No tracked node is an ancestor of another: tracking a node drops
/// its tracked ancestors, and tracking an ancestor of something
/// already tracked changes nothing.
#[derive(Debug, Default, Clone)]
pub struct Forest {
    nodes: Vec<Arc<Node>>,
}

impl Forest {
    pub fn nodes(&self) -> &[Arc<Node>] {
        &self.nodes
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn contains(&self, node: &Arc<Node>) -> bool {
        self.nodes.iter().any(|n| Arc::ptr_eq(n, node))
    }

    /// Tracks `node`, returning whether the collection changed.
    pub fn add_to_tree(&mut self, node: Arc<Node>) -> bool {
        if self
            .nodes
            .iter()
            .any(|n| Arc::ptr_eq(n, &node) || node.is_ancestor_of(n))
        {
            return false;
        }
        self.nodes.retain(|n| !n.is_ancestor_of(&node));
        self.nodes.push(node);
        true
    }
    /// Forgets `node` and everything tracked below it. If that changed
    /// anything, the parent takes its place so the line stays visible.
    pub fn delete_from_tree(&mut self, node: &Arc<Node>) -> bool {
        let before = self.nodes.len();
        self.nodes
            .retain(|n| !Arc::ptr_eq(n, node) && !node.is_ancestor_of(n));
        let changed = self.nodes.len() != before;
        if changed {
            if let Some(parent) = node.parent() {
                self.add_to_tree(Arc::clone(parent));
            }
        }
        changed
    }

    /// Brings a session's history into the tree: replays the first
    /// `count` plies from `root`, records the declared result on the
    /// last node, and tracks that node.
    pub fn reconcile(
        &mut self,
        root: &Arc<Node>,
        plies: &[Ply],
        count: usize,
        result: Option<Outcome>,
    ) -> anyhow::Result<Arc<Node>> {
        let mut node = Arc::clone(root);
        for (i, ply) in plies.iter().take(count).enumerate() {
            node = match ply {
                Ply::Setup(placements) if node.in_setup() => {
                    anyhow::ensure!(
                        Self::placeable(&node, placements),
                        "session ply {} does not fit the board",
                        i + 1
                    );
                    node.add_setup(placements.clone())
                        .with_context(|| format!("session ply {}", i + 1))?
                }
                Ply::Steps(steps) if !node.in_setup() => {
                    anyhow::ensure!(
                        Self::playable(&node, steps),
                        "session ply {} does not fit the board",
                        i + 1
                    );
                    node.make_move(steps.clone())
                        .with_context(|| format!("session ply {}", i + 1))?
                }
                _ => anyhow::bail!("session ply {} is out of phase", i + 1),
            };
        }
        if let Some(outcome) = result {
            if node.result() != Some(outcome) {
                node.declare(outcome);
            }
        }
        self.add_to_tree(Arc::clone(&node));
        log::debug!("reconciled session at depth {}", node.depth());
        Ok(node)
    }
    fn playable(node: &Node, steps: &[crate::Step]) -> bool {
        let mut state = *node.state();
        for step in steps {
            if !state.is_playable(step) {
                return false;
            }
            state.apply(step);
        }
        true
    }
    fn placeable(node: &Node, placements: &[crate::Placement]) -> bool {
        let mut position = *node.state().position();
        for placement in placements {
            if !position.is_placeable(placement) {
                return false;
            }
            position.place(*placement);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use crate::Placement;
    use crate::Position;
    use crate::Reason;
    use crate::Side;
    use crate::Step;

    fn setup(side: Side) -> Vec<Placement> {
        Position::random()
            .pieces()
            .filter(|p| p.piece.side() == side)
            .collect()
    }
    fn first_step(node: &Arc<Node>) -> Vec<Step> {
        let state = node.state();
        let (origin, destination) = state.legal_steps()[0];
        vec![state.piece_step(origin, origin.toward(&destination).unwrap()).unwrap()]
    }

    #[test]
    fn tracking_descendant_replaces_ancestor() {
        let start = Node::start();
        let gold = start.add_setup(setup(Side::Gold)).unwrap();
        let mut forest = Forest::default();
        assert!(forest.add_to_tree(Arc::clone(&start)));
        assert!(forest.add_to_tree(Arc::clone(&gold)));
        assert_eq!(forest.len(), 1);
        assert!(forest.contains(&gold));
        assert!(!forest.add_to_tree(Arc::clone(&start)));
        assert!(!forest.add_to_tree(Arc::clone(&gold)));
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn siblings_are_tracked_together() {
        let start = Node::start();
        let a = start.add_setup(setup(Side::Gold)).unwrap();
        let b = start.add_setup(setup(Side::Gold)).unwrap();
        let mut forest = Forest::default();
        forest.add_to_tree(Arc::clone(&a));
        forest.add_to_tree(Arc::clone(&b));
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn deleting_falls_back_to_parent() {
        let start = Node::start();
        let gold = start.add_setup(setup(Side::Gold)).unwrap();
        let play = gold.add_setup(setup(Side::Silver)).unwrap();
        let mut forest = Forest::default();
        forest.add_to_tree(Arc::clone(&play));
        assert!(forest.delete_from_tree(&gold));
        assert_eq!(forest.len(), 1);
        assert!(forest.contains(&start));
        assert!(!forest.delete_from_tree(&play));
        assert!(forest.contains(&start));
    }

    #[test]
    fn reconcile_replays_and_declares() {
        let start = Node::start();
        let gold = start.add_setup(setup(Side::Gold)).unwrap();
        let play = gold.add_setup(setup(Side::Silver)).unwrap();
        let steps = first_step(&play);
        let plies = vec![
            gold.ply().cloned().unwrap(),
            play.ply().cloned().unwrap(),
            Ply::Steps(steps),
        ];
        let resign = Outcome::from((Side::Gold, Reason::Resignation));
        let mut forest = Forest::default();
        forest.add_to_tree(Arc::clone(&gold));
        let last = forest.reconcile(&start, &plies, 3, Some(resign)).unwrap();
        assert_eq!(last.depth(), 3);
        assert!(Arc::ptr_eq(last.parent().unwrap(), &play));
        assert_eq!(last.result(), Some(resign));
        assert_eq!(forest.len(), 1);
        assert!(forest.contains(&last));
        let partial = forest.reconcile(&start, &plies, 2, None).unwrap();
        assert!(Arc::ptr_eq(&partial, &play));
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn reconcile_rejects_out_of_phase() {
        let start = Node::start();
        let gold = start.add_setup(setup(Side::Gold)).unwrap();
        let play = gold.add_setup(setup(Side::Silver)).unwrap();
        let mut forest = Forest::default();
        let plies = vec![Ply::Steps(first_step(&play))];
        assert!(forest.reconcile(&start, &plies, 1, None).is_err());
        assert!(forest.is_empty());
    }
}
