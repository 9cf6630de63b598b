use super::ply::Ply;
use crate::History;
use crate::Illegal;
use crate::Outcome;
use crate::GameState;
use crate::Placement;
use crate::Position;
use crate::Step;
use crate::detect_game_end;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::Weak;

/// Where a new child goes among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    First,
    Last,
}

/// A position reached by a complete ply, shared by every view of the game.
///
/// A node owns its parent; a parent only observes its children. Whoever
/// holds a node keeps its whole line alive, and a branch nobody holds is
/// dropped without ceremony. Siblings never share a state: inserting a
/// ply that transposes into an existing child returns that child.
///
/// Apart from its child list a node never changes after construction.
/// The list sits behind a lock of its own, so writers on disjoint
/// subtrees never meet.
pub struct Node {
    from: Option<(Arc<Node>, Ply)>,
    state: GameState,
    depth: usize,
    children: Mutex<Vec<Weak<Node>>>,
    detected: OnceLock<Option<Outcome>>,
    declared: OnceLock<Outcome>,
}

impl Node {
    /// A tree rooted at an arbitrary position.
    pub fn root(state: GameState) -> Arc<Self> {
        Arc::new(Self {
            from: None,
            state,
            depth: 0,
            children: Mutex::new(Vec::new()),
            detected: OnceLock::new(),
            declared: OnceLock::new(),
        })
    }
    /// An empty board with gold to set up.
    pub fn start() -> Arc<Self> {
        Self::root(GameState::default())
    }

    pub fn parent(&self) -> Option<&Arc<Node>> {
        self.from.as_ref().map(|(parent, _)| parent)
    }
    /// The ply that produced this node; `None` at the root.
    pub fn ply(&self) -> Option<&Ply> {
        self.from.as_ref().map(|(_, ply)| ply)
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn depth(&self) -> usize {
        self.depth
    }
    pub fn is_game_start(&self) -> bool {
        self.state.position().is_empty() && self.state.side() == crate::Side::Gold
    }
    /// The side to move places pieces rather than stepping.
    pub fn in_setup(&self) -> bool {
        self.is_game_start()
            || self
                .from
                .as_ref()
                .is_some_and(|(parent, ply)| ply.is_setup() && parent.is_game_start())
    }
}

/// Outcomes.
impl Node {
    /// The declared outcome if a session supplied one, else the one
    /// the board shows, computed once on first request.
    pub fn result(&self) -> Option<Outcome> {
        self.declared.get().copied().or_else(|| {
            *self.detected.get_or_init(|| match self.in_setup() {
                true => None,
                false => detect_game_end(self),
            })
        })
    }
    /// Records an outcome decided off the board. The first declaration wins.
    pub fn declare(&self, outcome: Outcome) -> bool {
        self.declared
            .set(outcome)
            .inspect(|_| log::debug!("declared {} at depth {}", outcome, self.depth))
            .is_ok()
    }
    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }
}

/// Insertion.
impl Node {
    /// Inserts the child reached by `ply`, or returns the sibling that
    /// already holds `state`. The flag reports whether a node was built.
    ///
    /// Panics if `ply` does not lead from this node to `state`.
    pub fn add_child(self: &Arc<Self>, ply: Ply, state: GameState, order: Order) -> (Arc<Node>, bool) {
        assert!(ply.replay(&self.state) == state, "inconsistent state after {:?}", ply);
        let mut children = self.children.lock().expect("poison");
        children.retain(|weak| weak.strong_count() > 0);
        if let Some(twin) = children
            .iter()
            .filter_map(Weak::upgrade)
            .find(|child| child.state == state)
        {
            log::debug!("transposed into existing child at depth {}", twin.depth);
            return (twin, false);
        }
        let child = Arc::new(Self {
            from: Some((Arc::clone(self), ply)),
            state,
            depth: self.depth + 1,
            children: Mutex::new(Vec::new()),
            detected: OnceLock::new(),
            declared: OnceLock::new(),
        });
        match order {
            Order::First => children.insert(0, Arc::downgrade(&child)),
            Order::Last => children.push(Arc::downgrade(&child)),
        }
        log::debug!("added child at depth {} ({} siblings)", child.depth, children.len());
        (child, true)
    }
    /// Commits a complete setup for the side to move.
    ///
    /// Panics on a placement the position cannot take.
    pub fn add_setup(self: &Arc<Self>, placements: Vec<Placement>) -> Result<Arc<Node>, Illegal> {
        assert!(self.in_setup(), "setup after the setup phase");
        let mut position = *self.state.position();
        for placement in placements.iter() {
            assert!(position.is_placeable(placement), "cannot place {}", placement);
            position.place(*placement);
        }
        if position.is_set_up() {
            let state = GameState::from(position).finish();
            Ok(self.add_child(Ply::Setup(placements), state, Order::Last).0)
        } else {
            Err(Illegal::IncompleteSetup)
        }
    }
    /// Commits a ply of steps after classifying it.
    ///
    /// Panics on a step the board does not allow.
    pub fn make_move(self: &Arc<Self>, steps: Vec<Step>) -> Result<Arc<Node>, Illegal> {
        let mut state = self.state;
        for step in steps.iter() {
            assert!(state.is_playable(step), "cannot play {}", step);
            state.apply(step);
        }
        self.legal_move(&state)?;
        Ok(self.add_child(Ply::Steps(steps), state.finish(), Order::Last).0)
    }
}

/// Traversal.
impl Node {
    /// Live children in sibling order. Expired entries are pruned.
    pub fn children(&self) -> Vec<Arc<Node>> {
        let mut children = self.children.lock().expect("poison");
        children.retain(|weak| weak.strong_count() > 0);
        children.iter().filter_map(Weak::upgrade).collect()
    }
    /// The single child whose ply continues `prefix`, if exactly one does.
    pub fn find_partial_matching_child(&self, prefix: &Ply) -> Option<Arc<Node>> {
        let mut matches = self
            .children()
            .into_iter()
            .filter(|child| child.ply().is_some_and(|ply| ply.starts_with(prefix)));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
    pub fn root_of(self: &Arc<Self>) -> Arc<Node> {
        let mut node = Arc::clone(self);
        while let Some(parent) = node.parent().cloned() {
            node = parent;
        }
        node
    }
    /// Parents from this node's up to, not including, `until`
    /// (or through the root).
    pub fn ancestors(&self, until: Option<&Arc<Node>>) -> Vec<Weak<Node>> {
        let mut chain = Vec::new();
        let mut next = self.parent();
        while let Some(node) = next {
            if until.is_some_and(|stop| Arc::ptr_eq(stop, node)) {
                break;
            }
            chain.push(Arc::downgrade(node));
            next = node.parent();
        }
        chain
    }
    pub fn self_and_ancestors(self: &Arc<Self>, until: Option<&Arc<Node>>) -> Vec<Weak<Node>> {
        std::iter::once(Arc::downgrade(self))
            .chain(self.ancestors(until))
            .collect()
    }
    /// Nodes from the root down to this one.
    pub fn lineage(self: &Arc<Self>) -> Vec<Arc<Node>> {
        let mut line = vec![Arc::clone(self)];
        let mut next = self.parent().cloned();
        while let Some(node) = next {
            next = node.parent().cloned();
            line.push(node);
        }
        line.reverse();
        line
    }
    /// Strict ancestry.
    pub fn is_ancestor_of(&self, other: &Node) -> bool {
        let mut next = other.parent();
        while let Some(node) = next {
            if std::ptr::eq(node.as_ref(), self) {
                return true;
            }
            next = node.parent();
        }
        false
    }
    /// Replays the line ending at `source` onto the tree rooted at
    /// `target`. Fails if the two roots differ.
    pub fn reroot(source: &Arc<Node>, target: &Arc<Node>) -> Option<Arc<Node>> {
        let line = source.lineage();
        let (root, rest) = line.split_first()?;
        if root.state != target.state {
            log::debug!("cannot reroot across different positions");
            return None;
        }
        Some(rest.iter().fold(Arc::clone(target), |node, next| {
            let ply = next.ply().cloned().expect("non-root has a ply");
            node.add_child(ply, next.state, Order::Last).0
        }))
    }
}

impl History for Node {
    fn start(&self) -> &GameState {
        &self.state
    }
    fn occurrences(&self, position: &Position) -> usize {
        let mut count = 0;
        let mut next = Some(self);
        while let Some(node) = next {
            if node.state.position() == position {
                count += 1;
            }
            next = node.parent().map(|p| p.as_ref());
        }
        count
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("depth", &self.depth)
            .field("ply", &self.ply())
            .field("side", &self.state.side())
            .finish()
    }
}
