use crate::heuristic::Cost;
use crate::puzzle::{Direction, PuzzleState};

/// Stable handle into a [`NodeArena`]. Parent links are stored as ids
/// rather than references so the arena can grow freely mid-search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// One node of the search tree: a state, the move that produced it, and
/// the path cost so far. `heuristic` and `f` are set once at creation
/// (or immediately after, for A*) and never recomputed.
#[derive(Debug)]
pub struct SearchNode {
    pub state: PuzzleState,
    pub parent: Option<NodeId>,
    pub action: Option<Direction>,
    pub g: u32,
    pub heuristic: Cost,
    pub f: Cost,
}

/// Arena owning every node created during one search call. Nodes are
/// never freed individually; the whole arena is dropped (or handed to
/// the caller inside a solution) when the search returns.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    pub fn root(&mut self, state: PuzzleState) -> NodeId {
        self.insert(state, None, None, 0)
    }

    pub fn child(&mut self, state: PuzzleState, parent: NodeId, action: Direction) -> NodeId {
        let g = self.get(parent).g + 1;
        self.insert(state, Some(parent), Some(action), g)
    }

    fn insert(
        &mut self,
        state: PuzzleState,
        parent: Option<NodeId>,
        action: Option<Direction>,
        g: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode {
            state,
            parent,
            action,
            g,
            heuristic: Cost::Finite(0),
            f: Cost::Finite(g),
        });
        id
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Score a node: stores the heuristic and fixes f = g + h.
    pub fn score(&mut self, id: NodeId, heuristic: Cost) {
        let node = &mut self.nodes[id.0];
        node.heuristic = heuristic;
        node.f = heuristic.plus(node.g);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// States from the root to `id`, in move order. Always one longer
    /// than the action list.
    pub fn path(&self, id: NodeId) -> Vec<PuzzleState> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            path.push(node.state.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Actions from the root to `id`. The root contributes none.
    pub fn actions(&self, id: NodeId) -> Vec<Direction> {
        let mut actions = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            if let Some(action) = node.action {
                actions.push(action);
            }
            current = node.parent;
        }
        actions.reverse();
        actions
    }
}
