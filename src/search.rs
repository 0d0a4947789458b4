use crate::deadlock::is_deadlocked;
use crate::heuristic::{Cost, Heuristic};
use crate::node::{NodeArena, NodeId};
use crate::puzzle::{Direction, PuzzleState};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet, VecDeque};

/// A solved search: the node arena plus the goal node reached. The
/// caller derives the state path, the action sequence, and the move
/// count from it.
pub struct Solution {
    arena: NodeArena,
    goal: NodeId,
}

impl Solution {
    /// Grid snapshots from the initial state to the goal, inclusive.
    /// Length is always `moves() + 1`.
    pub fn path(&self) -> Vec<PuzzleState> {
        self.arena.path(self.goal)
    }

    /// Actions from the initial state to the goal. Length is `moves()`.
    pub fn actions(&self) -> Vec<Direction> {
        self.arena.actions(self.goal)
    }

    pub fn moves(&self) -> u32 {
        self.arena.get(self.goal).g
    }
}

/// Heap entry for A*: ordered by f, then by creation sequence number so
/// equal-f nodes pop in creation order. Node identity never enters the
/// comparison.
#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    f: Cost,
    seq: u64,
    id: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Uninformed and informed search over the implicit state graph. Each
/// call owns its own frontier, explored set, and node arena; only the
/// `nodes_explored` tally survives across calls.
///
/// Both algorithms share one deliberate quirk carried over from the
/// original design: a deadlocked state popped from the frontier aborts
/// the ENTIRE search with "no solution", it does not merely prune that
/// branch. Callers cannot tell an aborted search from an exhausted one.
pub struct Solver {
    nodes_explored: usize,
}

impl Solver {
    pub fn new() -> Self {
        Solver { nodes_explored: 0 }
    }

    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Breadth-first search. For a solvable puzzle this returns a
    /// minimum-length move sequence (all moves cost 1).
    ///
    /// Duplicate states may coexist in the frontier: successors are only
    /// checked against the explored set as it stood at push time, and the
    /// set grows between pushes and pops. The pop-time skip keeps each
    /// state from being expanded twice, and the first pop of any copy is
    /// still at minimum depth, so optimality holds.
    pub fn bfs(&mut self, initial: &PuzzleState) -> Option<Solution> {
        let mut arena = NodeArena::new();
        let mut frontier = VecDeque::new();
        let mut explored: HashSet<PuzzleState> = HashSet::new();

        frontier.push_back(arena.root(initial.clone()));

        while let Some(id) = frontier.pop_front() {
            self.nodes_explored += 1;
            let state = arena.get(id).state.clone();

            if is_deadlocked(&state) {
                return None;
            }
            if state.is_goal() {
                return Some(Solution { arena, goal: id });
            }
            if !explored.insert(state.clone()) {
                continue;
            }

            for (action, successor) in state.successors() {
                if !explored.contains(&successor) {
                    let child = arena.child(successor, id, action);
                    frontier.push_back(child);
                }
            }
        }

        None
    }

    /// A* with the given heuristic. Not guaranteed optimal: none of the
    /// heuristics is proven admissible.
    pub fn astar(&mut self, initial: &PuzzleState, heuristic: Heuristic) -> Option<Solution> {
        let mut arena = NodeArena::new();
        let mut frontier = BinaryHeap::new();
        let mut explored: HashSet<PuzzleState> = HashSet::new();
        let mut seq = 0u64;

        let root = arena.root(initial.clone());
        arena.score(root, heuristic.evaluate(initial));
        frontier.push(Reverse(OpenEntry {
            f: arena.get(root).f,
            seq,
            id: root,
        }));
        seq += 1;

        while let Some(Reverse(entry)) = frontier.pop() {
            self.nodes_explored += 1;
            let id = entry.id;
            let state = arena.get(id).state.clone();

            if is_deadlocked(&state) {
                return None;
            }
            if state.is_goal() {
                return Some(Solution { arena, goal: id });
            }
            if !explored.insert(state.clone()) {
                continue;
            }

            for (action, successor) in state.successors() {
                if explored.contains(&successor) {
                    continue;
                }
                let h = heuristic.evaluate(&successor);
                let child = arena.child(successor, id, action);
                arena.score(child, h);
                frontier.push(Reverse(OpenEntry {
                    f: arena.get(child).f,
                    seq,
                    id: child,
                }));
                seq += 1;
            }
        }

        None
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}
