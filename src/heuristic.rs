use crate::puzzle::{Cell, PuzzleState};

/// Estimated remaining cost of a state. `Infinite` marks a state the
/// search should treat as maximally bad (it still gets queued, just
/// behind every finite estimate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Cost {
    Finite(u32),
    Infinite,
}

impl Cost {
    /// f = g + h, saturating into `Infinite`.
    pub fn plus(self, g: u32) -> Cost {
        match self {
            Cost::Finite(h) => Cost::Finite(h + g),
            Cost::Infinite => Cost::Infinite,
        }
    }
}

/// The three heuristics selectable by the caller. All are pure functions
/// of a state; none is a proven admissible lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Number of boxes not yet on a target.
    H1,
    /// Sum of each box's Manhattan distance to its nearest target,
    /// ignoring assignment conflicts.
    H2,
    /// H2 plus the player's Manhattan distance to the nearest loose box.
    H3,
}

impl Heuristic {
    pub fn evaluate(&self, state: &PuzzleState) -> Cost {
        match self {
            Heuristic::H1 => h1(state),
            Heuristic::H2 => h2(state),
            Heuristic::H3 => h3(state),
        }
    }
}

fn manhattan(a: (usize, usize), b: (usize, usize)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

/// Count of loose boxes. Boxes already on a target do not count.
fn h1(state: &PuzzleState) -> Cost {
    let count = state
        .boxes()
        .into_iter()
        .filter(|&(row, col)| state.cell(row, col) == Some(Cell::Box))
        .count();
    Cost::Finite(count as u32)
}

/// Sum over every box (on or off target) of the minimum Manhattan
/// distance to any uncovered target. Zero when there are no boxes or no
/// targets left.
fn h2(state: &PuzzleState) -> Cost {
    let boxes = state.boxes();
    let targets = state.targets();
    if boxes.is_empty() || targets.is_empty() {
        return Cost::Finite(0);
    }

    let total: u32 = boxes
        .into_iter()
        .map(|box_pos| {
            targets
                .iter()
                .map(|&target| manhattan(box_pos, target))
                .min()
                .unwrap_or(0)
        })
        .sum();
    Cost::Finite(total)
}

/// h2 plus the player's distance to the nearest loose box. A state with
/// no locatable player scores `Infinite`; one with no loose boxes
/// scores zero.
fn h3(state: &PuzzleState) -> Cost {
    let Some(player) = state.find_player() else {
        return Cost::Infinite;
    };

    let to_nearest_box = state
        .boxes()
        .into_iter()
        .filter(|&(row, col)| state.cell(row, col) == Some(Cell::Box))
        .map(|box_pos| manhattan(player, box_pos))
        .min();

    match (h2(state), to_nearest_box) {
        (_, None) => Cost::Finite(0),
        (Cost::Finite(box_to_target), Some(dist)) => Cost::Finite(box_to_target + dist),
        (Cost::Infinite, _) => Cost::Infinite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_ordering() {
        assert!(Cost::Finite(0) < Cost::Finite(1));
        assert!(Cost::Finite(u32::MAX) < Cost::Infinite);
        assert_eq!(Cost::Finite(3).plus(2), Cost::Finite(5));
        assert_eq!(Cost::Infinite.plus(2), Cost::Infinite);
    }

    #[test]
    fn test_h1_counts_loose_boxes_only() {
        let state = PuzzleState::from_text(
            "######\n\
             #@$$*#\n\
             #  ..#\n\
             ######",
        )
        .unwrap();
        assert_eq!(Heuristic::H1.evaluate(&state), Cost::Finite(2));

        let solved = PuzzleState::from_text("####\n#@*#\n####").unwrap();
        assert_eq!(Heuristic::H1.evaluate(&solved), Cost::Finite(0));
    }

    #[test]
    fn test_h2_nearest_target_sum() {
        let state = PuzzleState::from_text(
            "#####\n\
             #@$.#\n\
             #####",
        )
        .unwrap();
        assert_eq!(Heuristic::H2.evaluate(&state), Cost::Finite(1));
    }

    #[test]
    fn test_h2_counts_boxes_already_on_targets() {
        // The on-target box still measures distance to the open target.
        let state = PuzzleState::from_text(
            "######\n\
             #@$.*#\n\
             ######",
        )
        .unwrap();
        // Loose box at col 2 is 1 from the target; on-target box at
        // col 4 is 1 from it as well.
        assert_eq!(Heuristic::H2.evaluate(&state), Cost::Finite(2));
    }

    #[test]
    fn test_h2_zero_without_boxes_or_targets() {
        let no_targets = PuzzleState::from_text("#####\n#@$ #\n#####").unwrap();
        assert_eq!(Heuristic::H2.evaluate(&no_targets), Cost::Finite(0));

        let no_boxes = PuzzleState::from_text("#####\n#@ .#\n#####").unwrap();
        assert_eq!(Heuristic::H2.evaluate(&no_boxes), Cost::Finite(0));
    }

    #[test]
    fn test_h3_adds_player_distance() {
        let state = PuzzleState::from_text(
            "#####\n\
             #@$.#\n\
             #####",
        )
        .unwrap();
        // h2 = 1, player at (1,1) is 1 from the box at (1,2).
        assert_eq!(Heuristic::H3.evaluate(&state), Cost::Finite(2));
    }

    #[test]
    fn test_h3_zero_without_loose_boxes() {
        let state = PuzzleState::from_text(
            "#####\n\
             #@ *#\n\
             #####",
        )
        .unwrap();
        assert_eq!(Heuristic::H3.evaluate(&state), Cost::Finite(0));
    }

    #[test]
    fn test_h3_infinite_without_player() {
        let state = PuzzleState::from_text(
            "#####\n\
             # $.#\n\
             #####",
        )
        .unwrap();
        assert_eq!(Heuristic::H3.evaluate(&state), Cost::Infinite);
    }

    #[test]
    fn test_h3_dominates_h2_with_boxes_present() {
        let state = PuzzleState::from_text(
            "#######\n\
             #@    #\n\
             # $ . #\n\
             #######",
        )
        .unwrap();
        let h2 = Heuristic::H2.evaluate(&state);
        let h3 = Heuristic::H3.evaluate(&state);
        assert!(h3 >= h2);
    }
}
