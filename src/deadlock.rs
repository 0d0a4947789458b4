use crate::puzzle::{Cell, PuzzleState, MOVE_ORDER};
use std::collections::{HashSet, VecDeque};

/// Weak deadlock test: a state is declared dead when some loose box has
/// no wall-free path to any cell that holds (or could hold) a target.
///
/// A state with no loose boxes or no uncovered targets is never
/// deadlocked. The player may be standing on the last uncovered target
/// mid-solution; flagging that state would kill searches through it.
///
/// The flood fill treats only walls as obstacles; other boxes and the
/// player do not block. That makes this a necessary-but-not-sufficient
/// check: boxes frozen against each other or wedged in a corner with a
/// nominally reachable target slip through. Searches rely on exactly
/// these semantics, so the check must not be strengthened.
pub fn is_deadlocked(state: &PuzzleState) -> bool {
    let loose_boxes: Vec<(usize, usize)> = state
        .boxes()
        .into_iter()
        .filter(|&(row, col)| state.cell(row, col) == Some(Cell::Box))
        .collect();

    if loose_boxes.is_empty() || state.targets().is_empty() {
        return false;
    }

    loose_boxes
        .into_iter()
        .any(|pos| !can_reach_target(state, pos))
}

/// BFS flood fill from one box position over non-wall cells, looking for
/// a Target or BoxOnTarget cell. The starting cell itself counts, so a
/// box already sitting on a target is trivially satisfied.
fn can_reach_target(state: &PuzzleState, start: (usize, usize)) -> bool {
    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();

    queue.push_back(start);
    visited.insert(start);

    while let Some((row, col)) = queue.pop_front() {
        if matches!(
            state.cell(row, col),
            Some(Cell::Target | Cell::BoxOnTarget)
        ) {
            return true;
        }

        for dir in MOVE_ORDER {
            if let Some(next) = state.step(row, col, dir) {
                let (next_row, next_col) = next;
                if state.cell(next_row, next_col) != Some(Cell::Wall) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_corridor_not_deadlocked() {
        let state = PuzzleState::from_text(
            "#####\n\
             #@$.#\n\
             #####",
        )
        .unwrap();
        assert!(!is_deadlocked(&state));
    }

    #[test]
    fn test_box_already_on_target_not_deadlocked() {
        let state = PuzzleState::from_text(
            "####\n\
             #@*#\n\
             ####",
        )
        .unwrap();
        assert!(!is_deadlocked(&state));
    }

    #[test]
    fn test_no_boxes_not_deadlocked() {
        let state = PuzzleState::from_text(
            "####\n\
             #@ #\n\
             ####",
        )
        .unwrap();
        assert!(!is_deadlocked(&state));
    }

    #[test]
    fn test_walled_pocket_is_deadlocked() {
        // The box's pocket is sealed off from the only target by a wall.
        let state = PuzzleState::from_text(
            "######\n\
             #@$# #\n\
             #  #.#\n\
             ######",
        )
        .unwrap();
        assert!(is_deadlocked(&state));
    }

    #[test]
    fn test_no_targets_anywhere_not_deadlocked() {
        // A loose box with no storage points at all is not flagged;
        // without targets the check has nothing to test against.
        let state = PuzzleState::from_text(
            "#####\n\
             #@$ #\n\
             #####",
        )
        .unwrap();
        assert!(!is_deadlocked(&state));
    }

    #[test]
    fn test_player_covering_last_target_not_deadlocked() {
        // Mid-solution the player can stand on the only uncovered
        // target, leaving zero Target cells. The loose box must not be
        // declared stranded; the state is one push from winnable.
        let state = PuzzleState::from_text(
            "######\n\
             #+ $ #\n\
             ######",
        )
        .unwrap();
        assert!(!is_deadlocked(&state));
    }

    #[test]
    fn test_one_bad_box_deadlocks_whole_state() {
        // Left box can reach the target; the right box is sealed away.
        let state = PuzzleState::from_text(
            "########\n\
             #@$. #$#\n\
             ########",
        )
        .unwrap();
        assert!(is_deadlocked(&state));
    }

    #[test]
    fn test_boxes_do_not_block_the_fill() {
        // The path from the left box runs straight through the other box;
        // only walls block, so this is not flagged.
        let state = PuzzleState::from_text(
            "######\n\
             #@$$.#\n\
             ######",
        )
        .unwrap();
        assert!(!is_deadlocked(&state));
    }
}
