use arrayvec::ArrayVec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Floor,
    Target,
    Box,
    BoxOnTarget,
    Player,
    PlayerOnTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Expansion order for successor generation. Search tie-breaking is
/// sensitive to this order, so it must stay fixed.
pub const MOVE_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
];

impl Direction {
    fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

/// One snapshot of the board. States are immutable after construction:
/// every accepted move builds a new state from a deep copy of the grid,
/// so sibling successors never alias each other.
///
/// The grid is stored row-major and may be ragged (rows of unequal
/// length); all indexing bounds-checks against each row's own length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    grid: Vec<Vec<Cell>>,
}

impl PuzzleState {
    /// Parse a board from text format.
    ///
    /// Characters:
    /// - `#` = Wall
    /// - ` ` = Floor (empty space)
    /// - `.` = Target (storage location for boxes)
    /// - `$` = Box
    /// - `@` = Player
    /// - `*` = Box on target
    /// - `+` = Player on target
    ///
    /// Ragged rows are accepted. A board without a player parses fine
    /// (it just has no legal moves); more than one player is rejected.
    pub fn from_text(text: &str) -> Result<Self, String> {
        let lines: Vec<&str> = text.lines().collect();

        if lines.is_empty() {
            return Err("Empty board".to_string());
        }

        let mut grid = Vec::with_capacity(lines.len());
        let mut player_seen = false;

        for (row, line) in lines.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    ' ' => Cell::Floor,
                    '.' => Cell::Target,
                    '$' => Cell::Box,
                    '*' => Cell::BoxOnTarget,
                    '@' | '+' => {
                        if player_seen {
                            return Err("Multiple players found".to_string());
                        }
                        player_seen = true;
                        if ch == '+' {
                            Cell::PlayerOnTarget
                        } else {
                            Cell::Player
                        }
                    }
                    _ => {
                        return Err(format!(
                            "Invalid character '{}' at position ({}, {})",
                            ch, row, col
                        ));
                    }
                };
                cells.push(cell);
            }
            grid.push(cells);
        }

        Ok(PuzzleState { grid })
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Step from (row, col) in the given direction. Returns None if the
    /// destination falls outside the grid (including off a short row).
    pub fn step(&self, row: usize, col: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = dir.delta();
        let new_row = row as i32 + dr;
        let new_col = col as i32 + dc;
        if new_row < 0 || new_col < 0 {
            return None;
        }
        let (new_row, new_col) = (new_row as usize, new_col as usize);
        let row_len = self.grid.get(new_row)?.len();
        if new_col < row_len {
            Some((new_row, new_col))
        } else {
            None
        }
    }

    /// Win condition: no loose box remains, every target is covered, and
    /// at least one box sits on a target.
    ///
    /// Counting remaining `Target` cells stands in for "every target
    /// originally present is now covered"; with equal box and target
    /// counts the two are equivalent.
    pub fn is_goal(&self) -> bool {
        let mut targets = 0usize;
        let mut boxes_on_target = 0usize;
        for row in &self.grid {
            for &cell in row {
                match cell {
                    Cell::Box => return false,
                    Cell::Target => targets += 1,
                    Cell::BoxOnTarget => boxes_on_target += 1,
                    _ => {}
                }
            }
        }
        targets == 0 && boxes_on_target > 0
    }

    /// Locate the player, scanning row-major. A board without a player
    /// yields None; that is a dead end, not an error.
    pub fn find_player(&self) -> Option<(usize, usize)> {
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Cell::Player || cell == Cell::PlayerOnTarget {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// All box positions (on or off target), row-major.
    pub fn boxes(&self) -> Vec<(usize, usize)> {
        let mut boxes = Vec::new();
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Cell::Box || cell == Cell::BoxOnTarget {
                    boxes.push((row, col));
                }
            }
        }
        boxes
    }

    /// All target positions still uncovered, row-major.
    pub fn targets(&self) -> Vec<(usize, usize)> {
        let mut targets = Vec::new();
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Cell::Target {
                    targets.push((row, col));
                }
            }
        }
        targets
    }

    /// Generate every legal move from this state, paired with the
    /// direction that produced it.
    ///
    /// A step into a wall or off the grid is rejected. A step into a box
    /// is rejected unless the cell beyond the box is in bounds and holds
    /// Floor or Target. Each accepted move rewrites exactly three cells
    /// at most: the vacated player cell, the player's destination, and
    /// (for a push) the box's destination.
    pub fn successors(&self) -> ArrayVec<(Direction, PuzzleState), 4> {
        let mut successors = ArrayVec::new();

        let Some((player_row, player_col)) = self.find_player() else {
            return successors;
        };
        let vacated = if self.grid[player_row][player_col] == Cell::PlayerOnTarget {
            Cell::Target
        } else {
            Cell::Floor
        };

        for dir in MOVE_ORDER {
            let Some((d1_row, d1_col)) = self.step(player_row, player_col, dir) else {
                continue;
            };

            match self.grid[d1_row][d1_col] {
                Cell::Floor | Cell::Target => {
                    let mut grid = self.grid.clone();
                    grid[player_row][player_col] = vacated;
                    grid[d1_row][d1_col] = if self.grid[d1_row][d1_col] == Cell::Target {
                        Cell::PlayerOnTarget
                    } else {
                        Cell::Player
                    };
                    successors.push((dir, PuzzleState { grid }));
                }
                Cell::Box | Cell::BoxOnTarget => {
                    // Pushing: the cell beyond the box must be free.
                    let Some((d2_row, d2_col)) = self.step(d1_row, d1_col, dir) else {
                        continue;
                    };
                    if !matches!(self.grid[d2_row][d2_col], Cell::Floor | Cell::Target) {
                        continue;
                    }
                    let mut grid = self.grid.clone();
                    grid[player_row][player_col] = vacated;
                    grid[d2_row][d2_col] = if self.grid[d2_row][d2_col] == Cell::Target {
                        Cell::BoxOnTarget
                    } else {
                        Cell::Box
                    };
                    grid[d1_row][d1_col] = if self.grid[d1_row][d1_col] == Cell::BoxOnTarget {
                        Cell::PlayerOnTarget
                    } else {
                        Cell::Player
                    };
                    successors.push((dir, PuzzleState { grid }));
                }
                Cell::Wall | Cell::Player | Cell::PlayerOnTarget => {}
            }
        }

        successors
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for &cell in row {
                let ch = match cell {
                    Cell::Wall => '#',
                    Cell::Floor => ' ',
                    Cell::Target => '.',
                    Cell::Box => '$',
                    Cell::BoxOnTarget => '*',
                    Cell::Player => '@',
                    Cell::PlayerOnTarget => '+',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
