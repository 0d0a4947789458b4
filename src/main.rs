mod deadlock;
mod heuristic;
mod levels;
mod node;
mod puzzle;
mod search;

use clap::{Parser, ValueEnum};
use heuristic::Heuristic;
use levels::Levels;
use search::{Solution, Solver};
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Bfs,
    Astar,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicType {
    H1,
    H2,
    H3,
}

impl From<HeuristicType> for Heuristic {
    fn from(h: HeuristicType) -> Self {
        match h {
            HeuristicType::H1 => Heuristic::H1,
            HeuristicType::H2 => Heuristic::H2,
            HeuristicType::H3 => Heuristic::H3,
        }
    }
}

fn print_solution(solution: &Solution) {
    let path = solution.path();
    let actions = solution.actions();
    let total = actions.len();

    println!("\nStarting position:\n{}", path[0]);
    for (count, (action, state)) in actions.iter().zip(path.iter().skip(1)).enumerate() {
        println!("Move {} ({}/{}):\n{}", action, count + 1, total, state);
    }
}

struct LevelStats {
    solved: bool,
    steps: usize,
    states_explored: usize,
    elapsed_ms: u128,
}

struct SolveOpts {
    level_num: usize,
    algorithm: Algorithm,
    heuristic: Heuristic,
    print_solution: bool,
}

fn solve_level(initial: &puzzle::PuzzleState, opts: SolveOpts) -> LevelStats {
    let mut solver = Solver::new();
    let start = Instant::now();
    let result = match opts.algorithm {
        Algorithm::Bfs => solver.bfs(initial),
        Algorithm::Astar => solver.astar(initial, opts.heuristic),
    };
    let elapsed_ms = start.elapsed().as_millis();
    let states_explored = solver.nodes_explored();

    let (solved_char, steps, solved) = match &result {
        Some(solution) => ('Y', solution.moves() as usize, true),
        None => ('N', 0, false),
    };

    println!(
        "level: {:<3}  solved: {}  steps: {:<5}  states: {:<12}  elapsed: {} ms",
        opts.level_num, solved_char, steps, states_explored, elapsed_ms
    );

    if opts.print_solution {
        if let Some(solution) = result {
            print_solution(&solution);
        }
    }

    LevelStats {
        solved,
        steps,
        states_explored,
        elapsed_ms,
    }
}

#[derive(Parser)]
#[command(name = "soklab")]
#[command(about = "A Sokoban solver", long_about = None)]
struct Args {
    /// Path to the levels file (XSB format)
    #[arg(value_name = "FILE")]
    levels_file: String,

    /// Level number to solve (1-indexed), or start of range
    #[arg(value_name = "LEVEL")]
    level_start: usize,

    /// Optional end of level range (inclusive, 1-indexed)
    #[arg(value_name = "LEVEL_END")]
    level_end: Option<usize>,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Search algorithm
    #[arg(short = 'a', long, value_enum, default_value = "astar")]
    algorithm: Algorithm,

    /// Heuristic for A* (ignored by BFS)
    #[arg(short = 'H', long, value_enum, default_value = "h3")]
    heuristic: HeuristicType,
}

fn main() {
    let args = Args::parse();

    let levels = match Levels::from_file(&args.levels_file) {
        Ok(levels) => levels,
        Err(e) => {
            eprintln!("Error loading levels: {}", e);
            std::process::exit(1);
        }
    };

    let level_end = args.level_end.unwrap_or(args.level_start);
    let num_levels = level_end.saturating_sub(args.level_start) + 1;

    if args.level_start == 0 {
        eprintln!("Error: level numbers must be at least 1");
        std::process::exit(1);
    }

    if level_end < args.level_start {
        eprintln!("Error: level end must be >= level start");
        std::process::exit(1);
    }

    if level_end > levels.len() {
        eprintln!(
            "Error: level {} not found (file contains {} levels)",
            level_end,
            levels.len()
        );
        std::process::exit(1);
    }

    if args.print_solution && num_levels > 1 {
        eprintln!("Error: solution printing only supported when solving a single level");
        std::process::exit(1);
    }

    let mut total_solved = 0;
    let mut total_steps = 0;
    let mut total_states = 0;
    let mut total_time_ms = 0;

    for level_num in args.level_start..=level_end {
        let initial = levels.get(level_num - 1).unwrap();
        let opts = SolveOpts {
            level_num,
            algorithm: args.algorithm,
            heuristic: args.heuristic.into(),
            print_solution: args.print_solution,
        };
        let stats = solve_level(initial, opts);

        if stats.solved {
            total_solved += 1;
        }
        total_steps += stats.steps;
        total_states += stats.states_explored;
        total_time_ms += stats.elapsed_ms;
    }

    if num_levels > 1 {
        println!("---");
        println!(
            "solved: {:>3}/{:<3}        steps: {:<5}  states: {:<12}  elapsed: {} ms",
            total_solved, num_levels, total_steps, total_states, total_time_ms
        );
    }
}
