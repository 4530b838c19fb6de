//! Rubik's Cube Solver
//!
//! Solves a 3x3x3 Rubik's cube given as a sticker string or a scramble,
//! prints the solver's moves and their optimized form, and checks the result
//! by replaying the optimized moves on a freshly built cube.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::info;
use thiserror::Error;

use rubik::moves::{random_scramble, DEFAULT_SCRAMBLE_LENGTH};
use rubik::optimize::invert;
use rubik::{
    format_sequence, optimize_moves, parse_sequence, Cube, CubeError, Move, MoveParseError,
    SolveError, Solver, SOLVED_CUBE_STR,
};

/// Solves 3x3x3 Rubik's cubes layer by layer.
#[derive(Parser)]
#[command(name = "rubik")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a cube and print the moves (the default).
    Solve(SolveArgs),
    /// Print a random scramble and the moves that undo it.
    Scramble(ScrambleArgs),
    /// Print the optimized form of a move sequence.
    Optimize {
        /// Whitespace-separated moves, e.g. "R U Ri Ui".
        moves: String,
    },
    /// Print a cube as an unfolded net.
    Show {
        /// 54-sticker cube string. Defaults to a solved cube.
        #[arg(long)]
        cube: Option<String>,
        /// Moves to apply before printing.
        #[arg(long)]
        moves: Option<String>,
    },
}

#[derive(Args, Default)]
struct SolveArgs {
    /// Moves to scramble a solved cube with.
    #[arg(long, conflicts_with = "cube")]
    scramble: Option<String>,
    /// 54-sticker cube string to solve.
    #[arg(long)]
    cube: Option<String>,
    #[command(flatten)]
    random: ScrambleArgs,
}

#[derive(Args)]
struct ScrambleArgs {
    /// Number of random face turns.
    #[arg(long, default_value_t = DEFAULT_SCRAMBLE_LENGTH)]
    length: usize,
    /// Seed for a repeatable scramble.
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for ScrambleArgs {
    fn default() -> Self {
        Self {
            length: DEFAULT_SCRAMBLE_LENGTH,
            seed: None,
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Cube(#[from] CubeError),
    #[error(transparent)]
    Move(#[from] MoveParseError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("Optimized moves do not solve the cube")]
    Verification,
}

fn main() -> ExitCode {
    env_logger::builder().init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve(args)) => run_solve(&args),
        Some(Command::Scramble(args)) => Ok(run_scramble(&args)),
        Some(Command::Optimize { moves }) => run_optimize(&moves),
        Some(Command::Show { cube, moves }) => run_show(cube.as_deref(), moves.as_deref()),
        None => run_solve(&SolveArgs::default()),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn scramble_moves(args: &ScrambleArgs) -> Vec<Move> {
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    random_scramble(&mut rng, args.length)
}

/// The cube to solve, and the scramble that produced it if there was one.
fn starting_cube(args: &SolveArgs) -> Result<(Cube, Option<Vec<Move>>), CliError> {
    if let Some(cube_str) = &args.cube {
        return Ok((Cube::new(cube_str)?, None));
    }

    let scramble = match &args.scramble {
        Some(moves) => parse_sequence(moves)?,
        None => scramble_moves(&args.random),
    };
    let mut cube = Cube::new(SOLVED_CUBE_STR)?;
    cube.apply_all(&scramble);
    Ok((cube, Some(scramble)))
}

/// Solves the cube, optimizes the moves and replays them on a new cube.
fn run_solve(args: &SolveArgs) -> Result<String, CliError> {
    let (cube, scramble) = starting_cube(args)?;
    let mut output = String::new();
    if let Some(scramble) = &scramble {
        output.push_str(&format!("Scramble: {}\n", format_sequence(scramble)));
    }
    output.push_str(&format!("{cube}\n"));

    // rebuild from stickers so the check never shares state with the solver
    let mut check = Cube::new(&cube.flat_str())?;

    let mut solver = Solver::new(cube);
    solver.solve()?;
    let moves = solver.moves();
    let optimized = optimize_moves(moves);
    info!("solved in {} moves, {} after optimizing", moves.len(), optimized.len());

    output.push_str(&format!("Solution ({} moves): {}\n", moves.len(), format_sequence(moves)));
    output.push_str(&format!(
        "Optimized ({} moves): {}\n",
        optimized.len(),
        format_sequence(&optimized)
    ));

    check.apply_all(&optimized);
    if !check.is_solved() {
        return Err(CliError::Verification);
    }
    output.push_str("Verified: optimized moves solve the cube\n");
    Ok(output)
}

fn run_scramble(args: &ScrambleArgs) -> String {
    let scramble = scramble_moves(args);
    format!(
        "Scramble: {}\nUndo: {}\n",
        format_sequence(&scramble),
        format_sequence(&invert(&scramble))
    )
}

fn run_optimize(moves: &str) -> Result<String, CliError> {
    let moves = parse_sequence(moves)?;
    let optimized = optimize_moves(&moves);
    Ok(format!(
        "Moves ({}): {}\nOptimized ({}): {}\n",
        moves.len(),
        format_sequence(&moves),
        optimized.len(),
        format_sequence(&optimized)
    ))
}

fn run_show(cube: Option<&str>, moves: Option<&str>) -> Result<String, CliError> {
    let mut cube = Cube::new(cube.unwrap_or(SOLVED_CUBE_STR))?;
    if let Some(moves) = moves {
        cube.sequence(moves)?;
    }
    Ok(format!("Stickers: {}\n{cube}\n", cube.flat_str()))
}
