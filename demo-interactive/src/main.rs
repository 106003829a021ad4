//! Interactive Forest Fire Demo
//!
//! A terminal-based stepper for the forest-fire automaton.
//! Allows advancing the forest tick by tick, drawing the map,
//! and placing trees or fires by hand to watch how a front spreads.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive
//! ```
//!
//! # Commands
//!
//! - `step [n]` - Advance the forest by n ticks (default 1)
//! - `status` - Show forest status
//! - `map` - Draw the grid (`.` empty, `T` tree, `*` fire)
//! - `ignite <row> <col>` - Set a cell on fire
//! - `plant <row> <col>` - Place a tree
//! - `clear <row> <col>` - Empty a cell
//! - `history [n]` - Show the last n recorded fractions (default 10)
//! - `reset [rows] [cols]` - Start over with an empty forest
//! - `seed <n>` - Start over with a fixed seed
//! - `help` - Show available commands
//! - `quit` - Exit the demo

use anyhow::Result;
use forest_fire_core::{CellState, ForestParams, FractionHistory, GridAutomaton};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::{
    io::{self, Write},
    time::Instant,
};
use tracing_subscriber::EnvFilter;

/// Default grid dimensions
const DEFAULT_ROWS: i64 = 150;
const DEFAULT_COLUMNS: i64 = 150;

/// Maps wider than this are not drawn unless forced
const MAX_MAP_COLUMNS: usize = 200;

/// Forest plus the run bookkeeping the REPL needs
struct Session {
    params: ForestParams,
    seed: Option<u64>,
    forest: GridAutomaton,
    history: FractionHistory,
}

impl Session {
    fn new(params: ForestParams, seed: Option<u64>) -> Result<Self> {
        let forest = match seed {
            Some(seed) => GridAutomaton::with_seed(&params, seed)?,
            None => GridAutomaton::from_params(&params)?,
        };
        Ok(Self {
            params,
            seed,
            forest,
            history: FractionHistory::default(),
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║          Forest Fire Automaton - Interactive Stepper      ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    let (rows, columns) = prompt_dimensions();
    let defaults = ForestParams::default();
    let params = ForestParams::new(
        rows,
        columns,
        defaults.growth_probability,
        defaults.ignition_probability,
    );

    let mut session = Session::new(params, None)?;
    println!(
        "Created forest with {} cells on a {}x{} grid",
        session.forest.cell_count(),
        rows,
        columns
    );
    println!("The forest starts empty. Use 'step' to let it grow or 'plant'/'ignite' to place cells.");

    let mut rl = DefaultEditor::new()?;

    println!("\nType 'help' for available commands.\n");

    loop {
        let readline = rl.readline("forest> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let parts: Vec<&str> = line.split_whitespace().collect();

                if parts.is_empty() {
                    continue;
                }

                match parts[0].to_lowercase().as_str() {
                    "step" | "s" => {
                        let count = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
                        step_forest(&mut session, count);
                    }
                    "status" | "st" => show_status(&session),
                    "map" | "m" => {
                        let force = parts.get(1).is_some_and(|s| *s == "!");
                        show_map(&session.forest, force);
                    }
                    "ignite" | "i" => {
                        edit_cell(&mut session.forest, &parts, CellState::BURNING, "ignite");
                    }
                    "plant" | "p" => edit_cell(&mut session.forest, &parts, CellState::TREE, "plant"),
                    "clear" | "c" => edit_cell(&mut session.forest, &parts, CellState::EMPTY, "clear"),
                    "history" | "hi" => {
                        let count = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);
                        show_history(&session.history, count);
                    }
                    "reset" | "r" => {
                        let mut params = session.params.clone();
                        if let Some(rows) = parts.get(1).and_then(|s| s.parse().ok()) {
                            params.rows = rows;
                        }
                        if let Some(columns) = parts.get(2).and_then(|s| s.parse().ok()) {
                            params.columns = columns;
                        }
                        let seed = session.seed;
                        restart(&mut session, params, seed);
                    }
                    "seed" => {
                        if let Some(seed) = parts.get(1).and_then(|s| s.parse().ok()) {
                            let params = session.params.clone();
                            restart(&mut session, params, Some(seed));
                        } else {
                            println!("Usage: seed <n>");
                        }
                    }
                    "help" | "?" => show_help(),
                    "quit" | "q" | "exit" => {
                        println!("Goodbye!");
                        break;
                    }
                    _ => println!(
                        "Unknown command: {}. Type 'help' for available commands.",
                        parts[0]
                    ),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Prompt user for grid dimensions at startup
fn prompt_dimensions() -> (i64, i64) {
    println!("Enter grid dimensions (or press Enter for defaults):");

    let rows = prompt_number("  Rows", DEFAULT_ROWS);
    let columns = prompt_number("  Columns", DEFAULT_COLUMNS);

    println!();
    (rows.clamp(1, 2000), columns.clamp(1, 2000))
}

fn prompt_number(label: &str, default: i64) -> i64 {
    print!("{label} [{default}]: ");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return default;
    }
    input.trim().parse().unwrap_or(default)
}

/// Rebuild the forest, keeping the old one if the new parameters are rejected
fn restart(session: &mut Session, params: ForestParams, seed: Option<u64>) {
    match Session::new(params, seed) {
        Ok(fresh) => {
            *session = fresh;
            let dims = session.forest.dimensions();
            println!(
                "Forest reset! {}x{} grid, seed: {}",
                dims.rows(),
                dims.columns(),
                seed.map_or_else(|| "random".to_string(), |s| s.to_string())
            );
        }
        Err(e) => println!("Reset failed: {e}"),
    }
}

fn step_forest(session: &mut Session, count: u32) {
    println!("Stepping {} tick(s)...", count);

    for i in 0..count {
        let trees_before = session.forest.occupied_count();
        let fires_before = session.forest.active_count();
        let start = Instant::now();

        let burnt_before = session.forest.burnt_total();
        let recorded = session.forest.run_recording(1);
        session.history.extend(&recorded);
        let burnt = session.forest.burnt_total() - burnt_before;

        let trees_after = session.forest.occupied_count();
        let fires_after = session.forest.active_count();
        let time = start.elapsed();

        if i + 1 == count || fires_after != fires_before || burnt > 0 {
            println!(
                "  Tick {}: Trees: {} → {}, Fires: {} → {}, Burnt: {}, Time: {}µs",
                session.forest.tick(),
                trees_before,
                trees_after,
                fires_before,
                fires_after,
                burnt,
                time.as_micros()
            );
        }
    }
    println!("Done.");
}

fn show_status(session: &Session) {
    let forest = &session.forest;
    let stats = forest.stats();
    let dims = forest.dimensions();

    println!("\n═══════════════ FOREST STATUS ═══════════════");
    println!("Label:             {}", forest.label());
    println!("Grid:              {}x{} ({} cells)", dims.rows(), dims.columns(), stats.cell_count);
    println!("Growth:            {}", forest.growth_probability());
    println!("Ignition:          {}", forest.ignition_probability());
    println!(
        "Seed:              {}",
        session.seed.map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    println!("Tick:              {}", stats.tick);
    println!(
        "Trees:             {} ({:.2}%)",
        stats.occupied_cells,
        stats.occupied_fraction * 100.0
    );
    println!(
        "Fires:             {} ({:.3}%)",
        stats.active_cells,
        stats.active_fraction * 100.0
    );
    println!("Trees burnt:       {}", stats.burnt_total);
    println!("══════════════════════════════════════════════\n");
}

fn show_map(forest: &GridAutomaton, force: bool) {
    let columns = forest.dimensions().columns();
    if columns > MAX_MAP_COLUMNS && !force {
        println!(
            "Grid is {} columns wide; use 'map !' to draw it anyway.",
            columns
        );
        return;
    }
    println!("\n{forest}");
    println!("Legend: . empty   T tree   * fire\n");
}

fn edit_cell(forest: &mut GridAutomaton, parts: &[&str], state: CellState, verb: &str) {
    let (Some(row), Some(column)) = (
        parts.get(1).and_then(|s| s.parse::<usize>().ok()),
        parts.get(2).and_then(|s| s.parse::<usize>().ok()),
    ) else {
        println!("Usage: {verb} <row> <col>");
        return;
    };

    match forest.set_cell(row, column, state) {
        Ok(()) => println!("Cell ({row}, {column}) is now {}", describe(state)),
        Err(e) => println!("Cannot {verb}: {e}"),
    }
}

fn describe(state: CellState) -> &'static str {
    match (state.occupied, state.active) {
        (_, true) => "burning",
        (true, false) => "a tree",
        (false, false) => "empty",
    }
}

fn show_history(history: &FractionHistory, count: usize) {
    if history.is_empty() {
        println!("No ticks recorded yet. Use 'step' first.");
        return;
    }

    let skip = history.len().saturating_sub(count);
    let start_tick = history.start_tick();

    println!("\n═══════════════ FRACTION HISTORY ═══════════════");
    println!("   Tick |  Tree % |  Fire %");
    for (offset, (occupied, active)) in history
        .occupied()
        .iter()
        .zip(history.active())
        .enumerate()
        .skip(skip)
    {
        println!(
            "{:7} | {:7.2} | {:7.3}",
            start_tick + offset as u64 + 1,
            occupied * 100.0,
            active * 100.0
        );
    }

    if let Some(summary) = history.occupied_summary() {
        println!(
            "\nTree fraction over {} ticks: min {:.4}, max {:.4}, mean {:.4}",
            history.len(),
            summary.min,
            summary.max,
            summary.mean
        );
    }
    println!("═════════════════════════════════════════════════\n");
}

fn show_help() {
    println!("\n═══════════════ AVAILABLE COMMANDS ═══════════════");
    println!("  step [n], s [n]          - Advance n ticks (default 1)");
    println!("  status, st               - Show forest status");
    println!("  map, m [!]               - Draw the grid (! forces wide grids)");
    println!("  ignite <row> <col>, i    - Set a cell on fire");
    println!("  plant <row> <col>, p     - Place a tree");
    println!("  clear <row> <col>, c     - Empty a cell");
    println!("  history [n], hi          - Show the last n tree/fire fractions (default 10)");
    println!("  reset [rows] [cols], r   - Start over (optional: new dimensions)");
    println!("  seed <n>                 - Start over with a fixed seed");
    println!("  help, ?                  - Show this help");
    println!("  quit, q                  - Exit");
    println!("══════════════════════════════════════════════════\n");
}
