use anyhow::{Context, Result};
use clap::Parser;
use forest_fire_core::{ForestParams, ForestStats, FractionHistory, GridAutomaton};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Forest-fire automaton batch run with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "demo-headless")]
#[command(about = "Forest-fire cellular automaton demo", long_about = None)]
struct Args {
    /// JSON file with forest parameters (flags below override its fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid rows
    #[arg(long, allow_negative_numbers = true)]
    rows: Option<i64>,

    /// Grid columns
    #[arg(long, allow_negative_numbers = true)]
    columns: Option<i64>,

    /// Per-tick probability that an empty cell grows a tree
    #[arg(short, long)]
    growth: Option<f64>,

    /// Per-tick probability that a tree is struck by lightning
    #[arg(short, long)]
    ignition: Option<f64>,

    /// Forest name shown in logs
    #[arg(short, long)]
    label: Option<String>,

    /// Seed for a reproducible run (OS entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 500)]
    ticks: u64,

    /// Print a table row every N ticks (0 = final row only)
    #[arg(short, long, default_value_t = 50)]
    report_interval: u64,

    /// Write the per-tick tree/fire fractions as JSON
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Write the final forest state as JSON
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Print the final map
    #[arg(short = 'm', long)]
    show_map: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("=== Forest Fire Demo ===\n");

    let params = load_params(&args)?;
    let mut forest = match args.seed {
        Some(seed) => GridAutomaton::with_seed(&params, seed)?,
        None => GridAutomaton::from_params(&params)?,
    };

    let dims = forest.dimensions();
    println!(
        "Created '{}' with {}x{} cells ({} total)",
        forest.label(),
        dims.rows(),
        dims.columns(),
        forest.cell_count()
    );
    println!(
        "Growth: {}, Ignition: {}, Seed: {}\n",
        forest.growth_probability(),
        forest.ignition_probability(),
        args.seed.map_or_else(|| "random".to_string(), |s| s.to_string())
    );

    println!("Running {} ticks...\n", args.ticks);
    println!("   Tick |   Trees |  Fires | Tree % | Fire % |   Burnt");
    println!("--------|---------|--------|--------|--------|---------");
    print_row(&forest.stats());

    let started = Instant::now();
    let mut history = FractionHistory::starting_at(forest.tick());
    for _ in 0..args.ticks {
        forest.step();
        let stats = forest.stats();
        history.record(&stats);

        if stats.tick.checked_rem(args.report_interval) == Some(0) {
            print_row(&stats);
        }
    }
    let elapsed = started.elapsed();

    let last = forest.stats();
    if last.tick.checked_rem(args.report_interval) != Some(0) && args.ticks > 0 {
        print_row(&last);
    }

    println!("\n=== Run Complete ===");
    println!("Ticks:            {}", last.tick);
    println!("Wall time:        {:.2?}", elapsed);
    println!("Trees standing:   {}", last.occupied_cells);
    println!("Trees burnt:      {}", last.burnt_total);
    if let Some(summary) = history.occupied_summary() {
        println!(
            "Tree fraction:    min {:.4}, max {:.4}, mean {:.4}",
            summary.min, summary.max, summary.mean
        );
    }
    if let Some(summary) = history.active_summary() {
        println!(
            "Fire fraction:    min {:.6}, max {:.6}, mean {:.6}",
            summary.min, summary.max, summary.mean
        );
    }

    if args.show_map {
        println!("\n{forest}");
    }

    if let Some(path) = &args.history_out {
        write_json(path, &history)?;
        println!("History written to {}", path.display());
    }
    if let Some(path) = &args.snapshot_out {
        write_json(path, &forest.snapshot())?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}

/// Merge the optional config file with command-line overrides.
fn load_params(args: &Args) -> Result<ForestParams> {
    let mut params = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON in {}", path.display()))?
        }
        None => ForestParams::default(),
    };

    if let Some(rows) = args.rows {
        params.rows = rows;
    }
    if let Some(columns) = args.columns {
        params.columns = columns;
    }
    if let Some(growth) = args.growth {
        params.growth_probability = growth;
    }
    if let Some(ignition) = args.ignition {
        params.ignition_probability = ignition;
    }
    if let Some(label) = &args.label {
        params.label = Some(label.clone());
    }

    params.validate()?;
    Ok(params)
}

fn print_row(stats: &ForestStats) {
    println!(
        "{:7} | {:7} | {:6} | {:6.2} | {:6.3} | {:7}",
        stats.tick,
        stats.occupied_cells,
        stats.active_cells,
        stats.occupied_fraction * 100.0,
        stats.active_fraction * 100.0,
        stats.burnt_total
    );
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name_matches_binary() {
        let cmd = Args::command();
        cmd.clone().debug_assert();
        assert_eq!(cmd.get_name(), "demo-headless");
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["demo-headless", "--rows", "40", "-g", "0.1", "-l", "ridge"]);
        let params = load_params(&args).unwrap();
        assert_eq!(params.rows, 40);
        assert_eq!(params.columns, 150);
        assert_eq!(params.growth_probability, 0.1);
        assert_eq!(params.label.as_deref(), Some("ridge"));
    }

    #[test]
    fn test_negative_columns_are_rejected() {
        let args = Args::parse_from(["demo-headless", "--columns", "-5"]);
        let err = load_params(&args).unwrap_err();
        assert!(err.to_string().contains("columns"));
    }
}
