// Watch a single fire front cross a fully planted forest
use forest_fire_core::{CellGrid, Dimensions, ForestParams, GridAutomaton};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // No growth and no lightning, so only the spread rule acts
    let params = ForestParams::new(9, 21, 0.0, 0.0).with_label("spread-check");
    let mut forest = GridAutomaton::with_seed(&params, 0)?;

    let dims = Dimensions::new(9, 21)?;
    let trees = CellGrid::filled(dims, true);
    let mut fires = vec![vec![false; 21]; 9];
    fires[4][10] = true;
    forest.inject(trees, CellGrid::from_rows(&fires)?)?;

    println!("Tick 0: {} trees, {} burning", forest.occupied_count(), forest.active_count());
    println!("{forest}");

    while forest.active_count() > 0 {
        let outcome = forest.step();
        println!(
            "Tick {}: {} burnt, {} newly burning, {} trees left",
            forest.tick(),
            outcome.burnt,
            outcome.ignited,
            forest.occupied_count()
        );
        println!("{forest}");
    }

    // The 4-neighbour front consumes every connected tree
    println!("Fire out after {} ticks, {} trees burnt", forest.tick(), forest.burnt_total());
    Ok(())
}
