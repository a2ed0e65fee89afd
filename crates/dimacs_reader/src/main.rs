use std::path::Path;

use dimacs_reader::*;

fn main() -> anyhow::Result<()> {
    let now = std::time::Instant::now();
    // Read paths to the coordinate and graph file from command line
    let co_path = std::env::args().nth(1).expect("No path to .co file given");
    let gr_path = std::env::args().nth(2).expect("No path to .gr file given");
    let limit = std::env::args().nth(3).map(|l| l.parse()).transpose()?;

    let graph = RoadGraph::from_dimacs(Path::new(&co_path), Path::new(&gr_path), limit)?;

    let elapsed = now.elapsed();

    println!(
        "Finished reading DIMACS files in {}.{:03} seconds",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );
    println!(
        "Graph has {} nodes and {} arcs",
        graph.get_nodes().len(),
        graph.get_arcs().len()
    );
    Ok(())
}
