use alt_core::{
    graph::{vertex_id, Graph},
    heuristics::{flat_plane, great_circle, null_heuristic, HeuristicFn},
    landmark_store::FileLandmarkStore,
    landmarks::{LandmarkData, LandmarkPreprocessor},
    search::{
        astar::AStar, bidir_astar::BiDirAStar, dijkstra::Dijkstra, landmark_astar::LandmarkAStar,
        PathFinder,
    },
    util::cli::{self, Algorithm, Heuristic},
};
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse();

    let now = std::time::Instant::now();
    let g = Graph::from_dimacs(&cfg.co_file, &cfg.gr_file, cfg.limit)?;
    println!("Finished reading graph in {:?}", now.elapsed());
    g.print_info();

    let heuristic: HeuristicFn = match cfg.heuristic {
        Heuristic::Haversine => great_circle,
        Heuristic::Euclidean => flat_plane,
        Heuristic::Null => null_heuristic,
    };

    let landmark_data = if cfg.algorithm == Algorithm::Alt {
        Some(preprocess(&g, &cfg, heuristic)?)
    } else {
        None
    };

    let mut engine: Box<dyn PathFinder + '_> = match (cfg.algorithm, &landmark_data) {
        (Algorithm::Dijkstra, _) => Box::new(Dijkstra::new(&g)),
        (Algorithm::Astar, _) => Box::new(AStar::new(&g, heuristic)),
        (Algorithm::Bidir, _) => {
            Box::new(BiDirAStar::new(&g, heuristic).with_stopping_rule(cfg.stopping_rule))
        }
        (Algorithm::Alt, Some(data)) => Box::new(LandmarkAStar::new(&g, data, heuristic)),
        (Algorithm::Alt, None) => anyhow::bail!("Landmark data missing"),
    };

    let source = vertex_id(cfg.source);
    let destination = vertex_id(cfg.destination);

    match engine.query(source, destination) {
        Some(sp) => {
            let path: Vec<String> = sp.nodes.iter().map(|v| v.to_string()).collect();
            println!("Path: {}", path.join(" -> "));
            println!("Cost: {}", sp.weight);
            println!("Vertices processed: {}", sp.nodes_processed);
        }
        None => println!("No path from {} to {}", source, destination),
    }
    println!("{}", engine.stats());

    Ok(())
}

fn preprocess(g: &Graph, cfg: &cli::Cfg, heuristic: HeuristicFn) -> anyhow::Result<LandmarkData> {
    let mut preprocessor = LandmarkPreprocessor::new(g, heuristic, cfg.landmark_params);
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let data = match &cfg.cache_dir {
        Some(dir) => {
            let graph_id = graph_id(cfg);
            let mut store = FileLandmarkStore::new(dir);
            preprocessor
                .load_or_preprocess(&mut store, &graph_id, &mut rng)
                .with_context(|| format!("Landmark store in {}", dir.display()))?
        }
        None => preprocessor.run(&mut rng),
    };

    println!(
        "Using {} landmarks: {:?}",
        data.num_landmarks(),
        data.landmarks()
    );
    Ok(data)
}

/// File stem of the .gr file, extended by the vertex limit if one is set
fn graph_id(cfg: &cli::Cfg) -> String {
    let stem = cfg
        .gr_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());

    match cfg.limit {
        Some(limit) => format!("{}_{}", stem, limit),
        None => stem,
    }
}
