use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    landmark_params::{LandmarkParams, Strategy},
    search::bidir_astar::StoppingRule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Dijkstra,
    Astar,
    Bidir,
    Alt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Heuristic {
    /// Great-circle distance in metres
    Haversine,
    /// Straight line in coordinate units
    Euclidean,
    /// Always 0
    Null,
}

#[derive(Parser)]
#[command(author = "Daniel Holzner", version, about, long_about = None)]
struct Cli {
    /// Path to the DIMACS .co file
    co_file: String,

    /// Path to the DIMACS .gr file
    gr_file: String,

    /// Id of the start vertex
    source: u32,

    /// Id of the destination vertex
    destination: u32,

    /// Only read vertices with an id up to this value
    #[arg(short, long, value_name = "id")]
    limit: Option<u32>,

    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Astar)]
    algo: Algorithm,

    /// Geometric heuristic. For `alt` it is used where no landmark applies
    #[arg(long, value_enum, default_value_t = Heuristic::Haversine)]
    heuristic: Heuristic,

    /// Number of landmarks
    #[arg(short = 'k', long, default_value_t = 10)]
    landmarks: usize,

    /// Seed for the landmark selection
    #[arg(long, default_value_t = 187)]
    seed: u64,

    /// Compute landmark tables with one query per landmark and vertex
    #[arg(long, default_value = "false")]
    pairwise: bool,

    /// Directory to load landmark data from and save it to
    #[arg(long, value_name = "dir")]
    cache_dir: Option<String>,

    /// Continue the bidirectional search until the path is provably shortest
    #[arg(long, default_value = "false")]
    optimal: bool,
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub co_file: PathBuf,
    pub gr_file: PathBuf,
    pub source: u32,
    pub destination: u32,
    pub limit: Option<u32>,
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
    pub landmark_params: LandmarkParams,
    pub seed: u64,
    pub cache_dir: Option<PathBuf>,
    pub stopping_rule: StoppingRule,
}

pub fn parse() -> Cfg {
    let cli = Cli::parse();

    let strategy = if cli.pairwise {
        Strategy::PairwiseQueries
    } else {
        Strategy::OneToAll
    };

    let stopping_rule = if cli.optimal {
        StoppingRule::Optimal
    } else {
        StoppingRule::FirstMeeting
    };

    Cfg {
        co_file: PathBuf::from(cli.co_file),
        gr_file: PathBuf::from(cli.gr_file),
        source: cli.source,
        destination: cli.destination,
        limit: cli.limit,
        algorithm: cli.algo,
        heuristic: cli.heuristic,
        landmark_params: LandmarkParams::new()
            .num_landmarks(cli.landmarks)
            .strategy(strategy)
            .show_progress(true),
        seed: cli.seed,
        cache_dir: cli.cache_dir.map(PathBuf::from),
        stopping_rule,
    }
}
