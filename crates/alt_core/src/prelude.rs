//! Re-exports of the most commonly used items in `alt_core`.
pub use crate::landmark_params::LandmarkParams;
pub use crate::landmark_params::Strategy;
pub use crate::landmark_store::{FileLandmarkStore, LandmarkStore, MemoryLandmarkStore, StoreKey};
pub use crate::landmarks::{LandmarkData, LandmarkPreprocessor};

pub use crate::search;
pub use crate::search::astar::AStar;
pub use crate::search::bidir_astar::{BiDirAStar, StoppingRule};
pub use crate::search::landmark_astar::LandmarkAStar;
pub use crate::search::PathFinder;

pub use crate::heuristics::{flat_plane, great_circle, null_heuristic};

pub use crate::graph::vertex_id;
pub use crate::graph::Graph;
pub use crate::util::test_graphs::generate_complex_graph;
pub use crate::util::test_graphs::generate_simple_graph;
