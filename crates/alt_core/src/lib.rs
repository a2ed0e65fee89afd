//! Shortest path queries on road networks with A*, bidirectional A* and ALT
//! (A*, landmarks, triangle inequality).
//!
//! # Basic usage
//! ```no_run
//! use alt_core::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::path::Path;
//!
//! // Paths to the DIMACS files
//! let co = Path::new("path/to/USA-road-d.NY.co");
//! let gr = Path::new("path/to/USA-road-d.NY.gr");
//!
//! // Create a new graph
//! let g = Graph::from_dimacs(co, gr, None).expect("Failed to read DIMACS files");
//!
//! // Plain A* with the great-circle distance
//! let mut astar = AStar::new(&g, great_circle);
//! let sp = astar.query(vertex_id(1), vertex_id(42));
//!
//! // Select 16 landmarks and precompute their distances
//! let params = LandmarkParams::new().num_landmarks(16);
//! let mut preprocessor = LandmarkPreprocessor::new(&g, great_circle, params);
//! let data = preprocessor.run(&mut StdRng::seed_from_u64(187));
//!
//! // Same distance, fewer settled vertices
//! let mut alt = LandmarkAStar::new(&g, &data, great_circle);
//! let sp_alt = alt.query(vertex_id(1), vertex_id(42));
//! assert_eq!(sp_alt.map(|sp| sp.weight), sp.map(|sp| sp.weight));
//!```
pub mod constants;
pub mod graph;
pub mod heuristics;
pub mod landmark_params;
pub mod landmark_store;
pub mod landmarks;
pub mod prelude;
pub mod search;
pub mod statistics;
pub mod util;
