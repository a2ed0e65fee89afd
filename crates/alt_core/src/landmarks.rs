//! Landmark preprocessing for the ALT heuristic (A*, landmarks, triangle
//! inequality).
//!
//! A small set of vertices is drawn at random and the shortest path costs
//! between every landmark and every vertex are stored in both directions:
//!
//! - `from_landmark[L][v]` = dist(L, v)
//! - `to_landmark[v][L]` = dist(v, L)
//!
//! Pairs without a path are absent from the tables. An absent entry means
//! the landmark says nothing about the pair, it never means distance 0.
//!
//! # Examples
//! ```
//! use alt_core::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let g = generate_complex_graph();
//! let mut preprocessor = LandmarkPreprocessor::new(&g, great_circle, LandmarkParams::new());
//! let data = preprocessor.run(&mut StdRng::seed_from_u64(187));
//!
//! let mut alt = LandmarkAStar::new(&g, &data, great_circle);
//! let sp = alt.query(vertex_id(2), vertex_id(7)).unwrap();
//! assert_eq!(sp.weight, 10.0);
//! ```
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    constants::Weight,
    graph::{Coordinate, Graph, VertexId},
    heuristics::{null_heuristic, HeuristicFn},
    landmark_params::{LandmarkParams, Strategy},
    landmark_store::{LandmarkStore, StoreError, StoreKey},
    search::astar::AStar,
    statistics::PreprocessingStats,
};

type DistanceTable = FxHashMap<VertexId, FxHashMap<VertexId, Weight>>;

/// Landmarks and their distance tables
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkData {
    landmarks: Vec<VertexId>,
    from_landmark: DistanceTable,
    to_landmark: DistanceTable,
}

impl LandmarkData {
    pub fn new(
        landmarks: Vec<VertexId>,
        from_landmark: DistanceTable,
        to_landmark: DistanceTable,
    ) -> Self {
        LandmarkData {
            landmarks,
            from_landmark,
            to_landmark,
        }
    }

    pub fn landmarks(&self) -> &[VertexId] {
        &self.landmarks
    }

    pub fn num_landmarks(&self) -> usize {
        self.landmarks.len()
    }

    /// dist(landmark, v) if `v` is reachable from `landmark`
    pub fn distance_from_landmark(&self, landmark: VertexId, v: VertexId) -> Option<Weight> {
        self.from_landmark.get(&landmark)?.get(&v).copied()
    }

    /// dist(v, landmark) if `landmark` is reachable from `v`
    pub fn distance_to_landmark(&self, v: VertexId, landmark: VertexId) -> Option<Weight> {
        self.to_landmark.get(&v)?.get(&landmark).copied()
    }
}

pub struct LandmarkPreprocessor<'a, H = HeuristicFn> {
    pub stats: PreprocessingStats,
    g: &'a Graph,
    base_heuristic: H,
    params: LandmarkParams,
}

impl<'a, H> LandmarkPreprocessor<'a, H>
where
    H: Fn(&Coordinate, &Coordinate) -> Weight,
{
    /// `base_heuristic` guides the queries of [`Strategy::PairwiseQueries`]
    /// and must be admissible for the tables to hold shortest distances.
    pub fn new(g: &'a Graph, base_heuristic: H, params: LandmarkParams) -> Self {
        LandmarkPreprocessor {
            g,
            base_heuristic,
            params,
            stats: PreprocessingStats::default(),
        }
    }

    pub fn params(&self) -> &LandmarkParams {
        &self.params
    }

    /// Draws `num_landmarks` distinct vertices uniformly at random. Fewer are
    /// returned if the graph is smaller than that.
    pub fn select_landmarks<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<VertexId> {
        let vertices = self.g.vertices();
        let amount = self.params.num_landmarks.min(vertices.len());
        if amount < self.params.num_landmarks {
            warn!(
                "Graph has only {} vertices, selecting {} instead of {} landmarks",
                vertices.len(),
                amount,
                self.params.num_landmarks
            );
        }

        let mut landmarks: Vec<VertexId> = rand::seq::index::sample(rng, vertices.len(), amount)
            .into_iter()
            .map(|i| vertices[i])
            .collect();
        landmarks.sort();
        landmarks
    }

    /// Selects landmarks with `rng` and computes their distance tables
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> LandmarkData {
        let landmarks = self.select_landmarks(rng);
        self.compute(landmarks)
    }

    /// Fills the distance tables for the given landmarks
    pub fn compute(&mut self, landmarks: Vec<VertexId>) -> LandmarkData {
        info!(
            "BEGIN LANDMARK PREPROCESSING: {} landmarks, {:?}",
            landmarks.len(),
            self.params.strategy
        );
        self.stats.init();

        let (from_landmark, to_landmark) = match self.params.strategy {
            Strategy::OneToAll => self.one_to_all(&landmarks),
            Strategy::PairwiseQueries => self.pairwise_queries(&landmarks),
        };

        self.stats.finish();
        info!("FINISHED LANDMARK PREPROCESSING: {}", self.stats);

        LandmarkData::new(landmarks, from_landmark, to_landmark)
    }

    /// Loads the data for this graph from `store` or computes and saves it
    pub fn load_or_preprocess<R: Rng + ?Sized>(
        &mut self,
        store: &mut impl LandmarkStore,
        graph_id: &str,
        rng: &mut R,
    ) -> Result<LandmarkData, StoreError> {
        let key = StoreKey::new(graph_id, self.params.num_landmarks);

        if let Some(data) = store.load(&key)? {
            info!(
                "Using {} stored landmarks for graph {}",
                data.num_landmarks(),
                graph_id
            );
            return Ok(data);
        }

        let data = self.run(rng);
        store.save(&key, &data)?;
        Ok(data)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if self.params.show_progress {
            ProgressBar::new(len as u64)
        } else {
            ProgressBar::hidden()
        }
    }

    /// Every vertex gets an entry in `to_landmark`, even if no landmark can
    /// be reached from it
    fn empty_to_landmark(&self) -> DistanceTable {
        self.g
            .vertices()
            .into_iter()
            .map(|v| (v, FxHashMap::default()))
            .collect()
    }

    fn one_to_all(&mut self, landmarks: &[VertexId]) -> (DistanceTable, DistanceTable) {
        let g_rev = self.g.reverse();
        let mut forward = AStar::new(self.g, null_heuristic);
        let mut backward = AStar::new(&g_rev, null_heuristic);

        let mut from_landmark = DistanceTable::default();
        let mut to_landmark = self.empty_to_landmark();

        let pb = self.progress_bar(landmarks.len());
        for &landmark in landmarks {
            from_landmark.insert(landmark, forward.distances_from(landmark));

            // Distances from the landmark on the reversed graph are distances
            // to the landmark on the graph
            for (v, distance) in backward.distances_from(landmark) {
                to_landmark.entry(v).or_default().insert(landmark, distance);
            }

            self.stats.searches += 2;
            debug!("Landmark {} done", landmark);
            pb.inc(1);
        }
        pb.finish_and_clear();

        (from_landmark, to_landmark)
    }

    fn pairwise_queries(&mut self, landmarks: &[VertexId]) -> (DistanceTable, DistanceTable) {
        let vertices = self.g.vertices();
        let mut astar = AStar::new(self.g, &self.base_heuristic);

        let mut from_landmark = DistanceTable::default();
        let mut to_landmark = self.empty_to_landmark();

        let pb = self.progress_bar(landmarks.len() * vertices.len());
        for &landmark in landmarks {
            let mut distances = FxHashMap::default();

            for &v in &vertices {
                if let Some(sp) = astar.query(landmark, v) {
                    distances.insert(v, sp.weight);
                }
                if let Some(sp) = astar.query(v, landmark) {
                    to_landmark.entry(v).or_default().insert(landmark, sp.weight);
                }
                self.stats.searches += 2;
                pb.inc(1);
            }

            from_landmark.insert(landmark, distances);
            debug!("Landmark {} done", landmark);
        }
        pb.finish_and_clear();

        (from_landmark, to_landmark)
    }
}
