//! Parameters for the landmark preprocessing

/// Parameters for the landmark preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkParams {
    pub(crate) num_landmarks: usize,
    pub(crate) strategy: Strategy,
    // Draw a progress bar while the distance tables are computed
    pub(crate) show_progress: bool,
}

impl LandmarkParams {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn num_landmarks(mut self, num_landmarks: usize) -> Self {
        self.num_landmarks = num_landmarks;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

impl Default for LandmarkParams {
    fn default() -> Self {
        LandmarkParams {
            num_landmarks: 10,
            strategy: Strategy::default(),
            show_progress: false,
        }
    }
}

/// How the distance tables between landmarks and vertices are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One exhaustive search per landmark on the graph and one on the
    /// reversed graph
    #[default]
    OneToAll,
    /// One A* query per landmark and vertex in both directions. Produces the
    /// same tables as [`Strategy::OneToAll`] with far more work.
    PairwiseQueries,
}
