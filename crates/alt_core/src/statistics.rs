use std::{
    fmt::Display,
    time::{Duration, Instant},
};

#[derive(Debug, Default)]
pub struct SearchStats {
    pub nodes_settled: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.nodes_settled = 0;
        self.duration = None;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} nodes settled in {:?}",
            self.nodes_settled, self.duration
        )
    }
}

/// Bookkeeping of a landmark preprocessing run
#[derive(Debug, Default)]
pub struct PreprocessingStats {
    /// Number of shortest path searches that were run
    pub searches: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl PreprocessingStats {
    pub fn init(&mut self) {
        self.searches = 0;
        self.duration = None;
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for PreprocessingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} searches in {:?}",
            self.searches, self.duration
        )
    }
}
