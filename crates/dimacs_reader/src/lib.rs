//! Reader for road networks in the format of the 9th DIMACS implementation
//! challenge (<http://www.diag.uniroma1.it/challenge9/format.shtml>).
//!
//! A network is split into a coordinate file (`.co`) and a graph file (`.gr`).
use anyhow::Context;
use log::{debug, info};
use rustc_hash::FxHashMap;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

mod record;
pub use record::Record;

pub struct Arc {
    pub source: u32,
    pub target: u32,
    pub weight: u64,
}

impl Arc {
    fn new(source: u32, target: u32, weight: u64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

pub struct RoadGraph {
    /// id -> [lat, lon] in millionths of a degree
    nodes: FxHashMap<u32, [i64; 2]>,
    arcs: Vec<Arc>,
    limit: Option<u32>,
}

impl RoadGraph {
    pub fn new() -> Self {
        RoadGraph {
            nodes: FxHashMap::default(),
            arcs: Vec::new(),
            limit: None,
        }
    }

    pub fn add_node(&mut self, id: u32, lat: i64, lon: i64) {
        self.nodes.insert(id, [lat, lon]);
    }

    pub fn add_arc(&mut self, from: u32, to: u32, weight: u64) {
        self.arcs.push(Arc::new(from, to, weight));
    }

    pub fn get_nodes(&self) -> &FxHashMap<u32, [i64; 2]> {
        &self.nodes
    }

    pub fn get_arcs(&self) -> &Vec<Arc> {
        &self.arcs
    }

    /// The vertex limit the graph was read with
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Reads a coordinate and a graph file. If `limit` is given only vertices
    /// with `id <= limit` and arcs between those vertices are kept.
    pub fn from_dimacs(
        co_path: &Path,
        gr_path: &Path,
        limit: Option<u32>,
    ) -> anyhow::Result<RoadGraph> {
        let mut graph = RoadGraph::new();
        graph.limit = limit;

        let within_limit = |id: u32| limit.map_or(true, |limit| id <= limit);

        let now = std::time::Instant::now();
        info!("BEGIN parsing {}", co_path.display());
        for_each_record(co_path, 'v', |record| {
            if let Record::Vertex { id, lon, lat } = record {
                if within_limit(id) {
                    graph.add_node(id, lat, lon);
                }
            }
        })?;
        info!(
            "FINISHED parsing {} nodes. Took {:?}",
            graph.nodes.len(),
            now.elapsed()
        );

        let now = std::time::Instant::now();
        info!("BEGIN parsing {}", gr_path.display());
        let mut skipped = 0;
        for_each_record(gr_path, 'a', |record| {
            if let Record::Arc {
                source,
                target,
                weight,
            } = record
            {
                if within_limit(source) && within_limit(target) {
                    graph.add_arc(source, target, weight);
                } else {
                    skipped += 1;
                }
            }
        })?;
        debug!("Skipped {} arcs beyond the vertex limit", skipped);
        info!(
            "FINISHED parsing {} arcs. Took {:?}",
            graph.arcs.len(),
            now.elapsed()
        );

        Ok(graph)
    }
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn for_each_record(
    path: &Path,
    tag: char,
    mut f: impl FnMut(Record),
) -> anyhow::Result<()> {
    let file =
        File::open(path).with_context(|| format!("Could not open {}", path.display()))?;

    for (line_number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if !record::is_data_line(&line, tag) {
            continue;
        }
        let record: Record = line.parse().with_context(|| {
            format!("{}:{}: malformed record", path.display(), line_number + 1)
        })?;
        f(record);
    }

    Ok(())
}
