//! Estimates of the remaining distance to the destination.
//!
//! All geometric heuristics share the signature [`HeuristicFn`]. The
//! landmark heuristic works on precomputed distances instead of coordinates.
use crate::{
    constants::{Weight, EARTH_RADIUS},
    graph::{Coordinate, Graph, VertexId},
    landmarks::LandmarkData,
    search::node::Node,
};

pub type HeuristicFn = fn(&Coordinate, &Coordinate) -> Weight;

/// Great-circle distance in metres (haversine formula)
pub fn great_circle(src: &Coordinate, dst: &Coordinate) -> Weight {
    let lat1 = src.lat_degrees().to_radians();
    let lat2 = dst.lat_degrees().to_radians();
    let lon1 = src.lon_degrees().to_radians();
    let lon2 = dst.lon_degrees().to_radians();
    let a = (lat2 - lat1) / 2.0;
    let b = (lon2 - lon1) / 2.0;
    let c = a.sin().powi(2) + lat1.cos() * lat2.cos() * b.sin().powi(2);
    let d = 2.0 * c.sqrt().min(1.0).asin();

    EARTH_RADIUS * d
}

/// Straight line distance in raw coordinate units.
///
/// Only admissible if edge weights are expressed in the same units.
pub fn flat_plane(src: &Coordinate, dst: &Coordinate) -> Weight {
    let d_lat = (dst.lat - src.lat) as f64;
    let d_lon = (dst.lon - src.lon) as f64;
    d_lat.hypot(d_lon)
}

pub fn null_heuristic(_: &Coordinate, _: &Coordinate) -> Weight {
    0.0
}

/// Lower bound for `dist(vertex, destination)` derived from the triangle
/// inequality over all landmarks `L`:
///
/// dist(v, d) >= dist(L, d) - dist(L, v)
/// dist(v, d) >= dist(v, L) - dist(d, L)
///
/// Returns `None` if no landmark has the distances required by either bound.
pub fn landmark_differential(
    data: &LandmarkData,
    vertex: VertexId,
    destination: VertexId,
) -> Option<Weight> {
    let mut best: Option<Weight> = None;

    for &landmark in data.landmarks() {
        let from_landmark = data
            .distance_from_landmark(landmark, destination)
            .zip(data.distance_from_landmark(landmark, vertex))
            .map(|(to_destination, to_vertex)| to_destination - to_vertex);

        let to_landmark = data
            .distance_to_landmark(vertex, landmark)
            .zip(data.distance_to_landmark(destination, landmark))
            .map(|(from_vertex, from_destination)| from_vertex - from_destination);

        for bound in [from_landmark, to_landmark].into_iter().flatten() {
            best = Some(best.map_or(bound, |best| best.max(bound)));
        }
    }

    // Bounds may be negative, the distance never is
    best.map(|bound| bound.max(0.0))
}

/// f(node) = h(node, destination) + g(node)
pub fn estimated_cost(
    heuristic: impl Fn(&Coordinate, &Coordinate) -> Weight,
    graph: &Graph,
    node: &Node,
    destination: VertexId,
) -> Weight {
    let h = graph
        .coordinate(node.value)
        .zip(graph.coordinate(destination))
        .map_or(0.0, |(src, dst)| heuristic(src, dst));
    h + node.path_cost
}

/// f(node) for the landmark search. `fallback` is used for vertices no
/// landmark says anything about.
pub fn landmark_estimated_cost(
    data: &LandmarkData,
    fallback: impl Fn(&Coordinate, &Coordinate) -> Weight,
    graph: &Graph,
    node: &Node,
    destination: VertexId,
) -> Weight {
    match landmark_differential(data, node.value, destination) {
        Some(h) => h + node.path_cost,
        None => estimated_cost(fallback, graph, node, destination),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::util::test_graphs::generate_simple_graph;

    use super::*;

    #[test]
    fn great_circle_distance() {
        // Munich Marienplatz -> Frankfurt Römer, roughly 304 km
        let munich = Coordinate::new(48_137_154, 11_576_124);
        let frankfurt = Coordinate::new(50_110_556, 8_682_222);

        let d = great_circle(&munich, &frankfurt);
        assert!((300_000.0..310_000.0).contains(&d), "{}", d);
        assert_abs_diff_eq!(great_circle(&munich, &munich), 0.0);
        assert_abs_diff_eq!(d, great_circle(&frankfurt, &munich), epsilon = 1e-6);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(1_000_000, 0);
        let expected = EARTH_RADIUS * std::f64::consts::PI / 180.0;
        assert_abs_diff_eq!(great_circle(&a, &b), expected, epsilon = 1e-6);
    }

    #[test]
    fn antipodal_points_are_finite() {
        let half_circumference = EARTH_RADIUS * std::f64::consts::PI;
        let pairs = [
            (Coordinate::new(0, 0), Coordinate::new(0, 180_000_000)),
            (Coordinate::new(90_000_000, 0), Coordinate::new(-90_000_000, 0)),
            (
                Coordinate::new(45_000_000, 10_000_000),
                Coordinate::new(-45_000_000, -170_000_000),
            ),
        ];

        for (a, b) in pairs {
            let d = great_circle(&a, &b);
            assert!(d.is_finite(), "{:?} -> {:?}", a, b);
            assert_abs_diff_eq!(d, half_circumference, epsilon = 1.0);
        }
    }

    #[test]
    fn flat_plane_distance() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(3, 4);
        assert_abs_diff_eq!(flat_plane(&a, &b), 5.0);
        assert_abs_diff_eq!(flat_plane(&b, &a), 5.0);
    }

    #[test]
    fn cost_function_adds_path_cost() {
        let g = generate_simple_graph();
        let node = Node {
            value: 2.into(),
            parent: None,
            path_cost: 1.5,
        };

        assert_abs_diff_eq!(estimated_cost(null_heuristic, &g, &node, 4.into()), 1.5);

        let expected = 1.5
            + great_circle(
                g.coordinate(2.into()).unwrap(),
                g.coordinate(4.into()).unwrap(),
            );
        assert_abs_diff_eq!(estimated_cost(great_circle, &g, &node, 4.into()), expected);
    }
}
