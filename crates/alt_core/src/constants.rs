/// Edge weight type
pub type Weight = f64;
/// Coordinates are stored as fixed-point integers in millionths of a degree
pub const COORDINATE_SCALE: f64 = 1_000_000.0;
/// Mean earth radius in metres
pub const EARTH_RADIUS: f64 = 6_371_000.0;
