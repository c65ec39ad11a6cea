//! Search configuration for the event finder.

/// Default search radius around each event, in meters.
pub const DEFAULT_MAX_DISTANCE_M: f64 = 300.0;

/// Configuration parameters for station ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct FinderConfig {
    /// Stations farther than this from an event are ignored (meters).
    pub max_distance_m: f64,
}

impl FinderConfig {
    /// Create a configuration with the given search radius.
    pub fn new(max_distance_m: f64) -> Self {
        Self { max_distance_m }
    }

    /// Set the search radius.
    pub fn with_max_distance(mut self, max_distance_m: f64) -> Self {
        self.max_distance_m = max_distance_m;
        self
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_distance_m: DEFAULT_MAX_DISTANCE_M,
        }
    }
}
