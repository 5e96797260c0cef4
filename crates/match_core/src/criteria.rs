use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Thresholds a route/announcement pair is scored against.
///
/// Every field has a default, so a partial JSON object deserializes into the
/// defaults overridden by whatever it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingCriteria {
    /// Maximum detour (km). Carried for callers; the scorer does not read it.
    pub max_distance: f64,
    /// Largest tolerated gap (km) between the announcement's endpoints and the
    /// route's endpoints.
    pub max_deviation_distance: f64,
    /// Tolerated gap (hours) between departure and desired date.
    pub time_window: f64,
    /// Carried for callers; capacity is taken from the route itself.
    pub weight_capacity: Option<f64>,
    /// Carried for callers; capacity is taken from the route itself.
    pub volume_capacity: Option<f64>,
    /// Minimum deliverer rating (0-5). `None` disables the rating gate.
    pub min_rating: Option<f64>,
}

impl Default for MatchingCriteria {
    fn default() -> Self {
        Self {
            max_distance: 10.0,
            max_deviation_distance: 5.0,
            time_window: 2.0,
            weight_capacity: None,
            volume_capacity: None,
            min_rating: Some(3.0),
        }
    }
}

impl MatchingCriteria {
    pub fn with_max_deviation_distance(mut self, km: f64) -> Self {
        self.max_deviation_distance = km;
        self
    }

    pub fn with_time_window(mut self, hours: f64) -> Self {
        self.time_window = hours;
        self
    }

    pub fn with_min_rating(mut self, min_rating: Option<f64>) -> Self {
        self.min_rating = min_rating;
        self
    }

    /// Rating floor used for query-stage filtering (0 when unset).
    pub fn rating_floor(&self) -> f64 {
        self.min_rating.unwrap_or(0.0)
    }

    /// Reject criteria that would make factor scores undefined.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.max_deviation_distance.is_finite() || self.max_deviation_distance <= 0.0 {
            return Err(MatchError::InvalidCriteria(format!(
                "max_deviation_distance must be a positive number, got {}",
                self.max_deviation_distance
            )));
        }
        if !self.time_window.is_finite() || self.time_window <= 0.0 {
            return Err(MatchError::InvalidCriteria(format!(
                "time_window must be a positive number of hours, got {}",
                self.time_window
            )));
        }
        if !self.max_distance.is_finite() || self.max_distance < 0.0 {
            return Err(MatchError::InvalidCriteria(format!(
                "max_distance must be a non-negative number, got {}",
                self.max_distance
            )));
        }
        for (name, value) in [
            ("weight_capacity", self.weight_capacity),
            ("volume_capacity", self.volume_capacity),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(MatchError::InvalidCriteria(format!(
                        "{name} must be a non-negative number, got {value}"
                    )));
                }
            }
        }
        if let Some(min_rating) = self.min_rating {
            if !(0.0..=5.0).contains(&min_rating) {
                return Err(MatchError::InvalidCriteria(format!(
                    "min_rating must be within [0, 5], got {min_rating}"
                )));
            }
        }
        Ok(())
    }
}
