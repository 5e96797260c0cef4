use serde::{Deserialize, Serialize};

use crate::domain::{Announcement, AnnouncementId, Route, RouteId};

/// Per-factor scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchFactors {
    pub distance_score: f64,
    pub time_score: f64,
    pub capacity_score: f64,
    pub rating_score: f64,
    pub price_score: f64,
}

impl MatchFactors {
    /// The package does not fit the route's remaining weight or volume.
    pub fn capacity_exceeded(&self) -> bool {
        self.capacity_score == 0.0
    }
}

/// Compatibility between one route and one announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub route_id: RouteId,
    pub announcement_id: AnnouncementId,
    /// Weighted total, rounded and clamped to `[0, 100]`.
    pub score: u8,
    pub factors: MatchFactors,
    pub estimated_delay_minutes: u32,
    /// Detour length (km).
    pub estimated_distance_km: f64,
}

/// A scored pair as returned by the finder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMatchResult {
    pub route: Route,
    pub announcement: Announcement,
    pub match_score: MatchScore,
    pub feasible: bool,
    pub recommendations: Vec<String>,
}

impl RouteMatchResult {
    pub fn score(&self) -> u8 {
        self.match_score.score
    }
}
