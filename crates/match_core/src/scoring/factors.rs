//! The five factor scores. Each returns a value in `[0, 100]`; a violated
//! hard constraint yields 0.

use crate::criteria::MatchingCriteria;
use crate::domain::{Announcement, Route};
use crate::geo::haversine_km;

/// Weighted contribution of each factor to the total score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub distance: f64,
    pub time: f64,
    pub capacity: f64,
    pub rating: f64,
    pub price: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            distance: 0.40,
            time: 0.25,
            capacity: 0.20,
            rating: 0.10,
            price: 0.05,
        }
    }
}

/// Clamp to `[0, 100]`, mapping NaN to 0.
pub(crate) fn bounded(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Linear falloff: 100 at zero, 0 at `limit`, 0 past it.
fn linear_falloff(value: f64, limit: f64) -> f64 {
    if value > limit {
        return 0.0;
    }
    bounded(100.0 - (value / limit) * 100.0)
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

/// Worst endpoint gap between the announcement and the route.
pub fn endpoint_deviation_km(route: &Route, announcement: &Announcement) -> f64 {
    let start = haversine_km(announcement.start_location, route.start_location);
    let end = haversine_km(announcement.end_location, route.end_location);
    start.max(end)
}

pub fn distance_score(route: &Route, announcement: &Announcement, criteria: &MatchingCriteria) -> f64 {
    linear_falloff(
        endpoint_deviation_km(route, announcement),
        criteria.max_deviation_distance,
    )
}

pub fn time_score(route: &Route, announcement: &Announcement, criteria: &MatchingCriteria) -> f64 {
    let diff_ms = (route.departure_date - announcement.desired_date)
        .num_milliseconds()
        .unsigned_abs();
    let diff_hours = diff_ms as f64 / 3_600_000.0;
    linear_falloff(diff_hours, criteria.time_window)
}

/// Services and package announcements without details carry no capacity
/// constraint. A package that fits earns its utilization plus a 50 point
/// bonus, capped at 100.
pub fn capacity_score(route: &Route, announcement: &Announcement) -> f64 {
    let Some(package) = announcement.package() else {
        return 100.0;
    };

    let volume = package.volume_liters();
    if package.weight > route.available_weight || volume > route.available_volume {
        return 0.0;
    }

    let utilization = ratio(package.weight, route.available_weight)
        .max(ratio(volume, route.available_volume))
        * 100.0;
    bounded((utilization + 50.0).min(100.0))
}

pub fn rating_score(route: &Route, criteria: &MatchingCriteria) -> f64 {
    let rating = route.deliverer.average_rating;
    if let Some(min_rating) = criteria.min_rating {
        if rating < min_rating {
            return 0.0;
        }
    }
    bounded((rating / 5.0) * 100.0)
}

pub fn price_score(route: &Route, announcement: &Announcement) -> f64 {
    let Some(package) = announcement.package_details.as_ref() else {
        return 100.0;
    };

    let route_cost = route.price_per_kg * package.weight;
    if route_cost == 0.0 {
        return 100.0;
    }

    let profit_ratio = announcement.price / route_cost;
    if profit_ratio < 1.0 {
        0.0
    } else if profit_ratio > 3.0 {
        100.0
    } else {
        bounded((profit_ratio - 1.0) * 50.0)
    }
}
