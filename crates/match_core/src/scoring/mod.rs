//! Route/announcement compatibility scoring.
//!
//! [`score_match`] is a pure function: five independent factor scores
//! ([`factors`]) are combined with [`FactorWeights`] into a 0-100 total, and
//! the detour is turned into distance and delay estimates ([`estimate`]).

pub mod estimate;
pub mod factors;
pub mod recommendations;
pub mod types;

use crate::criteria::MatchingCriteria;
use crate::domain::{Announcement, Route};

pub use estimate::{deviation_distance_km, estimate_delay_minutes, AVG_SPEED_KMH};
pub use factors::{
    capacity_score, distance_score, price_score, rating_score, time_score, FactorWeights,
};
pub use recommendations::recommendations_for;
pub use types::{MatchFactors, MatchScore, RouteMatchResult};

/// Score a pair with the default factor weights.
pub fn score_match(route: &Route, announcement: &Announcement, criteria: &MatchingCriteria) -> MatchScore {
    score_match_with_weights(route, announcement, criteria, &FactorWeights::default())
}

pub fn score_match_with_weights(
    route: &Route,
    announcement: &Announcement,
    criteria: &MatchingCriteria,
    weights: &FactorWeights,
) -> MatchScore {
    let factors = MatchFactors {
        distance_score: distance_score(route, announcement, criteria),
        time_score: time_score(route, announcement, criteria),
        capacity_score: capacity_score(route, announcement),
        rating_score: rating_score(route, criteria),
        price_score: price_score(route, announcement),
    };

    let weighted = factors.distance_score * weights.distance
        + factors.time_score * weights.time
        + factors.capacity_score * weights.capacity
        + factors.rating_score * weights.rating
        + factors.price_score * weights.price;

    let estimated_distance_km = deviation_distance_km(route, announcement);

    MatchScore {
        route_id: route.id.clone(),
        announcement_id: announcement.id.clone(),
        score: factors::bounded(weighted.round()) as u8,
        factors,
        estimated_delay_minutes: estimate_delay_minutes(estimated_distance_km),
        estimated_distance_km,
    }
}
