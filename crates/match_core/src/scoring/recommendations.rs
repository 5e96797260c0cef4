use crate::domain::Announcement;

use super::types::MatchScore;

pub const NO_CONCERNS: &str = "Excellent match: no particular recommendation.";

/// Advisory notes for a scored pair, always in the order distance, time,
/// capacity, rating, delay. Never empty.
pub fn recommendations_for(score: &MatchScore, announcement: &Announcement) -> Vec<String> {
    let factors = &score.factors;
    let mut notes = Vec::new();

    if factors.distance_score < 50.0 {
        notes.push(format!(
            "The {:.1} km detour is significant. Consider adjusting the itinerary.",
            score.estimated_distance_km
        ));
    }

    if factors.time_score < 50.0 {
        notes.push("The schedule gap is significant. Check how flexible the timing is.".to_string());
    }

    if factors.capacity_score < 70.0 && announcement.package_details.is_some() {
        notes.push(
            "The package takes up a large share of the available capacity. Check its exact dimensions."
                .to_string(),
        );
    }

    if factors.rating_score < 70.0 {
        notes.push("The deliverer's rating is moderate. Review their delivery history.".to_string());
    }

    if score.estimated_delay_minutes > 30 {
        notes.push(format!(
            "The estimated extra {} minutes may affect other deliveries.",
            score.estimated_delay_minutes
        ));
    }

    if notes.is_empty() {
        notes.push(NO_CONCERNS.to_string());
    }

    notes
}
