#![allow(dead_code)]

use chrono::Duration;
use match_core::domain::{Announcement, AnnouncementId, Route, RouteId};
use match_core::geo::GeoPoint;
use match_core::test_helpers::{paris_lyon_announcement, paris_lyon_route, reference_time, PARIS};

/// Kilometers per degree of latitude on the 6371 km sphere.
pub const KM_PER_DEGREE_LAT: f64 = 111.195;

/// The Paris-Lyon route with a new id, deliverer rating and start point
/// moved `start_offset_km` north.
pub fn route_variant(id: &str, rating: f64, start_offset_km: f64) -> Route {
    let mut route = paris_lyon_route();
    route.id = RouteId::new(id);
    route.deliverer.id = match_core::domain::DelivererId::new(format!("deliverer-{id}"));
    route.deliverer.user_id = match_core::domain::UserId::new(format!("user-{id}"));
    route.deliverer.average_rating = rating;
    route.start_location = GeoPoint::new(PARIS.0 + start_offset_km / KM_PER_DEGREE_LAT, PARIS.1)
        .expect("valid offset point");
    route
}

pub fn announcement_variant(id: &str, desired_offset: Duration) -> Announcement {
    let mut announcement = paris_lyon_announcement();
    announcement.id = AnnouncementId::new(id);
    announcement.title = format!("Announcement {id}");
    announcement.desired_date = reference_time() + desired_offset;
    announcement
}
