use crate::domain::{Announcement, Route};
use crate::geo::haversine_km;

/// Average urban speed used for delay estimation (km/h).
pub const AVG_SPEED_KMH: f64 = 40.0;

/// Extra kilometers a deliverer drives when detouring through the
/// announcement's pickup and dropoff instead of going straight.
pub fn deviation_distance_km(route: &Route, announcement: &Announcement) -> f64 {
    let direct = haversine_km(route.start_location, route.end_location);
    let detour = haversine_km(route.start_location, announcement.start_location)
        + haversine_km(announcement.start_location, announcement.end_location)
        + haversine_km(announcement.end_location, route.end_location);
    (detour - direct).max(0.0)
}

/// Minutes added by `deviation_km` at [`AVG_SPEED_KMH`].
pub fn estimate_delay_minutes(deviation_km: f64) -> u32 {
    let minutes = (deviation_km / AVG_SPEED_KMH) * 60.0;
    if minutes.is_finite() && minutes > 0.0 {
        minutes.round() as u32
    } else {
        0
    }
}
