//! Fixtures shared by unit tests, integration tests and benches.
//!
//! The reference pair is a Paris to Lyon route and an announcement with the
//! same endpoints and date, owned by a deliverer rated 4.5.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{
    Announcement, AnnouncementId, AnnouncementStatus, AnnouncementType, Deliverer, DelivererId,
    PackageDetails, Route, RouteId, UserId, ValidationStatus,
};
use crate::geo::GeoPoint;

pub const PARIS: (f64, f64) = (48.8566, 2.3522);
pub const LYON: (f64, f64) = (45.7640, 4.8357);

/// Fixed reference instant for fixtures (2025-06-02 08:00 UTC).
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0)
        .single()
        .expect("reference time should be unambiguous")
}

pub fn point((lat, lng): (f64, f64)) -> GeoPoint {
    GeoPoint::new(lat, lng).expect("fixture coordinates should be valid")
}

pub fn approved_deliverer(id: &str, rating: f64) -> Deliverer {
    Deliverer {
        id: DelivererId::new(id),
        user_id: UserId::new(format!("user-{id}")),
        average_rating: rating,
        validation_status: ValidationStatus::Approved,
        is_active: true,
    }
}

pub fn paris_lyon_route() -> Route {
    Route {
        id: RouteId::new("route-paris-lyon"),
        departure_date: reference_time(),
        start_location: point(PARIS),
        end_location: point(LYON),
        available_weight: 100.0,
        available_volume: 500.0,
        price_per_kg: 1.0,
        is_active: true,
        deliverer: approved_deliverer("deliverer-1", 4.5),
    }
}

/// Package announcement without package details.
pub fn paris_lyon_announcement() -> Announcement {
    Announcement {
        id: AnnouncementId::new("announcement-paris-lyon"),
        title: "Boxes to Lyon".to_string(),
        announcement_type: AnnouncementType::Package,
        desired_date: reference_time(),
        start_location: point(PARIS),
        end_location: point(LYON),
        price: 30.0,
        status: AnnouncementStatus::Published,
        package_details: None,
        client_id: UserId::new("client-1"),
        has_delivery: false,
    }
}

pub fn small_package(weight: f64) -> PackageDetails {
    PackageDetails {
        weight,
        length: 20.0,
        width: 20.0,
        height: 20.0,
    }
}
