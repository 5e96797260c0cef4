//! Entities read from the marketplace data layer.
//!
//! These are transient snapshots: the matching engine never mutates them.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(RouteId);
string_id!(AnnouncementId);
string_id!(DelivererId);
string_id!(UserId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementType {
    Package,
    PersonTransport,
    AirportTransfer,
    Shopping,
    InternationalPurchase,
    CartDrop,
    PetSitting,
    HomeService,
}

impl AnnouncementType {
    pub fn is_package(self) -> bool {
        matches!(self, AnnouncementType::Package)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementStatus {
    Draft,
    Published,
    InProgress,
    Completed,
    Cancelled,
}

/// The deliverer who owns a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverer {
    pub id: DelivererId,
    /// Account that receives match notifications.
    pub user_id: UserId,
    /// Average rating on a 0-5 scale.
    #[serde(default)]
    pub average_rating: f64,
    pub validation_status: ValidationStatus,
    pub is_active: bool,
}

/// A deliverer's planned journey and remaining capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub departure_date: DateTime<Utc>,
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,
    /// Remaining weight capacity (kg).
    #[serde(default)]
    pub available_weight: f64,
    /// Remaining volume capacity (liters).
    #[serde(default)]
    pub available_volume: f64,
    #[serde(default)]
    pub price_per_kg: f64,
    pub is_active: bool,
    pub deliverer: Deliverer,
}

impl Route {
    /// Query-stage eligibility used when looking for routes that could serve
    /// an announcement.
    pub fn is_candidate_for(&self, window: &DateWindow, min_rating: f64) -> bool {
        self.is_active
            && window.contains(self.departure_date)
            && self.deliverer.is_active
            && self.deliverer.validation_status == ValidationStatus::Approved
            && self.deliverer.average_rating >= min_rating
    }
}

/// Physical characteristics of a package (weight in kg, dimensions in cm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageDetails {
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl PackageDetails {
    /// Volume in liters.
    pub fn volume_liters(&self) -> f64 {
        (self.length * self.width * self.height) / 1000.0
    }
}

/// A client's request for a delivery or a bookable service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub announcement_type: AnnouncementType,
    pub desired_date: DateTime<Utc>,
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,
    #[serde(default)]
    pub price: f64,
    pub status: AnnouncementStatus,
    #[serde(default)]
    pub package_details: Option<PackageDetails>,
    pub client_id: UserId,
    /// True once a delivery has been assigned.
    #[serde(default)]
    pub has_delivery: bool,
}

impl Announcement {
    /// Package details, only when this is a package announcement.
    pub fn package(&self) -> Option<&PackageDetails> {
        if self.announcement_type.is_package() {
            self.package_details.as_ref()
        } else {
            None
        }
    }

    /// Published and not yet assigned to a delivery.
    pub fn is_open(&self) -> bool {
        self.status == AnnouncementStatus::Published && !self.has_delivery
    }

    pub fn is_candidate_for(&self, window: &DateWindow) -> bool {
        self.is_open() && window.contains(self.desired_date)
    }
}

/// Inclusive date range; `to = None` leaves it open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
}

impl DateWindow {
    /// `[center - hours, center + hours]`, saturating at the representable
    /// date range.
    pub fn around(center: DateTime<Utc>, hours: f64) -> Self {
        let millis = (hours * 3_600_000.0).round() as i64;
        let span = Duration::try_milliseconds(millis).unwrap_or(Duration::MAX);
        Self {
            from: center
                .checked_sub_signed(span)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            to: Some(
                center
                    .checked_add_signed(span)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            ),
        }
    }

    pub fn starting_at(from: DateTime<Utc>) -> Self {
        Self { from, to: None }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.from && self.to.map_or(true, |to| at <= to)
    }
}
