//! Data-access seams used by the finder and the sweep.
//!
//! Adapters implement these against whatever backs the marketplace; the
//! in-memory adapter in [`crate::memory_store`] is used by the CLI and tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Announcement, AnnouncementId, AnnouncementType, DateWindow, Route, RouteId, UserId,
};
use crate::error::DataAccessError;

pub trait CandidateReader: Send + Sync {
    fn get_announcement(&self, id: &AnnouncementId) -> Result<Option<Announcement>, DataAccessError>;

    fn get_route(&self, id: &RouteId) -> Result<Option<Route>, DataAccessError>;

    /// Active routes departing within `window` whose deliverer is active,
    /// approved and rated at least `min_rating`.
    fn list_active_routes(
        &self,
        window: &DateWindow,
        min_rating: f64,
    ) -> Result<Vec<Route>, DataAccessError>;

    /// Published, unassigned announcements whose desired date falls in `window`.
    fn list_open_announcements(&self, window: &DateWindow)
        -> Result<Vec<Announcement>, DataAccessError>;
}

/// Outcome of persisting a match; (route, announcement) pairs are unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    AlreadyExists,
}

pub trait MatchWriter: Send + Sync {
    fn save_match(
        &self,
        route_id: &RouteId,
        announcement_id: &AnnouncementId,
        score: u8,
    ) -> Result<SaveOutcome, DataAccessError>;

    fn mark_notified(
        &self,
        route_id: &RouteId,
        announcement_id: &AnnouncementId,
    ) -> Result<(), DataAccessError>;
}

pub trait Notifier: Send + Sync {
    fn notify_deliverer_of_match(
        &self,
        deliverer_user_id: &UserId,
        announcement: &Announcement,
    ) -> Result<(), DataAccessError>;
}

/// A persisted route/announcement match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub route_id: RouteId,
    pub announcement_id: AnnouncementId,
    pub score: u8,
    pub is_notified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NewMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationData {
    pub announcement_id: AnnouncementId,
    #[serde(rename = "type")]
    pub announcement_type: AnnouncementType,
    pub price: f64,
}

/// Message delivered to a deliverer when an announcement fits their route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchNotification {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: NotificationData,
}

impl MatchNotification {
    pub fn new_match(user_id: &UserId, announcement: &Announcement) -> Self {
        Self {
            user_id: user_id.clone(),
            kind: NotificationKind::NewMatch,
            title: "New delivery opportunity".to_string(),
            message: format!(
                "A new announcement matches your route: {}",
                announcement.title
            ),
            data: NotificationData {
                announcement_id: announcement.id.clone(),
                announcement_type: announcement.announcement_type,
                price: announcement.price,
            },
        }
    }
}
