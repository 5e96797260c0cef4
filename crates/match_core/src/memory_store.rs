//! In-memory implementation of the data-access seams.
//!
//! Match records are keyed by (route, announcement), which is the uniqueness
//! constraint the sweep relies on when it runs repeatedly.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::domain::{Announcement, AnnouncementId, DateWindow, Route, RouteId, UserId};
use crate::error::DataAccessError;
use crate::store::{
    CandidateReader, MatchNotification, MatchRecord, MatchWriter, Notifier, SaveOutcome,
};

#[derive(Debug, Default)]
struct StoreState {
    routes: BTreeMap<RouteId, Route>,
    announcements: BTreeMap<AnnouncementId, Announcement>,
    matches: HashMap<(RouteId, AnnouncementId), MatchRecord>,
    notifications: Vec<MatchNotification>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(routes: Vec<Route>, announcements: Vec<Announcement>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                routes: routes.into_iter().map(|r| (r.id.clone(), r)).collect(),
                announcements: announcements
                    .into_iter()
                    .map(|a| (a.id.clone(), a))
                    .collect(),
                ..StoreState::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, DataAccessError> {
        self.state
            .lock()
            .map_err(|_| DataAccessError::new("in-memory store lock poisoned"))
    }

    pub fn insert_route(&self, route: Route) -> Result<(), DataAccessError> {
        self.lock()?.routes.insert(route.id.clone(), route);
        Ok(())
    }

    pub fn insert_announcement(&self, announcement: Announcement) -> Result<(), DataAccessError> {
        self.lock()?
            .announcements
            .insert(announcement.id.clone(), announcement);
        Ok(())
    }

    /// All persisted matches, ordered by announcement then route.
    pub fn matches(&self) -> Result<Vec<MatchRecord>, DataAccessError> {
        let mut records: Vec<MatchRecord> = self.lock()?.matches.values().cloned().collect();
        records.sort_by(|a, b| {
            (&a.announcement_id, &a.route_id).cmp(&(&b.announcement_id, &b.route_id))
        });
        Ok(records)
    }

    pub fn notifications(&self) -> Result<Vec<MatchNotification>, DataAccessError> {
        Ok(self.lock()?.notifications.clone())
    }
}

impl CandidateReader for InMemoryStore {
    fn get_announcement(&self, id: &AnnouncementId) -> Result<Option<Announcement>, DataAccessError> {
        Ok(self.lock()?.announcements.get(id).cloned())
    }

    fn get_route(&self, id: &RouteId) -> Result<Option<Route>, DataAccessError> {
        Ok(self.lock()?.routes.get(id).cloned())
    }

    fn list_active_routes(
        &self,
        window: &DateWindow,
        min_rating: f64,
    ) -> Result<Vec<Route>, DataAccessError> {
        Ok(self
            .lock()?
            .routes
            .values()
            .filter(|route| route.is_candidate_for(window, min_rating))
            .cloned()
            .collect())
    }

    fn list_open_announcements(
        &self,
        window: &DateWindow,
    ) -> Result<Vec<Announcement>, DataAccessError> {
        Ok(self
            .lock()?
            .announcements
            .values()
            .filter(|announcement| announcement.is_candidate_for(window))
            .cloned()
            .collect())
    }
}

impl MatchWriter for InMemoryStore {
    fn save_match(
        &self,
        route_id: &RouteId,
        announcement_id: &AnnouncementId,
        score: u8,
    ) -> Result<SaveOutcome, DataAccessError> {
        let mut state = self.lock()?;
        let key = (route_id.clone(), announcement_id.clone());
        if state.matches.contains_key(&key) {
            return Ok(SaveOutcome::AlreadyExists);
        }
        state.matches.insert(
            key,
            MatchRecord {
                route_id: route_id.clone(),
                announcement_id: announcement_id.clone(),
                score,
                is_notified: false,
                created_at: Utc::now(),
            },
        );
        Ok(SaveOutcome::Created)
    }

    fn mark_notified(
        &self,
        route_id: &RouteId,
        announcement_id: &AnnouncementId,
    ) -> Result<(), DataAccessError> {
        let mut state = self.lock()?;
        let key = (route_id.clone(), announcement_id.clone());
        match state.matches.get_mut(&key) {
            Some(record) => {
                record.is_notified = true;
                Ok(())
            }
            None => Err(DataAccessError::new(format!(
                "no match recorded for route {route_id} and announcement {announcement_id}"
            ))),
        }
    }
}

impl Notifier for InMemoryStore {
    fn notify_deliverer_of_match(
        &self,
        deliverer_user_id: &UserId,
        announcement: &Announcement,
    ) -> Result<(), DataAccessError> {
        self.lock()?
            .notifications
            .push(MatchNotification::new_match(deliverer_user_id, announcement));
        Ok(())
    }
}
