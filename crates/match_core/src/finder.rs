//! Anchor-based candidate search: one announcement against the live route
//! pool, or one route against the open announcements.

use tracing::{debug, error};

use crate::criteria::MatchingCriteria;
use crate::domain::{Announcement, AnnouncementId, DateWindow, Route, RouteId};
use crate::error::{MatchError, NotFound};
use crate::scoring::{recommendations_for, score_match, RouteMatchResult};
use crate::store::CandidateReader;

/// Result filtering and ranking thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderConfig {
    /// Pairs below this score are dropped.
    pub min_score: u8,
    /// Pairs at or above this score are flagged feasible, unless the package
    /// does not fit the route.
    pub feasible_score: u8,
    pub max_results: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            min_score: 30,
            feasible_score: 60,
            max_results: 20,
        }
    }
}

impl FinderConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

pub struct MatchFinder<'a> {
    reader: &'a dyn CandidateReader,
    config: FinderConfig,
}

impl<'a> MatchFinder<'a> {
    pub fn new(reader: &'a dyn CandidateReader) -> Self {
        Self::with_config(reader, FinderConfig::default())
    }

    pub fn with_config(reader: &'a dyn CandidateReader, config: FinderConfig) -> Self {
        Self { reader, config }
    }

    /// Routes that could carry `announcement_id`, best first.
    pub fn find_matches_for_announcement(
        &self,
        announcement_id: &AnnouncementId,
        criteria: &MatchingCriteria,
    ) -> Result<Vec<RouteMatchResult>, MatchError> {
        self.matches_for_announcement(announcement_id, criteria)
            .inspect_err(|err| {
                error!(
                    component = "match_finder",
                    announcement_id = %announcement_id,
                    error = %err,
                    "failed to find matches for announcement"
                );
            })
    }

    /// Announcements that fit along `route_id`, best first.
    pub fn find_announcements_for_route(
        &self,
        route_id: &RouteId,
        criteria: &MatchingCriteria,
    ) -> Result<Vec<RouteMatchResult>, MatchError> {
        self.announcements_for_route(route_id, criteria)
            .inspect_err(|err| {
                error!(
                    component = "match_finder",
                    route_id = %route_id,
                    error = %err,
                    "failed to find announcements for route"
                );
            })
    }

    fn matches_for_announcement(
        &self,
        announcement_id: &AnnouncementId,
        criteria: &MatchingCriteria,
    ) -> Result<Vec<RouteMatchResult>, MatchError> {
        criteria.validate()?;
        let announcement = self
            .reader
            .get_announcement(announcement_id)?
            .ok_or_else(|| NotFound::Announcement(announcement_id.clone()))?;

        let window = DateWindow::around(announcement.desired_date, criteria.time_window);
        let min_rating = criteria.rating_floor();
        let routes = self.reader.list_active_routes(&window, min_rating)?;
        let candidates = routes.len();

        let results = routes
            .into_iter()
            .filter(|route| route.is_candidate_for(&window, min_rating))
            .filter_map(|route| self.evaluate(route, announcement.clone(), criteria))
            .collect();
        let ranked = self.rank(results);

        debug!(
            component = "match_finder",
            announcement_id = %announcement_id,
            candidates,
            matches = ranked.len(),
            "matched announcement against routes"
        );
        Ok(ranked)
    }

    fn announcements_for_route(
        &self,
        route_id: &RouteId,
        criteria: &MatchingCriteria,
    ) -> Result<Vec<RouteMatchResult>, MatchError> {
        criteria.validate()?;
        let route = self
            .reader
            .get_route(route_id)?
            .ok_or_else(|| NotFound::Route(route_id.clone()))?;

        let window = DateWindow::around(route.departure_date, criteria.time_window);
        let announcements = self.reader.list_open_announcements(&window)?;
        let candidates = announcements.len();

        let results = announcements
            .into_iter()
            .filter(|announcement| announcement.is_candidate_for(&window))
            .filter_map(|announcement| self.evaluate(route.clone(), announcement, criteria))
            .collect();
        let ranked = self.rank(results);

        debug!(
            component = "match_finder",
            route_id = %route_id,
            candidates,
            matches = ranked.len(),
            "matched route against announcements"
        );
        Ok(ranked)
    }

    fn evaluate(
        &self,
        route: Route,
        announcement: Announcement,
        criteria: &MatchingCriteria,
    ) -> Option<RouteMatchResult> {
        let match_score = score_match(&route, &announcement, criteria);
        if match_score.score < self.config.min_score {
            return None;
        }
        let recommendations = recommendations_for(&match_score, &announcement);
        Some(RouteMatchResult {
            feasible: match_score.score >= self.config.feasible_score
                && !match_score.factors.capacity_exceeded(),
            route,
            announcement,
            match_score,
            recommendations,
        })
    }

    /// Highest score first; ties keep candidate order.
    fn rank(&self, mut results: Vec<RouteMatchResult>) -> Vec<RouteMatchResult> {
        results.sort_by(|a, b| b.score().cmp(&a.score()));
        results.truncate(self.config.max_results);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::InMemoryStore;
    use crate::test_helpers::{paris_lyon_announcement, paris_lyon_route};

    #[test]
    fn missing_announcement_is_not_found() {
        let store = InMemoryStore::new();
        let finder = MatchFinder::new(&store);
        let error = finder
            .find_matches_for_announcement(
                &AnnouncementId::new("missing"),
                &MatchingCriteria::default(),
            )
            .expect_err("should fail");
        assert_eq!(
            error,
            MatchError::NotFound(NotFound::Announcement(AnnouncementId::new("missing")))
        );
    }

    #[test]
    fn missing_route_is_not_found() {
        let store = InMemoryStore::new();
        let finder = MatchFinder::new(&store);
        let error = finder
            .find_announcements_for_route(&RouteId::new("missing"), &MatchingCriteria::default())
            .expect_err("should fail");
        assert!(matches!(error, MatchError::NotFound(NotFound::Route(_))));
    }

    #[test]
    fn invalid_criteria_are_rejected_before_any_read() {
        let store = InMemoryStore::new();
        let finder = MatchFinder::new(&store);
        let criteria = MatchingCriteria::default().with_max_deviation_distance(0.0);
        let error = finder
            .find_matches_for_announcement(&AnnouncementId::new("missing"), &criteria)
            .expect_err("should fail");
        assert!(matches!(error, MatchError::InvalidCriteria(_)));
    }

    #[test]
    fn identical_trip_is_feasible_with_no_concerns() {
        let store = InMemoryStore::with_data(vec![paris_lyon_route()], vec![paris_lyon_announcement()]);
        let finder = MatchFinder::new(&store);
        let results = finder
            .find_matches_for_announcement(
                &AnnouncementId::new("announcement-paris-lyon"),
                &MatchingCriteria::default(),
            )
            .expect("matches");
        assert_eq!(results.len(), 1);
        assert!(results[0].feasible);
        assert_eq!(results[0].score(), 99);
        assert_eq!(results[0].recommendations.len(), 1);
    }
}
