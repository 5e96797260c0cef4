mod support;

use chrono::Duration;
use match_core::domain::{AnnouncementId, AnnouncementStatus, DateWindow, Route, RouteId};
use match_core::geo::GeoPoint;
use match_core::test_helpers::{
    paris_lyon_announcement, paris_lyon_route, reference_time, small_package,
};
use match_core::{
    Announcement, CandidateReader, DataAccessError, FinderConfig, InMemoryStore, MatchError,
    MatchFinder, MatchingCriteria,
};
use support::{announcement_variant, route_variant};

const ANNOUNCEMENT: &str = "announcement-paris-lyon";

fn find_for_reference(store: &InMemoryStore, criteria: &MatchingCriteria) -> Vec<match_core::RouteMatchResult> {
    MatchFinder::new(store)
        .find_matches_for_announcement(&AnnouncementId::new(ANNOUNCEMENT), criteria)
        .expect("matches")
}

#[test]
fn identical_paris_lyon_trip_scores_ninety_nine() {
    let store = InMemoryStore::with_data(vec![paris_lyon_route()], vec![paris_lyon_announcement()]);
    let results = find_for_reference(&store, &MatchingCriteria::default());

    assert_eq!(results.len(), 1);
    let factors = results[0].match_score.factors;
    assert_eq!(factors.distance_score, 100.0);
    assert_eq!(factors.time_score, 100.0);
    assert_eq!(factors.capacity_score, 100.0);
    assert_eq!(factors.rating_score, 90.0);
    assert_eq!(factors.price_score, 100.0);
    assert_eq!(results[0].score(), 99);
    assert!(results[0].feasible);
}

#[test]
fn results_are_sorted_by_descending_score() {
    let routes = vec![
        route_variant("a-far", 3.0, 4.0),
        route_variant("b-close", 4.5, 1.0),
        route_variant("c-exact", 4.5, 0.0),
        route_variant("d-mid", 5.0, 2.5),
    ];
    let store = InMemoryStore::with_data(routes, vec![paris_lyon_announcement()]);
    let results = find_for_reference(&store, &MatchingCriteria::default());

    let scores: Vec<u8> = results.iter().map(|r| r.score()).collect();
    assert_eq!(scores, vec![99, 91, 80, 64]);
    let ids: Vec<&str> = results.iter().map(|r| r.route.id.as_str()).collect();
    assert_eq!(ids, vec!["c-exact", "b-close", "d-mid", "a-far"]);
    assert!(results.iter().all(|r| r.feasible));
}

#[test]
fn scores_between_soft_floor_and_feasibility_are_kept_but_flagged() {
    let store = InMemoryStore::with_data(
        vec![route_variant("near-limit", 3.0, 4.9)],
        vec![paris_lyon_announcement()],
    );
    let results = find_for_reference(&store, &MatchingCriteria::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score(), 57);
    assert!(!results[0].feasible);
}

#[test]
fn zero_distance_score_costs_exactly_its_weight() {
    let mut route = paris_lyon_route();
    // Dijon instead of Lyon: far beyond the 5 km deviation limit
    route.end_location = GeoPoint::new(47.3220, 5.0415).expect("point");
    let store = InMemoryStore::with_data(vec![route], vec![paris_lyon_announcement()]);
    let results = find_for_reference(&store, &MatchingCriteria::default());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].match_score.factors.distance_score, 0.0);
    assert_eq!(results[0].score(), 99 - 40);
    assert!(!results[0].feasible);
    assert!(results[0].recommendations[0].contains("detour"));
}

#[test]
fn overweight_package_is_never_feasible() {
    let mut route = paris_lyon_route();
    route.available_weight = 10.0;
    let mut announcement = paris_lyon_announcement();
    announcement.package_details = Some(small_package(50.0));
    let store = InMemoryStore::with_data(vec![route], vec![announcement]);

    let results = find_for_reference(&store, &MatchingCriteria::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].match_score.factors.capacity_score, 0.0);
    assert!(results[0].score() >= 60);
    assert!(!results[0].feasible);
    assert!(results[0]
        .recommendations
        .iter()
        .any(|note| note.contains("capacity")));
}

#[test]
fn low_rated_deliverer_is_filtered_before_scoring() {
    let store = InMemoryStore::with_data(
        vec![route_variant("low", 2.0, 0.0), route_variant("good", 4.5, 0.0)],
        vec![paris_lyon_announcement()],
    );
    let results = find_for_reference(&store, &MatchingCriteria::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].route.id, RouteId::new("good"));

    let relaxed = MatchingCriteria::default().with_min_rating(None);
    let results = find_for_reference(&store, &relaxed);
    assert_eq!(results.len(), 2);
    let low = results
        .iter()
        .find(|r| r.route.id == RouteId::new("low"))
        .expect("low-rated route");
    assert_eq!(low.match_score.factors.rating_score, 40.0);
}

#[test]
fn departure_exactly_at_window_edge_gets_no_time_credit() {
    let mut route = paris_lyon_route();
    route.departure_date = reference_time() + Duration::hours(2);
    let store = InMemoryStore::with_data(vec![route], vec![paris_lyon_announcement()]);

    let results = find_for_reference(&store, &MatchingCriteria::default());
    assert_eq!(results.len(), 1, "edge of the window is still a candidate");
    assert_eq!(results[0].match_score.factors.time_score, 0.0);
    assert_eq!(results[0].score(), 74);
    assert!(results[0].recommendations[0].contains("schedule"));
}

#[test]
fn departures_outside_the_window_are_not_candidates() {
    let mut route = paris_lyon_route();
    route.departure_date = reference_time() + Duration::hours(2) + Duration::minutes(1);
    let store = InMemoryStore::with_data(vec![route], vec![paris_lyon_announcement()]);
    assert!(find_for_reference(&store, &MatchingCriteria::default()).is_empty());
}

#[test]
fn enormous_time_window_widens_the_search_without_failing() {
    let mut route = paris_lyon_route();
    route.departure_date = reference_time() + Duration::days(30);
    let store = InMemoryStore::with_data(vec![route], vec![paris_lyon_announcement()]);

    let criteria = MatchingCriteria::default().with_time_window(1e10);
    criteria.validate().expect("criteria are valid");
    let results = find_for_reference(&store, &criteria);
    assert_eq!(results.len(), 1);
    assert!(results[0].match_score.factors.time_score > 99.0);

    let results = MatchFinder::new(&store)
        .find_announcements_for_route(&RouteId::new("route-paris-lyon"), &criteria)
        .expect("announcements");
    assert_eq!(results.len(), 1);
}

#[test]
fn output_is_capped_at_twenty() {
    let routes: Vec<Route> = (0..25)
        .map(|i| route_variant(&format!("route-{i:02}"), 4.5, i as f64 * 0.1))
        .collect();
    let store = InMemoryStore::with_data(routes, vec![paris_lyon_announcement()]);
    let results = find_for_reference(&store, &MatchingCriteria::default());

    assert_eq!(results.len(), 20);
    assert!(results.windows(2).all(|w| w[0].score() >= w[1].score()));
    assert_eq!(results[0].route.id, RouteId::new("route-00"));
}

#[test]
fn custom_result_cap_is_respected() {
    let routes: Vec<Route> = (0..5)
        .map(|i| route_variant(&format!("route-{i}"), 4.5, 0.0))
        .collect();
    let store = InMemoryStore::with_data(routes, vec![paris_lyon_announcement()]);
    let results = MatchFinder::with_config(&store, FinderConfig::default().with_max_results(3))
        .find_matches_for_announcement(
            &AnnouncementId::new(ANNOUNCEMENT),
            &MatchingCriteria::default(),
        )
        .expect("matches");
    assert_eq!(results.len(), 3);
}

#[test]
fn route_anchor_finds_open_announcements_in_window() {
    let mut assigned = announcement_variant("assigned", Duration::zero());
    assigned.has_delivery = true;
    let mut draft = announcement_variant("draft", Duration::zero());
    draft.status = AnnouncementStatus::Draft;
    let announcements = vec![
        announcement_variant("later", Duration::minutes(90)),
        announcement_variant("soon", Duration::minutes(30)),
        announcement_variant("too-late", Duration::hours(3)),
        assigned,
        draft,
    ];
    let store = InMemoryStore::with_data(vec![paris_lyon_route()], announcements);

    let results = MatchFinder::new(&store)
        .find_announcements_for_route(
            &RouteId::new("route-paris-lyon"),
            &MatchingCriteria::default(),
        )
        .expect("announcements");

    let ids: Vec<&str> = results.iter().map(|r| r.announcement.id.as_str()).collect();
    assert_eq!(ids, vec!["soon", "later"]);
    assert_eq!(results[0].score(), 93);
    assert_eq!(results[1].score(), 80);
}

struct FailingReader;

impl CandidateReader for FailingReader {
    fn get_announcement(&self, _id: &AnnouncementId) -> Result<Option<Announcement>, DataAccessError> {
        Ok(Some(paris_lyon_announcement()))
    }

    fn get_route(&self, _id: &RouteId) -> Result<Option<Route>, DataAccessError> {
        Err(DataAccessError::new("connection reset"))
    }

    fn list_active_routes(
        &self,
        _window: &DateWindow,
        _min_rating: f64,
    ) -> Result<Vec<Route>, DataAccessError> {
        Err(DataAccessError::new("query timed out"))
    }

    fn list_open_announcements(
        &self,
        _window: &DateWindow,
    ) -> Result<Vec<Announcement>, DataAccessError> {
        Ok(Vec::new())
    }
}

#[test]
fn data_access_failures_propagate_unchanged() {
    let finder = MatchFinder::new(&FailingReader);
    let error = finder
        .find_matches_for_announcement(
            &AnnouncementId::new(ANNOUNCEMENT),
            &MatchingCriteria::default(),
        )
        .expect_err("candidate fetch fails");
    assert_eq!(
        error,
        MatchError::DataAccess(DataAccessError::new("query timed out"))
    );

    let error = finder
        .find_announcements_for_route(&RouteId::new("any"), &MatchingCriteria::default())
        .expect_err("anchor fetch fails");
    assert!(matches!(error, MatchError::DataAccess(_)));
}
