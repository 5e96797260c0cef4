//! One function per subcommand, each returning a serializable report.

use chrono::{DateTime, Utc};
use match_core::scoring::recommendations_for;
use match_core::store::MatchRecord;
use match_core::{
    AnnouncementId, AutoMatchRunner, CancellationFlag, CandidateReader, InMemoryStore, MatchError,
    MatchFinder, MatchScore, MatchingCriteria, NotFound, RouteId, RouteMatchResult, SweepConfig,
    SweepSummary,
};
use serde::Serialize;

use crate::notifier::LoggingNotifier;
use crate::CliError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub match_score: MatchScore,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub summary: SweepSummary,
    pub matches: Vec<MatchRecord>,
}

/// Score one explicit pair, bypassing candidate filtering.
pub fn score(
    store: &InMemoryStore,
    route_id: &RouteId,
    announcement_id: &AnnouncementId,
    criteria: &MatchingCriteria,
) -> Result<ScoreReport, CliError> {
    criteria.validate()?;
    let route = store
        .get_route(route_id)
        .map_err(MatchError::from)?
        .ok_or_else(|| MatchError::from(NotFound::Route(route_id.clone())))?;
    let announcement = store
        .get_announcement(announcement_id)
        .map_err(MatchError::from)?
        .ok_or_else(|| MatchError::from(NotFound::Announcement(announcement_id.clone())))?;

    let match_score = match_core::score_match(&route, &announcement, criteria);
    let recommendations = recommendations_for(&match_score, &announcement);
    Ok(ScoreReport {
        match_score,
        recommendations,
    })
}

pub fn find_for_announcement(
    store: &InMemoryStore,
    announcement_id: &AnnouncementId,
    criteria: &MatchingCriteria,
) -> Result<Vec<RouteMatchResult>, CliError> {
    Ok(MatchFinder::new(store).find_matches_for_announcement(announcement_id, criteria)?)
}

pub fn find_for_route(
    store: &InMemoryStore,
    route_id: &RouteId,
    criteria: &MatchingCriteria,
) -> Result<Vec<RouteMatchResult>, CliError> {
    Ok(MatchFinder::new(store).find_announcements_for_route(route_id, criteria)?)
}

/// Sweep the dataset, persisting into the in-memory store and notifying
/// through the log.
pub fn sweep(
    store: &InMemoryStore,
    criteria: MatchingCriteria,
    config: SweepConfig,
    cancellation: CancellationFlag,
    now: DateTime<Utc>,
) -> Result<SweepReport, CliError> {
    let summary = AutoMatchRunner::new(store, store, &LoggingNotifier)
        .with_criteria(criteria)
        .with_config(config)
        .with_cancellation(cancellation)
        .run(now)?;
    let matches = store.matches().map_err(MatchError::from)?;
    Ok(SweepReport { summary, matches })
}

pub fn render<T: Serialize>(report: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(report).map_err(CliError::Render)
}
