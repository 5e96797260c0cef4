//! Batch sweep that matches every open announcement against the live route
//! pool, persists strong matches and notifies deliverers of excellent ones.
//!
//! Announcements are independent: a failure while processing one is logged
//! and counted, and the sweep moves on. With `concurrency > 1` announcements
//! are evaluated on a dedicated rayon pool; writes go through the
//! [`MatchWriter`], which owns the per-pair uniqueness constraint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::criteria::MatchingCriteria;
use crate::domain::{Announcement, DateWindow};
use crate::error::MatchError;
use crate::finder::{FinderConfig, MatchFinder};
use crate::scoring::RouteMatchResult;
use crate::store::{CandidateReader, MatchWriter, Notifier, SaveOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Minimum score for a match to be persisted.
    pub save_threshold: u8,
    pub max_saved_per_announcement: usize,
    /// Minimum score for a newly persisted match to trigger a notification.
    pub notify_threshold: u8,
    /// Worker threads; 1 keeps the sweep on the calling thread.
    pub concurrency: usize,
    /// Announcements not started before this budget elapses are skipped.
    pub deadline: Option<Duration>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            save_threshold: 70,
            max_saved_per_announcement: 5,
            notify_threshold: 85,
            concurrency: 1,
            deadline: None,
        }
    }
}

impl SweepConfig {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Cooperative stop signal, checked before each announcement.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Aggregate counters of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Announcements whose candidate search succeeded.
    pub processed: usize,
    /// Newly persisted matches.
    pub matches: usize,
    /// Notifications the notifier accepted. A send that fails is logged and
    /// not counted, and its match stays un-notified.
    pub notifications: usize,
    /// Qualifying matches that were already persisted by an earlier sweep.
    pub already_matched: usize,
    /// Announcements abandoned after an error.
    pub failed: usize,
    /// Announcements not started because of cancellation or the deadline.
    pub skipped: usize,
    pub cancelled: bool,
}

#[derive(Debug, Default)]
struct AnnouncementTally {
    processed: bool,
    created: usize,
    already_matched: usize,
    notified: usize,
    failed: bool,
    skipped: bool,
}

impl SweepSummary {
    fn absorb(&mut self, tally: AnnouncementTally) {
        self.processed += usize::from(tally.processed);
        self.matches += tally.created;
        self.notifications += tally.notified;
        self.already_matched += tally.already_matched;
        self.failed += usize::from(tally.failed);
        self.skipped += usize::from(tally.skipped);
        self.cancelled |= tally.skipped;
    }
}

pub struct AutoMatchRunner<'a> {
    reader: &'a dyn CandidateReader,
    writer: &'a dyn MatchWriter,
    notifier: &'a dyn Notifier,
    criteria: MatchingCriteria,
    finder_config: FinderConfig,
    config: SweepConfig,
    cancellation: CancellationFlag,
}

impl<'a> AutoMatchRunner<'a> {
    pub fn new(
        reader: &'a dyn CandidateReader,
        writer: &'a dyn MatchWriter,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            reader,
            writer,
            notifier,
            criteria: MatchingCriteria::default(),
            finder_config: FinderConfig::default(),
            config: SweepConfig::default(),
            cancellation: CancellationFlag::default(),
        }
    }

    pub fn with_criteria(mut self, criteria: MatchingCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_finder_config(mut self, finder_config: FinderConfig) -> Self {
        self.finder_config = finder_config;
        self
    }

    pub fn with_config(mut self, config: SweepConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Sweep every open announcement dated at or after `now`.
    ///
    /// Only the initial listing can fail the sweep as a whole.
    pub fn run(&self, now: DateTime<Utc>) -> Result<SweepSummary, MatchError> {
        self.criteria.validate()?;
        let announcements = self
            .reader
            .list_open_announcements(&DateWindow::starting_at(now))
            .inspect_err(|err| {
                warn!(component = "auto_matcher", error = %err, "failed to list open announcements");
            })?;

        let started_at = Instant::now();
        let deadline = self.config.deadline.map(|budget| started_at + budget);
        info!(
            component = "auto_matcher",
            announcements = announcements.len(),
            concurrency = self.config.concurrency,
            "automatic matching started"
        );

        let tallies = self.process_all(&announcements, deadline);
        let mut summary = SweepSummary::default();
        for tally in tallies {
            summary.absorb(tally);
        }

        info!(
            component = "auto_matcher",
            processed = summary.processed,
            matches = summary.matches,
            notifications = summary.notifications,
            already_matched = summary.already_matched,
            failed = summary.failed,
            skipped = summary.skipped,
            duration_ms = started_at.elapsed().as_millis() as u64,
            "automatic matching completed"
        );
        Ok(summary)
    }

    fn process_all(
        &self,
        announcements: &[Announcement],
        deadline: Option<Instant>,
    ) -> Vec<AnnouncementTally> {
        let sequential = |announcements: &[Announcement]| {
            announcements
                .iter()
                .map(|announcement| self.process(announcement, deadline))
                .collect::<Vec<_>>()
        };

        if self.config.concurrency <= 1 {
            return sequential(announcements);
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.concurrency)
            .thread_name(|index| format!("auto-matcher-{index}"))
            .build()
        {
            Ok(pool) => pool.install(|| {
                announcements
                    .par_iter()
                    .map(|announcement| self.process(announcement, deadline))
                    .collect()
            }),
            Err(err) => {
                // Fallback: run on the calling thread if the pool cannot start.
                warn!(component = "auto_matcher", error = %err, "worker pool unavailable");
                sequential(announcements)
            }
        }
    }

    fn should_stop(&self, deadline: Option<Instant>) -> bool {
        self.cancellation.is_cancelled() || deadline.is_some_and(|at| Instant::now() >= at)
    }

    fn process(&self, announcement: &Announcement, deadline: Option<Instant>) -> AnnouncementTally {
        let mut tally = AnnouncementTally::default();
        if self.should_stop(deadline) {
            tally.skipped = true;
            return tally;
        }

        if let Err(err) = self.match_announcement(announcement, &mut tally) {
            tally.failed = true;
            warn!(
                component = "auto_matcher",
                announcement_id = %announcement.id,
                error = %err,
                "error processing announcement in automatic matching"
            );
        }
        tally
    }

    fn match_announcement(
        &self,
        announcement: &Announcement,
        tally: &mut AnnouncementTally,
    ) -> Result<(), MatchError> {
        let finder = MatchFinder::with_config(self.reader, self.finder_config);
        let results = finder.find_matches_for_announcement(&announcement.id, &self.criteria)?;
        tally.processed = true;

        let strong = results
            .iter()
            .filter(|result| result.score() >= self.config.save_threshold)
            .take(self.config.max_saved_per_announcement);

        for result in strong {
            let outcome = self.writer.save_match(
                &result.route.id,
                &announcement.id,
                result.score(),
            )?;
            match outcome {
                SaveOutcome::Created => {
                    tally.created += 1;
                    info!(
                        component = "auto_matcher",
                        route_id = %result.route.id,
                        announcement_id = %announcement.id,
                        score = result.score(),
                        "match created"
                    );
                    if result.score() >= self.config.notify_threshold && self.notify(result) {
                        tally.notified += 1;
                    }
                }
                SaveOutcome::AlreadyExists => tally.already_matched += 1,
            }
        }
        Ok(())
    }

    /// Fire-and-forget: failures are logged, never propagated.
    fn notify(&self, result: &RouteMatchResult) -> bool {
        let user_id = &result.route.deliverer.user_id;
        if let Err(err) = self
            .notifier
            .notify_deliverer_of_match(user_id, &result.announcement)
        {
            warn!(
                component = "auto_matcher",
                deliverer_user_id = %user_id,
                announcement_id = %result.announcement.id,
                error = %err,
                "error notifying deliverer of match"
            );
            return false;
        }

        if let Err(err) = self
            .writer
            .mark_notified(&result.route.id, &result.announcement.id)
        {
            warn!(
                component = "auto_matcher",
                route_id = %result.route.id,
                announcement_id = %result.announcement.id,
                error = %err,
                "failed to flag match as notified"
            );
        }
        true
    }
}
