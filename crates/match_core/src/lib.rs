//! Matching engine for a delivery marketplace.
//!
//! - [`scoring`]: pure route/announcement compatibility score (0-100) from
//!   five weighted factors, plus detour and delay estimates
//! - [`finder`]: candidate search around one announcement or one route
//! - [`sweep`]: batch matching of all open announcements, persisting strong
//!   matches and notifying deliverers
//! - [`store`]: data-access seams the finder and the sweep depend on
//!
//! ```no_run
//! use match_core::{AutoMatchRunner, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! let summary = AutoMatchRunner::new(&store, &store, &store)
//!     .run(chrono::Utc::now())
//!     .expect("sweep");
//! println!("{} matches", summary.matches);
//! ```

pub mod criteria;
pub mod domain;
pub mod error;
pub mod finder;
pub mod geo;
pub mod memory_store;
pub mod scoring;
pub mod store;
pub mod sweep;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use criteria::MatchingCriteria;
pub use domain::{Announcement, AnnouncementId, DateWindow, Route, RouteId};
pub use error::{DataAccessError, MatchError, NotFound};
pub use finder::{FinderConfig, MatchFinder};
pub use memory_store::InMemoryStore;
pub use scoring::{score_match, MatchFactors, MatchScore, RouteMatchResult};
pub use store::{CandidateReader, MatchWriter, Notifier, SaveOutcome};
pub use sweep::{AutoMatchRunner, CancellationFlag, SweepConfig, SweepSummary};
