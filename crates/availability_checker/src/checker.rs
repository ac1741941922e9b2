use std::sync::Arc;

use disney_api::{ApiError, AvailabilitySource};
use log::{debug, info, warn};
use notification_services::{EmailService, NotificationError};
use park_availability::{
    DiffEntry, SnapshotStore, StoreError, build_snapshot, diff_snapshots, format_diff,
    format_summary,
};

use crate::config::DateRange;

/// Errors that end a check
#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    /// Calendar request failed
    #[error("Failed to fetch availability: {0}")]
    Fetch(#[from] ApiError),

    /// Snapshot could not be read or written
    #[error("Snapshot store error: {0}")]
    Store(#[from] StoreError),

    /// Change email could not be sent
    #[error("Failed to send notification: {0}")]
    Notify(#[from] NotificationError),
}

/// What a completed check did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Response was not a list; nothing was compared or saved
    Skipped,
    /// No earlier snapshot existed; the fetched one was saved
    FirstRun {
        /// Current availability listing
        summary: String,
    },
    /// Nothing changed since the last snapshot
    Unchanged {
        /// Current availability listing
        summary: String,
    },
    /// Changes were emailed
    Notified {
        /// Dates that changed
        changes: Vec<DiffEntry>,
        /// Current availability listing
        summary: String,
    },
}

impl RunOutcome {
    /// Availability listing to print, if the check got that far
    pub fn summary(&self) -> Option<&str> {
        match self {
            RunOutcome::Skipped => None,
            RunOutcome::FirstRun { summary }
            | RunOutcome::Unchanged { summary }
            | RunOutcome::Notified { summary, .. } => Some(summary),
        }
    }
}

/// Runs one availability check against the last saved snapshot
pub struct AvailabilityChecker<S> {
    source: S,
    email_service: Arc<dyn EmailService>,
    store: SnapshotStore,
    date_range: DateRange,
}

impl<S: AvailabilitySource> AvailabilityChecker<S> {
    /// Create a checker from its collaborators
    pub fn new(
        source: S,
        email_service: Arc<dyn EmailService>,
        store: SnapshotStore,
        date_range: DateRange,
    ) -> Self {
        Self {
            source,
            email_service,
            store,
            date_range,
        }
    }

    /// Fetch, compare, notify and save.
    ///
    /// The new snapshot is only written after any change email has been accepted,
    /// so a failed notification is retried against the same snapshot next run.
    pub async fn run(&self) -> Result<RunOutcome, CheckError> {
        let start = self.date_range.start_param();
        let end = self.date_range.end_param();

        info!("🔍 Checking availability from {} to {}", start, end);

        let Some(entries) = self.source.fetch(&start, &end).await? else {
            warn!("⏭️ Unexpected availability response, skipping this run");
            return Ok(RunOutcome::Skipped);
        };

        let summary = format_summary(&entries);
        let new_snapshot = build_snapshot(entries);
        debug!("Fetched availability for {} dates", new_snapshot.len());

        let changes = match self.store.load().await? {
            Some(old_snapshot) => Some(diff_snapshots(&old_snapshot, &new_snapshot)),
            None => None,
        };

        if let Some(changes) = changes.as_ref().filter(|c| !c.is_empty()) {
            info!("📬 Availability changed on {} date(s)", changes.len());
            for change in changes {
                debug!("{}: {}", change.date, change.markers().join(" "));
            }

            let body = format_diff(changes);
            self.email_service.notify(&body).await?;
        }

        self.store.ensure_dir().await?;
        self.store.save(&new_snapshot).await?;

        Ok(match changes {
            None => {
                info!("First run, saved initial snapshot");
                RunOutcome::FirstRun { summary }
            }
            Some(changes) if changes.is_empty() => {
                info!("No availability changes");
                RunOutcome::Unchanged { summary }
            }
            Some(changes) => RunOutcome::Notified { changes, summary },
        })
    }
}
