pub mod bulk;
pub mod diff;
pub mod pagination;
pub mod types;

use std::fmt;

use color_eyre::eyre::{Result, WrapErr};

use crate::ports::catalog::CatalogClient;
use crate::services::sync::bulk::{insert_all, remove_all};
use crate::services::sync::diff::find_new;
use crate::services::sync::pagination::list_all_entries;
use crate::services::sync::types::{MutationCounts, SyncPlan, SyncReport};

/// The two playlists a run works on.
#[derive(Debug, Clone)]
pub struct SyncTarget {
    pub source_playlist_id: String,
    pub target_playlist_id: String,
}

/// Progress of a single run. `Init` and `Authenticated` happen before the
/// service exists; a failed setup never gets this far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Authenticated,
    SourceRead,
    TargetRead,
    Diffed,
    DryRunReport,
    Mutated,
    Done,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStage::Authenticated => "authenticated",
            SyncStage::SourceRead => "source read",
            SyncStage::TargetRead => "target read",
            SyncStage::Diffed => "diffed",
            SyncStage::DryRunReport => "dry run report",
            SyncStage::Mutated => "mutated",
            SyncStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Moves everything in the source playlist ("Watch later") into the target
/// playlist and then empties the source.
pub struct WatchLaterSyncService<C: CatalogClient> {
    client: C,
    target: SyncTarget,
}

impl<C: CatalogClient> WatchLaterSyncService<C> {
    pub fn new(client: C, target: SyncTarget) -> Self {
        Self { client, target }
    }

    fn enter(&self, stage: SyncStage) {
        log::debug!("Sync stage: {}", stage);
    }

    /// Reads both playlists and works out what a run would change, along with
    /// the number of entries read from the target.
    ///
    /// Every source entry is scheduled for removal, including those already
    /// present in the target.
    async fn read_and_diff(&self) -> Result<(SyncPlan, usize)> {
        let source_id = &self.target.source_playlist_id;
        let target_id = &self.target.target_playlist_id;

        log::info!("Retrieving videos from source playlist...");
        let source = list_all_entries(&self.client, source_id)
            .await
            .wrap_err_with(|| format!("Authentication failed while reading playlist {source_id}"))?;
        log::info!("Found {} videos in source playlist", source.len());
        self.enter(SyncStage::SourceRead);

        log::info!("Retrieving videos from target playlist...");
        let target = list_all_entries(&self.client, target_id)
            .await
            .wrap_err_with(|| format!("Authentication failed while reading playlist {target_id}"))?;
        log::info!("Found {} videos in target playlist", target.len());
        self.enter(SyncStage::TargetRead);

        let to_add = find_new(&source, &target);
        log::info!("Found {} new videos to add to target playlist", to_add.len());
        self.enter(SyncStage::Diffed);

        let plan = SyncPlan {
            to_add,
            to_remove: source,
        };
        Ok((plan, target.len()))
    }

    /// Runs the sync. With `dry_run` only the plan is reported and nothing is
    /// written.
    ///
    /// # Errors
    /// Returns an error only when the catalog rejects the credential while
    /// reading. Individual failed inserts or deletes are logged and reflected
    /// in the returned counts.
    pub async fn run(&self, dry_run: bool) -> Result<SyncReport> {
        self.enter(SyncStage::Authenticated);
        log::info!(
            "Source playlist ID: {}, target playlist ID: {}",
            self.target.source_playlist_id,
            self.target.target_playlist_id
        );

        let (plan, target_count) = self.read_and_diff().await?;
        let mut report = SyncReport {
            source_count: plan.to_remove.len(),
            target_count,
            planned_additions: plan.to_add.len(),
            planned_removals: plan.to_remove.len(),
            mutations: None,
        };

        if dry_run {
            self.enter(SyncStage::DryRunReport);
            log::info!("DRY RUN MODE - No changes will be made to playlists");
            self.enter(SyncStage::Done);
            return Ok(report);
        }

        let videos_added = insert_all(
            &self.client,
            &self.target.target_playlist_id,
            &plan.to_add,
        )
        .await;

        // The source is emptied even when some inserts failed
        let videos_removed = remove_all(&self.client, &plan.to_remove).await;
        self.enter(SyncStage::Mutated);

        report.mutations = Some(MutationCounts {
            videos_added,
            videos_removed,
        });

        log::info!(
            "Sync complete: {} added, {} removed",
            videos_added,
            videos_removed
        );
        self.enter(SyncStage::Done);

        Ok(report)
    }
}
