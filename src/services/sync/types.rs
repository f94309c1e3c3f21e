use std::fmt;

use crate::ports::catalog::CatalogItem;

/// A membership record of a playlist, as fetched at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Playlist item ID, needed to delete the membership
    pub entry_id: String,
    /// ID of the underlying video, used for comparison between playlists
    pub video_id: String,
    pub title: String,
}

/// The field a malformed catalog item was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MissingField {
    #[error("id")]
    Id,
    #[error("videoId")]
    VideoId,
    #[error("title")]
    Title,
}

impl TryFrom<CatalogItem> for PlaylistEntry {
    type Error = MissingField;

    fn try_from(item: CatalogItem) -> Result<Self, Self::Error> {
        Ok(PlaylistEntry {
            entry_id: item.id.ok_or(MissingField::Id)?,
            video_id: item.video_id.ok_or(MissingField::VideoId)?,
            title: item.title.ok_or(MissingField::Title)?,
        })
    }
}

/// What a single run is going to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Video IDs to append to the target playlist, in source order
    pub to_add: Vec<String>,
    /// Every entry of the source playlist
    pub to_remove: Vec<PlaylistEntry>,
}

/// Outcome of a live run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationCounts {
    pub videos_added: usize,
    pub videos_removed: usize,
}

/// Summary of a run, printed once it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub source_count: usize,
    pub target_count: usize,
    pub planned_additions: usize,
    pub planned_removals: usize,
    /// `None` for a dry run
    pub mutations: Option<MutationCounts>,
}

impl SyncReport {
    pub fn is_dry_run(&self) -> bool {
        self.mutations.is_none()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mutations {
            None => {
                writeln!(f, "DRY RUN - no changes were made to playlists")?;
                writeln!(
                    f,
                    "- Videos that would be added to target playlist: {}",
                    self.planned_additions
                )?;
                writeln!(
                    f,
                    "- Videos that would be removed from source playlist: {}",
                    self.planned_removals
                )?;
                write!(
                    f,
                    "{} would be added, {} would be removed",
                    self.planned_additions, self.planned_removals
                )
            }
            Some(counts) => {
                writeln!(f, "Operation completed")?;
                writeln!(
                    f,
                    "- Videos added to target playlist: {}/{}",
                    counts.videos_added, self.planned_additions
                )?;
                writeln!(
                    f,
                    "- Videos removed from source playlist: {}/{}",
                    counts.videos_removed, self.planned_removals
                )?;
                write!(
                    f,
                    "videos_added={} videos_removed={}",
                    counts.videos_added, counts.videos_removed
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_complete_item() {
        let item = CatalogItem {
            id: Some("e1".into()),
            video_id: Some("v1".into()),
            title: Some("One".into()),
        };
        assert_eq!(
            PlaylistEntry::try_from(item).unwrap(),
            PlaylistEntry {
                entry_id: "e1".into(),
                video_id: "v1".into(),
                title: "One".into(),
            }
        );
    }

    #[test]
    fn test_entry_from_item_missing_video_id() {
        let item = CatalogItem {
            id: Some("e1".into()),
            video_id: None,
            title: Some("Deleted video".into()),
        };
        assert_eq!(PlaylistEntry::try_from(item), Err(MissingField::VideoId));
    }

    #[test]
    fn test_dry_run_report_display() {
        let report = SyncReport {
            source_count: 3,
            target_count: 1,
            planned_additions: 2,
            planned_removals: 3,
            mutations: None,
        };
        assert!(report.is_dry_run());
        assert!(
            report
                .to_string()
                .ends_with("2 would be added, 3 would be removed")
        );
    }

    #[test]
    fn test_live_report_display() {
        let report = SyncReport {
            source_count: 2,
            target_count: 0,
            planned_additions: 2,
            planned_removals: 2,
            mutations: Some(MutationCounts {
                videos_added: 1,
                videos_removed: 2,
            }),
        };
        let text = report.to_string();
        assert!(text.contains("Videos added to target playlist: 1/2"));
        assert!(text.ends_with("videos_added=1 videos_removed=2"));
    }
}
