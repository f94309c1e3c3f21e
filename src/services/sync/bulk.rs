use crate::ports::catalog::CatalogClient;

use super::types::PlaylistEntry;

/// Log progress every this many items.
const PROGRESS_EVERY_ITEMS: usize = 10;

fn log_progress(action: &str, done: usize, total: usize) {
    if done % PROGRESS_EVERY_ITEMS == 0 || done == total {
        log::info!("{}: {}/{}", action, done, total);
    }
}

/// Appends each video to the playlist, one request at a time.
///
/// Failures are logged and skipped. Returns the number of successful inserts.
pub async fn insert_all<C>(client: &C, playlist_id: &str, video_ids: &[String]) -> usize
where
    C: CatalogClient + ?Sized,
{
    if video_ids.is_empty() {
        log::info!("No new videos to add.");
        return 0;
    }

    log::info!(
        "Adding {} videos to playlist ID: {}",
        video_ids.len(),
        playlist_id
    );

    let mut count = 0;
    for (i, video_id) in video_ids.iter().enumerate() {
        match client.insert(playlist_id, video_id).await {
            Ok(()) => {
                count += 1;
                log::debug!("Added video {} to playlist {}", video_id, playlist_id);
            }
            Err(e) => log::error!("Error adding video {}: {}", video_id, e),
        }
        log_progress("Adding videos", i + 1, video_ids.len());
    }

    count
}

/// Deletes each membership record, one request at a time.
///
/// Failures are logged and skipped. Returns the number of successful deletes.
pub async fn remove_all<C>(client: &C, entries: &[PlaylistEntry]) -> usize
where
    C: CatalogClient + ?Sized,
{
    if entries.is_empty() {
        log::info!("No videos to remove.");
        return 0;
    }

    log::info!("Removing {} videos from source playlist", entries.len());

    let mut count = 0;
    for (i, entry) in entries.iter().enumerate() {
        match client.delete(&entry.entry_id).await {
            Ok(()) => {
                count += 1;
                log::debug!("Removed video {} ({})", entry.video_id, entry.title);
            }
            Err(e) => log::error!(
                "Error removing video {} ({}): {}",
                entry.video_id,
                entry.title,
                e
            ),
        }
        log_progress("Removing videos", i + 1, entries.len());
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::catalog::MockCatalogClient;
    use crate::youtube_rs::CatalogError;
    use mockall::Sequence;
    use mockall::predicate::eq;

    fn entry(id: &str) -> PlaylistEntry {
        PlaylistEntry {
            entry_id: format!("entry-{id}"),
            video_id: id.to_string(),
            title: format!("Video {id}"),
        }
    }

    #[tokio::test]
    async fn test_insert_all_empty_issues_no_request() {
        let mut client = MockCatalogClient::new();
        client.expect_insert().never();

        assert_eq!(insert_all(&client, "PLtarget", &[]).await, 0);
    }

    #[tokio::test]
    async fn test_remove_all_empty_issues_no_request() {
        let mut client = MockCatalogClient::new();
        client.expect_delete().never();

        assert_eq!(remove_all(&client, &[]).await, 0);
    }

    #[tokio::test]
    async fn test_insert_all_in_order_and_tolerates_failures() {
        let mut client = MockCatalogClient::new();
        let mut seq = Sequence::new();
        client
            .expect_insert()
            .with(eq("PLtarget"), eq("v1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        client
            .expect_insert()
            .with(eq("PLtarget"), eq("v2"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Err(CatalogError::Http {
                    status: 409,
                    message: "videoAlreadyInPlaylist".into(),
                })
            });
        client
            .expect_insert()
            .with(eq("PLtarget"), eq("v3"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let video_ids = vec!["v1".to_string(), "v2".to_string(), "v3".to_string()];
        assert_eq!(insert_all(&client, "PLtarget", &video_ids).await, 2);
    }

    #[tokio::test]
    async fn test_remove_all_counts_successful_deletes() {
        let mut client = MockCatalogClient::new();
        client
            .expect_delete()
            .times(3)
            .returning(|entry_id| match entry_id {
                "entry-b" => Err(CatalogError::Forbidden {
                    message: "forbidden".into(),
                }),
                _ => Ok(()),
            });

        let entries = vec![entry("a"), entry("b"), entry("c")];
        assert_eq!(remove_all(&client, &entries).await, 2);
    }

    #[tokio::test]
    async fn test_remove_all_uses_entry_id() {
        let mut client = MockCatalogClient::new();
        client
            .expect_delete()
            .with(eq("entry-x"))
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(remove_all(&client, &[entry("x")]).await, 1);
    }
}
