use crate::ports::catalog::CatalogClient;
use crate::youtube_rs::CatalogError;

use super::types::PlaylistEntry;

/// Page size requested from the catalog (the API maximum).
pub const PAGE_SIZE: u32 = 50;

/// Log progress every this many pages.
const PROGRESS_EVERY_PAGES: usize = 5;

/// Fetch every entry of a playlist, following continuation tokens until the
/// catalog stops returning one.
///
/// Read failures end the listing early and the entries collected so far are
/// returned, so callers must expect partial results. Malformed items are
/// skipped. Only an authentication failure is returned as an error.
pub async fn list_all_entries<C>(
    client: &C,
    playlist_id: &str,
) -> Result<Vec<PlaylistEntry>, CatalogError>
where
    C: CatalogClient + ?Sized,
{
    let mut entries: Vec<PlaylistEntry> = Vec::new();
    let mut page_token: Option<String> = None;
    let mut page_count = 0;

    log::info!("Fetching videos from playlist ID: {}", playlist_id);

    loop {
        page_count += 1;

        let page = match client.list_page(playlist_id, page_token.take(), PAGE_SIZE).await {
            Ok(page) => page,
            Err(e @ CatalogError::Unauthorized { .. }) => return Err(e),
            Err(CatalogError::NotFound { .. }) => {
                log::error!("Playlist not found (ID: {})", playlist_id);
                break;
            }
            Err(CatalogError::Forbidden { message }) => {
                log::error!(
                    "Access forbidden to playlist (ID: {}): {}",
                    playlist_id,
                    message
                );
                log::error!(
                    "Make sure you have appropriate permissions and the playlist exists."
                );
                break;
            }
            Err(e) => {
                log::error!(
                    "Error retrieving items of playlist (ID: {}): {}",
                    playlist_id,
                    e
                );
                break;
            }
        };

        let Some(items) = page.items else {
            log::warn!("No items found in playlist response (ID: {})", playlist_id);
            break;
        };

        for item in items {
            let item_id = item.id.clone();
            match PlaylistEntry::try_from(item) {
                Ok(entry) => entries.push(entry),
                Err(missing) => log::warn!(
                    "Skipping malformed playlist item {}: missing {}",
                    item_id.as_deref().unwrap_or("<no id>"),
                    missing
                ),
            }
        }

        if page_count % PROGRESS_EVERY_PAGES == 0 {
            log::info!("Retrieved {} videos so far...", entries.len());
        }

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    log::debug!(
        "Read {} entries from playlist {} in {} page(s)",
        entries.len(),
        playlist_id,
        page_count
    );

    Ok(entries)
}
