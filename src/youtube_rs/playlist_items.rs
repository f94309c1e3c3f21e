use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{CatalogError, Credential, send};

/* ---------- List ---------- */

/// Response type for `GET /playlistItems`.
///
/// Notes
/// - `items` is left optional so a response without it can be told apart from an empty page.
/// - Every field of an item may be missing for deleted or private videos.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Option<Vec<PlaylistItem>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    /// Playlist item ID, needed for deletion
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub snippet: Option<PlaylistItemSnippet>,
    #[serde(default)]
    pub content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Fetch one page of playlist items.
///
/// Endpoint
/// - `GET /playlistItems?part=snippet,contentDetails&playlistId={id}&maxResults={n}`
///
/// Pagination
/// - Pass the previous response's `nextPageToken` as `page_token`.
pub async fn list_playlist_items(
    client: &Client,
    base_url: &Url,
    credential: &Credential,
    playlist_id: &str,
    page_token: Option<&str>,
    max_results: u32,
) -> Result<PlaylistItemListResponse, CatalogError> {
    let url = base_url.join("playlistItems")?;
    let max_results = max_results.to_string();

    let mut request = client.get(url).query(&[
        ("part", "snippet,contentDetails"),
        ("playlistId", playlist_id),
        ("maxResults", max_results.as_str()),
    ]);
    if let Some(page_token) = page_token {
        request = request.query(&[("pageToken", page_token)]);
    }

    send(credential.authorize(request))
        .await?
        .json::<PlaylistItemListResponse>()
        .await
        .map_err(CatalogError::Decode)
}

/* ---------- Insert ---------- */

#[derive(Debug, Serialize)]
struct InsertPlaylistItem<'a> {
    snippet: InsertSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertSnippet<'a> {
    playlist_id: &'a str,
    resource_id: ResourceId<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId<'a> {
    kind: &'static str,
    video_id: &'a str,
}

/// Append a video to the end of a playlist.
///
/// Endpoint
/// - `POST /playlistItems?part=snippet`
pub async fn insert_playlist_item(
    client: &Client,
    base_url: &Url,
    credential: &Credential,
    playlist_id: &str,
    video_id: &str,
) -> Result<(), CatalogError> {
    let url = base_url.join("playlistItems")?;

    let body = InsertPlaylistItem {
        snippet: InsertSnippet {
            playlist_id,
            resource_id: ResourceId {
                kind: "youtube#video",
                video_id,
            },
        },
    };

    let request = client
        .post(url)
        .query(&[("part", "snippet")])
        .json(&body);

    send(credential.authorize(request)).await?;

    Ok(())
}

/* ---------- Delete ---------- */

/// Remove a membership record from its playlist.
///
/// Endpoint
/// - `DELETE /playlistItems?id={playlist item id}`
pub async fn delete_playlist_item(
    client: &Client,
    base_url: &Url,
    credential: &Credential,
    playlist_item_id: &str,
) -> Result<(), CatalogError> {
    let url = base_url.join("playlistItems")?;

    let request = client.delete(url).query(&[("id", playlist_item_id)]);

    send(credential.authorize(request)).await?;

    Ok(())
}
