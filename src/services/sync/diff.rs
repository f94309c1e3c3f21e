use std::collections::HashSet;

use super::types::PlaylistEntry;

/// Video IDs of `source` entries that are not in `target`, in source order.
///
/// Duplicates within `source` are passed through unchanged.
pub fn find_new(source: &[PlaylistEntry], target: &[PlaylistEntry]) -> Vec<String> {
    let target_video_ids: HashSet<&str> = target.iter().map(|e| e.video_id.as_str()).collect();

    source
        .iter()
        .filter(|entry| !target_video_ids.contains(entry.video_id.as_str()))
        .map(|entry| entry.video_id.clone())
        .collect()
}
