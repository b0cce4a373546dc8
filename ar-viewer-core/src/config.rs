//! Scene descriptor loading: URL layout, bounded fetch, validation.

use std::time::Duration;

use crate::models::error::ViewerError;
use crate::models::scene::SceneDescriptor;
use crate::traits::fetcher::SceneFetcher;

/// Bound on the descriptor fetch; past this the fetch is cancelled and
/// reported as a timeout, distinct from network/HTTP failures.
pub const SCENE_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// `{base}/scenes/{scene_id}/scene.json`
pub fn scene_descriptor_url(base: &str, scene_id: &str) -> String {
    format!("{}/scenes/{}/scene.json", base.trim_end_matches('/'), scene_id)
}

/// Resolve an asset referenced by the descriptor. Absolute URLs pass
/// through; relative file names resolve next to the descriptor.
pub fn scene_asset_url(base: &str, scene_id: &str, file: &str) -> String {
    if file.starts_with("http://") || file.starts_with("https://") {
        file.to_string()
    } else {
        format!("{}/scenes/{}/{}", base.trim_end_matches('/'), scene_id, file)
    }
}

/// Fetch, parse and validate the scene descriptor.
///
/// All failures here are fatal to initialization: they halt startup and
/// are surfaced to the user with no automatic retry.
pub fn load_scene_descriptor(
    fetcher: &mut dyn SceneFetcher,
    base: &str,
    scene_id: &str,
) -> Result<SceneDescriptor, ViewerError> {
    let url = scene_descriptor_url(base, scene_id);
    let bytes = fetcher.fetch(&url, SCENE_FETCH_TIMEOUT)?;

    let descriptor: SceneDescriptor = serde_json::from_slice(&bytes)
        .map_err(|e| ViewerError::Config(format!("scene descriptor malformed: {}", e)))?;

    descriptor.validate()?;
    Ok(descriptor)
}
