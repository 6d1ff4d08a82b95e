//! Asset URLs and HTTP fetching

use crate::core::error::Error;

const ASSET_BASE: &str = "https://fluffy-grass-8sfsmgxc0-raghavsh98s-projects.vercel.app";

/// Absolute URLs for the four remote assets the scene needs.
#[derive(Clone, Debug)]
pub struct AssetUrls {
    /// Terrain model (glTF binary)
    pub terrain_model: String,
    /// Grass blade LOD model (glTF binary)
    pub grass_model: String,
    /// Tiling noise texture
    pub noise_texture: String,
    /// Grass blade alpha mask
    pub alpha_texture: String,
}

impl Default for AssetUrls {
    fn default() -> Self {
        Self {
            terrain_model: format!("{ASSET_BASE}/island.glb"),
            grass_model: format!("{ASSET_BASE}/grassLODs.glb"),
            noise_texture: format!("{ASSET_BASE}/perlinnoise.webp"),
            alpha_texture: format!("{ASSET_BASE}/grass.jpeg"),
        }
    }
}

/// Fetch a remote asset as raw bytes. Non-2xx responses are errors.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Http(format!("{url}: {e}")))?
        .error_for_status()
        .map_err(|e| Error::Http(format!("{url}: {e}")))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("{url}: {e}")))?;

    log::debug!("Fetched {} ({} bytes)", url, bytes.len());
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls_are_absolute() {
        let urls = AssetUrls::default();
        for url in [
            &urls.terrain_model,
            &urls.grass_model,
            &urls.noise_texture,
            &urls.alpha_texture,
        ] {
            assert!(url.starts_with("https://"), "not absolute: {url}");
        }
    }
}
