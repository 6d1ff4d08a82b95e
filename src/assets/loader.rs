//! Ordered asynchronous asset loading
//!
//! The scene needs four remote assets with a hard ordering dependency:
//! grass placement requires the terrain mesh AND the blade geometry, and
//! the blade fetch must not be issued until the terrain result has been
//! processed and captured by the scene. The loader makes that ordering
//! explicit: textures and terrain start immediately, the blade stage only
//! starts when `request_blades` is called.
//!
//! Fetch and decode run on a small tokio runtime; results cross back to
//! the render thread over an unbounded channel drained once per frame.

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::assets::fetch::{self, AssetUrls};
use crate::assets::mesh::{self, MeshData};
use crate::assets::texture::TextureData;
use crate::core::error::Error;

/// Which loading stage an event belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStage {
    Textures,
    Terrain,
    Blades,
}

impl LoadStage {
    pub fn name(self) -> &'static str {
        match self {
            LoadStage::Textures => "textures",
            LoadStage::Terrain => "terrain",
            LoadStage::Blades => "blades",
        }
    }
}

/// Result of a completed loading stage
#[derive(Debug)]
pub enum LoadEvent {
    /// Both scene textures decoded
    Textures {
        noise: TextureData,
        alpha: TextureData,
    },
    /// Terrain mesh decoded (unprocessed: unscaled, original materials)
    Terrain(MeshData),
    /// Grass blade LOD geometry decoded and selected
    Blades(MeshData),
    /// A stage failed; the dependent chain will not run
    Failed { stage: LoadStage, message: String },
}

/// Asynchronous asset loader with an explicit stage ordering.
pub struct AssetLoader {
    runtime: Runtime,
    client: reqwest::Client,
    urls: AssetUrls,
    event_tx: mpsc::UnboundedSender<LoadEvent>,
    event_rx: mpsc::UnboundedReceiver<LoadEvent>,
    started: bool,
    blades_requested: bool,
}

impl AssetLoader {
    /// Create a loader for the given asset URLs
    pub fn new(urls: AssetUrls) -> Result<Self, Error> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|e| Error::Asset(format!("failed to create loader runtime: {e}")))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Ok(Self {
            runtime,
            client: reqwest::Client::new(),
            urls,
            event_tx,
            event_rx,
            started: false,
            blades_requested: false,
        })
    }

    /// Start the texture and terrain stages. Idempotent.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let client = self.client.clone();
        let tx = self.event_tx.clone();
        let noise_url = self.urls.noise_texture.clone();
        let alpha_url = self.urls.alpha_texture.clone();
        self.runtime.spawn(async move {
            let result = async {
                let (noise, alpha) = tokio::try_join!(
                    fetch::fetch_bytes(&client, &noise_url),
                    fetch::fetch_bytes(&client, &alpha_url),
                )?;
                let noise = TextureData::decode(&noise, "noise texture")?;
                let alpha = TextureData::decode(&alpha, "alpha texture")?;
                Ok::<_, Error>(LoadEvent::Textures { noise, alpha })
            }
            .await;
            send_result(&tx, LoadStage::Textures, result);
        });

        let client = self.client.clone();
        let tx = self.event_tx.clone();
        let terrain_url = self.urls.terrain_model.clone();
        self.runtime.spawn(async move {
            let result = async {
                let bytes = fetch::fetch_bytes(&client, &terrain_url).await?;
                let mesh = mesh::decode_merged(&bytes, "terrain model")?;
                Ok::<_, Error>(LoadEvent::Terrain(mesh))
            }
            .await;
            send_result(&tx, LoadStage::Terrain, result);
        });
    }

    /// Start the grass blade stage.
    ///
    /// Must only be called once the terrain mesh has been captured; the
    /// scene manager enforces that ordering. Idempotent.
    pub fn request_blades(&mut self, lod_marker: &str) {
        if self.blades_requested {
            return;
        }
        self.blades_requested = true;

        let client = self.client.clone();
        let tx = self.event_tx.clone();
        let url = self.urls.grass_model.clone();
        let marker = lod_marker.to_string();
        self.runtime.spawn(async move {
            let result = async {
                let bytes = fetch::fetch_bytes(&client, &url).await?;
                let mesh = mesh::decode_named(&bytes, &marker, "grass model")?;
                Ok::<_, Error>(LoadEvent::Blades(mesh))
            }
            .await;
            send_result(&tx, LoadStage::Blades, result);
        });
    }

    /// Whether the blade stage has been issued
    pub fn blades_requested(&self) -> bool {
        self.blades_requested
    }

    /// Drain all completed load events. Non-blocking; call once per frame.
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

fn send_result(
    tx: &mpsc::UnboundedSender<LoadEvent>,
    stage: LoadStage,
    result: Result<LoadEvent, Error>,
) {
    let event = match result {
        Ok(event) => event,
        Err(e) => {
            log::error!("Asset stage '{}' failed: {e}", stage.name());
            LoadEvent::Failed {
                stage,
                message: e.to_string(),
            }
        }
    };
    // Receiver dropped means the scene is shutting down; nothing to do.
    let _ = tx.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blades_not_requested_initially() {
        let mut loader = AssetLoader::new(AssetUrls::default()).unwrap();
        assert!(!loader.blades_requested());
        // Nothing completed yet either
        assert!(loader.poll().is_empty());
    }

    #[test]
    fn test_request_blades_is_recorded() {
        let mut loader = AssetLoader::new(AssetUrls::default()).unwrap();
        loader.request_blades("LOD00");
        assert!(loader.blades_requested());
        // Second call is a no-op
        loader.request_blades("LOD00");
        assert!(loader.blades_requested());
    }

    #[test]
    fn test_failed_stage_reported_through_channel() {
        // Unresolvable URL: the stage must surface as Failed, not panic.
        let urls = AssetUrls {
            terrain_model: "http://127.0.0.1:1/missing.glb".into(),
            grass_model: "http://127.0.0.1:1/missing.glb".into(),
            noise_texture: "http://127.0.0.1:1/missing.webp".into(),
            alpha_texture: "http://127.0.0.1:1/missing.jpeg".into(),
        };
        let mut loader = AssetLoader::new(urls).unwrap();
        loader.start();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        let mut failures = 0;
        while failures < 2 && std::time::Instant::now() < deadline {
            for event in loader.poll() {
                match event {
                    LoadEvent::Failed { .. } => failures += 1,
                    other => panic!("unexpected event: {other:?}"),
                }
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(failures, 2, "textures and terrain stages should both fail");
    }
}
