//! Scene manager: owns the renderable world and its lifecycle.
//!
//! Lifecycle is an explicit state machine instead of nested load
//! callbacks: `Loading` until the terrain mesh is captured, `Processing`
//! while the blade geometry is pending, `Ready` once grass instances are
//! placed, and `Stopped` after `stop()`. The hard ordering dependency —
//! grass placement needs the terrain surface AND the blade geometry, and
//! the blade fetch may only be issued after the terrain result has been
//! captured — lives entirely in `handle_event`.

use glam::Vec3;

use crate::assets::loader::{AssetLoader, LoadEvent};
use crate::assets::mesh::MeshData;
use crate::assets::texture::TextureData;
use crate::core::camera::Camera;
use crate::core::camera_controller::OrbitCameraController;
use crate::core::error::Error;
use crate::core::input::InputState;
use crate::grass::{place_blades, GrassInstance, GrassParams, GrassSystem, SurfaceSampler};
use crate::scene::config::SceneConfig;
use crate::scene::lights::SceneLights;
use crate::scene::sky::SkyDome;

/// Scene lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Waiting for the terrain mesh
    Loading,
    /// Terrain captured; blade geometry and placement pending
    Processing,
    /// Grass placed; steady-state rendering
    Ready,
    /// Halted; no further updates
    Stopped,
}

/// Scene-side changes the renderer reacts to by (re)building GPU resources
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneUpdate {
    /// Noise and alpha textures decoded
    TexturesReady,
    /// Terrain mesh captured and processed
    TerrainReady,
    /// Grass instance table built
    GrassReady,
}

/// Owns camera, lights, sky, loaded assets, and grass placement.
pub struct SceneManager {
    config: SceneConfig,
    pub camera: Camera,
    pub controls: OrbitCameraController,
    pub lights: SceneLights,
    pub sky: SkyDome,
    grass: GrassSystem,
    loader: AssetLoader,
    terrain: Option<MeshData>,
    blade_geometry: Option<MeshData>,
    noise_texture: Option<TextureData>,
    alpha_texture: Option<TextureData>,
    instances: Option<Vec<GrassInstance>>,
    state: LifecycleState,
    time: f32,
}

impl SceneManager {
    /// Construct the scene: camera at its fixed initial position looking
    /// at the orbit target, lights, sky dome, and an idle asset loader.
    pub fn new(config: SceneConfig, aspect: f32) -> Result<Self, Error> {
        let mut camera = Camera::new(config.initial_camera_pos, config.fov_y_degrees, aspect);
        camera.look_at(config.orbit_target);

        let mut controls = OrbitCameraController::new(config.orbit_target);
        controls.enabled = false;
        controls.auto_rotate = false;

        let grass = GrassSystem::new(config.grass.clone());
        let loader = AssetLoader::new(config.urls.clone())?;

        Ok(Self {
            config,
            camera,
            controls,
            lights: SceneLights::default(),
            sky: SkyDome::new(),
            grass,
            loader,
            terrain: None,
            blade_geometry: None,
            noise_texture: None,
            alpha_texture: None,
            instances: None,
            state: LifecycleState::Loading,
            time: 0.0,
        })
    }

    /// Begin fetching remote assets (textures + terrain; blades follow
    /// once the terrain is captured).
    pub fn start_loading(&mut self) {
        log::info!("Scene loading started");
        self.loader.start();
    }

    /// Per-frame update: advance the scene clock, feed it to the grass
    /// shader state, run the orbit controls, and absorb finished loads.
    pub fn update(&mut self, input: &InputState, dt: f32) -> Vec<SceneUpdate> {
        if self.state == LifecycleState::Stopped {
            return Vec::new();
        }

        self.time += dt;
        self.grass.update(self.time);
        self.controls.update(&mut self.camera, input, dt);

        let mut updates = Vec::new();
        for event in self.loader.poll() {
            if let Some(update) = self.handle_event(event) {
                updates.push(update);
            }
        }
        updates
    }

    /// Absorb one completed load stage.
    fn handle_event(&mut self, event: LoadEvent) -> Option<SceneUpdate> {
        match event {
            LoadEvent::Textures { noise, alpha } => {
                self.noise_texture = Some(noise);
                self.alpha_texture = Some(alpha);
                Some(SceneUpdate::TexturesReady)
            }
            LoadEvent::Terrain(mut mesh) => {
                // The terrain's own materials are discarded: every surface
                // renders with the flat, shadow-receiving terrain material.
                mesh.scale(self.config.terrain_scale);
                self.terrain = Some(mesh);
                if self.state == LifecycleState::Loading {
                    self.state = LifecycleState::Processing;
                }
                log::info!("Terrain captured; requesting grass blade geometry");
                self.loader.request_blades(&self.config.grass.lod_marker);
                Some(SceneUpdate::TerrainReady)
            }
            LoadEvent::Blades(mut mesh) => {
                mesh.scale(self.config.grass.blade_scale);
                self.blade_geometry = Some(mesh);
                self.try_place_grass()
            }
            LoadEvent::Failed { stage, message } => {
                log::error!(
                    "Stage '{}' failed ({message}); scene stays at {:?}",
                    stage.name(),
                    self.state
                );
                None
            }
        }
    }

    /// Build the grass instance table once both gating assets are present.
    fn try_place_grass(&mut self) -> Option<SceneUpdate> {
        if self.instances.is_some() {
            return None;
        }
        let terrain = self.terrain.as_ref()?;
        self.blade_geometry.as_ref()?;

        let sampler = match SurfaceSampler::new(terrain) {
            Ok(sampler) => sampler,
            Err(e) => {
                log::error!("Grass placement skipped: {e}");
                return None;
            }
        };
        let count = self.config.grass.count;
        let instances = place_blades(&sampler, count, self.config.grass.seed);
        log::info!("Placed {count} grass instances");
        self.instances = Some(instances);
        self.state = LifecycleState::Ready;
        Some(SceneUpdate::GrassReady)
    }

    /// Update camera aspect for a new surface size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_aspect(width as f32, height as f32);
    }

    /// Halt the scene; `update` becomes a no-op.
    pub fn stop(&mut self) {
        if self.state != LifecycleState::Stopped {
            log::info!("Scene stopped after {:.1}s", self.time);
            self.state = LifecycleState::Stopped;
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == LifecycleState::Stopped
    }

    /// Cumulative scene time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn grass(&self) -> &GrassSystem {
        &self.grass
    }

    /// Current grass shader uniform contents
    pub fn grass_params(&self) -> GrassParams {
        self.grass.build_params()
    }

    pub fn terrain(&self) -> Option<&MeshData> {
        self.terrain.as_ref()
    }

    pub fn blade_geometry(&self) -> Option<&MeshData> {
        self.blade_geometry.as_ref()
    }

    pub fn instances(&self) -> Option<&[GrassInstance]> {
        self.instances.as_deref()
    }

    pub fn noise_texture(&self) -> Option<&TextureData> {
        self.noise_texture.as_ref()
    }

    pub fn alpha_texture(&self) -> Option<&TextureData> {
        self.alpha_texture.as_ref()
    }

    /// Sun position in world space (for shading and the shadow camera)
    pub fn sun_position(&self) -> Vec3 {
        self.lights.sun.position
    }

    #[cfg(test)]
    fn inject(&mut self, event: LoadEvent) -> Option<SceneUpdate> {
        self.handle_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::loader::LoadStage;

    fn test_terrain() -> MeshData {
        MeshData {
            name: "terrain".into(),
            positions: vec![
                [0.0, 0.0, 0.0],
                [10.0, 0.0, 0.0],
                [10.0, 0.0, 10.0],
                [0.0, 0.0, 10.0],
            ],
            normals: vec![[0.0, 1.0, 0.0]; 4],
            uvs: vec![],
            colors: vec![],
            indices: vec![0, 2, 1, 0, 3, 2],
        }
    }

    fn test_blade() -> MeshData {
        MeshData {
            name: "Grass_LOD00".into(),
            positions: vec![[0.0, 0.0, 0.0], [0.1, 0.0, 0.0], [0.05, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            uvs: vec![[0.0, 1.0], [1.0, 1.0], [0.5, 0.0]],
            colors: vec![],
            indices: vec![0, 1, 2],
        }
    }

    fn manager() -> SceneManager {
        let mut config = SceneConfig::default();
        config.grass.count = 100;
        SceneManager::new(config, 16.0 / 9.0).unwrap()
    }

    #[test]
    fn test_resize_sets_exact_aspect() {
        let mut scene = manager();
        scene.resize(1024, 768);
        assert_eq!(scene.camera.aspect, 1024.0 / 768.0);

        // Degenerate sizes are ignored, not propagated
        scene.resize(0, 768);
        assert_eq!(scene.camera.aspect, 1024.0 / 768.0);
        scene.resize(800, 0);
        assert_eq!(scene.camera.aspect, 1024.0 / 768.0);
    }

    #[test]
    fn test_time_accumulates_deltas() {
        let mut scene = manager();
        let input = InputState::new();
        let mut expected = 0.0f32;
        for dt in [0.016, 0.033, 0.0, 0.008] {
            let before = scene.time();
            scene.update(&input, dt);
            expected += dt;
            assert!(scene.time() >= before);
        }
        assert!((scene.time() - expected).abs() < 1e-6);
        assert_eq!(scene.grass().time(), scene.time());
    }

    #[test]
    fn test_blades_requested_only_after_terrain_capture() {
        let mut scene = manager();
        assert!(!scene.loader.blades_requested());
        assert_eq!(scene.state(), LifecycleState::Loading);

        scene.inject(LoadEvent::Terrain(test_terrain()));
        assert!(scene.loader.blades_requested());
        assert_eq!(scene.state(), LifecycleState::Processing);
        assert!(scene.terrain().is_some());
    }

    #[test]
    fn test_placement_gated_on_both_assets() {
        let mut scene = manager();

        // Blades arriving without terrain must not place anything
        scene.inject(LoadEvent::Blades(test_blade()));
        assert!(scene.instances().is_none());
        assert_eq!(scene.state(), LifecycleState::Loading);

        let update = scene.inject(LoadEvent::Terrain(test_terrain()));
        assert_eq!(update, Some(SceneUpdate::TerrainReady));

        let update = scene.inject(LoadEvent::Blades(test_blade()));
        assert_eq!(update, Some(SceneUpdate::GrassReady));
        assert!(scene.instances().is_some());
    }

    #[test]
    fn test_instance_count_matches_config() {
        let mut scene = manager();
        scene.inject(LoadEvent::Terrain(test_terrain()));
        scene.inject(LoadEvent::Blades(test_blade()));
        assert_eq!(scene.instances().unwrap().len(), 100);
        assert_eq!(scene.state(), LifecycleState::Ready);
    }

    #[test]
    fn test_terrain_and_blade_scaling_applied() {
        let mut scene = manager();
        scene.inject(LoadEvent::Terrain(test_terrain()));
        // terrain_scale = 3: the 10-unit quad becomes 30 units
        assert_eq!(scene.terrain().unwrap().positions[1][0], 30.0);

        scene.inject(LoadEvent::Blades(test_blade()));
        // blade_scale = 5: the 1-unit-tall blade becomes 5 units
        assert_eq!(scene.blade_geometry().unwrap().positions[2][1], 5.0);
    }

    #[test]
    fn test_failed_stage_leaves_state() {
        let mut scene = manager();
        scene.inject(LoadEvent::Failed {
            stage: LoadStage::Terrain,
            message: "connection refused".into(),
        });
        assert_eq!(scene.state(), LifecycleState::Loading);
        assert!(scene.instances().is_none());
    }

    #[test]
    fn test_stop_halts_updates() {
        let mut scene = manager();
        let input = InputState::new();
        scene.update(&input, 0.016);
        let frozen = scene.time();

        scene.stop();
        assert!(scene.is_stopped());
        scene.update(&input, 1.0);
        assert_eq!(scene.time(), frozen);

        // No transition out of Stopped
        scene.inject(LoadEvent::Terrain(test_terrain()));
        assert_eq!(scene.state(), LifecycleState::Stopped);
    }
}
