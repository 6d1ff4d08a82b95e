//! Meadow - stylized grass field scene

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId, WindowAttributes},
};

use meadow::core::{error::Error, input::InputState, logging, time::FrameTimer};
use meadow::render::{
    buffer::{Globals, GlobalsBuffer, MeshBuffer},
    context::GpuContext,
    pipeline::{GrassDraw, GrassPipeline, ShadowPipeline, SkyPipeline, TerrainMaterial, TerrainPipeline},
    texture::{DepthTexture, SceneTexture, ShadowMap},
};
use meadow::scene::{LifecycleState, SceneConfig, SceneManager, SceneUpdate};

/// GPU-side resources mirroring the scene state. Terrain and grass slots
/// stay empty until the corresponding assets finish loading.
struct RenderResources {
    globals: GlobalsBuffer,
    depth: DepthTexture,
    shadow_map: ShadowMap,
    shadow_pipeline: ShadowPipeline,
    sky_pipeline: SkyPipeline,
    sky_mesh: MeshBuffer,
    terrain_pipeline: TerrainPipeline,
    grass_pipeline: GrassPipeline,
    terrain_mesh: Option<MeshBuffer>,
    grass_draw: Option<GrassDraw>,
    grass_textures: Option<wgpu::BindGroup>,
}

impl RenderResources {
    fn new(gpu: &GpuContext, scene: &SceneManager) -> Self {
        let device = &gpu.device;
        let globals = GlobalsBuffer::new(device);
        let depth = DepthTexture::new(device, gpu.config.width, gpu.config.height);
        let shadow_map = ShadowMap::new(device, scene.lights.sun.shadow.map_size);

        let shadow_pipeline = ShadowPipeline::new(device, globals.bind_group_layout());

        let sky_pipeline = SkyPipeline::new(device, gpu.format(), globals.bind_group_layout());
        sky_pipeline.update_params(&gpu.queue, &scene.sky.params);
        let sky_mesh = MeshBuffer::sky(device, &scene.sky.positions, &scene.sky.indices);

        let terrain_pipeline = TerrainPipeline::new(
            device,
            gpu.format(),
            globals.bind_group_layout(),
            shadow_map.bind_group_layout(),
        );
        terrain_pipeline.update_material(
            &gpu.queue,
            &TerrainMaterial::new(scene.config().terrain_color),
        );

        let grass_pipeline = GrassPipeline::new(
            device,
            gpu.format(),
            globals.bind_group_layout(),
            shadow_map.bind_group_layout(),
        );

        Self {
            globals,
            depth,
            shadow_map,
            shadow_pipeline,
            sky_pipeline,
            sky_mesh,
            terrain_pipeline,
            grass_pipeline,
            terrain_mesh: None,
            grass_draw: None,
            grass_textures: None,
        }
    }

    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTexture::new(device, width, height);
    }

    /// Build GPU resources for assets the scene just finished absorbing
    fn apply_scene_update(&mut self, gpu: &GpuContext, scene: &SceneManager, update: SceneUpdate) {
        match update {
            SceneUpdate::TexturesReady => {
                if let (Some(noise), Some(alpha)) = (scene.noise_texture(), scene.alpha_texture()) {
                    let noise = SceneTexture::new(&gpu.device, &gpu.queue, noise, "noise_texture");
                    let alpha = SceneTexture::new(&gpu.device, &gpu.queue, alpha, "alpha_texture");
                    self.grass_textures = Some(self.grass_pipeline.create_texture_bind_group(
                        &gpu.device,
                        &noise,
                        &alpha,
                    ));
                }
            }
            SceneUpdate::TerrainReady => {
                if let Some(terrain) = scene.terrain() {
                    self.terrain_mesh = Some(MeshBuffer::terrain(&gpu.device, terrain));
                }
            }
            SceneUpdate::GrassReady => {
                if let (Some(blade), Some(instances)) = (scene.blade_geometry(), scene.instances())
                {
                    let mesh = MeshBuffer::grass_blade(&gpu.device, blade);
                    self.grass_draw = Some(GrassDraw::new(&gpu.device, mesh, instances));
                }
            }
        }
    }

    /// Render one frame: shadow pass, then sky, terrain, and grass
    fn render(&mut self, gpu: &GpuContext, scene: &SceneManager) -> Result<(), Error> {
        let config = scene.config();
        let globals = Globals::new(
            &scene.camera,
            &scene.lights,
            config.fog_color,
            config.fog_density,
        );
        self.globals.update(&gpu.queue, &globals);
        self.grass_pipeline.update_params(&gpu.queue, &scene.grass_params());

        let frame = gpu.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        if let Some(terrain) = &self.terrain_mesh {
            self.shadow_pipeline.render(
                &mut encoder,
                &self.shadow_map,
                self.globals.bind_group(),
                &[terrain],
            );
        }

        {
            let [r, g, b] = config.fog_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("forward_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.depth.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            self.sky_pipeline
                .draw(&mut pass, self.globals.bind_group(), &self.sky_mesh);

            if let Some(terrain) = &self.terrain_mesh {
                self.terrain_pipeline.draw(
                    &mut pass,
                    self.globals.bind_group(),
                    self.shadow_map.bind_group(),
                    terrain,
                );
            }

            if let (Some(grass), Some(textures)) = (&self.grass_draw, &self.grass_textures) {
                self.grass_pipeline.draw(
                    &mut pass,
                    self.globals.bind_group(),
                    textures,
                    self.shadow_map.bind_group(),
                    grass,
                );
            }
        }

        gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Hosts the scene in a native window: creates the GPU context once,
/// forwards resize events, and halts the render loop on close.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    resources: Option<RenderResources>,
    scene: Option<SceneManager>,
    input: InputState,
    timer: FrameTimer,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            resources: None,
            scene: None,
            input: InputState::new(),
            timer: FrameTimer::new(),
        }
    }

    fn frame(&mut self) {
        let (Some(gpu), Some(scene), Some(resources)) =
            (self.gpu.as_ref(), self.scene.as_mut(), self.resources.as_mut())
        else {
            return;
        };
        if scene.is_stopped() {
            return;
        }

        self.timer.tick();
        let updates = scene.update(&self.input, self.timer.delta_secs());
        for update in updates {
            resources.apply_scene_update(gpu, scene, update);
        }

        // Hand the camera to the user once the field is fully assembled
        if scene.state() == LifecycleState::Ready && !scene.controls.enabled {
            log::info!("Scene ready; orbit controls enabled");
            scene.controls.enabled = true;
        }

        if let Err(e) = resources.render(gpu, scene) {
            log::warn!("Frame skipped: {e}");
        }
        self.input.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = WindowAttributes::default()
            .with_title("Meadow")
            .with_inner_size(PhysicalSize::new(1280u32, 720u32));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("Failed to create GPU context: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let mut scene = match SceneManager::new(SceneConfig::default(), aspect) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("Failed to create scene: {e}");
                event_loop.exit();
                return;
            }
        };
        scene.start_loading();

        self.resources = Some(RenderResources::new(&gpu, &scene));
        self.gpu = Some(gpu);
        self.scene = Some(scene);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                    if let Some(resources) = self.resources.as_mut() {
                        resources.resize(&gpu.device, size.width.max(1), size.height.max(1));
                    }
                }
                if let Some(scene) = self.scene.as_mut() {
                    scene.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Error> {
    logging::init();
    log::info!("Starting Meadow");

    let event_loop = EventLoop::new()
        .map_err(|e| Error::Window(format!("Failed to create event loop: {e}")))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Window(format!("Event loop error: {e}")))?;

    Ok(())
}
