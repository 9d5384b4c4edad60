//! Square Demo -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Each redraw runs:
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed the accumulator
//!   2. hotkeys (HUD toggle, FPS cap) -- once per frame
//!   3. `while should_step()` -- move the player in fixed slices, clamp to the window
//!   4. compose HUD text, rebuild the two quads
//!   5. scene pass (player) -> egui pass (HUD) -> cursor pass, present
//!
//! Escape quits straight from the key event, so it works while minimized.
//!
//! Redraws are paced by `FrameLimiter` from `about_to_wait`. The cap only
//! changes how often frames are presented; movement speed is identical at
//! every cap because the simulation always advances in fixed steps.

mod config;
mod cursor;
mod error;
mod hotkeys;
mod player;
#[cfg(test)]
mod replay;

use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use config::{load_config_from_path, load_config_or_default, DemoConfig};
use cursor::CursorTracker;
use error::DemoError;
use hotkeys::read_hotkeys;
use player::{Player, PlayerInput};
use sqd_core::fps_cap::FpsCap;
use sqd_core::input::{InputState, Key, MouseBtn};
use sqd_core::time::{FrameLimiter, FramePacing, SessionClock, TimeState};
use sqd_hud::{HudOverlay, HudSnapshot, HudStyle};
use sqd_platform::PlatformError;
use sqd_render::{
    clear_color, srgb_to_linear, GpuContext, QuadBatch, QuadPipeline, QuadVertex, ScreenCamera,
};

const CONFIG_PATH: &str = "assets/config/demo.json";

/// All mutable demo state. Constructed lazily in `ApplicationHandler::resumed`
/// once the window and GPU surface are available.
struct DemoState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    session: SessionClock,
    limiter: FrameLimiter,
    input: InputState,
    camera: ScreenCamera,
    quad_pipeline: QuadPipeline,
    hud: HudOverlay,

    config: DemoConfig,
    player: Player,
    cursor: CursorTracker,
    fps_cap: FpsCap,

    // The two quads are rebuilt on the CPU each frame, then streamed into
    // these buffers. Buffers grow (power-of-two) but never shrink.
    batch: QuadBatch,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    player_indices: Range<u32>,
    cursor_indices: Range<u32>,
}

impl DemoState {
    fn new(
        window: Arc<Window>,
        config: DemoConfig,
        session: SessionClock,
    ) -> Result<Self, DemoError> {
        let gpu = GpuContext::new(window.clone(), config.vsync)?;
        let quad_pipeline = QuadPipeline::new(&gpu.device, gpu.surface_format);
        let hud = HudOverlay::new(
            &gpu.device,
            gpu.surface_format,
            &window,
            HudStyle {
                font_size: config.hud.font_size,
                ..HudStyle::default()
            },
            config.hud.visible,
        );

        let bounds = logical_size(&window, gpu.size);
        let camera = ScreenCamera::new(bounds.0, bounds.1);
        let player = Player::new(config.player, bounds);
        let fps_cap = config.fps_cap();
        let limiter = FrameLimiter::new(fps_cap.current(), Instant::now());

        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            quad_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut state = Self {
            window,
            gpu,
            time: TimeState::new(),
            session,
            limiter,
            input: InputState::new(),
            camera,
            quad_pipeline,
            hud,
            config,
            player,
            cursor: CursorTracker::new(),
            fps_cap,
            batch: QuadBatch::new(),
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            player_indices: 0..0,
            cursor_indices: 0..0,
        };
        state.ensure_mesh_capacity(8, 12);
        Ok(state)
    }

    fn bounds(&self) -> (f32, f32) {
        logical_size(&self.window, self.gpu.size)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        let bounds = self.bounds();
        self.camera.viewport = bounds;
        self.player.reclamp(bounds);
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );
        log::info!(
            "Resized to {}x{} ({:.0}x{:.0} logical)",
            width,
            height,
            bounds.0,
            bounds.1
        );
    }

    fn handle_hotkeys(&mut self, now: Instant) {
        let actions = read_hotkeys(&self.input, &mut self.fps_cap, self.config.fps_cap_hotkey);
        if actions.toggle_hud {
            self.hud.toggle();
        }
        if let Some(fps) = actions.fps_cap {
            self.limiter.set_fps(fps, now);
            log::info!("FPS limit: {}", self.fps_cap);
        }
    }

    fn hud_snapshot(&self, now: Instant) -> HudSnapshot {
        HudSnapshot {
            fps: self.time.smoothed_fps,
            frame_delta: self.time.frame_delta(),
            fps_cap: self
                .config
                .fps_cap_hotkey
                .then(|| self.fps_cap.label()),
            player_pos: self.player.position(),
            running_for: self.session.elapsed_at(now),
            mouse_pos: self.cursor.position(),
            mouse_held: self.cursor.is_held(),
            hold_time: self.cursor.hold_duration(now),
        }
    }

    fn rebuild_mesh(&mut self) {
        self.batch.clear();
        self.player_indices = self
            .batch
            .push_quad(self.player.rect, srgb_to_linear(self.config.player.color));
        let cursor_color = self.cursor.icon_color(&self.config.cursor);
        self.cursor_indices = self.batch.push_quad(
            self.cursor.icon_rect(self.config.cursor.size),
            srgb_to_linear(cursor_color),
        );

        self.ensure_mesh_capacity(self.batch.vertices.len(), self.batch.indices.len());
        self.gpu.queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&self.batch.vertices),
        );
        self.gpu
            .queue
            .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.batch.indices));
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn draw_quads(&self, render_pass: &mut wgpu::RenderPass<'_>, indices: Range<u32>) {
        render_pass.set_pipeline(&self.quad_pipeline.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(indices, 0, 0..1);
    }

    fn redraw(&mut self) {
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            // Minimized: drop edges so they don't fire on restore.
            self.input.end_frame();
            return;
        }

        self.time.begin_frame();
        let now = Instant::now();
        self.cursor.sync(&self.input, now);
        self.handle_hotkeys(now);

        // Fixed-step simulation phase.
        let bounds = self.bounds();
        let delta = self.time.step_delta();
        while self.time.should_step() {
            let intent = PlayerInput::from_input(&self.input);
            self.player.step(intent, delta, bounds);
        }
        self.time.end_frame();
        // Hotkeys were handled above, so transitions can go regardless of
        // how many steps ran.
        self.input.end_frame();

        // Render phase reads finalized simulation state from this frame.
        self.rebuild_mesh();

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let snapshot = self.hud_snapshot(now);
        let (hud_primitives, hud_textures_delta) = self.hud.prepare(&self.window, &snapshot);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut scene_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(self.config.background)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            self.draw_quads(&mut scene_pass, self.player_indices.clone());
        }

        self.hud.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &hud_primitives,
            &hud_textures_delta,
            &screen_descriptor,
        );

        {
            let mut hud_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("HUD Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.hud
                .paint(&mut hud_pass, &hud_primitives, &screen_descriptor);
        }

        // Cursor goes last so it sits above the HUD text.
        {
            let mut cursor_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cursor Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            self.draw_quads(&mut cursor_pass, self.cursor_indices.clone());
        }

        self.hud.cleanup(&hud_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    config: DemoConfig,
    session: SessionClock,
    state: Option<DemoState>,
    error: Option<DemoError>,
}

impl App {
    fn new(config: DemoConfig, session: SessionClock) -> Self {
        Self {
            config,
            session,
            state: None,
            error: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<DemoState, DemoError> {
        let window = sqd_platform::create_window(event_loop, &self.config.platform_config())?;
        DemoState::new(window, self.config.clone(), self.session)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                log::info!(
                    "Started in {:.2} seconds",
                    self.session.elapsed().as_secs_f64()
                );
                self.state = Some(state);
            }
            Err(err) => {
                log::error!("Startup failed: {err}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match state.limiter.poll(Instant::now()) {
            FramePacing::Ready => {
                event_loop.set_control_flow(ControlFlow::Poll);
                state.window.request_redraw();
            }
            FramePacing::WaitUntil(deadline) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        // The HUD is non-interactive, so egui only needs to observe events.
        state.hud.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.resize(w, h);
                }
            }

            WindowEvent::Focused(false) => {
                state.input.release_all();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(demo_key) = map_key(key_code) {
                        if is_quit(demo_key, event.state) {
                            log::info!("Escape pressed, exiting.");
                            event_loop.exit();
                            return;
                        }
                        match event.state {
                            ElementState::Pressed => state.input.key_down(demo_key),
                            ElementState::Released => state.input.key_up(demo_key),
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(state.window.scale_factor());
                state.input.mouse_position = (logical.x, logical.y);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                if let Some(btn) = map_mouse_button(button) {
                    match button_state {
                        ElementState::Pressed => state.input.mouse_down(btn),
                        ElementState::Released => state.input.mouse_up(btn),
                    }
                }
            }

            WindowEvent::RedrawRequested => state.redraw(),

            _ => {}
        }
    }
}

fn logical_size(window: &Window, physical: (u32, u32)) -> (f32, f32) {
    let scale = window.scale_factor();
    (
        (physical.0 as f64 / scale) as f32,
        (physical.1 as f64 / scale) as f32,
    )
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<QuadVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::Digit1 | KeyCode::Numpad1 => Some(Key::Num1),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn is_quit(key: Key, element_state: ElementState) -> bool {
    key == Key::Escape && element_state == ElementState::Pressed
}

fn map_mouse_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}

fn run(session: SessionClock) -> Result<(), DemoError> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            load_config_from_path(&path)?
        }
        None => load_config_or_default(std::path::Path::new(CONFIG_PATH))?,
    };

    let event_loop = EventLoop::new().map_err(PlatformError::from)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, session);
    event_loop.run_app(&mut app).map_err(PlatformError::from)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    let session = SessionClock::start();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Square Demo starting...");

    let result = run(session);
    log::info!("Ran for {:.2} seconds", session.elapsed().as_secs_f64());
    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(err.exit_code());
    }
}
