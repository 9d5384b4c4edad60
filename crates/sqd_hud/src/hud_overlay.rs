//! Heads-up display rendered via egui on top of the scene.
//!
//! Integration pattern: egui requires a multi-phase render split because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`, while
//! `begin_render_pass` borrows the encoder. The phases are:
//!
//!   1. `prepare()` -- lay out the HUD text, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! The HUD is purely informational: both text blocks live in non-interactive
//! areas, so egui never steals clicks or key presses from the demo.

use winit::window::Window;

use crate::hud_text::{compose_mouse_lines, compose_status_lines, HudSnapshot};

#[derive(Debug, Clone, Copy)]
pub struct HudStyle {
    pub font_size: f32,
    pub margin: f32,
    /// Distance from the bottom edge up to the top of the mouse block.
    pub mouse_block_offset: f32,
    pub text_color: egui::Color32,
}

impl Default for HudStyle {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            margin: 10.0,
            mouse_block_offset: 120.0,
            text_color: egui::Color32::WHITE,
        }
    }
}

pub struct HudOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub style: HudStyle,
    pub visible: bool,
}

impl HudOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
        style: HudStyle,
        visible: bool,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            style,
            visible,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("HUD: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        snapshot: &HudSnapshot,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let style = self.style;
        let visible = self.visible;
        let mut full_output = self.egui_ctx.run(raw_input, |ctx| {
            if !visible {
                return;
            }
            egui::Area::new(egui::Id::new("hud_status"))
                .fixed_pos(egui::pos2(style.margin, style.margin))
                .interactable(false)
                .show(ctx, |ui| {
                    text_block(ui, &style, &compose_status_lines(snapshot));
                });
            let mouse_origin = mouse_block_origin(&style, ctx.screen_rect().height());
            egui::Area::new(egui::Id::new("hud_mouse"))
                .fixed_pos(mouse_origin)
                .interactable(false)
                .show(ctx, |ui| {
                    text_block(ui, &style, &compose_mouse_lines(snapshot));
                });
        });

        // The native cursor stays hidden; egui would otherwise re-show it.
        full_output.platform_output.cursor_icon = egui::CursorIcon::None;
        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Top-left of the mouse block, `mouse_block_offset` above the bottom edge.
/// Never above the top margin on very short windows.
fn mouse_block_origin(style: &HudStyle, screen_height: f32) -> egui::Pos2 {
    let y = (screen_height - style.mouse_block_offset).max(style.margin);
    egui::pos2(style.margin, y)
}

fn text_block(ui: &mut egui::Ui, style: &HudStyle, lines: &[String]) {
    ui.spacing_mut().item_spacing.y = 0.0;
    for line in lines {
        // Empty labels collapse to zero height; a space keeps the blank row.
        let text = if line.is_empty() { " " } else { line.as_str() };
        ui.label(
            egui::RichText::new(text)
                .size(style.font_size)
                .color(style.text_color),
        );
    }
}
