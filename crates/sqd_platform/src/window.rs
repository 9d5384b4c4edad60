use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Hide the OS cursor so the demo can draw its own icon.
    pub hide_cursor: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Square Demo".to_string(),
            width: 1280,
            height: 720,
            resizable: false,
            hide_cursor: true,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, PlatformError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_resizable(config.resizable)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop.create_window(attrs)?;
    if config.hide_cursor {
        window.set_cursor_visible(false);
    }
    log::info!(
        "Window '{}' created ({}x{} logical, scale {:.2})",
        config.title,
        config.width,
        config.height,
        window.scale_factor()
    );
    Ok(Arc::new(window))
}
