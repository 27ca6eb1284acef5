//! Desktop host.
//!
//! Opens a window (optionally borderless, pinned below other windows and
//! transparent to mouse clicks), mounts a [`FieldController`] with a
//! CPU [`Raster`] surface, and presents each composited frame through wgpu.
//!
//! | Event                  | Effect                                        |
//! |------------------------|-----------------------------------------------|
//! | window created         | controller mounted, frame chain started       |
//! | `Resized`              | surface reconfigured, controller resized      |
//! | `Occluded(true/false)` | frame chain paused / resumed                  |
//! | `MouseWheel`           | visible slice of a tall canvas scrolls        |
//! | `CloseRequested`       | controller unmounted, event loop exits        |
//!
//! [`FieldController`]: crate::controller::FieldController
//! [`Raster`]: crate::raster::Raster

mod presenter;
mod shader;
mod window;

pub use presenter::Presenter;
pub use shader::{BlitParams, BLIT_SHADER};
pub use window::WinitTicker;

use crate::config::FieldConfig;
use crate::error::HostError;
use log::info;
use winit::event_loop::{ControlFlow, EventLoop};

/// Window options for [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct HostOptions {
    pub title: String,
    /// Initial logical window size.
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Let mouse input pass through to whatever is underneath.
    pub click_through: bool,
    /// Keep the window below all others, without decorations.
    pub behind: bool,
    /// Height of the content the field sits behind. The canvas is the taller
    /// of this and the window.
    pub content_height: f32,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            title: "Cosmic Field".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            click_through: false,
            behind: false,
            content_height: 0.0,
        }
    }
}

impl HostOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full-screen, non-interactive layer behind every other window.
    pub fn background_layer() -> Self {
        Self {
            fullscreen: true,
            click_through: true,
            behind: true,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_content_height(mut self, height: f32) -> Self {
        self.content_height = height.max(0.0);
        self
    }
}

/// Run the field in a window until it is closed.
pub fn run(config: FieldConfig, options: HostOptions) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    info!("Starting host: {:?}", options);
    let mut app = window::FieldApp::new(config, options);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
