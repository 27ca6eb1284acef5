use std::sync::Arc;

use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window, WindowId, WindowLevel},
};

use super::presenter::Presenter;
use super::HostOptions;
use crate::clock::FrameClock;
use crate::config::FieldConfig;
use crate::controller::{FieldController, Viewport};
use crate::error::HostError;
use crate::raster::Raster;
use crate::ticker::{TickHandle, TickSource};

/// Pixels scrolled per wheel line.
const LINE_HEIGHT: f32 = 48.0;

/// Tick source backed by winit redraw requests.
///
/// Requesting a tick asks the window for a redraw; the next
/// `RedrawRequested` claims the pending handle. Redraws the OS sends on its
/// own find nothing pending and only re-present.
#[derive(Debug, Default)]
pub struct WinitTicker {
    window: Option<Arc<Window>>,
    next_id: u64,
    pending: Option<TickHandle>,
}

impl WinitTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }

    /// Claim the pending tick, if any.
    pub fn take_due(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }
}

impl TickSource for WinitTicker {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        self.pending = Some(handle);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn pending(&self) -> usize {
        usize::from(self.pending.is_some())
    }
}

pub(crate) struct FieldApp {
    config: FieldConfig,
    options: HostOptions,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    controller: Option<FieldController<Raster, WinitTicker>>,
    clock: FrameClock,
    scroll: f32,
    /// First fatal error; returned after the event loop exits.
    pub(crate) error: Option<HostError>,
}

impl FieldApp {
    pub(crate) fn new(config: FieldConfig, options: HostOptions) -> Self {
        Self {
            config,
            options,
            window: None,
            presenter: None,
            controller: None,
            clock: FrameClock::new(),
            scroll: 0.0,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HostError> {
        let mut attrs = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.options.width, self.options.height));
        if self.options.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        if self.options.behind {
            attrs = attrs
                .with_decorations(false)
                .with_window_level(WindowLevel::AlwaysOnBottom);
        }

        let window = Arc::new(event_loop.create_window(attrs)?);
        if self.options.click_through {
            if let Err(e) = window.set_cursor_hittest(false) {
                warn!("Click-through not supported here: {}", e);
            }
        }

        let presenter = pollster::block_on(Presenter::new(window.clone()))?;
        let max = presenter.max_texture_size() as f32;

        let mut ticker = WinitTicker::new();
        ticker.attach(window.clone());
        let content_height = self.options.content_height.min(max);
        let mut controller = FieldController::new(self.config.clone(), ticker)
            .with_content_height(move || content_height);

        controller.mount(Some(Raster::new(0, 0)), self.viewport_of(&window, max));

        self.window = Some(window);
        self.presenter = Some(presenter);
        self.controller = Some(controller);
        Ok(())
    }

    fn viewport_of(&self, window: &Window, max: f32) -> Viewport {
        let size = window.inner_size();
        Viewport::new((size.width as f32).min(max), (size.height as f32).min(max))
    }

    fn max_scroll(&self) -> f32 {
        self.controller
            .as_ref()
            .map_or(0.0, |c| (c.canvas_height() - c.viewport().height).max(0.0))
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(controller), Some(presenter)) = (self.controller.as_mut(), self.presenter.as_mut())
        else {
            return;
        };

        if let Some(handle) = controller.ticker_mut().take_due() {
            let dt = self.clock.tick();
            controller.on_tick(handle, dt);
        }

        let Some(raster) = controller.surface() else {
            return;
        };
        match presenter.render(raster, self.scroll) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => presenter.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for FieldApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(controller) = &mut self.controller {
                    controller.unmount();
                }
                info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
                let max = self
                    .presenter
                    .as_ref()
                    .map_or(f32::MAX, |p| p.max_texture_size() as f32);
                let viewport = Viewport::new(
                    (size.width as f32).min(max),
                    (size.height as f32).min(max),
                );
                if let Some(controller) = &mut self.controller {
                    controller.resize(viewport);
                }
                self.scroll = self.scroll.min(self.max_scroll());
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::Occluded(occluded) => {
                debug!("Occluded: {}", occluded);
                if let Some(controller) = &mut self.controller {
                    if occluded {
                        self.clock.pause();
                        controller.pause();
                    } else {
                        self.clock.resume();
                        controller.resume();
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.scroll = (self.scroll - lines).clamp(0.0, self.max_scroll());
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winit_ticker_keeps_one_pending() {
        let mut ticker = WinitTicker::new();
        let first = ticker.request_tick();
        assert_eq!(ticker.pending(), 1);
        ticker.cancel_tick(first);
        assert_eq!(ticker.pending(), 0);

        let second = ticker.request_tick();
        assert_ne!(first, second);
        // A stale handle does not cancel the live one.
        ticker.cancel_tick(first);
        assert_eq!(ticker.take_due(), Some(second));
        assert_eq!(ticker.pending(), 0);
    }
}
