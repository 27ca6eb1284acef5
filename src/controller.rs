//! Lifecycle controller.
//!
//! [`FieldController`] owns the drawing surface, the [`FieldState`] and the
//! single pending tick. It is the only writer of field state: hosts forward
//! mount, resize, tick and unmount events and the controller serializes them.
//!
//! # States
//!
//! | From            | Event                   | To              |
//! |-----------------|-------------------------|-----------------|
//! | `Uninitialized` | `mount` with a surface  | `Running`       |
//! | `Uninitialized` | `mount` without surface | `Uninitialized` |
//! | `Running`       | `resize`                | `Running`       |
//! | `Running`       | `unmount`               | `Stopped`       |
//! | `Stopped`       | `mount` with a surface  | `Running`       |
//!
//! At most one tick is pending at any time. Ticks whose handle does not match
//! the pending one (cancelled, or issued before a remount) are ignored.
//!
//! # Example
//!
//! ```ignore
//! let mut controller = FieldController::new(FieldConfig::new(), ManualTicker::new());
//! controller.mount(Some(Raster::new(0, 0)), Viewport::new(1280.0, 720.0));
//! controller.run_frames(60, 1.0 / 60.0);
//! controller.unmount();
//! assert_eq!(controller.ticker().pending(), 0);
//! ```

use crate::compositor::composite;
use crate::config::FieldConfig;
use crate::field::{Bounds, FieldState};
use crate::raster::Surface;
use crate::simulation::step;
use crate::ticker::{ManualTicker, TickHandle, TickSource};
use log::{debug, info};

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Running,
    Stopped,
}

/// Visible window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Drives one field: sizing, seeding, the frame chain and teardown.
pub struct FieldController<S: Surface, T: TickSource> {
    config: FieldConfig,
    ticker: T,
    surface: Option<S>,
    field: Option<FieldState>,
    state: ControllerState,
    pending: Option<TickHandle>,
    /// Height of the content the field sits behind.
    content_height: Box<dyn Fn() -> f32>,
    viewport: Viewport,
    canvas_height: f32,
    paused: bool,
}

impl<S: Surface, T: TickSource> FieldController<S, T> {
    pub fn new(config: FieldConfig, ticker: T) -> Self {
        Self {
            config,
            ticker,
            surface: None,
            field: None,
            state: ControllerState::Uninitialized,
            pending: None,
            content_height: Box::new(|| 0.0),
            viewport: Viewport::new(0.0, 0.0),
            canvas_height: 0.0,
            paused: false,
        }
    }

    /// Supply the content height. The canvas is never shorter than this.
    pub fn with_content_height(mut self, provider: impl Fn() -> f32 + 'static) -> Self {
        self.content_height = Box::new(provider);
        self
    }

    /// Size the surface, seed all pools, paint the first frame and start the
    /// frame chain.
    ///
    /// Without a surface this is a no-op and the controller stays where it
    /// was. Mounting while running is ignored.
    pub fn mount(&mut self, surface: Option<S>, viewport: Viewport) {
        if self.state == ControllerState::Running {
            debug!("Field already running; mount ignored");
            return;
        }
        let Some(mut surface) = surface else {
            debug!("No drawing surface; field not started");
            return;
        };

        self.viewport = viewport;
        self.canvas_height = viewport.height.max((self.content_height)());
        surface.resize(viewport.width as u32, self.canvas_height as u32);

        let bounds = Bounds::new(viewport.width, self.canvas_height);
        let compact = self.config.is_compact(viewport.width);
        let field = FieldState::new(&self.config, bounds, compact);
        composite(&field, &mut surface);

        self.surface = Some(surface);
        self.field = Some(field);
        self.state = ControllerState::Running;
        info!(
            "Field mounted at {}x{} (canvas height {})",
            viewport.width, viewport.height, self.canvas_height
        );
        self.schedule();
    }

    /// Adopt a new viewport.
    ///
    /// The canvas height only ever grows. Stars are reseeded when the canvas
    /// grew or the width changed; crossing the compact threshold reseeds every
    /// fixed pool. Waves and clouds otherwise heal through respawn and wrap.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.state != ControllerState::Running {
            self.viewport = viewport;
            return;
        }
        let (Some(field), Some(surface)) = (self.field.as_mut(), self.surface.as_mut()) else {
            return;
        };

        let canvas_height = self
            .canvas_height
            .max(viewport.height)
            .max((self.content_height)());
        let grew = canvas_height > self.canvas_height;
        let width_changed = viewport.width != self.viewport.width;
        let compact = self.config.is_compact(viewport.width);
        let compact_changed = compact != field.is_compact();

        self.viewport = viewport;
        self.canvas_height = canvas_height;

        if !(grew || width_changed || compact_changed) {
            return;
        }

        surface.resize(viewport.width as u32, canvas_height as u32);
        field.set_bounds(Bounds::new(viewport.width, canvas_height), compact);
        if compact_changed {
            field.reseed_pools();
        } else {
            field.reseed_stars();
        }
        composite(field, surface);
        debug!(
            "Resized to {}x{} (canvas height {})",
            viewport.width, viewport.height, canvas_height
        );
    }

    /// Advance and paint one frame for `handle`, then request the next.
    ///
    /// Returns `false` (doing nothing) for a handle that is not the pending one.
    pub fn on_tick(&mut self, handle: TickHandle, dt: f32) -> bool {
        if self.state != ControllerState::Running || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        let (Some(field), Some(surface)) = (self.field.as_mut(), self.surface.as_mut()) else {
            return false;
        };
        step(field, dt);
        composite(field, surface);
        self.schedule();
        true
    }

    /// Cancel the pending tick and hold the frame chain. Field state is kept.
    ///
    /// Only a running field can be paused.
    pub fn pause(&mut self) {
        if self.paused || self.state != ControllerState::Running {
            return;
        }
        self.paused = true;
        self.cancel_pending();
        debug!("Field paused");
    }

    /// Restart the frame chain after [`pause`](Self::pause).
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.schedule();
        debug!("Field resumed");
    }

    /// Cancel the pending tick and drop the field. Returns the surface.
    pub fn unmount(&mut self) -> Option<S> {
        self.cancel_pending();
        self.paused = false;
        self.field = None;
        if self.state == ControllerState::Running {
            self.state = ControllerState::Stopped;
            info!("Field unmounted");
        }
        self.surface.take()
    }

    fn schedule(&mut self) {
        if self.state != ControllerState::Running
            || self.paused
            || self.config.reduced_motion
            || self.pending.is_some()
        {
            return;
        }
        self.pending = Some(self.ticker.request_tick());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.ticker.cancel_tick(handle);
        }
    }

    // ========== Accessors ==========

    #[inline]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> Option<&FieldState> {
        self.field.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Full canvas height: the taller of viewport and content.
    pub fn canvas_height(&self) -> f32 {
        self.canvas_height
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl<S: Surface> FieldController<S, ManualTicker> {
    /// Fire up to `n` ticks with a fixed `dt`. Returns how many frames ran.
    pub fn run_frames(&mut self, n: usize, dt: f32) -> usize {
        let mut ran = 0;
        for _ in 0..n {
            let Some(handle) = self.ticker.fire() else {
                break;
            };
            if self.on_tick(handle, dt) {
                ran += 1;
            }
        }
        ran
    }
}
