//! Lifecycle controller: mount, resize, ticking and teardown.

use std::cell::Cell;
use std::rc::Rc;

use cosmic_field::prelude::*;

const DT: f32 = 1.0 / 60.0;

/// Tick source double that records every request and cancellation.
#[derive(Debug, Default)]
struct RecordingTicker {
    inner: ManualTicker,
    requested: usize,
    cancelled: Vec<TickHandle>,
}

impl TickSource for RecordingTicker {
    fn request_tick(&mut self) -> TickHandle {
        self.requested += 1;
        self.inner.request_tick()
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.cancelled.push(handle);
        self.inner.cancel_tick(handle);
    }

    fn pending(&self) -> usize {
        self.inner.pending()
    }
}

fn config() -> FieldConfig {
    FieldConfig::new()
        .with_star_count(30)
        .with_wave_count(2)
        .with_cloud_count(2)
        .with_seed(17)
}

fn mounted(width: f32, height: f32) -> FieldController<Raster, ManualTicker> {
    let mut controller = FieldController::new(config(), ManualTicker::new());
    controller.mount(Some(Raster::new(0, 0)), Viewport::new(width, height));
    controller
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_start_then_stop_leaves_nothing_pending() {
    let mut controller = FieldController::new(config(), RecordingTicker::default());
    controller.mount(Some(Raster::new(0, 0)), Viewport::new(800.0, 600.0));
    assert_eq!(controller.ticker().pending(), 1);

    controller.unmount();
    assert_eq!(controller.ticker().pending(), 0);
    assert_eq!(controller.ticker().requested, 1);
    assert_eq!(controller.ticker().cancelled.len(), 1);
    assert_eq!(controller.state(), ControllerState::Stopped);
    assert!(controller.field().is_none());
}

#[test]
fn test_stop_after_running_frames() {
    let mut controller = mounted(800.0, 600.0);
    controller.run_frames(10, DT);
    let surface = controller.unmount();
    assert!(surface.is_some());
    assert_eq!(controller.ticker().pending(), 0);
    assert_eq!(controller.run_frames(10, DT), 0);
}

#[test]
fn test_unmount_before_mount_is_harmless() {
    let mut controller: FieldController<Raster, ManualTicker> =
        FieldController::new(config(), ManualTicker::new());
    assert!(controller.unmount().is_none());
    assert_eq!(controller.state(), ControllerState::Uninitialized);
}

#[test]
fn test_remount_after_stop() {
    let mut controller = mounted(800.0, 600.0);
    let raster = controller.unmount();
    controller.mount(raster, Viewport::new(800.0, 600.0));
    assert_eq!(controller.state(), ControllerState::Running);
    assert_eq!(controller.ticker().pending(), 1);
    assert_eq!(controller.run_frames(2, DT), 2);
}

#[test]
fn test_remount_after_paused_stop_restarts_chain() {
    let mut controller = mounted(800.0, 600.0);
    controller.pause();
    let raster = controller.unmount();
    assert!(!controller.is_paused());

    controller.mount(raster, Viewport::new(800.0, 600.0));
    assert_eq!(controller.state(), ControllerState::Running);
    assert_eq!(controller.ticker().pending(), 1);
    assert_eq!(controller.run_frames(3, DT), 3);
}

#[test]
fn test_pause_before_mount_does_not_block_start() {
    let mut controller: FieldController<Raster, ManualTicker> =
        FieldController::new(config(), ManualTicker::new());
    controller.pause();
    controller.mount(Some(Raster::new(0, 0)), Viewport::new(800.0, 600.0));
    assert_eq!(controller.state(), ControllerState::Running);
    assert_eq!(controller.ticker().pending(), 1);
    assert_eq!(controller.run_frames(2, DT), 2);
}

// ============================================================================
// Ticks
// ============================================================================

#[test]
fn test_stale_handle_ignored() {
    let mut controller = mounted(800.0, 600.0);
    let live = controller.pending_tick().unwrap();
    let stale = TickHandle::new(live.id() + 1000);
    assert!(!controller.on_tick(stale, DT));
    assert_eq!(controller.field().unwrap().frame(), 0);

    assert!(controller.on_tick(live, DT));
    // The same handle cannot run twice.
    assert!(!controller.on_tick(live, DT));
    assert_eq!(controller.field().unwrap().frame(), 1);
}

#[test]
fn test_tick_after_unmount_ignored() {
    let mut controller = mounted(800.0, 600.0);
    let handle = controller.pending_tick().unwrap();
    controller.unmount();
    assert!(!controller.on_tick(handle, DT));
}

#[test]
fn test_reduced_motion_paints_once() {
    let mut controller = FieldController::new(config().with_reduced_motion(true), ManualTicker::new());
    controller.mount(Some(Raster::new(0, 0)), Viewport::new(400.0, 300.0));
    assert_eq!(controller.state(), ControllerState::Running);
    assert_eq!(controller.ticker().pending(), 0);
    let raster = controller.surface().unwrap();
    // Background wash is opaque everywhere.
    assert!(raster.pixels().iter().all(|p| p.w > 0.99));
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_taller_grows_canvas_and_reseeds_stars() {
    let mut controller = mounted(1000.0, 600.0);
    let before = controller.field().unwrap().stars.clone();

    controller.resize(Viewport::new(1000.0, 1200.0));
    assert_eq!(controller.canvas_height(), 1200.0);
    assert_eq!(controller.surface().unwrap().height(), 1200);
    let field = controller.field().unwrap();
    assert_eq!(field.bounds().height, 1200.0);
    assert_ne!(field.stars, before);
    assert_eq!(field.stars.len(), before.len());
}

#[test]
fn test_resize_shorter_keeps_canvas() {
    let mut controller = mounted(1000.0, 900.0);
    let before = controller.field().unwrap().stars.clone();

    controller.resize(Viewport::new(1000.0, 500.0));
    assert_eq!(controller.canvas_height(), 900.0);
    assert_eq!(controller.viewport().height, 500.0);
    assert_eq!(controller.field().unwrap().stars, before);
}

#[test]
fn test_resize_width_reseeds_inside_bounds() {
    let mut controller = mounted(1200.0, 700.0);
    controller.resize(Viewport::new(900.0, 700.0));
    let field = controller.field().unwrap();
    assert_eq!(field.bounds().width, 900.0);
    assert!(field.stars.iter().all(|s| s.position.x <= 900.0));
    assert_eq!(controller.surface().unwrap().width(), 900);
}

#[test]
fn test_resize_across_compact_threshold() {
    let mut controller = mounted(1200.0, 700.0);
    assert_eq!(controller.field().unwrap().stars.len(), 30);

    controller.resize(Viewport::new(500.0, 700.0));
    let field = controller.field().unwrap();
    assert!(field.is_compact());
    assert_eq!(field.stars.len(), 15);
    assert_eq!(field.waves.len(), 1);
    assert_eq!(field.clouds.len(), 1);
}

#[test]
fn test_resize_keeps_single_pending_tick() {
    let mut controller = mounted(1000.0, 600.0);
    for height in [700.0, 800.0, 650.0] {
        controller.resize(Viewport::new(1000.0, height));
    }
    assert_eq!(controller.ticker().pending(), 1);
}

#[test]
fn test_content_height_provider_read_on_resize() {
    let content = Rc::new(Cell::new(500.0_f32));
    let provider = content.clone();
    let mut controller = FieldController::new(config(), ManualTicker::new())
        .with_content_height(move || provider.get());
    controller.mount(Some(Raster::new(0, 0)), Viewport::new(1000.0, 600.0));
    assert_eq!(controller.canvas_height(), 600.0);

    content.set(2000.0);
    controller.resize(Viewport::new(1000.0, 600.0));
    assert_eq!(controller.canvas_height(), 2000.0);
    assert_eq!(controller.field().unwrap().bounds().height, 2000.0);
}

#[test]
fn test_resize_before_mount_only_records_viewport() {
    let mut controller: FieldController<Raster, ManualTicker> =
        FieldController::new(config(), ManualTicker::new());
    controller.resize(Viewport::new(640.0, 480.0));
    assert_eq!(controller.state(), ControllerState::Uninitialized);
    assert_eq!(controller.ticker().pending(), 0);
}
