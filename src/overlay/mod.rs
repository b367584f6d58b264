use std::time::{Duration, Instant};

use raster::StripChartRaster;
use samples::SampleStore;

pub mod raster;
pub mod samples;

pub const CHART_WIDTH: usize = 500;
pub const CHART_HEIGHT: usize = 100;
pub const FRAME_SCALE: f32 = 10.0;

pub const WINDOW_TITLE: &str = "Physics Graph";

/// Drives the host's tick/frame callbacks into the sample store and turns
/// newly written samples into incremental raster updates. Recording always
/// runs; rasterization only runs while the overlay is visible.
pub struct OverlayController {
    samples: SampleStore,

    wall_chart: StripChartRaster,
    sim_chart: StripChartRaster,
    frame_chart: StripChartRaster,

    // Render frames observed since the last tick boundary.
    frame_accumulator: u32,
    last_tick: Instant,

    // Last cursor position whose columns have been rasterized.
    last_rendered: usize,
    visible: bool,
}

impl OverlayController {
    pub fn new() -> Self {
        Self {
            samples: SampleStore::new(CHART_WIDTH),
            // The wall-clock chart gets double height so spikes past one
            // sim step stay readable.
            wall_chart: StripChartRaster::new(CHART_WIDTH, CHART_HEIGHT * 2, raster::RED, 1.0),
            sim_chart: StripChartRaster::new(CHART_WIDTH, CHART_HEIGHT, raster::GREEN, 1.0),
            frame_chart: StripChartRaster::new(CHART_WIDTH, CHART_HEIGHT, raster::BLUE, FRAME_SCALE),
            frame_accumulator: 0,
            last_tick: Instant::now(),
            last_rendered: 0,
            visible: false,
        }
    }

    /// Fixed-timestep callback: records the wall-clock time since the
    /// previous tick, the host's configured sim step, and the number of
    /// render frames seen since the last tick.
    pub fn on_tick(&mut self, sim_step: Duration) {
        let now = Instant::now();
        let wall_ms = (now - self.last_tick).as_secs_f32() * 1000.0;
        self.last_tick = now;

        let sim_ms = sim_step.as_secs_f32() * 1000.0;

        self.samples
            .record_tick(wall_ms, sim_ms, self.frame_accumulator as f32);
        self.frame_accumulator = 0;
    }

    /// Render-frame callback, cadence independent of ticks.
    pub fn on_frame(&mut self) {
        self.frame_accumulator += 1;
    }

    /// Flips Hidden/Visible. The caller is responsible for edge-triggering
    /// (one physical keypress, one call).
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Catch-up pass, run once per render frame. Rasterizes every column
    /// written since the last pass and advances the render cursor. Returns
    /// true when any chart changed and the GUI should re-upload and redraw.
    /// Hidden overlays skip the rasterization entirely while the store keeps
    /// accumulating underneath.
    pub fn render_pass(&mut self) -> bool {
        if !self.visible {
            return false;
        }

        let cursor = self.samples.cursor();

        if self.last_rendered == cursor {
            return false;
        }

        let from = self.last_rendered;

        self.wall_chart
            .update_columns(self.samples.wall_ms(), from, cursor);
        self.sim_chart
            .update_columns(self.samples.sim_ms(), from, cursor);
        self.frame_chart
            .update_columns(self.samples.frames(), from, cursor);

        self.last_rendered = cursor;

        true
    }

    pub fn wall_chart(&self) -> &StripChartRaster {
        &self.wall_chart
    }

    pub fn sim_chart(&self) -> &StripChartRaster {
        &self.sim_chart
    }

    pub fn frame_chart(&self) -> &StripChartRaster {
        &self.frame_chart
    }

    pub fn wall_chart_mut(&mut self) -> &mut StripChartRaster {
        &mut self.wall_chart
    }

    pub fn sim_chart_mut(&mut self) -> &mut StripChartRaster {
        &mut self.sim_chart
    }

    pub fn frame_chart_mut(&mut self) -> &mut StripChartRaster {
        &mut self.frame_chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(20);

    fn bar_height(raster: &StripChartRaster, x: usize) -> usize {
        (0..raster.height())
            .take_while(|&row| raster.pixel(x, row) != raster::BLANK)
            .count()
    }

    #[test]
    fn frame_accumulator_resets_at_tick_boundary() {
        let mut overlay = OverlayController::new();

        for _ in 0..3 {
            overlay.on_frame();
        }
        overlay.on_tick(STEP);

        overlay.on_frame();
        overlay.on_tick(STEP);

        assert_eq!(overlay.samples.frames()[0], 3.0);
        assert_eq!(overlay.samples.frames()[1], 1.0);
    }

    #[test]
    fn hidden_render_pass_leaves_charts_untouched() {
        let mut overlay = OverlayController::new();

        overlay.on_tick(STEP);
        overlay.on_tick(STEP);

        assert!(!overlay.render_pass());
        assert_eq!(overlay.last_rendered, 0);
        assert!(!overlay.wall_chart_mut().take_dirty());
    }

    #[test]
    fn hidden_ticks_are_drawn_by_the_first_visible_pass() {
        let mut overlay = OverlayController::new();

        // Accumulate while hidden, then flip visible; the first pass must
        // catch up all of it.
        let hidden_ticks = 7;
        for _ in 0..hidden_ticks {
            overlay.on_frame();
            overlay.on_frame();
            overlay.on_tick(STEP);
        }

        overlay.toggle();
        assert!(overlay.render_pass());
        assert_eq!(overlay.last_rendered, hidden_ticks);

        for x in 0..hidden_ticks {
            assert_eq!(bar_height(&overlay.sim_chart, x), 21);
            assert_eq!(bar_height(&overlay.frame_chart, x), 21);
        }
    }

    #[test]
    fn render_pass_without_new_ticks_is_a_noop() {
        let mut overlay = OverlayController::new();
        overlay.toggle();

        overlay.on_tick(STEP);
        assert!(overlay.render_pass());
        assert!(overlay.wall_chart_mut().take_dirty());

        assert!(!overlay.render_pass());
        assert!(!overlay.wall_chart_mut().take_dirty());
    }

    #[test]
    fn charts_advance_in_lockstep_across_the_ring_seam() {
        let mut overlay = OverlayController::new();
        overlay.toggle();

        for _ in 0..CHART_WIDTH - 2 {
            overlay.on_frame();
            overlay.on_tick(STEP);
        }
        assert!(overlay.render_pass());

        for _ in 0..5 {
            overlay.on_frame();
            overlay.on_tick(STEP);
        }

        // Cursor wrapped from W-2 past the seam to 3; the catch-up range is
        // split in two runs and last_rendered follows it around.
        assert!(overlay.render_pass());
        assert_eq!(overlay.last_rendered, 3);

        assert_eq!(bar_height(&overlay.sim_chart, CHART_WIDTH - 1), 21);
        // One frame per tick, scaled by FRAME_SCALE.
        assert_eq!(bar_height(&overlay.frame_chart, 0), 11);
        assert_eq!(bar_height(&overlay.frame_chart, 1), 11);
    }
}
